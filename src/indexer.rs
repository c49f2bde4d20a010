//! Feeding access logs into an index.

use std::io::{BufRead, Read, Seek, Write};

use crate::extract::extract_ipv4;
use crate::{Error, IpIndex, Result};

/// Counters collected while indexing a log stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexSummary {
    /// Non-blank lines read
    pub lines: u64,
    /// Addresses written (including ones already present)
    pub written: u64,
    /// Lines without a usable address
    pub skipped: u64,
}

/// Writes the first address of every log line into an [`IpIndex`].
pub struct Indexer<S> {
    index: IpIndex<S>,
    strict: bool,
}

impl<S: Read + Write + Seek> Indexer<S> {
    /// Create an indexer over an open index.
    ///
    /// In strict mode a line without a usable address aborts indexing;
    /// otherwise the line is logged and skipped.
    pub fn new(index: IpIndex<S>, strict: bool) -> Self {
        Self { index, strict }
    }

    /// Index every line of `reader`.
    ///
    /// Lines are read as raw bytes; invalid UTF-8 is replaced before
    /// matching, so stray bytes in a request never stop the run.
    pub fn index_reader<R: BufRead>(&mut self, mut reader: R) -> Result<IndexSummary> {
        let mut summary = IndexSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
            if line.trim().is_empty() {
                continue;
            }
            summary.lines += 1;

            match self.index_line(line) {
                Ok(()) => summary.written += 1,
                Err(e @ (Error::InvalidAddress(_) | Error::NoAddress(_))) => {
                    if self.strict {
                        return Err(e);
                    }
                    log::warn!("skipping line {}: {}", summary.lines, e);
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        self.index.flush()?;
        log::info!(
            "indexed {} lines: {} addresses written, {} skipped",
            summary.lines,
            summary.written,
            summary.skipped
        );
        Ok(summary)
    }

    /// Write the first address found in `line`.
    pub fn index_line(&mut self, line: &str) -> Result<()> {
        let address = extract_ipv4(line).ok_or_else(|| Error::NoAddress(line.to_string()))?;
        self.index.write(address)
    }

    /// Get the index being written.
    pub fn index(&self) -> &IpIndex<S> {
        &self.index
    }

    /// Give back the index.
    pub fn into_index(self) -> IpIndex<S> {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LOG: &str = r#"10.0.0.1 - - [10/Oct/2020:13:55:36 +0000] "GET / HTTP/1.1" 200 512
192.168.1.20 - - [10/Oct/2020:13:55:37 +0000] "GET /favicon.ico HTTP/1.1" 404 0

10.0.0.1 - - [10/Oct/2020:13:55:38 +0000] "POST /login HTTP/1.1" 302 0
"#;

    fn indexer(strict: bool) -> Indexer<Cursor<Vec<u8>>> {
        Indexer::new(IpIndex::open(Cursor::new(Vec::new())).unwrap(), strict)
    }

    #[test]
    fn test_index_log() {
        let mut indexer = indexer(false);
        let summary = indexer.index_reader(LOG.as_bytes()).unwrap();
        assert_eq!(
            summary,
            IndexSummary {
                lines: 3,
                written: 3,
                skipped: 0
            }
        );

        let mut index = indexer.into_index();
        assert!(index.contains("10.0.0.1").unwrap());
        assert!(index.contains("192.168.1.20").unwrap());
        assert!(!index.contains("10.0.0.2").unwrap());
    }

    #[test]
    fn test_lenient_skips_bad_lines() {
        let log = "garbage line\n300.1.1.1 - - request\n8.8.8.8 ok\n";
        let mut indexer = indexer(false);
        let summary = indexer.index_reader(log.as_bytes()).unwrap();
        assert_eq!(summary.lines, 3);
        assert_eq!(summary.written, 1);
        assert_eq!(summary.skipped, 2);

        let mut index = indexer.into_index();
        assert!(index.contains("8.8.8.8").unwrap());
    }

    #[test]
    fn test_strict_aborts() {
        let log = "8.8.8.8 ok\nno address\n1.1.1.1 never reached\n";
        let mut indexer = indexer(true);
        assert!(matches!(
            indexer.index_reader(log.as_bytes()),
            Err(Error::NoAddress(_))
        ));

        let mut index = indexer.into_index();
        assert!(index.contains("8.8.8.8").unwrap());
        assert!(!index.contains("1.1.1.1").unwrap());
    }

    #[test]
    fn test_invalid_utf8_does_not_stop_indexing() {
        let mut log = b"8.8.8.8 ok\n".to_vec();
        log.extend_from_slice(b"1.1.1.1 \"GET /\xff\xfe\"\r\n");
        log.extend_from_slice(b"\xff\xfe\xfd\n");
        log.extend_from_slice(b"9.9.9.9 ok");

        let mut indexer = indexer(false);
        let summary = indexer.index_reader(&log[..]).unwrap();
        assert_eq!(summary.lines, 4);
        assert_eq!(summary.written, 3);
        assert_eq!(summary.skipped, 1);

        let mut index = indexer.into_index();
        for addr in ["8.8.8.8", "1.1.1.1", "9.9.9.9"] {
            assert!(index.contains(addr).unwrap(), "{addr}");
        }
    }

    #[test]
    fn test_strict_rejects_out_of_range() {
        let mut indexer = indexer(true);
        assert!(indexer
            .index_reader("256.0.0.1 x\n".as_bytes())
            .unwrap_err()
            .is_validation());
        assert!(indexer.index().is_empty());
    }
}
