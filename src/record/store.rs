//! Positioned access to fixed-width records in a seekable store.

use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

use super::format::{Record, MAX_LINE_REF, RECORD_WIDTH};
use crate::{Error, Result};

/// Line-addressed view over a byte store.
///
/// Line `n` lives at byte offset `n * RECORD_WIDTH`. New records are appended
/// at the cursor, which [`open`](Self::open) derives from the store length.
pub struct LineStore<S> {
    inner: S,
    next_line: u64,
}

impl<S: Read + Seek> LineStore<S> {
    /// Wrap a store whose first free line is `next_line`.
    pub fn new(inner: S, next_line: u64) -> Self {
        Self { inner, next_line }
    }

    /// Wrap a store and place the cursor after its last complete record.
    pub fn open(mut inner: S) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        let width = RECORD_WIDTH as u64;
        if len % width != 0 {
            log::warn!(
                "store length {} is not a multiple of {}; trailing partial record will be overwritten",
                len,
                width
            );
        }
        Ok(Self::new(inner, len / width))
    }

    /// First free line.
    pub fn next_line(&self) -> u64 {
        self.next_line
    }

    fn seek_line(&mut self, line: u64) -> Result<()> {
        let offset = line
            .checked_mul(RECORD_WIDTH as u64)
            .ok_or(Error::CapacityExceeded(line))?;
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Read the record at `line`.
    ///
    /// Returns `None` past the end of the store, on a torn record cut short
    /// by the end of the store, or on an empty line.
    pub fn read_record(&mut self, line: u64) -> Result<Option<Record>> {
        self.seek_line(line)?;

        let mut buf = [0u8; RECORD_WIDTH];
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if filled < RECORD_WIDTH {
            if filled > 0 {
                log::debug!("line {} is a torn record of {} bytes", line, filled);
            }
            return Ok(None);
        }

        let raw = &buf[..filled];
        let raw = match raw.iter().position(|&b| b == b'\n') {
            Some(end) => &raw[..end],
            None => raw,
        };
        let text = std::str::from_utf8(raw)
            .map_err(|_| Error::malformed(line, "record is not valid UTF-8"))?;
        let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\0');
        if text.is_empty() {
            return Ok(None);
        }

        Record::decode(line, text).map(Some)
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Give back the underlying store.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Read + Write + Seek> LineStore<S> {
    /// Overwrite the record at its own line.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.seek_line(record.line)?;
        self.inner.write_all(record.encode().as_bytes())?;
        Ok(())
    }

    /// Store `record` at the cursor, assign its line, and advance the cursor.
    pub fn append(&mut self, record: &mut Record) -> Result<()> {
        let line = self.next_line;
        if line > MAX_LINE_REF {
            return Err(Error::CapacityExceeded(line));
        }
        record.line = line;
        self.write_record(record)?;
        self.next_line += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
