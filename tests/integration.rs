//! Integration tests against real index files.

use ipindex::{Error, IndexerConfig, Indexer, IpIndex, RECORD_WIDTH};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::Path;

fn open_rw(path: &Path) -> File {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)
        .unwrap()
}

#[test]
fn test_write_find_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.txt");

    let mut index = IpIndex::open(open_rw(&path)).unwrap();
    index.write("10.0.0.1").unwrap();
    assert!(index.find("10.0.0.1").is_ok());
    assert!(index.find("10.0.0.2").unwrap_err().is_not_found());
    let lines = index.next_line();
    drop(index);

    let len = fs::metadata(&path).unwrap().len();
    assert_eq!(len, lines * RECORD_WIDTH as u64);

    let content = fs::read_to_string(&path).unwrap();
    let first = content.lines().next().unwrap();
    assert!(first.starts_with("128.000.000.000 "));
}

#[test]
fn test_reopen_and_append() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.txt");

    {
        let mut index = IpIndex::open(open_rw(&path)).unwrap();
        index.write("192.168.0.1").unwrap();
        index.write("192.168.0.2").unwrap();
    }

    let before = fs::metadata(&path).unwrap().len();
    {
        let mut index = IpIndex::open(open_rw(&path)).unwrap();
        assert_eq!(index.next_line(), before / RECORD_WIDTH as u64);
        index.write("192.168.0.1").unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), before);

        index.write("172.16.5.4").unwrap();
    }
    assert!(fs::metadata(&path).unwrap().len() > before);

    let mut index = IpIndex::open(open_rw(&path)).unwrap();
    for addr in ["192.168.0.1", "192.168.0.2", "172.16.5.4"] {
        assert!(index.contains(addr).unwrap(), "{addr}");
    }
    assert!(!index.contains("192.168.0.3").unwrap());
}

#[test]
fn test_search_through_read_only_handle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.txt");
    {
        let mut index = IpIndex::open(open_rw(&path)).unwrap();
        index.write("8.8.8.8").unwrap();
    }

    let mut index = IpIndex::open(File::open(&path).unwrap()).unwrap();
    assert!(index.contains("8.8.8.8").unwrap());
    assert!(!index.contains("8.8.4.4").unwrap());
    // The handle can not write, so inserting fails with an I/O error.
    assert!(matches!(index.write("8.8.4.4"), Err(Error::Io(_))));
}

#[test]
fn test_index_access_log() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("access.log");
    {
        let mut log = File::create(&log_path).unwrap();
        writeln!(log, r#"10.0.0.1 - - [10/Oct/2020:13:55:36 +0000] "GET / HTTP/1.1" 200 512"#).unwrap();
        writeln!(log, r#"10.0.0.7 - - [10/Oct/2020:13:55:37 +0000] "GET /a HTTP/1.1" 200 17"#).unwrap();
        writeln!(log, "malformed line without address").unwrap();
        writeln!(log, r#"10.0.0.1 - - [10/Oct/2020:13:55:39 +0000] "GET /b HTTP/1.1" 304 0"#).unwrap();
    }

    let config = IndexerConfig::new(&log_path, "2020-10-10").with_dst_dir(dir.path().join("out"));
    config.validate().unwrap();
    fs::create_dir_all(&config.dst_dir).unwrap();
    let index_path = config.index_path();

    let index = IpIndex::open(open_rw(&index_path)).unwrap();
    let mut indexer = Indexer::new(index, config.strict);
    let summary = indexer
        .index_reader(BufReader::new(File::open(&log_path).unwrap()))
        .unwrap();
    assert_eq!(summary.lines, 4);
    assert_eq!(summary.written, 3);
    assert_eq!(summary.skipped, 1);
    drop(indexer);

    let mut index = IpIndex::open(File::open(&index_path).unwrap()).unwrap();
    assert!(index.contains("10.0.0.1").unwrap());
    assert!(index.contains("10.0.0.7").unwrap());
    assert!(!index.contains("10.0.0.2").unwrap());
}

#[test]
fn test_many_addresses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.txt");
    let mut index = IpIndex::open(open_rw(&path)).unwrap();

    let written: Vec<String> = (0..200u32)
        .map(|i| format!("{}.{}.{}.{}", i % 7, (i * 13) % 256, (i * 31) % 256, (i * 97) % 256))
        .collect();
    for addr in &written {
        index.write(addr).unwrap();
    }
    for addr in &written {
        assert!(index.contains(addr).unwrap(), "{addr}");
    }

    let missing = (0..50u32)
        .map(|i| format!("{}.{}.{}.{}", 100 + i, i, i, i))
        .filter(|addr| !written.contains(addr));
    for addr in missing {
        assert!(!index.contains(&addr).unwrap(), "{addr}");
    }
}
