//! ipindex - a persistent, file-backed index of IPv4 addresses.
//!
//! The index answers two questions about a store of fixed-width text
//! records: record this address, and was this address recorded before.
//!
//! # Features
//!
//! - **Guide tree**: a static binary-search skeleton over `0..=255` decides
//!   the comparison order for every octet, so the persisted shape does not
//!   depend on insertion order
//! - **Tree of trees**: each of the four sections is searched in its own
//!   tree, linked to the next section's tree on a match
//! - **Fixed-width records**: one 51-byte text line per node, addressed by
//!   line number, readable with any text tool
//! - **Append-only growth**: records are created on first use and updated in
//!   place; nothing is ever deleted
//!
//! # Quick Start
//!
//! ```
//! use ipindex::IpIndex;
//! use std::io::Cursor;
//!
//! let mut index = IpIndex::open(Cursor::new(Vec::new()))?;
//! index.write("10.0.0.1")?;
//!
//! assert!(index.find("10.0.0.1").is_ok());
//! assert!(index.find("10.0.0.2").unwrap_err().is_not_found());
//! # Ok::<(), ipindex::Error>(())
//! ```
//!
//! # Building From Access Logs
//!
//! ```ignore
//! use ipindex::{Indexer, IpIndex};
//! use std::fs::{File, OpenOptions};
//! use std::io::BufReader;
//!
//! let store = OpenOptions::new().read(true).write(true).create(true).open("example/2020-10-10.txt")?;
//! let mut indexer = Indexer::new(IpIndex::open(store)?, false);
//! let summary = indexer.index_reader(BufReader::new(File::open("access.log")?))?;
//! println!("{} addresses written", summary.written);
//! ```
//!
//! # Consistency
//!
//! A single writer is assumed. Inserting a record takes two writes (the new
//! record, then the parent's reference); a crash in between leaves an
//! unreachable record behind, which is harmless but never reclaimed.

mod address;
mod error;

pub mod config;
pub mod extract;
pub mod guide;
pub mod index;
pub mod indexer;
pub mod path;
pub mod record;

// Re-export core types
pub use address::{Ipv4Address, SECTIONS};
pub use error::{Error, Result};
pub use guide::GuideTree;
pub use index::{IpIndex, TraversalMode};
pub use path::{Branch, PathStep, SearchPath};
pub use record::{LineStore, Record, RECORD_WIDTH};

// Re-export collaborators
pub use config::{IndexerConfig, SearchConfig};
pub use indexer::{IndexSummary, Indexer};
