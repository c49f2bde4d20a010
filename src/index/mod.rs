//! Persistent IPv4 index.
//!
//! The on-disk structure is a tree of trees: one binary search tree per
//! address section, shaped by the [`GuideTree`], where the node matching a
//! section's octet links to the root of the next section's tree. Records are
//! created lazily as addresses are written and are never removed.
//!
//! Writing and finding share one traversal; they differ only in what happens
//! when the store lacks a record the path needs ([`TraversalMode`]).

use std::io::{Read, Seek, Write};
use std::sync::Arc;

use crate::address::Ipv4Address;
use crate::guide::GuideTree;
use crate::path::{Branch, PathStep, SearchPath};
use crate::record::{LineStore, Record};
use crate::{Error, Result};


/// Line of the section-0 root record.
pub const ROOT_LINE: u64 = 0;

/// What to do when the persisted tree lacks a step of the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalMode {
    /// Report absence; never touch the store.
    Lookup,
    /// Create the missing record, or mark an existing terminal one as real.
    Insert,
}

/// A step the store could not satisfy as-is.
struct Miss<'a> {
    parent: &'a mut Record,
    branch: Branch,
    child: &'a PathStep,
    /// Set when the record exists but is not yet marked real (backfill).
    existing: Option<Record>,
}

/// Persistent, file-backed set of IPv4 addresses.
///
/// # Examples
/// ```
/// use ipindex::IpIndex;
/// use std::io::Cursor;
///
/// let mut index = IpIndex::open(Cursor::new(Vec::new())).unwrap();
/// index.write("10.0.0.1").unwrap();
/// assert!(index.find("10.0.0.1").is_ok());
/// assert!(index.find("10.0.0.2").unwrap_err().is_not_found());
/// ```
pub struct IpIndex<S> {
    store: LineStore<S>,
    guide: Arc<GuideTree>,
}

impl<S: Read + Write + Seek> IpIndex<S> {
    /// Open an index over `store`, resuming after its last record.
    pub fn open(store: S) -> Result<Self> {
        Self::with_guide(store, Arc::new(GuideTree::new()))
    }

    /// Open an index that shares an already built guide tree.
    pub fn with_guide(store: S, guide: Arc<GuideTree>) -> Result<Self> {
        Ok(Self {
            store: LineStore::open(store)?,
            guide,
        })
    }

    /// Record an address given as a dotted-quad string.
    pub fn write(&mut self, address: &str) -> Result<()> {
        let address: Ipv4Address = address.parse()?;
        self.write_address(&address)
    }

    /// Test whether an address was recorded.
    ///
    /// Absence is reported as [`Error::NotFound`].
    pub fn find(&mut self, address: &str) -> Result<()> {
        let address: Ipv4Address = address.parse()?;
        self.find_address(&address)
    }

    /// Like [`find`](Self::find), with absence mapped to `false`.
    pub fn contains(&mut self, address: &str) -> Result<bool> {
        match self.find(address) {
            Ok(()) => Ok(true),
            Err(Error::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Record a parsed address.
    pub fn write_address(&mut self, address: &Ipv4Address) -> Result<()> {
        let path = SearchPath::build(&self.guide, address)?;

        let root = match self.read_step(ROOT_LINE, path.root())? {
            Some(root) => root,
            None => {
                let mut root = Record::new(path.root().address, path.root().is_terminal());
                self.store.append(&mut root)?;
                if root.line != ROOT_LINE {
                    return Err(Error::Structural(format!(
                        "root record landed on line {} of a store without line {}",
                        root.line, ROOT_LINE
                    )));
                }
                log::debug!("created root record {}", root.address);
                root
            }
        };

        self.traverse(&path, root, TraversalMode::Insert)
    }

    /// Look up a parsed address.
    pub fn find_address(&mut self, address: &Ipv4Address) -> Result<()> {
        let path = SearchPath::build(&self.guide, address)?;
        let root = self
            .read_step(ROOT_LINE, path.root())?
            .ok_or(Error::NotFound)?;
        self.traverse(&path, root, TraversalMode::Lookup)
    }

    /// First free line, i.e. the number of records in the store.
    pub fn next_line(&self) -> u64 {
        self.store.next_line()
    }

    /// Whether no address has been written yet.
    pub fn is_empty(&self) -> bool {
        self.store.next_line() == 0
    }

    /// The guide tree this index traverses.
    pub fn guide(&self) -> &Arc<GuideTree> {
        &self.guide
    }

    /// Flush the underlying store.
    pub fn flush(&mut self) -> Result<()> {
        self.store.flush()
    }

    /// Give back the underlying store.
    pub fn into_inner(self) -> S {
        self.store.into_inner()
    }

    /// Read the record expected at `step`, checking it holds the step's value.
    fn read_step(&mut self, line: u64, step: &PathStep) -> Result<Option<Record>> {
        let record = match self.store.read_record(line)? {
            Some(record) => record,
            None => return Ok(None),
        };
        if record.address != step.address {
            return Err(Error::malformed(
                line,
                format!("holds {} where {} was expected", record.address, step.address),
            ));
        }
        Ok(Some(record))
    }

    fn traverse(&mut self, path: &SearchPath, root: Record, mode: TraversalMode) -> Result<()> {
        let steps = path.steps();
        let mut record = root;

        for (i, step) in steps.iter().enumerate() {
            let branch = match step.branch {
                Some(branch) => branch,
                None => {
                    if record.is_real {
                        return Ok(());
                    }
                    return match mode {
                        TraversalMode::Lookup => Err(Error::NotFound),
                        TraversalMode::Insert => Err(Error::Structural(format!(
                            "line {} ends the path of {} but is not marked real",
                            record.line,
                            path.target()
                        ))),
                    };
                }
            };
            let child = &steps[i + 1];

            log::trace!(
                "line {} ({}) -> {} branch",
                record.line,
                record.address,
                branch.name()
            );

            let reference = record.child(branch);
            let found = if reference == 0 {
                None
            } else {
                self.read_step(reference, child)?
            };

            let next = match found {
                Some(found) if child.is_terminal() && !found.is_real => {
                    let miss = Miss {
                        parent: &mut record,
                        branch,
                        child,
                        existing: Some(found),
                    };
                    self.on_miss(mode, miss)?
                }
                Some(found) => found,
                None => {
                    let miss = Miss {
                        parent: &mut record,
                        branch,
                        child,
                        existing: None,
                    };
                    self.on_miss(mode, miss)?
                }
            };
            record = next;
        }

        Err(Error::Structural(format!(
            "path of {} has no terminal step",
            path.target()
        )))
    }

    fn on_miss(&mut self, mode: TraversalMode, miss: Miss<'_>) -> Result<Record> {
        match mode {
            TraversalMode::Lookup => Err(Error::NotFound),
            TraversalMode::Insert => self.insert_missing(miss),
        }
    }

    fn insert_missing(&mut self, miss: Miss<'_>) -> Result<Record> {
        if let Some(mut existing) = miss.existing {
            existing.is_real = true;
            self.store.write_record(&existing)?;
            log::debug!("marked line {} ({}) as real", existing.line, existing.address);
            return Ok(existing);
        }

        // Child before parent: a crash in between leaves an unreachable
        // record, never a dangling reference.
        let mut created = Record::new(miss.child.address, miss.child.is_terminal());
        self.store.append(&mut created)?;

        miss.parent.set_child(miss.branch, created.line);
        self.store.write_record(miss.parent)?;

        log::debug!(
            "created line {} ({}) as {} child of line {}",
            created.line,
            created.address,
            miss.branch.name(),
            miss.parent.line
        );
        Ok(created)
    }
}
