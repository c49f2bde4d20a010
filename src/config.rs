//! Configuration for the indexing and search commands.

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Default directory index files are written into.
pub const DEFAULT_DST_DIR: &str = "example/";

/// Extension of index files.
pub const INDEX_EXTENSION: &str = "txt";

/// Configuration for building an index from an access log.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Access log to read addresses from
    pub source: PathBuf,
    /// Date naming the index file (`<dst_dir>/<date>.txt`)
    pub date: String,
    /// Directory holding index files
    pub dst_dir: PathBuf,
    /// Abort on lines without a usable address instead of skipping them
    pub strict: bool,
}

impl IndexerConfig {
    /// Create a new IndexerConfig writing into the default directory.
    pub fn new(source: impl Into<PathBuf>, date: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            date: date.into(),
            ..Self::default()
        }
    }

    /// Set the destination directory.
    pub fn with_dst_dir(mut self, dst_dir: impl Into<PathBuf>) -> Self {
        self.dst_dir = dst_dir.into();
        self
    }

    /// Set strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Path of the index file for this date.
    pub fn index_path(&self) -> PathBuf {
        self.dst_dir.join(format!("{}.{}", self.date, INDEX_EXTENSION))
    }

    /// Check that the required values are present.
    pub fn validate(&self) -> Result<()> {
        if self.source.as_os_str().is_empty() {
            return Err(Error::Config("source file can not be empty".into()));
        }
        if self.date.trim().is_empty() {
            return Err(Error::Config("date can not be empty".into()));
        }
        let mut components = Path::new(&self.date).components();
        let plain = matches!(components.next(), Some(Component::Normal(_)))
            && components.next().is_none();
        if !plain {
            return Err(Error::Config(format!(
                "date must be a plain file name: {:?}",
                self.date
            )));
        }
        Ok(())
    }
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            date: String::new(),
            dst_dir: PathBuf::from(DEFAULT_DST_DIR),
            strict: false,
        }
    }
}

/// Configuration for looking an address up.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Index file to search in
    pub index_file: PathBuf,
    /// Address to look for
    pub address: String,
}

impl SearchConfig {
    /// Create a new SearchConfig.
    pub fn new(index_file: impl Into<PathBuf>, address: impl Into<String>) -> Self {
        Self {
            index_file: index_file.into(),
            address: address.into(),
        }
    }

    /// Check that the required values are present.
    pub fn validate(&self) -> Result<()> {
        if self.index_file.as_os_str().is_empty() || self.address.is_empty() {
            return Err(Error::Config("file or ip params can not be empty".into()));
        }
        Ok(())
    }
}
