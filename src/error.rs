//! Error types for ipindex.

use thiserror::Error;

/// Error type for ipindex operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Address string is not four dot-separated decimal octets
    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),

    /// Log line carries nothing that looks like an IPv4 address
    #[error("no IPv4 address in line: {0:?}")]
    NoAddress(String),

    /// Address was never recorded in the index
    #[error("address not found")]
    NotFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted line could not be decoded or disagrees with the guide tree
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    /// Internal invariant of the index structure was violated
    #[error("structural error: {0}")]
    Structural(String),

    /// No line reference left in the fixed-width record format
    #[error("index is full: line {0} does not fit in a record reference")]
    CapacityExceeded(u64),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error means "absent" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }

    /// Whether this error was caused by a rejected address string.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidAddress(_))
    }

    pub(crate) fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type alias for ipindex operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert!(Error::NotFound.is_not_found());
        assert!(!Error::NotFound.is_validation());
        assert!(Error::InvalidAddress("1.2.3".into()).is_validation());

        let io = Error::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(!io.is_not_found());
        assert!(!io.is_validation());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::malformed(7, "too few fields");
        assert_eq!(err.to_string(), "malformed record at line 7: too few fields");
        assert_eq!(
            Error::InvalidAddress("1.2.3".into()).to_string(),
            "invalid IPv4 address: 1.2.3"
        );
    }
}
