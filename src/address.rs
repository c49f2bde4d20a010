//! Dotted-quad IPv4 addresses as the index sees them.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Number of octets (sections) in an IPv4 address.
pub const SECTIONS: usize = 4;

/// An IPv4 address split into its four sections.
///
/// Parsing accepts exactly four dot-separated groups of decimal digits, each
/// in `0..=255`. Leading zeros are allowed, so the zero-padded form written
/// by the record codec (`010.000.000.001`) parses back to the same value.
///
/// # Examples
/// ```
/// use ipindex::Ipv4Address;
///
/// let addr: Ipv4Address = "10.0.0.1".parse().unwrap();
/// assert_eq!(addr.octets(), [10, 0, 0, 1]);
/// assert_eq!(addr.to_string(), "10.0.0.1");
/// assert!("1.2.3".parse::<Ipv4Address>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Ipv4Address {
    octets: [u8; SECTIONS],
}

impl Ipv4Address {
    /// Create an address from its octets.
    pub const fn new(octets: [u8; SECTIONS]) -> Self {
        Self { octets }
    }

    /// Get the four octets.
    pub fn octets(&self) -> [u8; SECTIONS] {
        self.octets
    }

    /// Get the octet of one section (0..=3).
    pub fn section(&self, section: usize) -> u8 {
        self.octets[section]
    }

    /// Partial address used by a path step: sections before `section` are
    /// kept, `section` is replaced by `value`, later sections are zeroed.
    pub fn project(&self, section: usize, value: u8) -> Self {
        let mut octets = [0u8; SECTIONS];
        octets[..section].copy_from_slice(&self.octets[..section]);
        octets[section] = value;
        Self { octets }
    }
}

impl FromStr for Ipv4Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidAddress(s.to_string());

        let mut octets = [0u8; SECTIONS];
        let mut count = 0;
        for part in s.split('.') {
            if count == SECTIONS {
                return Err(invalid());
            }
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            octets[count] = part.parse().map_err(|_| invalid())?;
            count += 1;
        }

        if count != SECTIONS {
            return Err(invalid());
        }
        Ok(Self { octets })
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl From<std::net::Ipv4Addr> for Ipv4Address {
    fn from(addr: std::net::Ipv4Addr) -> Self {
        Self::new(addr.octets())
    }
}
