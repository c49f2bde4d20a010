//! Fixed-width text encoding of one persisted node.

use crate::address::Ipv4Address;
use crate::path::Branch;
use crate::{Error, Result};

/// Bytes per record: address 15 + three references 30 + flag 1 + separators 4 + newline 1.
pub const RECORD_WIDTH: usize = 51;

/// Largest line number a 10-digit reference can hold.
pub const MAX_LINE_REF: u64 = 9_999_999_999;

/// Number of whitespace-separated fields in a record.
pub const FIELD_COUNT: usize = 5;

/// Field positions inside a decoded line.
pub const ADDRESS_FIELD: usize = 0;
pub const LEFT_FIELD: usize = 1;
pub const RIGHT_FIELD: usize = 2;
pub const NEXT_SECTION_FIELD: usize = 3;
pub const IS_REAL_FIELD: usize = 4;

/// Persisted counterpart of a path step.
///
/// Child references are line numbers; `0` means "absent", which is never
/// ambiguous because line 0 is always the section-0 root and nothing
/// points back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Record {
    /// Own line number.
    pub line: u64,
    pub address: Ipv4Address,
    pub left: u64,
    pub right: u64,
    pub next_section: u64,
    /// Set only on the record that terminates a fully inserted address.
    pub is_real: bool,
}

impl Record {
    /// A fresh record with no children.
    pub fn new(address: Ipv4Address, is_real: bool) -> Self {
        Self {
            address,
            is_real,
            ..Self::default()
        }
    }

    /// Get the reference stored for a branch.
    pub fn child(&self, branch: Branch) -> u64 {
        match branch {
            Branch::Left => self.left,
            Branch::Right => self.right,
            Branch::NextSection => self.next_section,
        }
    }

    /// Point a branch at `line`.
    pub fn set_child(&mut self, branch: Branch, line: u64) {
        match branch {
            Branch::Left => self.left = line,
            Branch::Right => self.right = line,
            Branch::NextSection => self.next_section = line,
        }
    }

    /// Encode as one fixed-width line, newline included.
    ///
    /// References above [`MAX_LINE_REF`] would overflow the width; callers
    /// never allocate such lines.
    pub fn encode(&self) -> String {
        let [a, b, c, d] = self.address.octets();
        let line = format!(
            "{:03}.{:03}.{:03}.{:03} {:010} {:010} {:010} {}\n",
            a,
            b,
            c,
            d,
            self.left,
            self.right,
            self.next_section,
            u8::from(self.is_real)
        );
        debug_assert_eq!(line.len(), RECORD_WIDTH);
        line
    }

    /// Decode the text of line `line`.
    pub fn decode(line: u64, text: &str) -> Result<Self> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() < FIELD_COUNT {
            return Err(Error::malformed(
                line,
                format!("expected {} fields, got {}", FIELD_COUNT, fields.len()),
            ));
        }

        let address: Ipv4Address = fields[ADDRESS_FIELD].parse().map_err(|_| {
            Error::malformed(line, format!("bad address {:?}", fields[ADDRESS_FIELD]))
        })?;
        let reference = |pos: usize| -> Result<u64> {
            fields[pos]
                .parse::<u64>()
                .ok()
                .filter(|&r| r <= MAX_LINE_REF)
                .ok_or_else(|| {
                    Error::malformed(line, format!("bad line reference {:?}", fields[pos]))
                })
        };
        let is_real = match fields[IS_REAL_FIELD] {
            "0" => false,
            "1" => true,
            other => {
                return Err(Error::malformed(line, format!("bad flag {:?}", other)));
            }
        };

        Ok(Self {
            line,
            address,
            left: reference(LEFT_FIELD)?,
            right: reference(RIGHT_FIELD)?,
            next_section: reference(NEXT_SECTION_FIELD)?,
            is_real,
        })
    }
}
