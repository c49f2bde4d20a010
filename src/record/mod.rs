//! Persisted records and the store that holds them.
//!
//! # Line Layout
//!
//! ```text
//! OOO.OOO.OOO.OOO LLLLLLLLLL RRRRRRRRRR NNNNNNNNNN F\n
//! |               |          |          |          |
//! address         left       right      next       isReal
//! (zero-padded)   (line)     (line)     section    (0 or 1)
//! ```
//!
//! Every record is exactly [`RECORD_WIDTH`] bytes, so line `n` starts at
//! byte `n * RECORD_WIDTH`. Line 0 is the root of the section-0 search.

mod format;
mod store;

pub use format::*;
pub use store::LineStore;
