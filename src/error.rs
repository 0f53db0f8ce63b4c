//! Storage I/O error type.

use core::fmt;

/// Errors reported by a storage transaction.
///
/// Every variant carries the byte offset of the transaction that failed so a
/// log line is enough to locate the damaged slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// The medium accepted the transaction but moved an unexpected number of bytes.
    ShortTransfer {
        /// Offset of the transaction.
        offset: u16,
        /// Bytes the caller asked for.
        expected: usize,
        /// Bytes the medium reported.
        actual: usize,
    },
    /// The bus or driver refused the transaction (NACK, arbitration loss, ...).
    Bus {
        /// Offset of the transaction.
        offset: u16,
    },
    /// The transaction would run past the end of the medium.
    OutOfRange {
        /// Offset of the transaction.
        offset: u16,
        /// Length of the transaction.
        len: usize,
    },
}

impl IoError {
    /// Offset of the transaction that failed.
    pub const fn offset(&self) -> u16 {
        match self {
            Self::ShortTransfer { offset, .. } | Self::Bus { offset } | Self::OutOfRange { offset, .. } => *offset,
        }
    }
}

impl fmt::Display for IoError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::ShortTransfer {
                offset,
                expected,
                actual,
            } => write!(f, "short transfer at {offset}: {actual} of {expected} bytes"),
            Self::Bus { offset } => write!(f, "bus error at {offset}"),
            Self::OutOfRange { offset, len } => write!(f, "{len} bytes at {offset} out of range"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
