//! Byte-addressed persistence medium.
//!
//! - [`Storage`]: the narrow interface the codec talks to
//! - [`MemoryStorage`]: RAM-backed medium (host tests, bench setups)
//! - [`Eeprom`]: 24xx-series I2C EEPROM driver used by the firmware
//!
//! Transactions report how many bytes they moved. Each call is its own
//! transaction; there is no atomicity across calls.

mod eeprom;

pub use eeprom::{EEPROM_ADDRESS, Eeprom, EepromGeometry};

use crate::error::IoError;

/// Byte-addressed non-volatile store.
pub trait Storage {
    /// Write `bytes` starting at `offset`. Returns the number of bytes written.
    fn write(
        &mut self,
        offset: u16,
        bytes: &[u8],
    ) -> Result<usize, IoError>;

    /// Fill `buf` from `offset`. Returns the number of bytes read.
    fn read(
        &mut self,
        offset: u16,
        buf: &mut [u8],
    ) -> Result<usize, IoError>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn write(
        &mut self,
        offset: u16,
        bytes: &[u8],
    ) -> Result<usize, IoError> {
        (**self).write(offset, bytes)
    }

    fn read(
        &mut self,
        offset: u16,
        buf: &mut [u8],
    ) -> Result<usize, IoError> {
        (**self).read(offset, buf)
    }
}

// =============================================================================
// RAM-backed Storage
// =============================================================================

/// Fill byte of an erased 24xx EEPROM.
pub const ERASED_BYTE: u8 = 0xFF;

/// Storage backed by a fixed array.
///
/// Starts filled with a power-on byte pattern (zero by default). Transactions
/// that would run past the end fail with [`IoError::OutOfRange`].
pub struct MemoryStorage<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> MemoryStorage<N> {
    /// Create a zero-filled store.
    pub const fn new() -> Self { Self::with_fill(0) }

    /// Create a store whose every byte is `fill` (e.g. [`ERASED_BYTE`]).
    pub const fn with_fill(fill: u8) -> Self { Self { bytes: [fill; N] } }

    /// Raw contents.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; N] { &self.bytes }

    fn range(
        offset: u16,
        len: usize,
    ) -> Result<core::ops::Range<usize>, IoError> {
        let start = offset as usize;
        let end = start + len;
        if end > N {
            return Err(IoError::OutOfRange { offset, len });
        }
        Ok(start..end)
    }
}

impl<const N: usize> Default for MemoryStorage<N> {
    fn default() -> Self { Self::new() }
}

impl<const N: usize> Storage for MemoryStorage<N> {
    fn write(
        &mut self,
        offset: u16,
        bytes: &[u8],
    ) -> Result<usize, IoError> {
        let range = Self::range(offset, bytes.len())?;
        self.bytes[range].copy_from_slice(bytes);
        Ok(bytes.len())
    }

    fn read(
        &mut self,
        offset: u16,
        buf: &mut [u8],
    ) -> Result<usize, IoError> {
        let range = Self::range(offset, buf.len())?;
        buf.copy_from_slice(&self.bytes[range]);
        Ok(buf.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_write_read() {
        let mut storage = MemoryStorage::<16>::new();
        assert_eq!(storage.write(4, &[0x01, 0x04]), Ok(2));

        let mut buf = [0u8; 2];
        assert_eq!(storage.read(4, &mut buf), Ok(2));
        assert_eq!(buf, [0x01, 0x04]);
        assert_eq!(storage.as_bytes()[3], 0);
    }

    #[test]
    fn test_memory_storage_fill_pattern() {
        let mut storage = MemoryStorage::<8>::with_fill(ERASED_BYTE);
        let mut buf = [0u8; 4];
        storage.read(2, &mut buf).unwrap();
        assert_eq!(buf, [0xFF; 4]);
    }

    #[test]
    fn test_memory_storage_out_of_range() {
        let mut storage = MemoryStorage::<8>::new();
        assert_eq!(storage.write(7, &[1, 2]), Err(IoError::OutOfRange { offset: 7, len: 2 }));

        let mut buf = [0u8; 2];
        assert_eq!(storage.read(8, &mut buf), Err(IoError::OutOfRange { offset: 8, len: 2 }));

        // Nothing was written by the rejected transaction
        assert_eq!(storage.as_bytes()[7], 0);
    }

    #[test]
    fn test_storage_through_mut_ref() {
        let mut storage = MemoryStorage::<4>::new();
        let mut by_ref = &mut storage;
        Storage::write(&mut by_ref, 0, &[9]).unwrap();
        assert_eq!(storage.as_bytes()[0], 9);
    }
}
