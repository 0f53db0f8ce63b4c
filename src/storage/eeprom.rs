//! Driver for 24xx-series I2C EEPROMs with 16-bit word addressing.
//!
//! # Page Writes
//!
//! The chip latches a write into one page; bytes past the page end wrap around
//! to the start of the same page and overwrite it. Writes are therefore split
//! at page boundaries, and each chunk is followed by the internal write cycle
//! (up to 5 ms on a 24LC256) before the next command is sent.
//!
//! The logger's channel regions each sit inside a single 64-byte page, so sample
//! writes never split on a 24LC256; the split covers arbitrary offsets and
//! smaller-page parts.
//!
//! # Reads
//!
//! A random read (address write + repeated start + read) streams across pages
//! without wrapping, so reads are issued as one transaction.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::Storage;
use crate::error::IoError;

/// Default 7-bit bus address (A2..A0 tied low).
pub const EEPROM_ADDRESS: u8 = 0x50;

/// Largest page size the driver supports.
const MAX_PAGE_SIZE: usize = 64;

/// Bytes of word address sent before each data block.
const ADDRESS_BYTES: usize = 2;

/// Size, page size and write-cycle time of an EEPROM part.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EepromGeometry {
    /// Total capacity in bytes.
    pub size: usize,
    /// Page size in bytes (at most 64).
    pub page_size: usize,
    /// Internal write-cycle time in milliseconds.
    pub write_cycle_ms: u32,
}

impl EepromGeometry {
    /// Microchip 24LC256: 32 KiB, 64-byte pages, 5 ms write cycle.
    pub const LC256: Self = Self {
        size: 32 * 1024,
        page_size: 64,
        write_cycle_ms: 5,
    };

    /// Microchip 24LC64: 8 KiB, 32-byte pages, 5 ms write cycle.
    pub const LC64: Self = Self {
        size: 8 * 1024,
        page_size: 32,
        write_cycle_ms: 5,
    };

    /// Bytes left in the page containing `address`.
    #[inline]
    const fn page_remaining(
        &self,
        address: usize,
    ) -> usize {
        self.page_size - (address % self.page_size)
    }
}

/// 24xx EEPROM on an I2C bus.
pub struct Eeprom<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    geometry: EepromGeometry,
}

impl<I2C, D> Eeprom<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver for the chip at `address`.
    pub fn new(
        i2c: I2C,
        delay: D,
        address: u8,
        geometry: EepromGeometry,
    ) -> Self {
        assert!(geometry.page_size > 0 && geometry.page_size <= MAX_PAGE_SIZE);
        Self {
            i2c,
            delay,
            address,
            geometry,
        }
    }

    /// Part geometry.
    #[inline]
    pub const fn geometry(&self) -> EepromGeometry { self.geometry }

    /// Release the bus and delay.
    pub fn release(self) -> (I2C, D) { (self.i2c, self.delay) }

    fn check_range(
        &self,
        offset: u16,
        len: usize,
    ) -> Result<(), IoError> {
        if offset as usize + len > self.geometry.size {
            return Err(IoError::OutOfRange { offset, len });
        }
        Ok(())
    }

    /// Write one chunk that does not cross a page boundary.
    fn write_page(
        &mut self,
        address: usize,
        chunk: &[u8],
    ) -> Result<(), IoError> {
        let mut frame = [0u8; ADDRESS_BYTES + MAX_PAGE_SIZE];
        frame[..ADDRESS_BYTES].copy_from_slice(&(address as u16).to_be_bytes());
        frame[ADDRESS_BYTES..ADDRESS_BYTES + chunk.len()].copy_from_slice(chunk);

        self.i2c
            .write(self.address, &frame[..ADDRESS_BYTES + chunk.len()])
            .map_err(|_| IoError::Bus {
                offset: address as u16,
            })?;
        self.delay.delay_ms(self.geometry.write_cycle_ms);
        Ok(())
    }
}

impl<I2C, D> Storage for Eeprom<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn write(
        &mut self,
        offset: u16,
        bytes: &[u8],
    ) -> Result<usize, IoError> {
        self.check_range(offset, bytes.len())?;

        let mut address = offset as usize;
        let mut rest = bytes;
        while !rest.is_empty() {
            let take = self.geometry.page_remaining(address).min(rest.len());
            let (chunk, tail) = rest.split_at(take);
            if let Err(e) = self.write_page(address, chunk) {
                log_warn!("EEPROM write failed at {}", address as u16);
                return Err(e);
            }
            address += take;
            rest = tail;
        }
        Ok(bytes.len())
    }

    fn read(
        &mut self,
        offset: u16,
        buf: &mut [u8],
    ) -> Result<usize, IoError> {
        self.check_range(offset, buf.len())?;
        if buf.is_empty() {
            return Ok(0);
        }

        self.i2c
            .write_read(self.address, &offset.to_be_bytes(), buf)
            .map_err(|_| {
                log_warn!("EEPROM read failed at {}", offset);
                IoError::Bus { offset }
            })?;
        Ok(buf.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
