//! Sample buffer encoding into a byte-addressed store.
//!
//! # Wire Format
//!
//! Slot `i` of a channel's buffer lives at `base_offset + 2 * i` as a big-endian
//! `u16`. Slots are contiguous, oldest first, with no header, checksum or
//! version. Addresses that were never written decode as ordinary samples with
//! whatever power-on pattern the medium holds.
//!
//! # Failure Semantics
//!
//! Every slot is its own 2-byte transaction. A transaction that fails, or that
//! reports a byte count other than 2, is retried up to the codec's attempt
//! budget; once the budget is spent the operation stops and returns the error.
//! Slots before the failing one have already been written, so callers must
//! assume a partially updated region after an encode error.
//!
//! A region that would run past the 16-bit address space is rejected with
//! [`IoError::OutOfRange`] before any transaction is issued.

use crate::buffer::{CAPACITY, SampleBuffer};
use crate::channel::{CHANNEL_BYTES, SAMPLE_BYTES};
use crate::config::STORAGE_RETRY_ATTEMPTS;
use crate::error::IoError;
use crate::storage::Storage;

/// Encoder/decoder between [`SampleBuffer`] and a [`Storage`] region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersistenceCodec {
    attempts: u8,
}

impl PersistenceCodec {
    /// Codec that tries each transaction up to `attempts` times (at least once).
    pub const fn new(attempts: u8) -> Self {
        Self {
            attempts: if attempts == 0 { 1 } else { attempts },
        }
    }

    /// Codec that gives up on the first failed transaction.
    pub const fn strict() -> Self { Self::new(1) }

    /// Attempts per transaction.
    #[inline]
    pub const fn attempts(&self) -> u8 { self.attempts }

    /// Reject a region whose last slot would not be addressable.
    const fn check_region(base_offset: u16) -> Result<(), IoError> {
        if base_offset as usize + CHANNEL_BYTES > u16::MAX as usize + 1 {
            return Err(IoError::OutOfRange {
                offset: base_offset,
                len: CHANNEL_BYTES,
            });
        }
        Ok(())
    }

    /// Address of slot `index` in a region that passed [`Self::check_region`].
    #[inline]
    const fn slot_offset(
        base_offset: u16,
        index: usize,
    ) -> u16 {
        base_offset + (index * SAMPLE_BYTES) as u16
    }

    /// Write every slot of `buffer` into the region at `base_offset`.
    pub fn encode<S: Storage>(
        &self,
        storage: &mut S,
        buffer: &SampleBuffer,
        base_offset: u16,
    ) -> Result<(), IoError> {
        Self::check_region(base_offset)?;
        for (i, value) in buffer.iter().enumerate() {
            let offset = Self::slot_offset(base_offset, i);
            let bytes = value.to_be_bytes();
            self.retry(offset, |storage| storage.write(offset, &bytes), storage)?;
        }
        Ok(())
    }

    /// Read the region at `base_offset` back into a buffer.
    pub fn decode<S: Storage>(
        &self,
        storage: &mut S,
        base_offset: u16,
    ) -> Result<SampleBuffer, IoError> {
        Self::check_region(base_offset)?;
        let mut samples = [0u16; CAPACITY];
        for (i, slot) in samples.iter_mut().enumerate() {
            let offset = Self::slot_offset(base_offset, i);
            let mut bytes = [0u8; SAMPLE_BYTES];
            self.retry(offset, |storage| storage.read(offset, &mut bytes), storage)?;
            *slot = u16::from_be_bytes(bytes);
        }
        Ok(SampleBuffer::from_samples(samples))
    }

    /// Run one 2-byte transaction with the attempt budget.
    fn retry<S, F>(
        &self,
        offset: u16,
        mut transaction: F,
        storage: &mut S,
    ) -> Result<(), IoError>
    where
        S: Storage,
        F: FnMut(&mut S) -> Result<usize, IoError>,
    {
        let mut last_error = None;
        for attempt in 1..=self.attempts {
            let error = match transaction(storage) {
                Ok(SAMPLE_BYTES) => return Ok(()),
                Ok(actual) => IoError::ShortTransfer {
                    offset,
                    expected: SAMPLE_BYTES,
                    actual,
                },
                Err(e) => e,
            };
            if attempt < self.attempts {
                log_debug!("Storage retry {} at {}", attempt, offset);
            }
            last_error = Some(error);
        }
        Err(last_error.unwrap_or(IoError::Bus { offset }))
    }
}

impl Default for PersistenceCodec {
    fn default() -> Self { Self::new(STORAGE_RETRY_ATTEMPTS) }
}

// =============================================================================
// Unit Tests
// =============================================================================
