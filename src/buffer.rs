//! Fixed-capacity sample history for one channel.
//!
//! The buffer always holds exactly [`CAPACITY`] samples. It starts zero-filled,
//! and every [`push`](SampleBuffer::push) evicts the oldest sample. Out-of-range
//! values are stored unmodified; clamping is a rendering concern.
//!
//! Backed by a `heapless::HistoryBuf` ring, so a push is O(1) while the
//! observable order is the same as shifting every slot left by one.

use core::fmt;

use heapless::HistoryBuf;

/// Number of samples kept per channel.
pub const CAPACITY: usize = 20;

/// Ordered sample history, oldest first.
#[derive(Clone)]
pub struct SampleBuffer {
    ring: HistoryBuf<u16, CAPACITY>,
}

impl SampleBuffer {
    /// Create a zero-filled buffer.
    pub fn new() -> Self {
        Self {
            ring: HistoryBuf::new_with(0),
        }
    }

    /// Build a buffer from samples ordered oldest first.
    pub fn from_samples(samples: [u16; CAPACITY]) -> Self {
        let mut buffer = Self::new();
        for value in samples {
            buffer.push(value);
        }
        buffer
    }

    /// Drop the oldest sample and append `value` as the newest.
    #[inline]
    pub fn push(
        &mut self,
        value: u16,
    ) {
        self.ring.write(value);
    }

    /// Copy of all samples, oldest first.
    pub fn snapshot(&self) -> [u16; CAPACITY] {
        let mut out = [0u16; CAPACITY];
        for (slot, value) in out.iter_mut().zip(self.ring.oldest_ordered()) {
            *slot = *value;
        }
        out
    }

    /// Reset every slot to zero.
    pub fn clear(&mut self) { self.ring.clear_with(0); }

    /// Most recently pushed sample.
    #[inline]
    pub fn newest(&self) -> u16 { self.ring.recent().copied().unwrap_or(0) }

    /// Iterate over samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ { self.ring.oldest_ordered().copied() }

    /// Number of slots (always [`CAPACITY`]).
    #[inline]
    #[allow(clippy::unused_self)]
    pub const fn len(&self) -> usize { CAPACITY }

    /// Always false; the buffer never shrinks.
    #[inline]
    #[allow(clippy::unused_self)]
    pub const fn is_empty(&self) -> bool { false }
}

impl Default for SampleBuffer {
    fn default() -> Self { Self::new() }
}

impl PartialEq for SampleBuffer {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for SampleBuffer {}

impl fmt::Debug for SampleBuffer {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
