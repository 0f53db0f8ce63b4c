//! Sensor channels and their fixed display and storage properties.
//!
//! # Storage Map
//!
//! Each channel owns `CAPACITY * 2` bytes of the persistence medium starting at
//! its base offset:
//!
//! | Channel       | Range         | Base offset | Bytes     |
//! |---------------|---------------|-------------|-----------|
//! | Temperature   | 250 - 350     | 0           | 0..40     |
//! | Light         | 0 - 500       | 321         | 321..361  |
//! | Potentiometer | 99 - 4100     | 641         | 641..681  |
//!
//! The offsets are historical and hand-picked; [`storage_map_is_disjoint`]
//! checks at compile time that the regions never overlap.

use core::fmt;

use crate::buffer::CAPACITY;

/// Bytes one serialized sample occupies in storage.
pub const SAMPLE_BYTES: usize = 2;

/// Bytes one channel's serialized buffer occupies in storage.
pub const CHANNEL_BYTES: usize = CAPACITY * SAMPLE_BYTES;

/// Inclusive display range used to scale samples onto the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayRange {
    /// Value drawn on the bottom edge.
    pub min: u16,
    /// Value drawn on the top edge.
    pub max: u16,
}

impl DisplayRange {
    /// Create a new range. `max` must be greater than `min`.
    pub const fn new(
        min: u16,
        max: u16,
    ) -> Self {
        assert!(max > min, "display range must not be empty");
        Self { min, max }
    }

    /// Width of the range.
    #[inline]
    pub const fn span(&self) -> u16 { self.max - self.min }
}

/// One selectable sensor source.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Internal temperature sensor, tenths of a degree Celsius.
    #[default]
    Temperature,
    /// Ambient light divider, relative lux.
    Light,
    /// Trimpot, raw 12-bit ADC counts.
    Potentiometer,
}

impl Channel {
    /// Number of channels.
    pub const COUNT: usize = 3;

    /// All channels, ordered by storage offset.
    pub const ALL: [Self; Self::COUNT] = [Self::Temperature, Self::Light, Self::Potentiometer];

    /// Position of this channel in [`Channel::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Temperature => 0,
            Self::Light => 1,
            Self::Potentiometer => 2,
        }
    }

    /// Cycle to the next channel (Temperature -> Light -> Potentiometer -> Temperature).
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::Temperature => Self::Light,
            Self::Light => Self::Potentiometer,
            Self::Potentiometer => Self::Temperature,
        }
    }

    /// Range mapped onto the plot height.
    pub const fn display_range(self) -> DisplayRange {
        match self {
            Self::Temperature => DisplayRange::new(250, 350),
            Self::Light => DisplayRange::new(0, 500),
            Self::Potentiometer => DisplayRange::new(99, 4100),
        }
    }

    /// First byte of this channel's region in storage.
    pub const fn base_offset(self) -> u16 {
        match self {
            Self::Temperature => 0,
            Self::Light => 321,
            Self::Potentiometer => 641,
        }
    }

    /// Number of tick marks on the vertical axis.
    pub const fn outline_delimiters(self) -> u8 {
        match self {
            Self::Temperature => 3,
            Self::Light => 5,
            Self::Potentiometer => 4,
        }
    }

    /// Readout label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Light => "Light",
            Self::Potentiometer => "Poten",
        }
    }

    /// Short label for the recording and playback readouts.
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Temperature => "Temp",
            Self::Light => "Light",
            Self::Potentiometer => "Pot",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Check that no two channel regions intersect.
///
/// Regions are `[base_offset, base_offset + CHANNEL_BYTES)`. The check does not
/// depend on the order of [`Channel::ALL`].
pub const fn storage_map_is_disjoint() -> bool {
    let mut i = 0;
    while i < Channel::COUNT {
        let mut j = i + 1;
        while j < Channel::COUNT {
            let a = Channel::ALL[i].base_offset() as usize;
            let b = Channel::ALL[j].base_offset() as usize;
            if a < b + CHANNEL_BYTES && b < a + CHANNEL_BYTES {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

/// One past the last byte any channel uses.
pub const fn storage_end() -> usize {
    let mut end = 0;
    let mut i = 0;
    while i < Channel::COUNT {
        let region_end = Channel::ALL[i].base_offset() as usize + CHANNEL_BYTES;
        if region_end > end {
            end = region_end;
        }
        i += 1;
    }
    end
}

// Startup check of the hand-picked offsets, evaluated by the compiler.
const _: () = assert!(storage_map_is_disjoint(), "channel storage regions overlap");
const _: () = assert!(storage_end() <= u16::MAX as usize + 1, "channel storage exceeds 16-bit addressing");

// =============================================================================
// Unit Tests
// =============================================================================
