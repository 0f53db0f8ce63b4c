//! Transient control state of the logger.
//!
//! # Modes
//!
//! The `Y` button (mode-advance) cycles through the modes:
//!
//! - [`Mode::Live`]: Sample the active channel every second and plot it
//! - [`Mode::ConfigureInterval`]: `A`/`B` change the record interval
//! - [`Mode::Recording`]: Persist a sample every interval
//! - [`Mode::Playback`]: Show the buffer read back from storage
//!
//! A [`Session`] is never persisted; a reset always starts in Live on the
//! temperature channel with a 10 s interval.

use core::fmt;

use crate::channel::Channel;
use crate::config::{RECORD_INTERVAL_DEFAULT_S, RECORD_INTERVAL_MAX_S, RECORD_INTERVAL_MIN_S};
use crate::error::IoError;

/// Logger operating mode.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Live scrolling graph of the active channel.
    #[default]
    Live,
    /// Record interval selection.
    ConfigureInterval,
    /// Timed sampling into storage.
    Recording,
    /// Replay of the stored buffer.
    Playback,
}

impl Mode {
    /// Cycle to the next mode (Live -> ConfigureInterval -> Recording -> Playback -> Live).
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::Live => Self::ConfigureInterval,
            Self::ConfigureInterval => Self::Recording,
            Self::Recording => Self::Playback,
            Self::Playback => Self::Live,
        }
    }

    /// Short name for logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Live => "Live",
            Self::ConfigureInterval => "Interval",
            Self::Recording => "Recording",
            Self::Playback => "Playback",
        }
    }

    /// Whether the user may switch channels in this mode.
    ///
    /// A running recording or a replay is tied to one channel's storage region.
    #[inline]
    pub const fn allows_channel_select(self) -> bool { matches!(self, Self::Live | Self::ConfigureInterval) }
}

impl fmt::Display for Mode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Control state owned by the main loop and passed into every controller step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    mode: Mode,
    active_channel: Channel,
    record_interval_seconds: u8,
    /// Time of the last record (or of entering Recording).
    record_reference_ms: u64,
    elapsed_since_last_record_ms: u64,
    redraw_pending: bool,
    storage_fault: Option<IoError>,
}

impl Session {
    /// Fresh session: Live, Temperature, 10 s interval, first frame pending.
    pub const fn new() -> Self {
        Self {
            mode: Mode::Live,
            active_channel: Channel::Temperature,
            record_interval_seconds: RECORD_INTERVAL_DEFAULT_S,
            record_reference_ms: 0,
            elapsed_since_last_record_ms: 0,
            redraw_pending: true,
            storage_fault: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub const fn mode(&self) -> Mode { self.mode }

    #[inline]
    pub const fn active_channel(&self) -> Channel { self.active_channel }

    #[inline]
    pub const fn record_interval_seconds(&self) -> u8 { self.record_interval_seconds }

    /// Record interval in milliseconds.
    #[inline]
    pub const fn record_interval_ms(&self) -> u64 { self.record_interval_seconds as u64 * 1000 }

    #[inline]
    pub const fn elapsed_since_last_record_ms(&self) -> u64 { self.elapsed_since_last_record_ms }

    /// Whether the next step repaints the whole frame.
    #[inline]
    pub const fn redraw_pending(&self) -> bool { self.redraw_pending }

    /// Last persistent storage failure, shown until the next mode change.
    #[inline]
    pub const fn storage_fault(&self) -> Option<IoError> { self.storage_fault }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Switch to the next mode. Clears the fault indicator and requests a redraw.
    pub fn advance_mode(&mut self) -> Mode {
        self.mode = self.mode.next();
        self.storage_fault = None;
        self.redraw_pending = true;
        self.mode
    }

    /// Make `channel` active. Returns false if it already was.
    pub fn select_channel(
        &mut self,
        channel: Channel,
    ) -> bool {
        if channel == self.active_channel {
            return false;
        }
        self.active_channel = channel;
        self.redraw_pending = true;
        true
    }

    /// Change the record interval by `delta_seconds`, clamped to the allowed range.
    ///
    /// Returns the new interval. Only the readout changes, so no redraw is requested.
    pub fn adjust_interval(
        &mut self,
        delta_seconds: i8,
    ) -> u8 {
        let target = i16::from(self.record_interval_seconds) + i16::from(delta_seconds);
        self.record_interval_seconds =
            target.clamp(i16::from(RECORD_INTERVAL_MIN_S), i16::from(RECORD_INTERVAL_MAX_S)) as u8;
        self.record_interval_seconds
    }

    /// Abort Recording or Playback after a persistent storage failure.
    pub fn fall_back_to_live(
        &mut self,
        error: IoError,
    ) {
        self.mode = Mode::Live;
        self.storage_fault = Some(error);
        self.redraw_pending = true;
    }

    // =========================================================================
    // Record Clock
    // =========================================================================

    /// Start timing from `now_ms` with zero elapsed.
    pub fn restart_record_clock(
        &mut self,
        now_ms: u64,
    ) {
        self.record_reference_ms = now_ms;
        self.elapsed_since_last_record_ms = 0;
    }

    /// Update the elapsed time to `now_ms` and return it.
    pub fn update_elapsed(
        &mut self,
        now_ms: u64,
    ) -> u64 {
        self.elapsed_since_last_record_ms = now_ms.saturating_sub(self.record_reference_ms);
        self.elapsed_since_last_record_ms
    }

    /// Whether a full interval has passed since the last record.
    #[inline]
    pub const fn record_due(&self) -> bool { self.elapsed_since_last_record_ms >= self.record_interval_ms() }

    /// Whole seconds until the next record, rounded up.
    pub const fn seconds_until_record(&self) -> u64 {
        let left = self.record_interval_ms().saturating_sub(self.elapsed_since_last_record_ms);
        left.div_ceil(1000)
    }

    // =========================================================================
    // Redraw Flag
    // =========================================================================

    /// Clear the redraw flag, returning whether it was set.
    #[inline]
    pub fn take_redraw(&mut self) -> bool { core::mem::take(&mut self.redraw_pending) }
}

impl Default for Session {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
