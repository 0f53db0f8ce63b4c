//! Application configuration.
//!
//! - `layout`: Display dimensions, plot geometry and header positions
//! - `timing`: Control loop cadence, record interval limits, retry budget

pub mod layout;
pub mod timing;

// Re-export layout constants at config level for convenience
pub use layout::{PLOT_AREA, SCREEN_HEIGHT, SCREEN_WIDTH};
// Re-export timing constants at config level for convenience
pub use timing::{
    LIVE_SAMPLE_PERIOD_MS,
    RECORD_INTERVAL_DEFAULT_S,
    RECORD_INTERVAL_MAX_S,
    RECORD_INTERVAL_MIN_S,
    RECORD_INTERVAL_STEP_S,
    STORAGE_RETRY_ATTEMPTS,
    TICK_MS,
};

/// Runtime configuration for [`RecordingController`](crate::RecordingController).
///
/// Defaults come from the constants above; tests shorten the periods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Period between live samples of the active channel.
    pub live_sample_period_ms: u64,
    /// Attempts per storage transaction.
    pub storage_attempts: u8,
    /// Plot geometry handed to the graph renderer.
    pub plot: crate::graph::PlotArea,
}

impl ControllerConfig {
    /// Configuration used by the firmware.
    pub const fn new() -> Self {
        Self {
            live_sample_period_ms: LIVE_SAMPLE_PERIOD_MS,
            storage_attempts: STORAGE_RETRY_ATTEMPTS,
            plot: PLOT_AREA,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self { Self::new() }
}
