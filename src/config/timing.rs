//! Control loop timing and recording limits.

// =============================================================================
// Control Loop
// =============================================================================

/// Control loop period. Input is polled and one controller step runs per tick.
pub const TICK_MS: u64 = 50;

/// Period between live samples of the active channel.
pub const LIVE_SAMPLE_PERIOD_MS: u64 = 1000;

// =============================================================================
// Recording
// =============================================================================

/// Shortest selectable record interval.
pub const RECORD_INTERVAL_MIN_S: u8 = 10;

/// Longest selectable record interval.
pub const RECORD_INTERVAL_MAX_S: u8 = 60;

/// Record interval a fresh session starts with.
pub const RECORD_INTERVAL_DEFAULT_S: u8 = RECORD_INTERVAL_MIN_S;

/// Interval change per A/B button press.
pub const RECORD_INTERVAL_STEP_S: i8 = 5;

// =============================================================================
// Storage
// =============================================================================

/// Attempts per storage transaction before the failure is reported.
pub const STORAGE_RETRY_ATTEMPTS: u8 = 3;
