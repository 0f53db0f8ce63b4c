//! Logging macros for library code.
//!
//! Each macro forwards to the matching `defmt` macro when the `defmt` feature
//! is enabled and the crate is built for a bare-metal target. On the host
//! (unit tests, `cargo check`) they expand to nothing, so no global logger
//! has to be linked into the test harness.
//!
//! Arguments are still type-checked through `format_args!` on the host, which
//! keeps host and firmware builds in agreement about the format strings.

/// Log a message at Info level.
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", target_os = "none"))]
        defmt::info!($($arg)*);
        #[cfg(not(all(feature = "defmt", target_os = "none")))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log a message at Warn level.
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", target_os = "none"))]
        defmt::warn!($($arg)*);
        #[cfg(not(all(feature = "defmt", target_os = "none")))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log a message at Error level.
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", target_os = "none"))]
        defmt::error!($($arg)*);
        #[cfg(not(all(feature = "defmt", target_os = "none")))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log a message at Debug level.
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "defmt", target_os = "none"))]
        defmt::debug!($($arg)*);
        #[cfg(not(all(feature = "defmt", target_os = "none")))]
        let _ = format_args!($($arg)*);
    }};
}
