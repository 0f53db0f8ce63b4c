//! Sensor logger library - testable modules for the handheld data logger.
//!
//! This library contains the core logic that can be tested on the host machine.
//! The binary (`main.rs`) uses this library and adds the embedded-specific code
//! (ADC, I2C, SPI display, buttons).
//!
//! # Core
//!
//! - [`buffer`]: Fixed-capacity per-channel sample history
//! - [`codec`]: Big-endian sample encoding into a byte-addressed store
//! - [`graph`]: Value-to-pixel scaling and polyline rendering
//! - [`controller`]: Live / interval / record / playback state machine
//!
//! # Collaborators
//!
//! - [`sensors`]: Sensor bank trait and ADC unit conversions
//! - [`storage`]: Storage trait, in-memory store, 24xx EEPROM driver
//! - [`canvas`]: Drawing primitives and the embedded-graphics adapter
//! - [`input`]: Button debounce and per-tick input events
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

#[macro_use]
mod logging;

// Configuration
pub mod config;

// Core
pub mod buffer;
pub mod channel;
pub mod codec;
pub mod controller;
pub mod error;
pub mod graph;
pub mod session;

// Collaborators
pub mod canvas;
pub mod colors;
pub mod input;
pub mod sensors;
pub mod storage;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use buffer::{CAPACITY, SampleBuffer};
pub use channel::{Channel, DisplayRange};
pub use codec::PersistenceCodec;
pub use controller::{RecordingController, Tick};
pub use error::IoError;
pub use session::{Mode, Session};
