//! Handheld sensor logger firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Plots one of three sensor channels on the Pimoroni PIM715 Display Pack 2.8"
//! and records it to a 24LC256 EEPROM.
//!
//! # Architecture
//!
//! A single control loop runs every [`TICK_MS`]: poll the buttons, run one
//! [`RecordingController::step`], sleep. No other tasks are spawned.
//!
//! # Button Controls
//!
//! - **X**: Next channel (Live and interval setup only)
//! - **Y**: Next mode (Live → Interval → Recording → Playback → Live)
//! - **A**: Record interval +5 s (interval setup)
//! - **B**: Record interval -5 s (interval setup)
//!
//! # Wiring
//!
//! - EEPROM: I2C0, SDA=GPIO4, SCL=GPIO5, address 0x50
//! - Potentiometer: GPIO26 (ADC0)
//! - Light sensor divider: GPIO27 (ADC1)

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the binary (not testable on host)
#[cfg(target_arch = "arm")]
mod board;
#[cfg(target_arch = "arm")]
mod display;

#[cfg(target_arch = "arm")]
use defmt::{error, info, warn};
#[cfg(target_arch = "arm")]
use embassy_executor::Spawner;
#[cfg(target_arch = "arm")]
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
#[cfg(target_arch = "arm")]
use embassy_rp::gpio::{Input, Level, Output, Pull};
#[cfg(target_arch = "arm")]
use embassy_rp::i2c::{Config as I2cConfig, I2c};
#[cfg(target_arch = "arm")]
use embassy_rp::spi::Spi;
#[cfg(target_arch = "arm")]
use embassy_time::{Delay, Instant, Timer};
#[cfg(target_arch = "arm")]
use sensor_logger::canvas::GraphicsCanvas;
#[cfg(target_arch = "arm")]
use sensor_logger::channel::storage_end;
#[cfg(target_arch = "arm")]
use sensor_logger::colors::Palette;
#[cfg(target_arch = "arm")]
use sensor_logger::config::TICK_MS;
#[cfg(target_arch = "arm")]
use sensor_logger::input::{ButtonLevels, Buttons, InputEvents};
#[cfg(target_arch = "arm")]
use sensor_logger::storage::{EEPROM_ADDRESS, Eeprom, EepromGeometry};
#[cfg(target_arch = "arm")]
use sensor_logger::{RecordingController, Session, Tick};
#[cfg(target_arch = "arm")]
use {defmt_rtt as _, panic_probe as _};

#[cfg(target_arch = "arm")]
use crate::board::BoardSensors;
#[cfg(target_arch = "arm")]
use crate::display::{display_spi_config, init_display};

/// I2C clock for the EEPROM (24LC256 supports 400 kHz).
#[cfg(target_arch = "arm")]
const I2C_FREQUENCY_HZ: u32 = 400_000;

// Every channel region must fit on the fitted EEPROM
#[cfg(target_arch = "arm")]
const _: () = assert!(storage_end() <= EepromGeometry::LC256.size, "channel storage exceeds the EEPROM");

// Program metadata for `picotool info`
#[cfg(target_arch = "arm")]
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"sensor-logger"),
    embassy_rp::binary_info::rp_program_description!(c"Sensor data logger with EEPROM recording on PIM715 Display"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[cfg(target_arch = "arm")]
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Sensor logger starting...");

    let p = embassy_rp::init(Default::default());

    // Initialize display pins
    // PIM715 pinout: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let _backlight = Output::new(p.PIN_20, Level::High);

    // Initialize SPI (TX-only, display doesn't need MISO)
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());
    let display = match init_display(spi, cs, dc) {
        Ok(display) => display,
        Err(e) => {
            error!("Display init failed: {}", e);
            loop {
                Timer::after_millis(1000).await;
            }
        }
    };
    let mut canvas = GraphicsCanvas::new(display, Palette::DARK);
    info!("Display initialized");

    // EEPROM on I2C0 (SCL=5, SDA=4)
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let mut storage = Eeprom::new(i2c, Delay, EEPROM_ADDRESS, EepromGeometry::LC256);
    info!("EEPROM at {=u8:#x}", EEPROM_ADDRESS);

    // Sensors on the ADC
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let mut sensors = BoardSensors::new(
        adc,
        AdcChannel::new_temp_sensor(p.ADC_TEMP_SENSOR),
        AdcChannel::new_pin(p.PIN_27, Pull::None),
        AdcChannel::new_pin(p.PIN_26, Pull::None),
    );

    // Initialize buttons (active-low with internal pull-up)
    // PIM715: A=12, B=13, X=14, Y=15
    let btn_a = Input::new(p.PIN_12, Pull::Up);
    let btn_b = Input::new(p.PIN_13, Pull::Up);
    let btn_x = Input::new(p.PIN_14, Pull::Up);
    let btn_y = Input::new(p.PIN_15, Pull::Up);
    let mut buttons = Buttons::default();
    info!("Buttons initialized!");

    let mut controller = RecordingController::default();
    let mut session = Session::new();
    let start = Instant::now();

    info!("Main loop starting");

    loop {
        let now_ms = start.elapsed().as_millis();

        let levels = ButtonLevels {
            a: btn_a.is_low(),
            b: btn_b.is_low(),
            x: btn_x.is_low(),
            y: btn_y.is_low(),
        };
        let events = InputEvents::from_buttons(&mut buttons, levels, session.active_channel(), now_ms);

        match controller.step(&mut session, events, now_ms, &mut sensors, &mut storage, &mut canvas) {
            Tick::Recorded(value) => info!("Record #{}: {}", now_ms / 1000, value),
            Tick::PlaybackLoaded => info!("Playback of {}", session.active_channel()),
            Tick::Fault(e) => warn!("Back to Live after {}", e),
            Tick::Idle | Tick::Sampled(_) => {}
        }

        Timer::after_millis(TICK_MS).await;
    }
}

/// The firmware only runs on the RP2350; host builds get an empty binary.
#[cfg(not(target_arch = "arm"))]
fn main() {}
