//! Sensor wiring of the logger board.
//!
//! All three channels share the RP2350's single ADC in blocking mode:
//! - Temperature: internal sensor (ADC channel 4)
//! - Potentiometer: GPIO26
//! - Light: GPIO27
//!
//! GPIO26-28 also drive the PIM715 RGB LED; the firmware never configures
//! them as outputs, so the LED stays dark.

use embassy_rp::adc::{Adc, Blocking, Channel as AdcChannel};
use sensor_logger::Channel;
use sensor_logger::sensors::{LastGood, SensorBank, convert};

/// ADC-backed [`SensorBank`].
pub struct BoardSensors<'d> {
    adc: Adc<'d, Blocking>,
    temperature: AdcChannel<'d>,
    light: AdcChannel<'d>,
    potentiometer: AdcChannel<'d>,
    last_good: LastGood,
}

impl<'d> BoardSensors<'d> {
    pub fn new(
        adc: Adc<'d, Blocking>,
        temperature: AdcChannel<'d>,
        light: AdcChannel<'d>,
        potentiometer: AdcChannel<'d>,
    ) -> Self {
        Self {
            adc,
            temperature,
            light,
            potentiometer,
            last_good: LastGood::new(),
        }
    }
}

impl SensorBank for BoardSensors<'_> {
    fn read_channel(
        &mut self,
        channel: Channel,
    ) -> u16 {
        let input = match channel {
            Channel::Temperature => &mut self.temperature,
            Channel::Light => &mut self.light,
            Channel::Potentiometer => &mut self.potentiometer,
        };
        let reading = self.adc.blocking_read(input).ok().map(|raw| convert(channel, raw));
        self.last_good.update(channel, reading)
    }
}
