//! Sensor bank trait and ADC unit conversions.
//!
//! Every channel is read through the RP2350's 12-bit ADC (3.3 V reference):
//!
//! | Channel       | Source                     | Stored unit      |
//! |---------------|----------------------------|------------------|
//! | Temperature   | Internal sensor (ADC ch 4) | tenths of a °C   |
//! | Light         | LDR divider on GPIO27      | relative lux     |
//! | Potentiometer | Trimpot on GPIO26          | raw counts       |
//!
//! The conversions are plain functions so they can be tested on the host.

use micromath::F32Ext;

use crate::channel::Channel;

/// Largest value a 12-bit conversion returns.
pub const ADC_MAX: u16 = 4095;

/// ADC reference voltage.
pub const ADC_VREF: f32 = 3.3;

/// Sensor voltage at 27 °C (RP2350 datasheet).
const TEMP_SENSOR_V27: f32 = 0.706;

/// Sensor slope in volts per °C (negative coefficient, see formula).
const TEMP_SENSOR_SLOPE: f32 = 0.001_721;

/// Light reading at full ADC scale.
pub const LIGHT_FULL_SCALE: u16 = 500;

/// Source of one sample per channel.
///
/// Reads never fail: an implementation that loses a conversion reports the
/// last good value for that channel instead (see [`LastGood`]).
pub trait SensorBank {
    /// Current value of `channel` in its stored unit.
    fn read_channel(
        &mut self,
        channel: Channel,
    ) -> u16;
}

impl<S: SensorBank + ?Sized> SensorBank for &mut S {
    fn read_channel(
        &mut self,
        channel: Channel,
    ) -> u16 {
        (**self).read_channel(channel)
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Convert a raw internal temperature sensor reading to tenths of a °C.
///
/// `T = 27 - (V - 0.706) / 0.001721`. Readings below 0 °C give 0.
pub fn temperature_from_raw(raw: u16) -> u16 {
    let volts = f32::from(raw.min(ADC_MAX)) * ADC_VREF / f32::from(ADC_MAX);
    let celsius = 27.0 - (volts - TEMP_SENSOR_V27) / TEMP_SENSOR_SLOPE;
    let tenths = F32Ext::round(celsius * 10.0);
    if tenths <= 0.0 { 0 } else { tenths as u16 }
}

/// Convert a raw light divider reading to relative lux (0..=500).
#[inline]
pub const fn light_from_raw(raw: u16) -> u16 {
    let raw = if raw > ADC_MAX { ADC_MAX } else { raw };
    (raw as u32 * LIGHT_FULL_SCALE as u32 / ADC_MAX as u32) as u16
}

/// Potentiometer readings are stored as raw counts.
#[inline]
pub const fn potentiometer_from_raw(raw: u16) -> u16 { if raw > ADC_MAX { ADC_MAX } else { raw } }

/// Convert a raw conversion for `channel` into its stored unit.
pub fn convert(
    channel: Channel,
    raw: u16,
) -> u16 {
    match channel {
        Channel::Temperature => temperature_from_raw(raw),
        Channel::Light => light_from_raw(raw),
        Channel::Potentiometer => potentiometer_from_raw(raw),
    }
}

// =============================================================================
// Last Good Reading
// =============================================================================

/// Per-channel memory of the last successful conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LastGood {
    values: [u16; Channel::COUNT],
}

impl LastGood {
    /// All channels start at zero.
    pub const fn new() -> Self {
        Self {
            values: [0; Channel::COUNT],
        }
    }

    /// Record a conversion result, or fall back to the previous value on failure.
    pub fn update(
        &mut self,
        channel: Channel,
        reading: Option<u16>,
    ) -> u16 {
        let slot = &mut self.values[channel.index()];
        if let Some(value) = reading {
            *slot = value;
        } else {
            log_warn!("ADC read failed on {}, reusing {}", channel, *slot);
        }
        *slot
    }

    /// Last value stored for `channel`.
    #[inline]
    pub const fn get(
        &self,
        channel: Channel,
    ) -> u16 {
        self.values[channel.index()]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Raw reading for a given sensor voltage.
    fn raw_for_volts(volts: f32) -> u16 { (volts * f32::from(ADC_MAX) / ADC_VREF).round() as u16 }

    #[test]
    fn test_temperature_at_reference_point() {
        // 0.706 V is 27 °C; ADC quantisation keeps it within 0.5 °C
        let tenths = temperature_from_raw(raw_for_volts(0.706));
        assert!((265..=275).contains(&tenths), "got {tenths}");
    }

    #[test]
    fn test_temperature_falls_with_voltage() {
        let warm = temperature_from_raw(raw_for_volts(0.690));
        let cool = temperature_from_raw(raw_for_volts(0.720));
        assert!(warm > cool);
        // Roughly 17 °C apart over 30 mV
        assert!((150..=200).contains(&(warm - cool)), "{warm} - {cool}");
    }

    #[test]
    fn test_temperature_floor_at_zero() {
        assert_eq!(temperature_from_raw(ADC_MAX), 0);
        assert_eq!(temperature_from_raw(u16::MAX), 0);
    }

    #[test]
    fn test_light_scale() {
        assert_eq!(light_from_raw(0), 0);
        assert_eq!(light_from_raw(ADC_MAX), LIGHT_FULL_SCALE);
        assert_eq!(light_from_raw(u16::MAX), LIGHT_FULL_SCALE);
        assert_eq!(light_from_raw(2048), 250);
    }

    #[test]
    fn test_potentiometer_raw() {
        assert_eq!(convert(Channel::Potentiometer, 1234), 1234);
        assert_eq!(convert(Channel::Potentiometer, 9000), ADC_MAX);
    }

    #[test]
    fn test_last_good_substitutes() {
        let mut last = LastGood::new();
        assert_eq!(last.update(Channel::Light, None), 0);
        assert_eq!(last.update(Channel::Light, Some(120)), 120);
        assert_eq!(last.update(Channel::Light, None), 120);
        assert_eq!(last.get(Channel::Temperature), 0);
    }
}
