//! Button debounce and per-tick input events.
//!
//! The display pack has four active-low buttons. Each is polled once per tick
//! through a [`ButtonState`], and the resulting edges are folded into one
//! [`InputEvents`] value for the controller.
//!
//! | Button | Event                       |
//! |--------|-----------------------------|
//! | X      | channel-select (next)       |
//! | Y      | mode-advance                |
//! | A      | interval +5 s               |
//! | B      | interval -5 s               |

use crate::channel::Channel;
use crate::config::RECORD_INTERVAL_STEP_S;

/// Debounce duration in milliseconds.
pub const DEBOUNCE_MS: u64 = 50;

/// Button debounce state with time-based edge detection.
#[derive(Clone, Copy, Debug, Default)]
pub struct ButtonState {
    was_pressed: bool,
    last_change_ms: Option<u64>,
}

impl ButtonState {
    /// Create a new button state (not pressed).
    pub const fn new() -> Self {
        Self {
            was_pressed: false,
            last_change_ms: None,
        }
    }

    /// Returns true only on the falling edge (button just pressed).
    ///
    /// Buttons are active-low, so `is_low` means pressed. A level change within
    /// [`DEBOUNCE_MS`] of the previous accepted change is treated as bounce.
    pub fn just_pressed(
        &mut self,
        is_low: bool,
        now_ms: u64,
    ) -> bool {
        if is_low == self.was_pressed {
            return false;
        }

        if let Some(last) = self.last_change_ms
            && now_ms.saturating_sub(last) < DEBOUNCE_MS
        {
            return false;
        }

        self.was_pressed = is_low;
        self.last_change_ms = Some(now_ms);
        is_low
    }
}

/// Debounce state for the four display-pack buttons.
#[derive(Clone, Copy, Debug, Default)]
pub struct Buttons {
    pub a: ButtonState,
    pub b: ButtonState,
    pub x: ButtonState,
    pub y: ButtonState,
}

/// Raw button levels sampled this tick (true = pressed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonLevels {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
}

/// Input gathered during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputEvents {
    /// Channel the user asked for, if any.
    pub channel_select: Option<Channel>,
    /// Advance to the next mode.
    pub mode_advance: bool,
    /// Record interval change in seconds (0 = none).
    pub interval_delta: i8,
}

impl InputEvents {
    /// No input this tick.
    pub const NONE: Self = Self {
        channel_select: None,
        mode_advance: false,
        interval_delta: 0,
    };

    /// Whether nothing happened.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.channel_select.is_none() && !self.mode_advance && self.interval_delta == 0
    }

    /// Debounce `levels` and map the edges to events.
    ///
    /// X selects the channel after `current`; A and B together cancel out.
    pub fn from_buttons(
        buttons: &mut Buttons,
        levels: ButtonLevels,
        current: Channel,
        now_ms: u64,
    ) -> Self {
        let mut events = Self::NONE;

        if buttons.x.just_pressed(levels.x, now_ms) {
            events.channel_select = Some(current.next());
        }
        if buttons.y.just_pressed(levels.y, now_ms) {
            events.mode_advance = true;
        }
        if buttons.a.just_pressed(levels.a, now_ms) {
            events.interval_delta += RECORD_INTERVAL_STEP_S;
        }
        if buttons.b.just_pressed(levels.b, now_ms) {
            events.interval_delta -= RECORD_INTERVAL_STEP_S;
        }

        events
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edge_only() {
        let mut button = ButtonState::new();
        assert!(!button.just_pressed(false, 0));
        assert!(button.just_pressed(true, 100));
        // Held: no repeat
        assert!(!button.just_pressed(true, 200));
        assert!(!button.just_pressed(true, 5_000));
        // Release is not an event
        assert!(!button.just_pressed(false, 5_100));
        assert!(button.just_pressed(true, 5_200));
    }

    #[test]
    fn test_bounce_rejected() {
        let mut button = ButtonState::new();
        assert!(button.just_pressed(true, 1_000));
        // Contact bounce within the window
        assert!(!button.just_pressed(false, 1_010));
        assert!(!button.just_pressed(true, 1_020));
        // Stable release after the window, then a fresh press
        assert!(!button.just_pressed(false, 1_060));
        assert!(!button.just_pressed(true, 1_070));
        assert!(button.just_pressed(true, 1_110));
    }

    #[test]
    fn test_first_press_not_debounced() {
        let mut button = ButtonState::new();
        assert!(button.just_pressed(true, 0));
    }

    #[test]
    fn test_events_from_buttons() {
        let mut buttons = Buttons::default();
        let levels = ButtonLevels {
            x: true,
            a: true,
            ..ButtonLevels::default()
        };
        let events = InputEvents::from_buttons(&mut buttons, levels, Channel::Potentiometer, 0);
        assert_eq!(events.channel_select, Some(Channel::Temperature));
        assert!(!events.mode_advance);
        assert_eq!(events.interval_delta, 5);

        // Still held next tick: nothing new
        let events = InputEvents::from_buttons(&mut buttons, levels, Channel::Temperature, 50);
        assert!(events.is_empty());
    }

    #[test]
    fn test_interval_buttons_cancel() {
        let mut buttons = Buttons::default();
        let levels = ButtonLevels {
            a: true,
            b: true,
            y: true,
            ..ButtonLevels::default()
        };
        let events = InputEvents::from_buttons(&mut buttons, levels, Channel::Light, 0);
        assert_eq!(events.interval_delta, 0);
        assert!(events.mode_advance);
    }
}
