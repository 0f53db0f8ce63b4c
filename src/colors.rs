//! Color constants and the logger palette.
//!
//! Uses the built-in `RgbColor` trait constants where they exist. Rgb565 is the
//! native format of the ST7789 panel, so no conversion happens per pixel.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Plot background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Axes, polyline and readout text.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Storage fault indicator.
pub const RED: Rgb565 = Rgb565::RED;

// =============================================================================
// Palette
// =============================================================================

/// Colors a [`GraphicsCanvas`](crate::canvas::GraphicsCanvas) resolves inks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Screen and plot background.
    pub background: Rgb565,
    /// Axes, trace, markers and readout.
    pub foreground: Rgb565,
    /// Error indicator.
    pub alert: Rgb565,
}

impl Palette {
    /// White on black with a red alert, the firmware default.
    pub const DARK: Self = Self {
        background: BLACK,
        foreground: WHITE,
        alert: RED,
    };

    /// Black on white, for a monochrome OLED look.
    pub const LIGHT: Self = Self {
        background: WHITE,
        foreground: BLACK,
        alert: RED,
    };
}

impl Default for Palette {
    fn default() -> Self { Self::DARK }
}
