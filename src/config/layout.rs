//! Display and layout configuration constants.
//!
//! # Optimization: Pre-computed Layout Constants
//!
//! Layout positions are computed at compile time as `const`, so the renderer
//! never recalculates them per tick. The plot geometry keeps the proportions of
//! a 96x64 OLED layout (axes left and below the plot, arrows at the
//! ends, ticks on the vertical axis) scaled up to the 320x240 panel.

use embedded_graphics::prelude::Point;

use crate::graph::PlotArea;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (ST7789 on Pimoroni PIM715: 320x240)
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

// =============================================================================
// Plot Geometry
// =============================================================================

/// Left edge of the plot; the vertical axis is drawn on this column.
pub const PLOT_X0: i32 = 24;

/// Top of the plot; a sample at the top of its display range lands here.
pub const PLOT_Y0: i32 = 48;

/// Plot width. With 20 samples each point is 14 px apart.
pub const PLOT_WIDTH: u32 = 280;

/// Plot height (`H`). The horizontal axis sits at `PLOT_Y0 + PLOT_HEIGHT`.
pub const PLOT_HEIGHT: u32 = 176;

/// Plot area used by the firmware renderer.
pub const PLOT_AREA: PlotArea = PlotArea::new(PLOT_X0, PLOT_Y0, PLOT_WIDTH, PLOT_HEIGHT);

// =============================================================================
// Header Row
// =============================================================================

/// Header bar height in pixels (readout and fault indicator).
pub const HEADER_HEIGHT: u32 = 28;

/// Top-left corner of the numeric readout text.
pub const READOUT_ORIGIN: Point = Point::new(4, 6);

/// Width reserved for the readout (18 `ProFont` 18pt glyphs). The fault indicator uses the rest.
pub const READOUT_WIDTH: u32 = 224;

/// Top-left corner of the `I/O ERR` indicator.
pub const FAULT_ORIGIN: Point = Point::new(READOUT_WIDTH as i32 + 8, 6);

/// Pre-computed bottom-right corner of the readout clear rectangle.
pub const READOUT_CLEAR_END: Point = Point::new(READOUT_WIDTH as i32 - 1, HEADER_HEIGHT as i32 - 1);
