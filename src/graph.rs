//! Value-to-pixel scaling and polyline rendering.
//!
//! # Scaling
//!
//! A sample is mapped onto a plot of height `H` in two steps:
//!
//! 1. [`normalize`]: `floor((value - min) / (max - min) * H)`, clamped to `[0, H]`
//! 2. [`scale`]: `H - normalize`, so the range minimum lands on the bottom edge
//!    and the maximum on the top edge
//!
//! Out-of-range samples are pinned to the nearest edge; the buffer keeps them
//! unmodified.
//!
//! # Layout
//!
//! ```text
//!        ^            arrow tip at (x0, y0 - 6)
//!        |
//!      --+  y0        tick marks every H / delimiters
//!        |   *--*
//!      --+  /    *-*
//!        | *
//!        +------------------->   bottom = y0 + H
//!        x0              x0 + W
//! ```
//!
//! Sample `i` is drawn at `x0 + i * (W / CAPACITY)`. Consecutive samples are
//! joined by lines and each sample not resting on the bottom axis gets a
//! marker.
//!
//! # Update Strategy
//!
//! | Element  | Drawn by                       | When                         |
//! |----------|--------------------------------|------------------------------|
//! | Outline  | [`GraphRenderer::draw_outline`] | Full redraw only             |
//! | Polyline | [`GraphRenderer::render`]       | Every new sample             |
//! | Readout  | [`GraphRenderer::draw_readout`] | Only when the text changed   |

use embedded_graphics::prelude::Point;
use heapless::String;

use crate::buffer::{CAPACITY, SampleBuffer};
use crate::canvas::{Canvas, Ink};
use crate::channel::DisplayRange;
use crate::config::layout::{FAULT_ORIGIN, READOUT_CLEAR_END, READOUT_ORIGIN};

/// Longest readout text that is cached for change tracking.
pub const READOUT_CAPACITY: usize = 32;

/// Text of the storage fault indicator.
pub const FAULT_TEXT: &str = "I/O ERR";

/// Half-width of a vertical axis tick.
const TICK_HALF: i32 = 2;

/// Gap between the top of the plot and the top of the vertical axis.
const AXIS_OVERSHOOT: i32 = 2;

// =============================================================================
// Plot Geometry
// =============================================================================

/// Rectangle the polyline is drawn into.
///
/// `(x0, y0)` is the top-left corner. The vertical axis runs along `x0` and
/// the horizontal axis along `y0 + height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlotArea {
    /// Left edge, also the x of the first sample.
    pub x0: i32,
    /// Top edge, where a sample at the range maximum lands.
    pub y0: i32,
    /// Horizontal extent.
    pub width: u32,
    /// Vertical extent (`H`).
    pub height: u32,
}

impl PlotArea {
    /// Create a plot area. Height must be non-zero.
    pub const fn new(
        x0: i32,
        y0: i32,
        width: u32,
        height: u32,
    ) -> Self {
        assert!(height > 0, "plot height must not be zero");
        Self {
            x0,
            y0,
            width,
            height,
        }
    }

    /// Row of the horizontal axis.
    #[inline]
    pub const fn bottom(&self) -> i32 { self.y0 + self.height as i32 }

    /// Column where the horizontal axis ends.
    #[inline]
    pub const fn right(&self) -> i32 { self.x0 + self.width as i32 }

    /// Horizontal distance between samples.
    #[inline]
    pub const fn step(&self) -> i32 { (self.width / CAPACITY as u32) as i32 }
}

// =============================================================================
// Scaling
// =============================================================================

/// Distance of `value` above the range minimum, in pixels of a plot `height` tall.
///
/// Values below the range give 0, values above it give `height`.
pub const fn normalize(
    value: u16,
    range: DisplayRange,
    height: u32,
) -> u32 {
    if value <= range.min {
        return 0;
    }
    let t = (value - range.min) as u32 * height / range.span() as u32;
    if t > height { height } else { t }
}

/// Pixel offset of `value` from the top of a plot `height` tall.
///
/// The range minimum maps to `height` (bottom edge), the maximum to 0.
#[inline]
pub const fn scale(
    value: u16,
    range: DisplayRange,
    height: u32,
) -> u32 {
    height - normalize(value, range, height)
}

// =============================================================================
// Renderer
// =============================================================================

/// Draws the plot outline, the sample polyline and the header readout.
///
/// The renderer remembers the tick count of the last outline (so the vertical
/// axis can be restored after the plot is cleared) and the last readout text.
pub struct GraphRenderer {
    plot: PlotArea,
    delimiters: u8,
    readout: Option<String<READOUT_CAPACITY>>,
}

impl GraphRenderer {
    /// Create a renderer for the given plot area.
    pub const fn new(plot: PlotArea) -> Self {
        Self {
            plot,
            delimiters: 0,
            readout: None,
        }
    }

    /// Plot geometry.
    #[inline]
    pub const fn plot(&self) -> PlotArea { self.plot }

    /// Screen position of every sample in `buffer`, oldest first.
    pub fn points(
        &self,
        buffer: &SampleBuffer,
        range: DisplayRange,
    ) -> [Point; CAPACITY] {
        let step = self.plot.step();
        let mut points = [Point::zero(); CAPACITY];
        for (i, (point, value)) in points.iter_mut().zip(buffer.iter()).enumerate() {
            let y = scale(value, range, self.plot.height);
            *point = Point::new(self.plot.x0 + i as i32 * step, self.plot.y0 + y as i32);
        }
        points
    }

    /// Clear the screen and draw axes, arrows and `delimiters` tick marks.
    ///
    /// Also forgets the cached readout, since the header was cleared.
    pub fn draw_outline<C: Canvas>(
        &mut self,
        canvas: &mut C,
        delimiters: u8,
    ) {
        let p = self.plot;
        let bottom = p.bottom();
        let right = p.right();

        canvas.clear();
        self.delimiters = delimiters;
        self.readout = None;

        self.draw_vertical_axis(canvas);
        canvas.draw_line(Point::new(p.x0, bottom), Point::new(right, bottom));

        // Vertical arrow
        let tip = Point::new(p.x0, p.y0 - 6);
        canvas.draw_line(tip, Point::new(p.x0 - 2, p.y0 - 3));
        canvas.draw_line(tip, Point::new(p.x0 + 2, p.y0 - 3));

        // Horizontal arrow
        let tip = Point::new(right + 4, bottom);
        canvas.draw_line(tip, Point::new(right + 1, bottom - 2));
        canvas.draw_line(tip, Point::new(right + 1, bottom + 2));
    }

    /// Vertical axis line plus tick marks.
    fn draw_vertical_axis<C: Canvas>(
        &self,
        canvas: &mut C,
    ) {
        let p = self.plot;
        canvas.draw_line(Point::new(p.x0, p.y0 - AXIS_OVERSHOOT), Point::new(p.x0, p.bottom()));

        if self.delimiters == 0 {
            return;
        }
        let slot = (p.height / u32::from(self.delimiters)) as i32;
        for i in 0..i32::from(self.delimiters) {
            let y = p.y0 + slot * i;
            canvas.draw_line(Point::new(p.x0 - TICK_HALF, y), Point::new(p.x0 + TICK_HALF, y));
        }
    }

    /// Clear the plot interior and draw `buffer` as a polyline.
    ///
    /// The cleared strip starts one column left of the axis so markers on the
    /// first sample leave no trail; the axis and ticks are redrawn after it.
    pub fn render<C: Canvas>(
        &self,
        canvas: &mut C,
        buffer: &SampleBuffer,
        range: DisplayRange,
    ) {
        let p = self.plot;
        canvas.fill_rect(
            Point::new(p.x0 - 1, p.y0 - AXIS_OVERSHOOT),
            Point::new(p.right(), p.bottom() - 1),
            Ink::Background,
        );
        self.draw_vertical_axis(canvas);

        let points = self.points(buffer, range);
        for pair in points.windows(2) {
            canvas.draw_line(pair[0], pair[1]);
        }
        for point in points {
            if point.y != p.bottom() {
                canvas.draw_point(point);
            }
        }
    }

    /// Draw `text` in the header unless it is already showing.
    ///
    /// Returns true if anything was drawn.
    pub fn draw_readout<C: Canvas>(
        &mut self,
        canvas: &mut C,
        text: &str,
    ) -> bool {
        if self.readout.as_deref() == Some(text) {
            return false;
        }

        canvas.fill_rect(Point::new(0, 0), READOUT_CLEAR_END, Ink::Background);
        canvas.draw_text(READOUT_ORIGIN, text, Ink::Foreground);

        let mut cached = String::new();
        self.readout = cached.push_str(text).ok().map(|()| cached);
        true
    }

    /// Draw the storage fault indicator next to the readout.
    pub fn draw_fault_indicator<C: Canvas>(
        &self,
        canvas: &mut C,
    ) {
        canvas.draw_text(FAULT_ORIGIN, FAULT_TEXT, Ink::Alert);
    }

    /// Forget the cached readout so the next [`draw_readout`](Self::draw_readout) draws.
    #[inline]
    pub fn invalidate(&mut self) { self.readout = None; }
}

// =============================================================================
// Unit Tests
// =============================================================================
