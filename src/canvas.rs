//! Immediate-mode drawing primitives.
//!
//! The renderer and controller only see [`Canvas`]: lines, point markers,
//! rectangle fills and text. There is no retained scene; whatever was drawn
//! stays on screen until something is drawn over it.
//!
//! [`GraphicsCanvas`] maps these calls onto any embedded-graphics
//! `DrawTarget<Color = Rgb565>` (the ST7789 driver on hardware, a framebuffer
//! in tests). Draw errors are ignored, as a failed pixel write leaves nothing
//! to recover.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text, TextStyle, TextStyleBuilder};
use profont::PROFONT_18_POINT;

use crate::colors::Palette;

/// Which palette entry a fill or text uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ink {
    /// Axes, trace and readout.
    Foreground,
    /// Erases a region.
    Background,
    /// Error indicator.
    Alert,
}

/// Drawing collaborator used by the renderer.
///
/// Coordinates are absolute screen pixels. Rectangles are given by their
/// top-left and bottom-right corners, both inclusive.
pub trait Canvas {
    /// Fill the whole screen with the background.
    fn clear(&mut self);

    /// Straight line in the foreground color.
    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
    );

    /// Small filled marker centred on `at`.
    fn draw_point(
        &mut self,
        at: Point,
    );

    /// Solid rectangle.
    fn fill_rect(
        &mut self,
        top_left: Point,
        bottom_right: Point,
        ink: Ink,
    );

    /// Text with its top-left corner at `at`.
    fn draw_text(
        &mut self,
        at: Point,
        text: &str,
        ink: Ink,
    );
}

// =============================================================================
// embedded-graphics Adapter
// =============================================================================

/// Readout font (`ProFont` 18pt).
pub const TEXT_FONT: &MonoFont = &PROFONT_18_POINT;

/// Text anchored at its top-left corner.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new().baseline(Baseline::Top).build();

/// Trace and axis line width.
const STROKE_WIDTH: u32 = 1;

/// Diameter of a sample marker (one pixel around the centre).
pub const MARKER_DIAMETER: u32 = 3;

/// [`Canvas`] over an embedded-graphics draw target.
pub struct GraphicsCanvas<D> {
    target: D,
    palette: Palette,
}

impl<D> GraphicsCanvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap `target` with the given palette.
    pub const fn new(
        target: D,
        palette: Palette,
    ) -> Self {
        Self { target, palette }
    }

    /// Borrow the draw target.
    #[cfg(test)]
    #[inline]
    pub const fn target(&self) -> &D { &self.target }

    #[inline]
    const fn color(
        &self,
        ink: Ink,
    ) -> Rgb565 {
        match ink {
            Ink::Foreground => self.palette.foreground,
            Ink::Background => self.palette.background,
            Ink::Alert => self.palette.alert,
        }
    }
}

impl<D> Canvas for GraphicsCanvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn clear(&mut self) { self.target.clear(self.palette.background).ok(); }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
    ) {
        Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(self.palette.foreground, STROKE_WIDTH))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_point(
        &mut self,
        at: Point,
    ) {
        Circle::with_center(at, MARKER_DIAMETER)
            .into_styled(PrimitiveStyle::with_fill(self.palette.foreground))
            .draw(&mut self.target)
            .ok();
    }

    fn fill_rect(
        &mut self,
        top_left: Point,
        bottom_right: Point,
        ink: Ink,
    ) {
        Rectangle::with_corners(top_left, bottom_right)
            .into_styled(PrimitiveStyle::with_fill(self.color(ink)))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_text(
        &mut self,
        at: Point,
        text: &str,
        ink: Ink,
    ) {
        let style = MonoTextStyle::new(TEXT_FONT, self.color(ink));
        Text::with_text_style(text, at, style, TOP_LEFT)
            .draw(&mut self.target)
            .ok();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
