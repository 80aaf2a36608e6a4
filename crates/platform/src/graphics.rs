//! [`DisplaySurface`] on top of any embedded-graphics draw target.
//!
//! Used by the simulator and by boards where the panel is a plain
//! framebuffer instead of a DWIN serial display. Draw errors are dropped,
//! matching the fire-and-forget contract of the surface.

use embedded_graphics::mono_font::ascii::FONT_8X13;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::display::{DisplaySurface, Fill, IconId, ScrollDirection};

/// Edge length of the placeholder drawn for icons.
pub const ICON_SIZE: u32 = 20;

/// Renders surface primitives into an embedded-graphics target.
pub struct GraphicsSurface<D> {
    target: D,
    frames: u32,
    icon_color: Rgb565,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap a draw target.
    pub fn new(target: D) -> Self {
        Self {
            target,
            frames: 0,
            icon_color: crate::display::palette::TEXT,
        }
    }

    /// Number of completed frames.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Borrow the underlying target.
    pub fn target(&self) -> &D {
        &self.target
    }
}

impl<D> DisplaySurface for GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn draw_rect(&mut self, area: Rectangle, color: Rgb565, fill: Fill) {
        let style = match fill {
            Fill::Solid => PrimitiveStyle::with_fill(color),
            Fill::Outline => PrimitiveStyle::with_stroke(color, 1),
        };
        let _ = area.into_styled(style).draw(&mut self.target);
    }

    fn draw_string(&mut self, origin: Point, text: &str, fg: Rgb565, bg: Rgb565) {
        let style = MonoTextStyleBuilder::new()
            .font(&FONT_8X13)
            .text_color(fg)
            .background_color(bg)
            .build();
        let _ = Text::with_baseline(text, origin, style, Baseline::Top).draw(&mut self.target);
    }

    fn draw_icon(&mut self, origin: Point, _icon: IconId) {
        // Icon bitmaps live in panel flash; a framebuffer gets an outline box.
        let frame = Rectangle::new(origin, Size::new(ICON_SIZE, ICON_SIZE));
        let _ = frame
            .into_styled(PrimitiveStyle::with_stroke(self.icon_color, 1))
            .draw(&mut self.target);
    }

    fn draw_line(&mut self, start: Point, end: Point, color: Rgb565) {
        let _ = Line::new(start, end)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target);
    }

    fn supports_area_move(&self) -> bool {
        false
    }

    fn move_area(
        &mut self,
        area: Rectangle,
        _direction: ScrollDirection,
        _distance: u32,
        fill: Rgb565,
    ) {
        // No pixel read-back on a generic target: clear and let the caller repaint.
        let _ = area
            .into_styled(PrimitiveStyle::with_fill(fill))
            .draw(&mut self.target);
    }

    fn update_frame(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }
}
