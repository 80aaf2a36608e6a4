//! Display surface abstraction
//!
//! The panel is driven through a handful of drawing primitives. Calls are
//! fire-and-forget: the surface buffers or transmits them and nothing is
//! reported back to the menu layer. [`DisplaySurface::update_frame`] marks
//! the end of a batch of primitives.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::Rectangle;

/// Opaque identifier of a bitmap stored in the panel's icon library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IconId(pub u16);

/// Rectangle rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fill {
    /// Filled interior
    Solid,
    /// 1 px outline only
    Outline,
}

/// Direction of a hardware area move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    /// Content moves towards the top of the screen
    Up,
    /// Content moves towards the bottom of the screen
    Down,
}

/// Drawing primitives exposed by the panel.
pub trait DisplaySurface {
    /// Draw a rectangle.
    fn draw_rect(&mut self, area: Rectangle, color: Rgb565, fill: Fill);

    /// Draw a string with its top-left corner at `origin`.
    fn draw_string(&mut self, origin: Point, text: &str, fg: Rgb565, bg: Rgb565);

    /// Draw an icon from the panel's icon library.
    fn draw_icon(&mut self, origin: Point, icon: IconId);

    /// Draw a 1 px line.
    fn draw_line(&mut self, start: Point, end: Point, color: Rgb565);

    /// Whether [`move_area`](Self::move_area) is backed by the hardware.
    ///
    /// Surfaces that cannot move pixels return `false` and the menu layer
    /// repaints the whole list instead of scrolling it.
    fn supports_area_move(&self) -> bool {
        true
    }

    /// Move the content of `area` by `distance` pixels, filling the vacated
    /// band with `fill`.
    fn move_area(&mut self, area: Rectangle, direction: ScrollDirection, distance: u32, fill: Rgb565);

    /// Flush everything drawn since the previous call.
    fn update_frame(&mut self);
}

/// Colours used by the menu renderer.
pub mod palette {
    use embedded_graphics::pixelcolor::Rgb565;

    /// Screen background
    pub const BACKGROUND: Rgb565 = Rgb565::new(0, 0, 0);
    /// Title bar background
    pub const TITLE_BAR: Rgb565 = Rgb565::new(0x02, 0x0B, 0x0E);
    /// Regular text
    pub const TEXT: Rgb565 = Rgb565::new(0x1F, 0x3F, 0x1F);
    /// Row separator lines
    pub const SEPARATOR: Rgb565 = Rgb565::new(0x0A, 0x14, 0x0A);
    /// Menu cursor bar
    pub const CURSOR: Rgb565 = Rgb565::new(0x1F, 0x20, 0x00);
    /// Background of a value being edited
    pub const EDIT_BACKGROUND: Rgb565 = Rgb565::new(0x06, 0x0C, 0x06);
    /// Popup window frame
    pub const POPUP: Rgb565 = Rgb565::new(0x06, 0x0C, 0x0E);
}
