//! Menu painting primitives over a [`DisplaySurface`].
//!
//! Layout of the 272×480 portrait panel:
//!
//! ```text
//!   0 ┌──────────────┐ title bar
//!  30 ├──────────────┤
//!  49 │ row 0 (Back) │ ROW_HEIGHT each, rows 0..=visible
//!     │ ...          │
//! 380 ├──────────────┤ status area (Main only)
//! 480 └──────────────┘
//! ```

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use platform::{palette, DisplaySurface, Fill, IconId, ScrollDirection};

/// Panel width in pixels.
pub const WIDTH: u32 = 272;
/// Panel height in pixels.
pub const HEIGHT: u32 = 480;
/// Height of the title bar.
pub const TITLE_HEIGHT: u32 = 30;
/// Y of the first menu row.
pub const LIST_TOP: i32 = 49;
/// Height of one menu row.
pub const ROW_HEIGHT: u32 = 53;
/// Y of the status area.
pub const STATUS_TOP: i32 = 380;
const STATUS_HEIGHT: u32 = 100;

const CURSOR_WIDTH: u32 = 10;
const ICON_X: i32 = 26;
const LABEL_X: i32 = 60;
const VALUE_X: i32 = 190;
const TEXT_INSET: i32 = 20;

/// Icon ids in the panel's icon library.
pub mod icons {
    use platform::IconId;

    /// Back arrow
    pub const BACK: IconId = IconId(1);
    /// Folder (opens a submenu)
    pub const SUBMENU: IconId = IconId(2);
    /// Single action
    pub const ACTION: IconId = IconId(3);
    /// Editable value
    pub const VALUE: IconId = IconId(4);
    /// Mixing mode
    pub const MODE: IconId = IconId(5);
}

#[allow(clippy::cast_possible_wrap)]
const ROW_HEIGHT_I: i32 = ROW_HEIGHT as i32;

/// Y of the top edge of screen row `screen_row`.
pub fn row_top(screen_row: u8) -> i32 {
    LIST_TOP.saturating_add(ROW_HEIGHT_I.saturating_mul(i32::from(screen_row)))
}

/// Area covered by screen rows `0..=visible`.
pub fn list_area(visible: u8) -> Rectangle {
    let rows = u32::from(visible).saturating_add(1);
    Rectangle::new(
        Point::new(0, LIST_TOP),
        Size::new(WIDTH, ROW_HEIGHT.saturating_mul(rows)),
    )
}

fn row_area(screen_row: u8) -> Rectangle {
    Rectangle::new(
        Point::new(0, row_top(screen_row)),
        Size::new(WIDTH, ROW_HEIGHT),
    )
}

/// Blank the whole panel.
pub fn clear<D: DisplaySurface + ?Sized>(display: &mut D) {
    display.draw_rect(
        Rectangle::new(Point::zero(), Size::new(WIDTH, HEIGHT)),
        palette::BACKGROUND,
        Fill::Solid,
    );
}

/// Title bar with `text`.
pub fn title<D: DisplaySurface + ?Sized>(display: &mut D, text: &str) {
    display.draw_rect(
        Rectangle::new(Point::zero(), Size::new(WIDTH, TITLE_HEIGHT)),
        palette::TITLE_BAR,
        Fill::Solid,
    );
    display.draw_string(Point::new(14, 8), text, palette::TEXT, palette::TITLE_BAR);
}

/// One menu row: icon, label, optional value and the separator below it.
pub fn row<D: DisplaySurface + ?Sized>(
    display: &mut D,
    screen_row: u8,
    icon: IconId,
    label: &str,
    value: Option<&str>,
) {
    let top = row_top(screen_row);
    display.draw_rect(row_area(screen_row), palette::BACKGROUND, Fill::Solid);
    display.draw_icon(Point::new(ICON_X, top.saturating_add(16)), icon);
    display.draw_string(
        Point::new(LABEL_X, top.saturating_add(TEXT_INSET)),
        label,
        palette::TEXT,
        palette::BACKGROUND,
    );
    if let Some(value) = value {
        draw_value(display, screen_row, value, false);
    }
    let line_y = top.saturating_add(ROW_HEIGHT_I).saturating_sub(1);
    display.draw_line(
        Point::new(16, line_y),
        Point::new(256, line_y),
        palette::SEPARATOR,
    );
}

/// Plain text on `screen_row`, without icon or separator.
pub fn text_line<D: DisplaySurface + ?Sized>(display: &mut D, screen_row: u8, text: &str) {
    display.draw_rect(row_area(screen_row), palette::BACKGROUND, Fill::Solid);
    display.draw_string(
        Point::new(LABEL_X, row_top(screen_row).saturating_add(TEXT_INSET)),
        text,
        palette::TEXT,
        palette::BACKGROUND,
    );
}

/// Value column of a row; `editing` highlights it.
pub fn draw_value<D: DisplaySurface + ?Sized>(display: &mut D, screen_row: u8, text: &str, editing: bool) {
    let top = row_top(screen_row);
    let bg = if editing {
        palette::EDIT_BACKGROUND
    } else {
        palette::BACKGROUND
    };
    display.draw_rect(
        Rectangle::new(
            Point::new(VALUE_X.saturating_sub(4), top.saturating_add(14)),
            Size::new(78, 25),
        ),
        bg,
        Fill::Solid,
    );
    display.draw_string(
        Point::new(VALUE_X, top.saturating_add(TEXT_INSET)),
        text,
        palette::TEXT,
        bg,
    );
}

/// Show or hide the cursor bar on `screen_row`.
pub fn cursor<D: DisplaySurface + ?Sized>(display: &mut D, screen_row: u8, on: bool) {
    let color = if on { palette::CURSOR } else { palette::BACKGROUND };
    display.draw_rect(
        Rectangle::new(
            Point::new(0, row_top(screen_row)),
            Size::new(CURSOR_WIDTH, ROW_HEIGHT.saturating_sub(1)),
        ),
        color,
        Fill::Solid,
    );
}

/// Shift the list by one row in `direction`.
pub fn scroll<D: DisplaySurface + ?Sized>(display: &mut D, visible: u8, direction: ScrollDirection) {
    display.move_area(list_area(visible), direction, ROW_HEIGHT, palette::BACKGROUND);
}

/// Modal popup with a question and two buttons; `selected` is 0 or 1.
pub fn popup<D: DisplaySurface + ?Sized>(
    display: &mut D,
    heading: &str,
    prompt: &str,
    options: [&str; 2],
    selected: u8,
) {
    display.draw_rect(
        Rectangle::new(Point::new(14, 120), Size::new(244, 220)),
        palette::POPUP,
        Fill::Solid,
    );
    display.draw_string(Point::new(30, 140), heading, palette::TEXT, palette::POPUP);
    display.draw_string(Point::new(30, 180), prompt, palette::TEXT, palette::POPUP);
    for (index, (label, x)) in options.iter().zip([26_i32, 146]).enumerate() {
        let button = Rectangle::new(Point::new(x, 260), Size::new(100, 40));
        display.draw_rect(button, palette::TITLE_BAR, Fill::Solid);
        let highlight = if usize::from(selected) == index {
            palette::CURSOR
        } else {
            palette::TITLE_BAR
        };
        display.draw_rect(button, highlight, Fill::Outline);
        display.draw_string(
            Point::new(x.saturating_add(14), 273),
            label,
            palette::TEXT,
            palette::TITLE_BAR,
        );
    }
}

/// Status area with two lines of text.
pub fn status<D: DisplaySurface + ?Sized>(display: &mut D, first: &str, second: &str) {
    display.draw_rect(
        Rectangle::new(
            Point::new(0, STATUS_TOP),
            Size::new(WIDTH, STATUS_HEIGHT),
        ),
        palette::BACKGROUND,
        Fill::Solid,
    );
    display.draw_line(
        Point::new(0, STATUS_TOP),
        Point::new(271, STATUS_TOP),
        palette::SEPARATOR,
    );
    display.draw_string(
        Point::new(14, STATUS_TOP.saturating_add(20)),
        first,
        palette::TEXT,
        palette::BACKGROUND,
    );
    display.draw_string(
        Point::new(14, STATUS_TOP.saturating_add(50)),
        second,
        palette::TEXT,
        palette::BACKGROUND,
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use platform::mocks::{DrawCall, MockSurface};

    #[test]
    fn test_row_geometry() {
        assert_eq!(row_top(0), 49);
        assert_eq!(row_top(5), 49 + 5 * 53);
        let area = list_area(5);
        assert_eq!(area.size.height, 6 * 53);
        // The list stays clear of the status area.
        assert!(row_top(6) <= STATUS_TOP);
    }

    #[test]
    fn test_row_draws_label_and_value() {
        let mut d = MockSurface::new();
        row(&mut d, 2, icons::VALUE, "Hotend", Some("215"));
        assert!(d.drew_text("Hotend"));
        assert!(d.drew_text("215"));
        assert!(d
            .calls()
            .iter()
            .any(|c| matches!(c, DrawCall::Icon { icon, .. } if *icon == icons::VALUE)));
    }

    #[test]
    fn test_cursor_on_and_off_colors() {
        let mut d = MockSurface::new();
        cursor(&mut d, 1, true);
        cursor(&mut d, 1, false);
        let colors: Vec<_> = d
            .calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Rect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![palette::CURSOR, palette::BACKGROUND]);
    }

    #[test]
    fn test_scroll_moves_one_row() {
        let mut d = MockSurface::new();
        scroll(&mut d, 5, ScrollDirection::Up);
        assert_eq!(
            d.calls(),
            &[DrawCall::Move {
                area: list_area(5),
                direction: ScrollDirection::Up,
                distance: ROW_HEIGHT,
            }]
        );
    }

    #[test]
    fn test_popup_labels() {
        let mut d = MockSurface::new();
        popup(&mut d, "Power Off", "Sure?", ["Cancel", "Confirm"], 1);
        assert!(d.drew_text("Cancel"));
        assert!(d.drew_text("Confirm"));
        assert!(d.drew_text("Sure?"));
    }
}
