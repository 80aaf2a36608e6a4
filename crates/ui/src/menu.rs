//! Scrollable menu model: cursor plus scroll window, shared by every list screen.
//!
//! Rows are addressed two ways: the *logical* row (`0..row_count`, row 0 is
//! usually Back) and the *screen* row (`0..=visible`). `top` is the logical
//! index of the bottom-most row on screen, so logical row `r` is visible
//! iff `top - visible <= r <= top`. Every step reports the minimal redraw
//! as a [`MenuStep`].

/// What the renderer has to do after a cursor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStep {
    /// Cursor did not move (boundary reached)
    Unchanged,
    /// Cursor moved between two screen rows; nothing scrolled
    MoveHighlight {
        /// Screen row losing the cursor
        from: u8,
        /// Screen row gaining the cursor
        to: u8,
    },
    /// Window scrolled up one row; logical `row` is the new bottom row and
    /// holds the cursor
    ScrollUp {
        /// Logical row to paint at the bottom
        row: u8,
    },
    /// Window scrolled down one row; logical `row` is the new top row and
    /// holds the cursor
    ScrollDown {
        /// Logical row to paint at the top
        row: u8,
        /// The new top row is the Back row
        back: bool,
    },
}

/// Cursor and scroll window of one list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMenu {
    current: u8,
    previous: u8,
    top: u8,
    visible: u8,
    rows: u8,
}

impl ScrollMenu {
    /// Create a menu of `rows` rows with `visible` rows below the top row.
    pub fn new(rows: u8, visible: u8) -> Self {
        Self {
            current: 0,
            previous: 0,
            top: visible,
            visible,
            rows,
        }
    }

    /// Back to row 0 with the window at the top. `rows` may change.
    pub fn reset(&mut self, rows: u8) {
        self.rows = rows;
        self.current = 0;
        self.previous = 0;
        self.top = self.visible;
    }

    /// Move the cursor down one row.
    pub fn step_next(&mut self) -> MenuStep {
        let last = self.rows.saturating_sub(1);
        if self.current >= last {
            self.current = last;
            return MenuStep::Unchanged;
        }
        self.previous = self.current;
        self.current = self.current.saturating_add(1);
        if self.current > self.visible && self.current > self.top {
            self.top = self.current;
            MenuStep::ScrollUp { row: self.current }
        } else {
            let to = self.current_screen_row();
            MenuStep::MoveHighlight {
                from: to.saturating_sub(1),
                to,
            }
        }
    }

    /// Move the cursor up one row.
    pub fn step_prev(&mut self) -> MenuStep {
        if self.current == 0 {
            return MenuStep::Unchanged;
        }
        self.previous = self.current;
        self.current = self.current.saturating_sub(1);
        if self.current < self.top.saturating_sub(self.visible) {
            self.top = self.top.saturating_sub(1);
            MenuStep::ScrollDown {
                row: self.current,
                back: self.top == self.visible,
            }
        } else {
            let to = self.current_screen_row();
            MenuStep::MoveHighlight {
                from: to.saturating_add(1),
                to,
            }
        }
    }

    /// Screen row of the cursor: `current + visible - top`.
    pub fn current_screen_row(&self) -> u8 {
        self.current
            .saturating_add(self.visible)
            .saturating_sub(self.top)
    }

    /// Screen row where logical `row` is drawn, if it is visible.
    pub fn screen_row_of(&self, row: u8) -> Option<u8> {
        self.is_visible(row)
            .then(|| row.saturating_add(self.visible).saturating_sub(self.top))
    }

    /// Whether logical `row` is inside the window.
    pub fn is_visible(&self, row: u8) -> bool {
        row < self.rows && row >= self.first_visible() && row <= self.top
    }

    /// Logical index of the top-most visible row.
    pub fn first_visible(&self) -> u8 {
        self.top.saturating_sub(self.visible)
    }

    /// Logical rows currently on screen.
    pub fn visible_rows(&self) -> core::ops::RangeInclusive<u8> {
        let last = self.top.min(self.rows.saturating_sub(1));
        self.first_visible()..=last
    }

    /// Returns `true` once after the cursor moved.
    pub fn take_changed(&mut self) -> bool {
        let changed = self.current != self.previous;
        self.previous = self.current;
        changed
    }

    /// Cursor row.
    pub fn current(&self) -> u8 {
        self.current
    }

    /// Logical index of the bottom-most visible row.
    pub fn top(&self) -> u8 {
        self.top
    }

    /// Rows below the top row that fit on screen.
    pub fn visible(&self) -> u8 {
        self.visible
    }

    /// Total rows.
    pub fn rows(&self) -> u8 {
        self.rows
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_starts_at_back_row() {
        let m = ScrollMenu::new(12, 5);
        assert_eq!(m.current(), 0);
        assert_eq!(m.top(), 5);
        assert_eq!(m.current_screen_row(), 0);
    }

    #[test]
    fn test_menu_moves_highlight_inside_window() {
        let mut m = ScrollMenu::new(12, 5);
        assert_eq!(m.step_next(), MenuStep::MoveHighlight { from: 0, to: 1 });
        assert_eq!(m.step_prev(), MenuStep::MoveHighlight { from: 1, to: 0 });
    }

    #[test]
    fn test_menu_scrolls_after_last_visible_row() {
        let mut m = ScrollMenu::new(12, 5);
        for _ in 0..5 {
            m.step_next();
        }
        assert_eq!(m.current_screen_row(), 5);
        assert_eq!(m.step_next(), MenuStep::ScrollUp { row: 6 });
        assert_eq!(m.top(), 6);
        assert_eq!(m.current_screen_row(), 5);
    }

    #[test]
    fn test_menu_scrolls_down_to_back_row() {
        let mut m = ScrollMenu::new(12, 5);
        for _ in 0..6 {
            m.step_next();
        }
        // cursor at row 6, window 1..=6
        for _ in 0..5 {
            m.step_prev();
        }
        assert_eq!(m.current(), 1);
        assert_eq!(
            m.step_prev(),
            MenuStep::ScrollDown {
                row: 0,
                back: true
            }
        );
        assert_eq!(m.top(), 5);
    }

    #[test]
    fn test_menu_saturates_at_both_ends() {
        let mut m = ScrollMenu::new(3, 5);
        assert_eq!(m.step_prev(), MenuStep::Unchanged);
        m.step_next();
        m.step_next();
        assert_eq!(m.step_next(), MenuStep::Unchanged);
        assert_eq!(m.current(), 2);
    }

    #[test]
    fn test_menu_short_list_never_scrolls() {
        let mut m = ScrollMenu::new(4, 5);
        for _ in 0..10 {
            assert!(!matches!(m.step_next(), MenuStep::ScrollUp { .. }));
        }
        assert_eq!(m.top(), 5);
    }

    #[test]
    fn test_menu_twenty_next_twenty_prev() {
        let mut m = ScrollMenu::new(12, 5);
        for _ in 0..20 {
            m.step_next();
        }
        assert_eq!(m.current(), 11);
        assert_eq!(m.top(), 11);
        for _ in 0..20 {
            m.step_prev();
        }
        assert_eq!(m.current(), 0);
        assert_eq!(m.top(), 5);
    }

    #[test]
    fn test_menu_reset_is_idempotent() {
        let mut m = ScrollMenu::new(12, 5);
        for _ in 0..9 {
            m.step_next();
        }
        m.reset(12);
        let once = m;
        m.reset(12);
        assert_eq!(m, once);
        assert_eq!((m.current(), m.top()), (0, 5));
    }

    #[test]
    fn test_menu_take_changed_is_read_and_clear() {
        let mut m = ScrollMenu::new(12, 5);
        assert!(!m.take_changed());
        m.step_next();
        assert!(m.take_changed());
        assert!(!m.take_changed());
    }

    #[test]
    fn test_menu_visible_rows_clipped_to_row_count() {
        let m = ScrollMenu::new(3, 5);
        assert_eq!(m.visible_rows(), 0..=2);
        assert_eq!(m.screen_row_of(2), Some(2));
        assert_eq!(m.screen_row_of(3), None);
    }
}
