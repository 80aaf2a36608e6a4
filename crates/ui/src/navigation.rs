//! Navigation state machine: a bounded stack of [`Screen`]s.
//!
//! Each entry carries the screen's own [`ScrollMenu`], so going back
//! restores the parent's cursor and scroll window exactly as they were.
//! The stack is capped at 8 entries including the root (embedded-safe, no
//! heap). Pushing when the stack is full is refused.

use heapless::Vec;

use crate::menu::ScrollMenu;
use crate::screen::Screen;

/// Pushed entries on top of the root.
const MAX_PUSHED: usize = 7;

/// One stack entry: a screen and its cursor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Screen shown
    pub screen: Screen,
    /// Cursor and scroll window of that screen
    pub menu: ScrollMenu,
}

/// Navigation stack bounded at 8 entries.
#[derive(Debug, Clone)]
pub struct Navigator {
    root: Entry,
    stack: Vec<Entry, MAX_PUSHED>,
    visible: u8,
}

impl Navigator {
    /// Create a navigator with [`Screen::Main`] as the root screen.
    pub fn new(visible: u8) -> Self {
        let root = Entry {
            screen: Screen::Main,
            menu: ScrollMenu::new(Screen::Main.row_count(0), visible),
        };
        Navigator {
            root,
            stack: Vec::new(),
            visible,
        }
    }

    fn top(&self) -> &Entry {
        self.stack.last().unwrap_or(&self.root)
    }

    fn top_mut(&mut self) -> &mut Entry {
        match self.stack.last_mut() {
            Some(entry) => entry,
            None => &mut self.root,
        }
    }

    /// Return the screen currently at the top of the stack.
    #[must_use]
    pub fn current(&self) -> Screen {
        self.top().screen
    }

    /// Cursor state of the current screen.
    #[must_use]
    pub fn menu(&self) -> &ScrollMenu {
        &self.top().menu
    }

    /// Mutable cursor state of the current screen.
    pub fn menu_mut(&mut self) -> &mut ScrollMenu {
        &mut self.top_mut().menu
    }

    /// Entry below the current one, if any.
    #[must_use]
    pub fn parent_entry(&self) -> Option<&Entry> {
        let len = self.stack.len();
        match len {
            0 => None,
            1 => Some(&self.root),
            _ => self.stack.get(len.saturating_sub(2)),
        }
    }

    /// Screen below the current one, if any.
    #[must_use]
    pub fn parent(&self) -> Option<Screen> {
        self.parent_entry().map(|e| e.screen)
    }

    /// Push `screen` with `rows` rows and its cursor on row 0.
    ///
    /// Returns `false` (and leaves the stack untouched) when full.
    pub fn push(&mut self, screen: Screen, rows: u8) -> bool {
        let entry = Entry {
            screen,
            menu: ScrollMenu::new(rows, self.visible),
        };
        self.stack.push(entry).is_ok()
    }

    /// Pop the top screen. Does nothing if only the root screen remains.
    pub fn back(&mut self) -> bool {
        self.stack.pop().is_some()
    }

    /// Return the number of entries currently on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_add(1)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(platform::config::MENU_VISIBLE_ROWS)
    }
}
