//! Painting glue between controller state and the render primitives.
//!
//! Cursor moves repaint two cursor bars, scrolls move the list area by one
//! row and paint the row that came into view. Surfaces without area moves
//! get a full repaint instead.

use core::fmt::Write as _;

use heapless::String;
use platform::config::{app_title, APP_VERSION};
use platform::{Buzzer, DisplaySurface, IconId, MotionControl, RecoveryStore, ScrollDirection, SettingsStore};

use crate::controller::Controller;
use crate::edit::{format_value, ValueText};
use crate::menu::{MenuStep, ScrollMenu};
use crate::render::{self, icons};
use crate::screen::{Row, Screen};

/// One line of the status area.
pub type StatusText = String<48>;

fn icon_for(row: Row) -> IconId {
    match row {
        Row::Back => icons::BACK,
        Row::Open(_) => icons::SUBMENU,
        Row::Mode(_) => icons::MODE,
        Row::Action(_) | Row::Answer(_) => icons::ACTION,
        Row::Edit(_) => icons::VALUE,
    }
}

impl<D, M, S, R, B, const K: usize, const N: usize> Controller<D, M, S, R, B, K, N>
where
    D: DisplaySurface,
    M: MotionControl,
    S: SettingsStore,
    R: RecoveryStore,
    B: Buzzer,
{
    /// Value column text of `row`, if it has one.
    pub fn row_value(&self, row: Row) -> Option<ValueText> {
        match row {
            Row::Edit(field) => Some(format_value(field.format(), self.field_value(field))),
            Row::Mode(kind) if kind == self.mixer.mode_kind() => {
                let mut out = ValueText::new();
                let _ = out.push_str("*");
                Some(out)
            }
            _ => None,
        }
    }

    /// Status area lines: mode, then active tool and blend.
    pub fn status_text(&self) -> (StatusText, StatusText) {
        let (mode, active) = self.status_snapshot();
        let mut first = StatusText::new();
        let _ = write!(first, "Mix: {}", mode.label());
        let mut second = StatusText::new();
        let _ = write!(second, "T{}", active.tool);
        for (i, part) in active.ratio.as_array().iter().enumerate() {
            let sep = if i == 0 { ' ' } else { '/' };
            let _ = write!(second, "{sep}{part}");
        }
        (first, second)
    }

    /// Full repaint of the current screen. Modals repaint their parent
    /// underneath first.
    pub(crate) fn paint_screen(&mut self) {
        let screen = self.nav.current();
        if screen.is_modal() {
            if let Some(parent) = self.nav.parent_entry().copied() {
                self.paint_list(parent.screen, &parent.menu);
            }
            self.paint_popup();
        } else {
            let menu = *self.nav.menu();
            self.paint_list(screen, &menu);
        }
        self.io.display.update_frame();
    }

    fn paint_list(&mut self, screen: Screen, menu: &ScrollMenu) {
        render::clear(&mut self.io.display);
        render::title(&mut self.io.display, screen.title());
        for logical in menu.visible_rows() {
            self.paint_row(screen, menu, logical);
        }
        render::cursor(&mut self.io.display, menu.current_screen_row(), true);
        match screen {
            Screen::Main => self.paint_status(),
            Screen::Info => self.paint_info(),
            _ => {}
        }
    }

    fn paint_row(&mut self, screen: Screen, menu: &ScrollMenu, logical: u8) {
        let (Some(screen_row), Some(row)) = (menu.screen_row_of(logical), screen.row(logical, K)) else {
            return;
        };
        let label = row.label();
        let value = self.row_value(row);
        render::row(
            &mut self.io.display,
            screen_row,
            icon_for(row),
            &label,
            value.as_deref(),
        );
    }

    fn paint_popup(&mut self) {
        let screen = self.nav.current();
        let selected = self.nav.menu().current();
        let no = Row::Answer(false).label();
        let yes = Row::Answer(true).label();
        render::popup(
            &mut self.io.display,
            screen.title(),
            screen.prompt().unwrap_or(""),
            [no.as_str(), yes.as_str()],
            selected,
        );
    }

    fn paint_info(&mut self) {
        let mut version = StatusText::new();
        let _ = write!(version, "Version {APP_VERSION}");
        let mut shape = StatusText::new();
        let _ = write!(shape, "{} steppers, {} tools", K, self.mixer.tools().occupy());
        render::text_line(&mut self.io.display, 1, app_title());
        render::text_line(&mut self.io.display, 2, &version);
        render::text_line(&mut self.io.display, 3, &shape);
    }

    /// Redraw after a cursor step.
    pub(crate) fn paint_step(&mut self, step: MenuStep) {
        let screen = self.nav.current();
        if step == MenuStep::Unchanged {
            return;
        }
        if screen.is_modal() {
            self.paint_popup();
            self.io.display.update_frame();
            return;
        }
        let menu = *self.nav.menu();
        match step {
            MenuStep::Unchanged => {}
            MenuStep::MoveHighlight { from, to } => {
                render::cursor(&mut self.io.display, from, false);
                render::cursor(&mut self.io.display, to, true);
            }
            MenuStep::ScrollUp { row } => {
                if !self.io.display.supports_area_move() {
                    self.paint_screen();
                    return;
                }
                render::cursor(&mut self.io.display, menu.visible(), false);
                render::scroll(&mut self.io.display, menu.visible(), ScrollDirection::Up);
                self.paint_row(screen, &menu, row);
                render::cursor(&mut self.io.display, menu.visible(), true);
            }
            MenuStep::ScrollDown { row, .. } => {
                if !self.io.display.supports_area_move() {
                    self.paint_screen();
                    return;
                }
                render::cursor(&mut self.io.display, 0, false);
                render::scroll(&mut self.io.display, menu.visible(), ScrollDirection::Down);
                self.paint_row(screen, &menu, row);
                render::cursor(&mut self.io.display, 0, true);
            }
        }
        self.io.display.update_frame();
    }

    /// Redraw the value being edited.
    pub(crate) fn paint_edit(&mut self) {
        let Some(edit) = self.edit else {
            return;
        };
        let screen_row = self.nav.menu().current_screen_row();
        render::draw_value(&mut self.io.display, screen_row, &edit.text(), true);
        self.io.display.update_frame();
    }

    /// Redraw the row under the cursor.
    pub(crate) fn paint_current_row(&mut self) {
        let screen = self.nav.current();
        let menu = *self.nav.menu();
        self.paint_row(screen, &menu, menu.current());
        render::cursor(&mut self.io.display, menu.current_screen_row(), true);
        self.io.display.update_frame();
    }

    /// Redraw the Main status area.
    pub(crate) fn paint_status(&mut self) {
        let (first, second) = self.status_text();
        render::status(&mut self.io.display, &first, &second);
    }
}
