//! In-place numeric editing.
//!
//! While a [`ValueEdit`] is open the encoder changes the value instead of
//! the cursor; Enter hands the final value back to the controller.

use core::fmt::Write as _;

use heapless::String;
use platform::Tenths;

use crate::screen::{Field, ValueFormat};

/// Formatted value text.
pub type ValueText = String<12>;

/// An open edit of one [`Field`], clamped to `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValueEdit {
    field: Field,
    value: i32,
    min: i32,
    max: i32,
}

impl ValueEdit {
    /// Start editing `field` at `value`. An inverted range collapses to `min`.
    pub fn new(field: Field, value: i32, min: i32, max: i32) -> Self {
        let max = max.max(min);
        Self {
            field,
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    /// Add `delta`, clamped. Returns `true` if the value changed.
    pub fn step(&mut self, delta: i32) -> bool {
        let next = self.value.saturating_add(delta).clamp(self.min, self.max);
        let changed = next != self.value;
        self.value = next;
        changed
    }

    /// Field being edited.
    pub fn field(&self) -> Field {
        self.field
    }

    /// Current value.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Allowed range.
    pub fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    /// Current value formatted for the row.
    pub fn text(&self) -> ValueText {
        format_value(self.field.format(), self.value)
    }
}

/// Format a raw edit value.
pub fn format_value(format: ValueFormat, value: i32) -> ValueText {
    let mut out = ValueText::new();
    // 12 bytes hold any i32 with a decimal point.
    let _ = match format {
        ValueFormat::Integer => write!(out, "{value}"),
        ValueFormat::Tenths => {
            let tenths = Tenths::from_raw(value);
            let (whole, frac) = tenths.split();
            if value < 0 && whole == 0 {
                write!(out, "-0.{frac}")
            } else {
                write!(out, "{whole}.{frac}")
            }
        }
        ValueFormat::Hundredths => {
            let sign = if value < 0 { "-" } else { "" };
            let abs = value.unsigned_abs();
            write!(out, "{sign}{}.{:02}", abs / 100, abs % 100)
        }
    };
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_clamps_initial_value() {
        let edit = ValueEdit::new(Field::HotendTemp, 400, 0, 260);
        assert_eq!(edit.value(), 260);
    }

    #[test]
    fn test_edit_step_saturates() {
        let mut edit = ValueEdit::new(Field::BedTemp, 109, 0, 110);
        assert!(edit.step(1));
        assert!(!edit.step(1));
        assert_eq!(edit.value(), 110);
        let mut edit = ValueEdit::new(Field::BedTemp, 0, 0, 110);
        assert!(!edit.step(-1));
        assert_eq!(edit.value(), 0);
    }

    #[test]
    fn test_edit_inverted_range_collapses() {
        let edit = ValueEdit::new(Field::SelectedTool, 3, 5, 2);
        assert_eq!(edit.range(), (5, 5));
        assert_eq!(edit.value(), 5);
    }

    #[test]
    fn test_format_tenths() {
        assert_eq!(format_value(ValueFormat::Tenths, 15).as_str(), "1.5");
        assert_eq!(format_value(ValueFormat::Tenths, 100).as_str(), "10.0");
        assert_eq!(format_value(ValueFormat::Tenths, -5).as_str(), "-0.5");
        assert_eq!(format_value(ValueFormat::Integer, 215).as_str(), "215");
    }

    #[test]
    fn test_format_hundredths() {
        assert_eq!(format_value(ValueFormat::Hundredths, 0).as_str(), "0.00");
        assert_eq!(format_value(ValueFormat::Hundredths, -5).as_str(), "-0.05");
        assert_eq!(format_value(ValueFormat::Hundredths, -125).as_str(), "-1.25");
        assert_eq!(format_value(ValueFormat::Hundredths, 2000).as_str(), "20.00");
    }

    #[test]
    fn test_edit_text_uses_field_format() {
        let edit = ValueEdit::new(Field::GradientZEnd, 25, 0, 2500);
        assert_eq!(edit.text().as_str(), "2.5");
    }
}
