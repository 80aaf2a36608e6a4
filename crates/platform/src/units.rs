//! Domain newtypes shared by the menu and mixing layers.
//!
//! - `Percent`: clamps 0–100
//! - `Tenths`: fixed-point value with one decimal, as edited on the panel

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("value {value} outside {min}..={max}")]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: i32,
    /// The inclusive minimum allowed value.
    pub min: i32,
    /// The inclusive maximum allowed value.
    pub max: i32,
}

// ── Percent ──────────────────────────────────────────────────────────────────

/// Percentage, clamped to 0–100.
///
/// Wraps a `u8` with the invariant `0 <= value <= 100`.
/// Construct with [`Percent::new`] (clamping) or [`Percent::try_new`]
/// (fallible, strict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Percent(u8);

impl Percent {
    /// 100 %
    pub const FULL: Percent = Percent(100);

    /// Create a `Percent`, clamping values above 100 to 100.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Create a `Percent` from an edit value, rejecting anything outside
    /// 0–100.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value` is negative or above 100.
    pub fn try_new(value: i32) -> Result<Self, OutOfRangeError> {
        match u8::try_from(value) {
            Ok(v) if v <= 100 => Ok(Self(v)),
            _ => Err(OutOfRangeError {
                value,
                min: 0,
                max: 100,
            }),
        }
    }

    /// Return the inner value (0–100).
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

// ── Tenths ───────────────────────────────────────────────────────────────────

/// Fixed-point value in tenths (`15` is `1.5`).
///
/// Heights and steps/mm are edited on the encoder in 0.1 increments; the
/// integer form keeps the edit loop free of float drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Tenths(i32);

impl Tenths {
    /// Scale factor between the stored integer and the real value.
    pub const SCALE: i32 = 10;

    /// Wrap a raw tenths count.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Convert a real value, rounding to the nearest tenth.
    #[must_use]
    pub fn from_f32(value: f32) -> Self {
        let scaled = value * 10.0;
        let rounded = if scaled >= 0.0 {
            scaled + 0.5
        } else {
            scaled - 0.5
        };
        #[allow(clippy::cast_possible_truncation)]
        Self(rounded as i32)
    }

    /// Raw tenths count.
    #[must_use]
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Real value.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 10.0
    }

    /// Integer part and single decimal digit, for display.
    #[must_use]
    pub fn split(self) -> (i32, u8) {
        let whole = self.0 / Self::SCALE;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let frac = (self.0 % Self::SCALE).unsigned_abs() as u8;
        (whole, frac)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_try_new_bounds() {
        assert_eq!(Percent::try_new(0).unwrap().get(), 0);
        assert_eq!(Percent::try_new(42).unwrap().get(), 42);
        assert_eq!(Percent::try_new(-4).unwrap_err().value, -4);
        assert_eq!(Percent::try_new(1000).unwrap_err().max, 100);
    }

    #[test]
    fn test_tenths_from_f32_rounds() {
        assert_eq!(Tenths::from_f32(1.5).raw(), 15);
        assert_eq!(Tenths::from_f32(0.149).raw(), 1);
        assert_eq!(Tenths::from_f32(-2.26).raw(), -23);
    }

    #[test]
    fn test_tenths_split() {
        assert_eq!(Tenths::from_raw(123).split(), (12, 3));
        assert_eq!(Tenths::from_raw(5).split(), (0, 5));
    }

    #[test]
    fn test_out_of_range_display() {
        let err = Percent::try_new(101).unwrap_err();
        assert_eq!(err.to_string(), "value 101 outside 0..=100");
    }
}
