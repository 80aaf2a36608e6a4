//! Type system enforcement tests for the panel newtypes.
//! These newtypes keep clamping rules in one place instead of every screen.

// ── Percent ──────────────────────────────────────────────────────────────────

#[test]
fn percent_new_clamps_over_100() {
    use platform::units::Percent;
    let p = Percent::new(150);
    assert_eq!(p.get(), 100, "Percent::new(150) should clamp to 100");
}

#[test]
fn percent_new_allows_bounds() {
    use platform::units::Percent;
    assert_eq!(Percent::new(0).get(), 0);
    assert_eq!(Percent::new(100).get(), 100);
}

#[test]
#[allow(clippy::unwrap_used)]
fn percent_try_new_rejects_outside_range() {
    use platform::units::Percent;
    assert!(Percent::try_new(101).is_err());
    assert!(Percent::try_new(255).is_err());
    assert!(Percent::try_new(-1).is_err());
    assert_eq!(Percent::try_new(100).unwrap().get(), 100);
}

#[test]
fn percent_try_new_reports_range() {
    use platform::units::{OutOfRangeError, Percent};
    assert_eq!(
        Percent::try_new(180),
        Err(OutOfRangeError {
            value: 180,
            min: 0,
            max: 100
        })
    );
}

#[test]
fn percent_is_one_byte() {
    use platform::units::Percent;
    assert_eq!(core::mem::size_of::<Percent>(), 1);
}

// ── Tenths ───────────────────────────────────────────────────────────────────

#[test]
fn tenths_roundtrip_one_decimal() {
    use platform::units::Tenths;
    for raw in [-25, 0, 1, 15, 100, 2500] {
        let t = Tenths::from_raw(raw);
        assert_eq!(Tenths::from_f32(t.to_f32()), t, "raw {raw}");
    }
}

#[test]
fn tenths_display_parts() {
    use platform::units::Tenths;
    assert_eq!(Tenths::from_f32(10.0).split(), (10, 0));
    assert_eq!(Tenths::from_f32(1.5).split(), (1, 5));
}

// ── Axis ─────────────────────────────────────────────────────────────────────

#[test]
fn axis_index_roundtrip() {
    use platform::Axis;
    for axis in Axis::ALL {
        assert_eq!(Axis::from_index(axis.index()), Some(axis));
    }
    assert_eq!(Axis::from_index(4), None);
}
