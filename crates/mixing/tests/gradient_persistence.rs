//! Gradient behaviour and power-loss record round-trips.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mixing::persist::RECORD_CAPACITY;
use mixing::{MixingMode, Mixer, ModeKind, TickSeeded, XorShift32};

fn two_stepper_gradient() -> Mixer<2, 4> {
    let mut m = Mixer::<2, 4>::new(3);
    m.set_gradient_endpoints(0.0, 10.0, 0, 1);
    m.enter_gradient();
    m
}

#[test]
fn gradient_midpoint_is_even_blend() {
    let mut m = two_stepper_gradient();
    m.tick(5.0, &mut XorShift32::new(1));
    assert_eq!(m.active_mix().ratio.as_array(), &[50, 50]);
}

#[test]
fn gradient_below_start_uses_start_blend() {
    let mut m = two_stepper_gradient();
    m.tick(-5.0, &mut XorShift32::new(1));
    assert_eq!(m.active_mix().ratio.as_array(), &[100, 0]);
}

#[test]
fn gradient_above_end_uses_end_blend() {
    let mut m = two_stepper_gradient();
    m.tick(15.0, &mut XorShift32::new(1));
    assert_eq!(m.active_mix().ratio.as_array(), &[0, 100]);
}

#[test]
fn gradient_mode_reports_config() {
    let m = two_stepper_gradient();
    match m.mode() {
        MixingMode::Gradient(cfg) => {
            assert_eq!(cfg.z_start, 0.0);
            assert_eq!(cfg.z_end, 10.0);
            assert_eq!((cfg.tool_start, cfg.tool_end), (0, 1));
        }
        other => panic!("expected gradient, got {other:?}"),
    }
}

fn configured() -> Mixer<3, 8> {
    let mut m = Mixer::<3, 8>::new(6);
    m.set_gradient_endpoints(1.5, 10.0, 0, 2);
    m.enter_gradient();
    m
}

#[test]
fn restored_gradient_ticks_like_fresh_engine() {
    let saved = configured();
    let mut buf = [0u8; RECORD_CAPACITY];
    let len = saved.encode_into(&mut buf).unwrap();
    let mut restored = Mixer::<3, 8>::decode_from(&buf[..len]).unwrap();
    let mut fresh = configured();

    assert_eq!(restored.mode(), fresh.mode());
    assert_eq!(restored.mode_kind(), ModeKind::Gradient);
    assert_eq!(restored.active_mix(), fresh.active_mix());

    let mut rng_a = TickSeeded::new(0);
    let mut rng_b = TickSeeded::new(0);
    for tenths in [0u16, 15, 20, 37, 50, 99, 100, 101, 150] {
        let z = f32::from(tenths) / 10.0;
        restored.tick(z, &mut rng_a);
        fresh.tick(z, &mut rng_b);
        assert_eq!(restored.active_mix(), fresh.active_mix(), "z = {z}");
    }
}

#[test]
fn restored_random_mode_keeps_active_blend() {
    let mut m = Mixer::<3, 8>::new(6);
    m.set_random_range(0.0, 5.0);
    m.enter_random();
    m.tick(1.0, &mut XorShift32::new(77));
    let mut buf = [0u8; RECORD_CAPACITY];
    let len = m.encode_into(&mut buf).unwrap();
    let restored = Mixer::<3, 8>::decode_from(&buf[..len]).unwrap();
    assert_eq!(restored.active_mix(), m.active_mix());
    assert_eq!(restored.random(), m.random());
}
