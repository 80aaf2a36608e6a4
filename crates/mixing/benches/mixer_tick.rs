//! Criterion benchmarks for the mixer tick and record encoding.
//!
//! Run: cargo bench -p mixing --bench mixer_tick
//!
//! Results show:
//!   tick_gradient  : interpolation + renormalisation per layer
//!   tick_random    : random draw per layer
//!   encode_record  : power-loss record framing

#![allow(
    clippy::unwrap_used, // benchmark helpers use unwrap for brevity
    clippy::expect_used,
    missing_docs,        // criterion_group! macro generates undocumented items
)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mixing::persist::RECORD_CAPACITY;
use mixing::{Mixer, XorShift32};

fn bench_tick(c: &mut Criterion) {
    let mut gradient = Mixer::<4, 16>::new(15);
    gradient.set_gradient_endpoints(0.0, 200.0, 0, 3);
    gradient.enter_gradient();
    let mut rng = XorShift32::new(1);
    let mut z = 0.0f32;
    c.bench_function("tick_gradient", |b| {
        b.iter(|| {
            z = if z > 200.0 { 0.0 } else { z + 0.2 };
            black_box(gradient.tick(black_box(z), &mut rng))
        });
    });

    let mut random = Mixer::<4, 16>::new(15);
    random.set_random_range(0.0, 200.0);
    random.enter_random();
    c.bench_function("tick_random", |b| {
        b.iter(|| {
            z = if z > 200.0 { 0.0 } else { z + 0.2 };
            black_box(random.tick(black_box(z), &mut rng))
        });
    });
}

fn bench_encode(c: &mut Criterion) {
    let mixer = Mixer::<4, 16>::new(15);
    let mut buf = [0u8; RECORD_CAPACITY];
    c.bench_function("encode_record", |b| {
        b.iter(|| black_box(mixer.encode_into(&mut buf).unwrap()));
    });
}

criterion_group!(benches, bench_tick, bench_encode);
criterion_main!(benches);
