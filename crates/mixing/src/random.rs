//! Random number seam for the Random mixing mode.
//!
//! The only contract is "a value in `[0, bound)`". Distribution is not
//! specified, so the engine is tested against bounds and sums only.

use crate::ratio::{MixRatio, FULL};

/// Source of bounded random integers.
pub trait RandomSource {
    /// A value in `[0, bound)`, or 0 when `bound` is 0.
    fn below(&mut self, bound: u16) -> u16;
}

const LCG_MUL: u32 = 1_103_515_245;
const LCG_INC: u32 = 12_345;

fn lcg(seed: u32) -> u32 {
    seed.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC)
}

/// Seeded from the tick counter before every draw.
///
/// Each draw restarts the generator from the current tick, so draws taken
/// within the same tick share their raw value and differ only in bound.
/// This is the firmware behaviour on boards without an entropy source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickSeeded {
    tick_ms: u32,
}

impl TickSeeded {
    /// Start at tick `tick_ms`.
    pub const fn new(tick_ms: u32) -> Self {
        Self { tick_ms }
    }

    /// Update the tick used as seed.
    pub fn reseed(&mut self, tick_ms: u32) {
        self.tick_ms = tick_ms;
    }
}

impl RandomSource for TickSeeded {
    fn below(&mut self, bound: u16) -> u16 {
        let raw = (lcg(self.tick_ms) >> 16) & 0x7FFF;
        #[allow(clippy::cast_possible_truncation)]
        let value = raw.checked_rem(u32::from(bound)).unwrap_or(0) as u16;
        value
    }
}

/// Marsaglia xorshift generator with advancing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a generator; a zero seed is replaced by a fixed constant.
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl RandomSource for XorShift32 {
    fn below(&mut self, bound: u16) -> u16 {
        let raw = self.next_u32();
        #[allow(clippy::cast_possible_truncation)]
        let value = raw.checked_rem(u32::from(bound)).unwrap_or(0) as u16;
        value
    }
}

/// Draw a blend: component `i < K-1` takes a value in `[0, remaining]`,
/// the last takes whatever is left.
pub fn random_mix<const K: usize, R: RandomSource + ?Sized>(rng: &mut R) -> MixRatio<K> {
    let mut head = [0u8; K];
    let mut remaining = FULL;
    for slot in head.iter_mut().take(K.saturating_sub(1)) {
        let drawn = rng.below(u16::from(remaining).saturating_add(1));
        let value = u8::try_from(drawn).unwrap_or(remaining).min(remaining);
        *slot = value;
        remaining = remaining.saturating_sub(value);
    }
    MixRatio::with_residual(head)
}
