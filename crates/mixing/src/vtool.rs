//! Virtual tool table.
//!
//! Slots `0..occupy` are user tools. Slot `occupy` is reserved for blends
//! the engine computes itself (gradient and random output). Slots above it
//! exist but are unused.

use crate::ratio::{MixRatio, FULL};
use crate::MAX_TOOLS;

/// Raw colour weights and normalised percentages for `N` virtual tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolTable<const K: usize, const N: usize> {
    pub(crate) color: [[u8; K]; N],
    pub(crate) percent: [MixRatio<K>; N],
    pub(crate) occupy: u8,
}

impl<const K: usize, const N: usize> ToolTable<K, N> {
    const SHAPE: () = assert!(N >= 2 && N <= MAX_TOOLS, "tool table needs 2..=16 slots");

    /// Create a table with `occupy` user tools (clamped to `1..N`).
    ///
    /// Tool `t < K` starts as pure filament `t`; every other tool starts as
    /// pure filament 0.
    #[must_use]
    pub fn new(occupy: u8) -> Self {
        let () = Self::SHAPE;
        let mut color = [[0u8; K]; N];
        let mut percent = [MixRatio::pure(0); N];
        for (t, (weights, ratio)) in color.iter_mut().zip(percent.iter_mut()).enumerate() {
            let filament = if t < K { t } else { 0 };
            if let Some(w) = weights.get_mut(filament) {
                *w = FULL;
            }
            *ratio = MixRatio::pure(filament);
        }
        Self {
            color,
            percent,
            occupy: Self::clamp_occupy(occupy),
        }
    }

    fn clamp_occupy(occupy: u8) -> u8 {
        let max = u8::try_from(N.saturating_sub(1)).unwrap_or(u8::MAX);
        occupy.clamp(1, max)
    }

    /// Number of user-selectable tools.
    #[must_use]
    pub fn occupy(&self) -> u8 {
        self.occupy
    }

    /// Id of the reserved computed tool.
    #[must_use]
    pub fn computed_id(&self) -> u8 {
        self.occupy
    }

    /// Clamp `tool` to the user range `0..occupy`.
    #[must_use]
    pub fn clamp_user(&self, tool: u8) -> u8 {
        tool.min(self.occupy.saturating_sub(1))
    }

    /// Normalised blend of `tool`.
    #[must_use]
    pub fn percent(&self, tool: u8) -> Option<MixRatio<K>> {
        self.percent.get(usize::from(tool)).copied()
    }

    /// Raw colour weights of `tool`.
    #[must_use]
    pub fn weights(&self, tool: u8) -> Option<&[u8; K]> {
        self.color.get(usize::from(tool))
    }

    /// Replace the raw weights of `tool` and recompute its percentages.
    ///
    /// Returns the new blend, or `None` when `tool` is out of range.
    pub fn set_weights(&mut self, tool: u8, weights: [u8; K]) -> Option<MixRatio<K>> {
        let idx = usize::from(tool);
        let ratio = MixRatio::from_weights(&weights);
        *self.color.get_mut(idx)? = weights;
        *self.percent.get_mut(idx)? = ratio;
        Some(ratio)
    }

    /// Store an already-normalised blend as both weights and percentages.
    pub fn store(&mut self, tool: u8, ratio: MixRatio<K>) -> bool {
        let idx = usize::from(tool);
        match (self.color.get_mut(idx), self.percent.get_mut(idx)) {
            (Some(weights), Some(slot)) => {
                *weights = *ratio.as_array();
                *slot = ratio;
                true
            }
            _ => false,
        }
    }
}

impl<const K: usize, const N: usize> Default for ToolTable<K, N> {
    fn default() -> Self {
        let occupy = u8::try_from(N.saturating_sub(1)).unwrap_or(u8::MAX);
        Self::new(occupy)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_tools_are_pure_filaments() {
        let t = ToolTable::<3, 8>::new(6);
        assert_eq!(t.percent(0).unwrap().as_array(), &[100, 0, 0]);
        assert_eq!(t.percent(2).unwrap().as_array(), &[0, 0, 100]);
        assert_eq!(t.percent(5).unwrap().as_array(), &[100, 0, 0]);
    }

    #[test]
    fn test_occupy_is_clamped() {
        assert_eq!(ToolTable::<2, 4>::new(0).occupy(), 1);
        assert_eq!(ToolTable::<2, 4>::new(9).occupy(), 3);
        assert_eq!(ToolTable::<2, 4>::default().computed_id(), 3);
    }

    #[test]
    fn test_clamp_user() {
        let t = ToolTable::<2, 8>::new(4);
        assert_eq!(t.clamp_user(2), 2);
        assert_eq!(t.clamp_user(4), 3);
        assert_eq!(t.clamp_user(200), 3);
    }

    #[test]
    fn test_set_weights_normalises() {
        let mut t = ToolTable::<3, 4>::new(3);
        let r = t.set_weights(1, [1, 1, 2]).unwrap();
        assert_eq!(r.as_array(), &[25, 25, 50]);
        assert_eq!(t.weights(1), Some(&[1, 1, 2]));
        assert!(t.set_weights(9, [1, 1, 1]).is_none());
    }

    #[test]
    fn test_store_writes_both_tables() {
        let mut t = ToolTable::<2, 4>::new(3);
        let r = MixRatio::with_residual([30, 0]);
        assert!(t.store(3, r));
        assert_eq!(t.percent(3), Some(r));
        assert_eq!(t.weights(3), Some(&[30, 70]));
    }
}
