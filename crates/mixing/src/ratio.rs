//! Mix ratio vectors.
//!
//! Every constructor upholds the same invariant: all components lie in
//! `0..=100` and they sum to exactly [`FULL`]. Rounding is always the same:
//! the first `K-1` components are truncated and the last one takes whatever
//! is left.

use crate::MAX_STEPPERS;

/// Sum of every valid mix ratio.
pub const FULL: u8 = 100;

/// `K` integer percentages summing to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MixRatio<const K: usize>([u8; K]);

impl<const K: usize> MixRatio<K> {
    const SHAPE: () = assert!(K >= 2 && K <= MAX_STEPPERS, "mixing needs 2..=8 steppers");

    /// `100 / K` for every component, remainder on the last.
    ///
    /// `K = 3` gives `[33, 33, 34]`.
    #[must_use]
    pub fn equal_split() -> Self {
        let () = Self::SHAPE;
        #[allow(clippy::cast_possible_truncation)]
        let share = (FULL as usize).checked_div(K).unwrap_or(0) as u8;
        Self::with_residual([share; K])
    }

    /// All of the blend from component `index` (clamped to the last).
    #[must_use]
    pub fn pure(index: usize) -> Self {
        let () = Self::SHAPE;
        let mut parts = [0u8; K];
        let last = K.saturating_sub(1);
        if let Some(slot) = parts.get_mut(index.min(last)) {
            *slot = FULL;
        }
        Self(parts)
    }

    /// Keep the first `K-1` entries of `head`, capped so their running sum
    /// never exceeds 100, and give the last component the remainder.
    #[must_use]
    pub fn with_residual(head: [u8; K]) -> Self {
        let () = Self::SHAPE;
        let mut parts = head;
        let last = K.saturating_sub(1);
        let mut used: u8 = 0;
        for (i, slot) in parts.iter_mut().enumerate() {
            if i == last {
                *slot = FULL.saturating_sub(used);
            } else {
                let room = FULL.saturating_sub(used);
                *slot = (*slot).min(room);
                used = used.saturating_add(*slot);
            }
        }
        Self(parts)
    }

    /// Scale raw weights to percentages.
    ///
    /// Component `i < K-1` becomes `floor(100 * w[i] / sum)`; the last gets
    /// the residual. All-zero weights fall back to [`equal_split`](Self::equal_split).
    #[must_use]
    pub fn from_weights(weights: &[u8; K]) -> Self {
        let total: u32 = weights.iter().map(|&w| u32::from(w)).sum();
        if total == 0 {
            tracing::trace!("zero-sum weights, using equal split");
            return Self::equal_split();
        }
        let mut head = [0u8; K];
        for (slot, &w) in head.iter_mut().zip(weights.iter()) {
            let share = u32::from(w)
                .saturating_mul(u32::from(FULL))
                .checked_div(total)
                .unwrap_or(0);
            *slot = u8::try_from(share).unwrap_or(FULL);
        }
        Self::with_residual(head)
    }

    /// Commit rule for staged manual percentages.
    ///
    /// Identical components (including all zero) give an equal split;
    /// anything else is rescaled proportionally with [`from_weights`](Self::from_weights).
    #[must_use]
    pub fn from_staged(staged: &[u8; K]) -> Self {
        let all_equal = staged.windows(2).all(|w| matches!(w, [a, b] if a == b));
        if all_equal {
            Self::equal_split()
        } else {
            Self::from_weights(staged)
        }
    }

    /// Validate an already-normalised slice (used when decoding records).
    ///
    /// Returns `None` unless the slice has exactly `K` entries summing to 100.
    #[must_use]
    pub fn try_from_slice(parts: &[u8]) -> Option<Self> {
        let () = Self::SHAPE;
        let parts: [u8; K] = parts.try_into().ok()?;
        let total: u32 = parts.iter().map(|&p| u32::from(p)).sum();
        (total == u32::from(FULL)).then_some(Self(parts))
    }

    /// Component percentages.
    #[must_use]
    pub fn as_array(&self) -> &[u8; K] {
        &self.0
    }

    /// Percentage of component `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// Sum of all components; always 100.
    #[must_use]
    pub fn sum(&self) -> u16 {
        self.0.iter().map(|&p| u16::from(p)).sum()
    }
}

impl<const K: usize> Default for MixRatio<K> {
    fn default() -> Self {
        Self::equal_split()
    }
}
