//! Mixer state machine.
//!
//! The mixer owns the tool table, the staged manual percentages and the
//! gradient/random configuration. Screens mutate it through the setters
//! below; the periodic tick recomputes the active blend from the current Z.
//! Any mutation raises a dirty flag that the owner drains with
//! [`Mixer::take_dirty`] to decide when to write a recovery record.

use crate::mode::{sanitize_z, GradientConfig, MixingMode, ModeKind, RandomConfig};
use crate::random::{random_mix, RandomSource};
use crate::ratio::MixRatio;
use crate::vtool::ToolTable;
use crate::{MAX_STEPPERS, MAX_TOOLS};

/// The blend currently fed to the steppers and the tool it is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActiveMix<const K: usize> {
    /// Virtual tool id (a user tool or the computed slot)
    pub tool: u8,
    /// Blend
    pub ratio: MixRatio<K>,
}

/// Mixing engine for `K` steppers and `N` virtual tool slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixer<const K: usize, const N: usize> {
    pub(crate) tools: ToolTable<K, N>,
    pub(crate) manual: [[u8; K]; N],
    pub(crate) selected: u8,
    pub(crate) kind: ModeKind,
    pub(crate) gradient: GradientConfig,
    pub(crate) gradient_start: MixRatio<K>,
    pub(crate) gradient_end: MixRatio<K>,
    pub(crate) random: RandomConfig,
    pub(crate) active: ActiveMix<K>,
    pub(crate) last_z: Option<f32>,
    pub(crate) dirty: bool,
}

impl<const K: usize, const N: usize> Mixer<K, N> {
    const SHAPE: () = assert!(
        K >= 2 && K <= MAX_STEPPERS && N >= 2 && N <= MAX_TOOLS,
        "unsupported mixer shape"
    );

    /// Create a mixer in Manual mode with tool 0 selected.
    #[must_use]
    pub fn new(occupy: u8) -> Self {
        let () = Self::SHAPE;
        let tools = ToolTable::new(occupy);
        let mut manual = [[0u8; K]; N];
        for (row, weights) in manual.iter_mut().zip(tools.color.iter()) {
            *row = *weights;
        }
        let first = tools.percent(0).unwrap_or_default();
        let gradient = GradientConfig::default();
        let mut mixer = Self {
            tools,
            manual,
            selected: 0,
            kind: ModeKind::Manual,
            gradient,
            gradient_start: first,
            gradient_end: first,
            random: RandomConfig::default(),
            active: ActiveMix {
                tool: 0,
                ratio: first,
            },
            last_z: None,
            dirty: false,
        };
        mixer.gradient.tool_start = mixer.tools.clamp_user(gradient.tool_start);
        mixer.gradient.tool_end = mixer.tools.clamp_user(gradient.tool_end);
        mixer.snapshot_gradient();
        mixer
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    /// Virtual tool table.
    pub fn tools(&self) -> &ToolTable<K, N> {
        &self.tools
    }

    /// Selected user tool (always `< occupy`).
    pub fn selected_tool(&self) -> u8 {
        self.selected
    }

    /// Current mode with its parameters.
    pub fn mode(&self) -> MixingMode {
        match self.kind {
            ModeKind::Manual => MixingMode::Manual,
            ModeKind::Gradient => MixingMode::Gradient(self.gradient),
            ModeKind::Random => MixingMode::Random(self.random),
        }
    }

    /// Current mode tag.
    pub fn mode_kind(&self) -> ModeKind {
        self.kind
    }

    /// Stored gradient configuration (kept while other modes are active).
    pub fn gradient(&self) -> GradientConfig {
        self.gradient
    }

    /// Stored random configuration.
    pub fn random(&self) -> RandomConfig {
        self.random
    }

    /// Staged manual percentages of `tool`.
    pub fn manual_row(&self, tool: u8) -> Option<&[u8; K]> {
        self.manual.get(usize::from(tool))
    }

    /// Blend currently fed to the steppers.
    pub fn active_mix(&self) -> ActiveMix<K> {
        self.active
    }

    /// Returns `true` once after any state change.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }

    // ── Manual ──────────────────────────────────────────────────────────────

    /// Stage one percentage for `tool`. Values above 100 are clamped;
    /// out-of-range tool or component ids are ignored.
    pub fn set_manual_ratio(&mut self, tool: u8, component: usize, value: u8) {
        if let Some(slot) = self
            .manual
            .get_mut(usize::from(tool))
            .and_then(|row| row.get_mut(component))
        {
            *slot = value.min(crate::FULL);
            self.dirty = true;
        }
    }

    /// Normalise the staged row of `tool` and store it.
    ///
    /// The result replaces the staged row, the tool's weights and
    /// percentages, and the active blend when `tool` is the selected tool
    /// in Manual mode. Returns `None` for an out-of-range tool.
    pub fn commit_manual(&mut self, tool: u8) -> Option<MixRatio<K>> {
        let row = self.manual.get_mut(usize::from(tool))?;
        let ratio = MixRatio::from_staged(row);
        *row = *ratio.as_array();
        self.tools.store(tool, ratio);
        if tool == self.selected && self.kind == ModeKind::Manual {
            self.publish(tool, ratio);
        }
        self.dirty = true;
        tracing::debug!(tool, "manual mix committed");
        Some(ratio)
    }

    /// Select a user tool (clamped to `occupy - 1`) and switch to Manual.
    pub fn select_tool(&mut self, tool: u8) -> u8 {
        self.selected = self.tools.clamp_user(tool);
        self.kind = ModeKind::Manual;
        let ratio = self.tools.percent(self.selected).unwrap_or_default();
        self.publish(self.selected, ratio);
        self.dirty = true;
        tracing::debug!(tool = self.selected, "virtual tool selected");
        self.selected
    }

    /// Switch to Manual mode, seeding the selected tool's staged row from
    /// its current blend.
    pub fn enter_manual(&mut self) {
        let ratio = self.tools.percent(self.selected).unwrap_or_default();
        if let Some(row) = self.manual.get_mut(usize::from(self.selected)) {
            *row = *ratio.as_array();
        }
        self.kind = ModeKind::Manual;
        self.publish(self.selected, ratio);
        self.dirty = true;
        tracing::debug!(tool = self.selected, "mixer mode manual");
    }

    // ── Gradient ────────────────────────────────────────────────────────────

    /// Record gradient endpoints and capture both tools' current blends.
    ///
    /// Heights are clamped to `0..`; tools to the user range. Later edits
    /// of the endpoint tools do not affect the captured blends until the
    /// endpoints are set again.
    pub fn set_gradient_endpoints(&mut self, z_start: f32, z_end: f32, tool_start: u8, tool_end: u8) {
        self.gradient = GradientConfig {
            z_start: sanitize_z(z_start),
            z_end: sanitize_z(z_end),
            tool_start: self.tools.clamp_user(tool_start),
            tool_end: self.tools.clamp_user(tool_end),
        };
        self.snapshot_gradient();
        self.last_z = None;
        self.dirty = true;
    }

    /// Switch to Gradient mode using the stored endpoints.
    pub fn enter_gradient(&mut self) {
        self.snapshot_gradient();
        self.kind = ModeKind::Gradient;
        self.last_z = None;
        let computed = self.tools.computed_id();
        self.tools.store(computed, self.gradient_start);
        self.publish(computed, self.gradient_start);
        self.dirty = true;
        tracing::debug!(
            z_start = self.gradient.z_start,
            z_end = self.gradient.z_end,
            "mixer mode gradient"
        );
    }

    fn snapshot_gradient(&mut self) {
        self.gradient_start = self.tools.percent(self.gradient.tool_start).unwrap_or_default();
        self.gradient_end = self.tools.percent(self.gradient.tool_end).unwrap_or_default();
    }

    // ── Random ──────────────────────────────────────────────────────────────

    /// Record the height band for random blends.
    pub fn set_random_range(&mut self, z_start: f32, z_end: f32) {
        self.random = RandomConfig {
            z_start: sanitize_z(z_start),
            z_end: sanitize_z(z_end),
        };
        self.last_z = None;
        self.dirty = true;
    }

    /// Switch to Random mode; the computed tool becomes active.
    pub fn enter_random(&mut self) {
        self.kind = ModeKind::Random;
        self.last_z = None;
        let computed = self.tools.computed_id();
        let ratio = self.active.ratio;
        self.tools.store(computed, ratio);
        self.publish(computed, ratio);
        self.dirty = true;
        tracing::debug!(
            z_start = self.random.z_start,
            z_end = self.random.z_end,
            "mixer mode random"
        );
    }

    // ── Tick ────────────────────────────────────────────────────────────────

    /// Recompute the active blend for the nozzle height `current_z`.
    ///
    /// Gradient and Random act only when Z differs from the previous tick.
    /// Manual republishes the selected tool's blend if it changed. Returns
    /// `true` when the active blend or tool changed.
    pub fn tick<R: RandomSource + ?Sized>(&mut self, current_z: f32, rng: &mut R) -> bool {
        let before = self.active;
        match self.kind {
            ModeKind::Manual => {
                let ratio = self.tools.percent(self.selected).unwrap_or_default();
                self.publish(self.selected, ratio);
            }
            ModeKind::Gradient => {
                if self.z_changed(current_z) {
                    self.gradient_tick(current_z);
                }
            }
            ModeKind::Random => {
                if self.z_changed(current_z) {
                    self.random_tick(current_z, rng);
                }
            }
        }
        let changed = self.active != before;
        if changed {
            self.dirty = true;
            tracing::trace!(tool = self.active.tool, z = current_z, "active mix updated");
        }
        changed
    }

    fn z_changed(&mut self, z: f32) -> bool {
        #[allow(clippy::float_cmp)]
        let same = self.last_z == Some(z);
        self.last_z = Some(z);
        !same
    }

    fn gradient_tick(&mut self, z: f32) {
        let GradientConfig {
            z_start,
            z_end,
            tool_start,
            tool_end,
        } = self.gradient;
        // A collapsed band always holds the start blend.
        if z_start >= z_end || z < z_start {
            self.publish(tool_start, self.gradient_start);
        } else if z > z_end {
            self.publish(tool_end, self.gradient_end);
        } else {
            let ratio = interpolate(&self.gradient_start, &self.gradient_end, z_start, z_end, z);
            let computed = self.tools.computed_id();
            self.tools.store(computed, ratio);
            self.publish(computed, ratio);
        }
    }

    fn random_tick<R: RandomSource + ?Sized>(&mut self, z: f32, rng: &mut R) {
        if z < self.random.z_start || z > self.random.z_end {
            return;
        }
        let ratio = random_mix(rng);
        let computed = self.tools.computed_id();
        self.tools.store(computed, ratio);
        self.publish(computed, ratio);
    }

    fn publish(&mut self, tool: u8, ratio: MixRatio<K>) {
        self.active = ActiveMix { tool, ratio };
    }
}

impl<const K: usize, const N: usize> Default for Mixer<K, N> {
    fn default() -> Self {
        Self::new(u8::try_from(N.saturating_sub(1)).unwrap_or(u8::MAX))
    }
}

/// Per-component linear blend from `start` towards `end`, never passing
/// `end`, truncated and renormalised.
fn interpolate<const K: usize>(
    start: &MixRatio<K>,
    end: &MixRatio<K>,
    z_start: f32,
    z_end: f32,
    z: f32,
) -> MixRatio<K> {
    let span = (z_end - z_start).abs();
    let rate = if span > 0.0 {
        ((z - z_start).abs() / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mut weights = [0u8; K];
    for (w, (&s, &e)) in weights
        .iter_mut()
        .zip(start.as_array().iter().zip(end.as_array().iter()))
    {
        let (sf, ef) = (f32::from(s), f32::from(e));
        let value = if s >= e {
            (sf - (sf - ef) * rate).max(ef)
        } else {
            (sf + (ef - sf) * rate).min(ef)
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            *w = value as u8;
        }
    }
    MixRatio::from_weights(&weights)
}
