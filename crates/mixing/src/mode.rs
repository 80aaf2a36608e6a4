//! Mixing modes and their per-mode configuration.

use serde::{Deserialize, Serialize};

/// Which blend source is active, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeKind {
    /// Selected virtual tool
    #[default]
    Manual,
    /// Z-driven blend between two tools
    Gradient,
    /// Random blend per Z change
    Random,
}

impl ModeKind {
    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            ModeKind::Manual => "Manual",
            ModeKind::Gradient => "Gradient",
            ModeKind::Random => "Random",
        }
    }
}

/// Gradient endpoints: blend from `tool_start` at `z_start` to `tool_end`
/// at `z_end` (heights in mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GradientConfig {
    /// Height where the blend starts changing
    pub z_start: f32,
    /// Height where the blend stops changing
    pub z_end: f32,
    /// Tool used at and below `z_start`
    pub tool_start: u8,
    /// Tool used above `z_end`
    pub tool_end: u8,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            z_start: 0.0,
            z_end: 10.0,
            tool_start: 0,
            tool_end: 1,
        }
    }
}

/// Height band in which random blends are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RandomConfig {
    /// Lowest height (inclusive)
    pub z_start: f32,
    /// Highest height (inclusive)
    pub z_end: f32,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            z_start: 0.0,
            z_end: 10.0,
        }
    }
}

/// Active mode together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MixingMode {
    /// Blend of the selected virtual tool
    Manual,
    /// Z gradient
    Gradient(GradientConfig),
    /// Random blends inside a Z band
    Random(RandomConfig),
}

/// Clamp a configured height to `0..` and map NaN to 0.
pub(crate) fn sanitize_z(z: f32) -> f32 {
    if z.is_nan() {
        0.0
    } else {
        z.max(0.0)
    }
}
