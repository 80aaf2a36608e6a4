//! Colour-mixing engine for multi-input hotends.
//!
//! A mixing hotend blends `K` filaments. Every blend is a [`MixRatio`]: `K`
//! integer percentages that always sum to exactly 100. Blends are stored per
//! virtual tool in a [`ToolTable`], and the [`Mixer`] decides which blend is
//! active according to its [`MixingMode`]:
//!
//! - **Manual**: the selected virtual tool's blend.
//! - **Gradient**: a linear blend between two tools across a Z range.
//! - **Random**: a fresh random blend every time Z changes inside a range.
//!
//! # Modules
//!
//! - [`ratio`]: `MixRatio<K>` and its normalisation rules
//! - [`vtool`]: `ToolTable<K, N>` virtual tool storage
//! - [`mode`]: mode tags and gradient/random configuration
//! - [`random`]: `RandomSource` seam and generators
//! - [`engine`]: `Mixer<K, N>` state machine and per-layer tick
//! - [`persist`]: power-loss record encoding (postcard + CRC32)

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]

pub mod engine;
pub mod mode;
pub mod persist;
pub mod random;
pub mod ratio;
pub mod vtool;

pub use engine::{ActiveMix, Mixer};
pub use mode::{GradientConfig, MixingMode, ModeKind, RandomConfig};
pub use persist::{MixerRecord, PersistError};
pub use random::{RandomSource, TickSeeded, XorShift32};
pub use ratio::{MixRatio, FULL};
pub use vtool::ToolTable;

/// Largest supported number of mixing steppers.
pub const MAX_STEPPERS: usize = 8;

/// Largest supported number of virtual tool slots.
pub const MAX_TOOLS: usize = 16;
