//! Hardware Abstraction Layer (HAL) for the DWIN mixing-printer display
//!
//! This crate provides trait-based abstractions for every collaborator the
//! menu controller talks to, enabling development and testing without a
//! printer or a panel attached.
//!
//! # Architecture Layers
//!
//! ```text
//! Simulator / printer firmware (binary)
//!         ↓
//! Feature Layers (ui, mixing)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Panel serial link / motion planner / EEPROM
//! ```
//!
//! # Collaborators
//!
//! - [`DisplaySurface`] - rectangle, string, icon and line primitives
//! - [`EncoderSource`] - rotary encoder with push button
//! - [`MotionControl`] - thermal and motion setters, G-code queue, live Z
//! - [`SettingsStore`] - persistent settings (EEPROM)
//! - [`RecoveryStore`] - power-loss recovery record
//! - [`Buzzer`] - audio feedback tones
//!
//! # Features
//!
//! - `std`: Enable standard library support and the [`mocks`] module
//! - `defmt`: Enable defmt::Format derives on platform types
//!
//! # Example
//!
//! ```no_run
//! use platform::{DisplaySurface, EncoderEvent, EncoderSource};
//!
//! fn pump<E: EncoderSource, D: DisplaySurface>(encoder: &mut E, display: &mut D) {
//!     if let Some(EncoderEvent::Enter) = encoder.poll_event() {
//!         display.update_frame();
//!     }
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::must_use_candidate)] // hardware accessors: callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod display;
pub mod feedback;
pub mod graphics;
pub mod input;
pub mod motion;
pub mod storage;
pub mod units;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main high-level traits
pub use display::{palette, DisplaySurface, Fill, IconId, ScrollDirection};
pub use feedback::Buzzer;
pub use graphics::GraphicsSurface;
pub use input::{DebouncedEncoder, Debouncer, EncoderEvent, EncoderSource};
pub use motion::{Axis, MotionControl};
pub use storage::{RecoveryStore, SettingsStore};
pub use units::{OutOfRangeError, Percent, Tenths};
