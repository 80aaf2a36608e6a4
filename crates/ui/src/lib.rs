//! Menu layer for a DWIN panel on a mixing-extruder printer.
//!
//! Screens are static row tables ([`screen`]), each list keeps its own
//! cursor and scroll window ([`menu`]) on a bounded navigation stack
//! ([`navigation`]). The [`Controller`] turns encoder events into
//! navigation, value edits and calls into the printer collaborators, and
//! drives the [`mixing`] engine from the live Z height.
//!
//! This crate is `no_std` by default; it only uses `core` + `heapless`.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]

pub mod actions;
pub mod controller;
pub mod edit;
pub mod machine;
pub mod menu;
pub mod navigation;
pub mod render;
pub mod screen;
pub mod view;

pub use controller::{Controller, ControllerConfig, Peripherals};
pub use edit::ValueEdit;
pub use machine::MachineState;
pub use menu::{MenuStep, ScrollMenu};
pub use navigation::Navigator;
pub use screen::{Action, Field, HomeTarget, MotionTable, PreheatPreset, Row, Screen};
