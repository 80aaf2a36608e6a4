//! Application configuration and constants
//!
//! This module defines central configuration values used across the
//! application. Screens, the mixer and the simulator reference these
//! constants rather than hardcoding values.

/// The application name
pub const APP_NAME: &str = "DWIN Mixer";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Full application title shown on the Info screen
pub const fn app_title() -> &'static str {
    APP_NAME
}

// ── Timing ───────────────────────────────────────────────────────────────────

/// Minimum spacing between two accepted encoder events.
pub const ENCODER_DEBOUNCE_MS: u32 = 20;

/// Period of the status/mixer housekeeping tick.
pub const STATUS_UPDATE_INTERVAL_MS: u32 = 1000;

// ── Menu layout ──────────────────────────────────────────────────────────────

/// Number of rows below the Back row that fit on screen.
pub const MENU_VISIBLE_ROWS: u8 = 5;

// ── Mixing ───────────────────────────────────────────────────────────────────

/// Number of steppers feeding the mixing hotend.
pub const MIXING_STEPPERS: usize = 4;

/// Virtual tool slots, including the reserved computed slot.
pub const MIXING_VIRTUAL_TOOLS: usize = 16;

// ── Machine limits ───────────────────────────────────────────────────────────

/// Maximum X travel in mm.
pub const X_MAX_POS_MM: f32 = 220.0;

/// Maximum Y travel in mm.
pub const Y_MAX_POS_MM: f32 = 220.0;

/// Maximum Z travel in mm.
pub const Z_MAX_POS_MM: f32 = 250.0;

/// Feedrate of menu moves for X, Y and Z (mm/min).
pub const MOVE_FEEDRATE_MM_MIN: [u16; 3] = [3000, 3000, 240];

/// Feedrate of menu extruder moves (mm/min).
pub const EXTRUDE_FEEDRATE_MM_MIN: u16 = 200;

/// Longest single extruder move from the menu, in mm.
pub const EXTRUDE_MAXLENGTH_MM: i32 = 200;

/// Hotend target below which the menu refuses to extrude (°C).
pub const EXTRUDE_MINTEMP: u16 = 170;

/// Z offset range in mm.
pub const Z_OFFSET_RANGE_MM: (i32, i32) = (-20, 20);

/// Highest hotend target selectable from the menu (°C).
pub const HOTEND_MAX_TARGET: u16 = 260;

/// Highest bed target selectable from the menu (°C).
pub const BED_MAX_TARGET: u16 = 110;

/// Fan duty for "fully on".
pub const FAN_ON: u8 = 255;

/// Lowest editable max feedrate (mm/s).
pub const MIN_MAX_FEEDRATE: u16 = 1;

/// Lowest editable max acceleration (mm/s²).
pub const MIN_MAX_ACCELERATION: u16 = 1;

/// Lowest editable steps/mm, in tenths.
pub const MIN_STEPS_TENTHS: i32 = 10;

// ── Firmware defaults (X, Y, Z, E) ───────────────────────────────────────────

/// Default max feedrate per axis (mm/s).
pub const DEFAULT_MAX_FEEDRATE: [u16; 4] = [500, 500, 5, 25];

/// Default max acceleration per axis (mm/s²).
pub const DEFAULT_MAX_ACCELERATION: [u16; 4] = [500, 500, 100, 5000];

/// Default steps per mm per axis, in tenths.
pub const DEFAULT_STEPS_TENTHS: [i32; 4] = [800, 800, 4000, 930];

/// Menu edits may raise a motion limit to at most this multiple of its default.
pub const MOTION_EDIT_FACTOR: u16 = 2;

// ── Preheat presets ──────────────────────────────────────────────────────────

/// Preheat preset: hotend °C, bed °C, fan duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Preheat {
    /// Material name
    pub label: &'static str,
    /// Hotend target
    pub hotend: u16,
    /// Bed target
    pub bed: u16,
    /// Fan duty
    pub fan: u8,
}

/// PLA preset
pub const PREHEAT_PLA: Preheat = Preheat {
    label: "PLA",
    hotend: 185,
    bed: 60,
    fan: 0,
};

/// ABS preset
pub const PREHEAT_ABS: Preheat = Preheat {
    label: "ABS",
    hotend: 240,
    bed: 100,
    fan: 0,
};
