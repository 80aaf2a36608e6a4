//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests and in the desktop simulator.
//! Every mock records what it was asked to do so tests can assert on it.

#![cfg(any(test, feature = "std"))]

use crate::*;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::Rectangle;

// ── Display ──────────────────────────────────────────────────────────────────

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// `draw_rect`
    Rect {
        /// Area
        area: Rectangle,
        /// Colour
        color: Rgb565,
        /// Fill mode
        fill: Fill,
    },
    /// `draw_string`
    Text {
        /// Top-left corner
        origin: Point,
        /// Text
        text: String,
        /// Foreground colour
        fg: Rgb565,
        /// Background colour
        bg: Rgb565,
    },
    /// `draw_icon`
    Icon {
        /// Top-left corner
        origin: Point,
        /// Icon id
        icon: IconId,
    },
    /// `draw_line`
    Line {
        /// Start point
        start: Point,
        /// End point
        end: Point,
        /// Colour
        color: Rgb565,
    },
    /// `move_area`
    Move {
        /// Area moved
        area: Rectangle,
        /// Direction
        direction: ScrollDirection,
        /// Distance in pixels
        distance: u32,
    },
}

/// Mock display surface recording every primitive.
pub struct MockSurface {
    calls: Vec<DrawCall>,
    frames: usize,
    area_move: bool,
}

impl MockSurface {
    /// Create a new mock surface with hardware area moves enabled
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            frames: 0,
            area_move: true,
        }
    }

    /// Create a mock surface that cannot move areas
    pub fn without_area_move() -> Self {
        Self {
            area_move: false,
            ..Self::new()
        }
    }

    /// All calls since creation or the last [`clear`](Self::clear)
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of `update_frame` calls
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Forget recorded calls
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Every string drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether any drawn string contains `needle`
    pub fn drew_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    /// Number of area moves recorded
    pub fn move_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Move { .. }))
            .count()
    }
}

impl Default for MockSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for MockSurface {
    fn draw_rect(&mut self, area: Rectangle, color: Rgb565, fill: Fill) {
        self.calls.push(DrawCall::Rect { area, color, fill });
    }

    fn draw_string(&mut self, origin: Point, text: &str, fg: Rgb565, bg: Rgb565) {
        self.calls.push(DrawCall::Text {
            origin,
            text: text.to_owned(),
            fg,
            bg,
        });
    }

    fn draw_icon(&mut self, origin: Point, icon: IconId) {
        self.calls.push(DrawCall::Icon { origin, icon });
    }

    fn draw_line(&mut self, start: Point, end: Point, color: Rgb565) {
        self.calls.push(DrawCall::Line { start, end, color });
    }

    fn supports_area_move(&self) -> bool {
        self.area_move
    }

    fn move_area(
        &mut self,
        area: Rectangle,
        direction: ScrollDirection,
        distance: u32,
        _fill: Rgb565,
    ) {
        self.calls.push(DrawCall::Move {
            area,
            direction,
            distance,
        });
    }

    fn update_frame(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }
}

// ── Encoder ──────────────────────────────────────────────────────────────────

/// Mock encoder fed from a queue
pub struct MockEncoder {
    events: heapless::Deque<EncoderEvent, 64>,
}

impl MockEncoder {
    /// Create new mock encoder
    pub fn new() -> Self {
        Self {
            events: heapless::Deque::new(),
        }
    }

    /// Add event to queue
    pub fn add_event(&mut self, event: EncoderEvent) -> Result<(), EncoderEvent> {
        self.events.push_back(event)
    }

}

impl Default for MockEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderSource for MockEncoder {
    fn poll_event(&mut self) -> Option<EncoderEvent> {
        self.events.pop_front()
    }
}

// ── Motion ───────────────────────────────────────────────────────────────────

/// One recorded motion/thermal call.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionCall {
    /// `set_target_hotend_temp`
    Hotend(u8, u16),
    /// `set_target_bed_temp`
    Bed(u16),
    /// `set_fan_speed`
    Fan(u8, u8),
    /// `set_max_feedrate`
    MaxFeedrate(Axis, f32),
    /// `set_max_acceleration`
    MaxAcceleration(Axis, f32),
    /// `set_steps_per_unit`
    StepsPerUnit(Axis, f32),
    /// `set_z_offset`
    ZOffset(f32),
    /// `queue_gcode`
    Gcode(String),
}

/// Mock motion planner with a settable Z position
pub struct MockMotion {
    calls: Vec<MotionCall>,
    z: f32,
}

impl MockMotion {
    /// Create new mock motion planner at Z = 0
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            z: 0.0,
        }
    }

    /// Move the simulated nozzle
    pub fn set_z(&mut self, z: f32) {
        self.z = z;
    }

    /// All calls so far
    pub fn calls(&self) -> &[MotionCall] {
        &self.calls
    }

    /// G-code lines queued so far
    pub fn gcode(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                MotionCall::Gcode(line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockMotion {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionControl for MockMotion {
    fn set_target_hotend_temp(&mut self, heater: u8, celsius: u16) {
        self.calls.push(MotionCall::Hotend(heater, celsius));
    }

    fn set_target_bed_temp(&mut self, celsius: u16) {
        self.calls.push(MotionCall::Bed(celsius));
    }

    fn set_fan_speed(&mut self, fan: u8, speed: u8) {
        self.calls.push(MotionCall::Fan(fan, speed));
    }

    fn set_max_feedrate(&mut self, axis: Axis, mm_per_s: f32) {
        self.calls.push(MotionCall::MaxFeedrate(axis, mm_per_s));
    }

    fn set_max_acceleration(&mut self, axis: Axis, mm_per_s2: f32) {
        self.calls.push(MotionCall::MaxAcceleration(axis, mm_per_s2));
    }

    fn set_steps_per_unit(&mut self, axis: Axis, steps: f32) {
        self.calls.push(MotionCall::StepsPerUnit(axis, steps));
    }

    fn set_z_offset(&mut self, mm: f32) {
        self.calls.push(MotionCall::ZOffset(mm));
    }

    fn queue_gcode(&mut self, line: &str) {
        self.calls.push(MotionCall::Gcode(line.to_owned()));
    }

    fn current_z(&self) -> f32 {
        self.z
    }
}

// ── Settings ─────────────────────────────────────────────────────────────────

/// Mock settings store with scriptable outcomes
pub struct MockSettings {
    /// Result returned by `save`
    pub save_ok: bool,
    /// Result returned by `load`
    pub load_ok: bool,
    saves: usize,
    loads: usize,
    resets: usize,
}

impl MockSettings {
    /// Create a store whose operations succeed
    pub fn new() -> Self {
        Self {
            save_ok: true,
            load_ok: true,
            saves: 0,
            loads: 0,
            resets: 0,
        }
    }

    /// Number of `save` calls
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// Number of `load` calls
    pub fn loads(&self) -> usize {
        self.loads
    }

    /// Number of `reset` calls
    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl Default for MockSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for MockSettings {
    fn save(&mut self) -> bool {
        self.saves = self.saves.saturating_add(1);
        self.save_ok
    }

    fn load(&mut self) -> bool {
        self.loads = self.loads.saturating_add(1);
        self.load_ok
    }

    fn reset(&mut self) {
        self.resets = self.resets.saturating_add(1);
    }
}

// ── Recovery ─────────────────────────────────────────────────────────────────

/// Error returned by [`MockRecovery`] when failure is injected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockRecoveryError;

/// In-memory power-loss record
pub struct MockRecovery {
    record: Option<Vec<u8>>,
    interrupted: bool,
    /// Make every `save` fail
    pub fail_saves: bool,
    saves: usize,
}

impl MockRecovery {
    /// Create an empty store with no interrupted job
    pub fn new() -> Self {
        Self {
            record: None,
            interrupted: false,
            fail_saves: false,
            saves: 0,
        }
    }

    /// Create a store holding `record` from an interrupted print
    pub fn interrupted_with(record: Vec<u8>) -> Self {
        Self {
            record: Some(record),
            interrupted: true,
            ..Self::new()
        }
    }

    /// Stored record bytes
    pub fn record(&self) -> Option<&[u8]> {
        self.record.as_deref()
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl Default for MockRecovery {
    fn default() -> Self {
        Self::new()
    }
}

impl RecoveryStore for MockRecovery {
    type Error = MockRecoveryError;

    fn save(&mut self, record: &[u8]) -> Result<(), Self::Error> {
        if self.fail_saves {
            return Err(MockRecoveryError);
        }
        self.saves = self.saves.saturating_add(1);
        self.record = Some(record.to_vec());
        Ok(())
    }

    fn load(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error> {
        let Some(record) = &self.record else {
            return Ok(None);
        };
        let dst = buf.get_mut(..record.len()).ok_or(MockRecoveryError)?;
        dst.copy_from_slice(record);
        Ok(Some(record.len()))
    }

    fn interrupted_job(&self) -> bool {
        self.interrupted
    }

    fn clear_interrupted(&mut self) {
        self.interrupted = false;
    }
}

// ── Buzzer ───────────────────────────────────────────────────────────────────

/// Mock buzzer recording tones
#[derive(Default)]
pub struct MockBuzzer {
    tones: Vec<bool>,
}

impl MockBuzzer {
    /// Create new mock buzzer
    pub fn new() -> Self {
        Self::default()
    }

    /// Tones sounded so far (`true` = success)
    pub fn tones(&self) -> &[bool] {
        &self.tones
    }
}

impl Buzzer for MockBuzzer {
    fn feedback(&mut self, success: bool) {
        self.tones.push(success);
    }
}
