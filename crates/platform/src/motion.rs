//! Motion and thermal subsystem setters
//!
//! The menu layer only ever writes new targets; it never waits for a reply.

/// Machine axes with per-axis motion limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X carriage
    X,
    /// Y bed
    Y,
    /// Z lift
    Z,
    /// Extruder drive
    E,
}

impl Axis {
    /// All axes in menu order.
    pub const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::E];

    /// Position in [`Axis::ALL`].
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
            Axis::E => 3,
        }
    }

    /// Axis for a position in [`Axis::ALL`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Single-letter G-code name.
    pub fn letter(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
            Axis::E => "E",
        }
    }
}

/// Motion planner and heater controls.
pub trait MotionControl {
    /// Set the target temperature of hotend `heater` in °C.
    fn set_target_hotend_temp(&mut self, heater: u8, celsius: u16);

    /// Set the heated bed target in °C.
    fn set_target_bed_temp(&mut self, celsius: u16);

    /// Set part-cooling fan `fan` to a duty cycle (0–255).
    fn set_fan_speed(&mut self, fan: u8, speed: u8);

    /// Set the maximum feedrate of `axis` in mm/s.
    fn set_max_feedrate(&mut self, axis: Axis, mm_per_s: f32);

    /// Set the maximum acceleration of `axis` in mm/s².
    fn set_max_acceleration(&mut self, axis: Axis, mm_per_s2: f32);

    /// Set steps per millimetre of `axis`.
    fn set_steps_per_unit(&mut self, axis: Axis, steps: f32);

    /// Set the Z offset in mm.
    fn set_z_offset(&mut self, mm: f32);

    /// Queue a G-code line for the planner.
    fn queue_gcode(&mut self, line: &str);

    /// Current Z position in mm.
    fn current_z(&self) -> f32;
}
