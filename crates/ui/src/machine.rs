//! Cached machine settings shown and edited by the menus.
//!
//! The printer never reports these back, so the menu keeps the last value
//! it wrote. Accepted edits are forwarded to [`MotionControl`], except
//! preset targets, which only take effect on the next preheat.

use core::fmt::Write as _;

use heapless::String;
use platform::config::{
    Preheat, BED_MAX_TARGET, DEFAULT_MAX_ACCELERATION, DEFAULT_MAX_FEEDRATE, DEFAULT_STEPS_TENTHS,
    FAN_ON, HOTEND_MAX_TARGET, MIN_MAX_ACCELERATION, MIN_MAX_FEEDRATE, MIN_STEPS_TENTHS,
    MOTION_EDIT_FACTOR, MOVE_FEEDRATE_MM_MIN, X_MAX_POS_MM, Y_MAX_POS_MM, Z_MAX_POS_MM,
    Z_OFFSET_RANGE_MM,
};
use platform::{Axis, MotionControl, Tenths};

use crate::edit::format_value;
use crate::screen::{Field, HomeTarget, PreheatPreset, ValueFormat};

/// One queued G-code line.
pub type GcodeLine = String<32>;

/// Temperatures, fan and per-axis motion limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MachineState {
    /// Hotend target °C
    pub hotend: u16,
    /// Bed target °C
    pub bed: u16,
    /// Fan duty
    pub fan: u8,
    /// mm/s per axis
    pub max_feedrate: [u16; 4],
    /// mm/s² per axis
    pub max_acceleration: [u16; 4],
    /// steps/mm per axis, tenths
    pub steps_tenths: [i32; 4],
    /// Last X/Y/Z target sent from the Move screen, tenths of mm
    pub position_tenths: [i32; 3],
    /// Z offset, hundredths of mm
    pub z_offset_hundredths: i32,
    /// Preheat presets in [`PreheatPreset::ALL`] order
    pub presets: [Preheat; 2],
}

impl Default for MachineState {
    fn default() -> Self {
        Self {
            hotend: 0,
            bed: 0,
            fan: 0,
            max_feedrate: DEFAULT_MAX_FEEDRATE,
            max_acceleration: DEFAULT_MAX_ACCELERATION,
            steps_tenths: DEFAULT_STEPS_TENTHS,
            position_tenths: [0; 3],
            z_offset_hundredths: 0,
            presets: PreheatPreset::ALL.map(PreheatPreset::defaults),
        }
    }
}

fn travel_tenths(axis: Axis) -> Option<i32> {
    let max = match axis {
        Axis::X => X_MAX_POS_MM,
        Axis::Y => Y_MAX_POS_MM,
        Axis::Z => Z_MAX_POS_MM,
        Axis::E => return None,
    };
    Some(Tenths::from_f32(max).raw())
}

/// `G0` move of `axis` to `tenths`, at the menu feedrate of that axis.
pub fn move_gcode(axis: Axis, tenths: i32) -> GcodeLine {
    let feed = MOVE_FEEDRATE_MM_MIN.get(axis.index()).copied().unwrap_or(0);
    let mut line = GcodeLine::new();
    let _ = write!(
        line,
        "G0 {}{} F{feed}",
        axis.letter(),
        format_value(ValueFormat::Tenths, tenths)
    );
    line
}

fn limit(defaults: &[u16; 4], axis: Axis) -> i32 {
    let default = defaults.get(axis.index()).copied().unwrap_or(0);
    i32::from(default.saturating_mul(MOTION_EDIT_FACTOR))
}

impl MachineState {
    /// Current value of a machine field, `None` for mixer fields.
    pub fn value(&self, field: Field) -> Option<i32> {
        let axis_u16 = |table: &[u16; 4], axis: Axis| table.get(axis.index()).copied().map(i32::from);
        match field {
            Field::HotendTemp => Some(i32::from(self.hotend)),
            Field::BedTemp => Some(i32::from(self.bed)),
            Field::FanSpeed => Some(i32::from(self.fan)),
            Field::MaxFeedrate(axis) => axis_u16(&self.max_feedrate, axis),
            Field::MaxAcceleration(axis) => axis_u16(&self.max_acceleration, axis),
            Field::StepsPerUnit(axis) => self.steps_tenths.get(axis.index()).copied(),
            Field::PresetHotend(preset) => Some(i32::from(self.preset(preset).hotend)),
            Field::PresetBed(preset) => Some(i32::from(self.preset(preset).bed)),
            Field::PresetFan(preset) => Some(i32::from(self.preset(preset).fan)),
            Field::AxisPosition(axis) => self.position_tenths.get(axis.index()).copied(),
            Field::ZOffset => Some(self.z_offset_hundredths),
            _ => None,
        }
    }

    /// Stored targets of `preset`.
    pub fn preset(&self, preset: PreheatPreset) -> Preheat {
        self.presets
            .get(preset.index())
            .copied()
            .unwrap_or_else(|| preset.defaults())
    }

    /// Editable range of a machine field, `None` for mixer fields.
    pub fn range(field: Field) -> Option<(i32, i32)> {
        match field {
            Field::HotendTemp | Field::PresetHotend(_) => Some((0, i32::from(HOTEND_MAX_TARGET))),
            Field::BedTemp | Field::PresetBed(_) => Some((0, i32::from(BED_MAX_TARGET))),
            Field::FanSpeed | Field::PresetFan(_) => Some((0, i32::from(FAN_ON))),
            Field::AxisPosition(axis) => travel_tenths(axis).map(|max| (0, max)),
            Field::ZOffset => {
                let (min, max) = Z_OFFSET_RANGE_MM;
                Some((min.saturating_mul(100), max.saturating_mul(100)))
            }
            Field::MaxFeedrate(axis) => {
                Some((i32::from(MIN_MAX_FEEDRATE), limit(&DEFAULT_MAX_FEEDRATE, axis)))
            }
            Field::MaxAcceleration(axis) => Some((
                i32::from(MIN_MAX_ACCELERATION),
                limit(&DEFAULT_MAX_ACCELERATION, axis),
            )),
            Field::StepsPerUnit(axis) => {
                let default = DEFAULT_STEPS_TENTHS.get(axis.index()).copied().unwrap_or(0);
                let factor = i32::from(MOTION_EDIT_FACTOR);
                Some((MIN_STEPS_TENTHS, default.saturating_mul(factor)))
            }
            _ => None,
        }
    }

    /// Store `value` for `field` and forward it. Returns `false` for mixer
    /// fields, which are left to the caller.
    pub fn apply<M: MotionControl + ?Sized>(&mut self, field: Field, value: i32, motion: &mut M) -> bool {
        let Some((min, max)) = Self::range(field) else {
            return false;
        };
        let value = value.clamp(min, max);
        let as_u16 = u16::try_from(value).unwrap_or(0);
        match field {
            Field::HotendTemp => {
                self.hotend = as_u16;
                motion.set_target_hotend_temp(0, as_u16);
            }
            Field::BedTemp => {
                self.bed = as_u16;
                motion.set_target_bed_temp(as_u16);
            }
            Field::FanSpeed => {
                self.fan = u8::try_from(value).unwrap_or(FAN_ON);
                motion.set_fan_speed(0, self.fan);
            }
            Field::MaxFeedrate(axis) => {
                if let Some(slot) = self.max_feedrate.get_mut(axis.index()) {
                    *slot = as_u16;
                }
                motion.set_max_feedrate(axis, f32::from(as_u16));
            }
            Field::MaxAcceleration(axis) => {
                if let Some(slot) = self.max_acceleration.get_mut(axis.index()) {
                    *slot = as_u16;
                }
                motion.set_max_acceleration(axis, f32::from(as_u16));
            }
            Field::StepsPerUnit(axis) => {
                if let Some(slot) = self.steps_tenths.get_mut(axis.index()) {
                    *slot = value;
                }
                motion.set_steps_per_unit(axis, Tenths::from_raw(value).to_f32());
            }
            Field::PresetHotend(preset) => {
                if let Some(slot) = self.presets.get_mut(preset.index()) {
                    slot.hotend = as_u16;
                }
            }
            Field::PresetBed(preset) => {
                if let Some(slot) = self.presets.get_mut(preset.index()) {
                    slot.bed = as_u16;
                }
            }
            Field::PresetFan(preset) => {
                if let Some(slot) = self.presets.get_mut(preset.index()) {
                    slot.fan = u8::try_from(value).unwrap_or(FAN_ON);
                }
            }
            Field::AxisPosition(axis) => {
                if let Some(slot) = self.position_tenths.get_mut(axis.index()) {
                    *slot = value;
                }
                motion.queue_gcode(&move_gcode(axis, value));
            }
            Field::ZOffset => {
                self.z_offset_hundredths = value;
                #[allow(clippy::cast_precision_loss)]
                let mm = value as f32 / 100.0;
                motion.set_z_offset(mm);
            }
            _ => return false,
        }
        tracing::debug!(field = %field.label(), value, "machine setting applied");
        true
    }

    /// Queue homing of `target` and reset the cached positions it homes.
    pub fn home<M: MotionControl + ?Sized>(&mut self, target: HomeTarget, motion: &mut M) {
        motion.queue_gcode(target.gcode());
        for axis in target.axes() {
            if let Some(slot) = self.position_tenths.get_mut(axis.index()) {
                *slot = 0;
            }
        }
    }

    /// Apply a preheat preset.
    pub fn preheat<M: MotionControl + ?Sized>(&mut self, preset: PreheatPreset, motion: &mut M) {
        let targets = self.preset(preset);
        self.hotend = targets.hotend;
        self.bed = targets.bed;
        self.fan = targets.fan;
        motion.set_target_hotend_temp(0, targets.hotend);
        motion.set_target_bed_temp(targets.bed);
        motion.set_fan_speed(0, targets.fan);
    }

    /// Heaters and fan off.
    pub fn cooldown<M: MotionControl + ?Sized>(&mut self, motion: &mut M) {
        self.hotend = 0;
        self.bed = 0;
        self.fan = 0;
        motion.set_target_hotend_temp(0, 0);
        motion.set_target_bed_temp(0);
        motion.set_fan_speed(0, 0);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
mod tests {
    use super::*;
    use platform::mocks::{MockMotion, MotionCall};

    #[test]
    fn test_machine_defaults() {
        let m = MachineState::default();
        assert_eq!(m.value(Field::MaxFeedrate(Axis::Z)), Some(5));
        assert_eq!(m.value(Field::StepsPerUnit(Axis::E)), Some(930));
        assert_eq!(m.value(Field::SelectedTool), None);
    }

    #[test]
    fn test_machine_apply_forwards_to_motion() {
        let mut m = MachineState::default();
        let mut motion = MockMotion::new();
        assert!(m.apply(Field::HotendTemp, 215, &mut motion));
        assert!(m.apply(Field::StepsPerUnit(Axis::X), 805, &mut motion));
        assert_eq!(m.hotend, 215);
        assert_eq!(
            motion.calls(),
            &[
                MotionCall::Hotend(0, 215),
                MotionCall::StepsPerUnit(Axis::X, 80.5)
            ]
        );
    }

    #[test]
    fn test_machine_apply_clamps() {
        let mut m = MachineState::default();
        let mut motion = MockMotion::new();
        m.apply(Field::BedTemp, 500, &mut motion);
        assert_eq!(m.bed, BED_MAX_TARGET);
        m.apply(Field::MaxFeedrate(Axis::Z), 0, &mut motion);
        assert_eq!(m.max_feedrate[2], MIN_MAX_FEEDRATE);
    }

    #[test]
    fn test_machine_ignores_mixer_fields() {
        let mut m = MachineState::default();
        let mut motion = MockMotion::new();
        assert!(!m.apply(Field::GradientZStart, 10, &mut motion));
        assert!(motion.calls().is_empty());
    }

    #[test]
    fn test_machine_axis_move_queues_g0() {
        let mut m = MachineState::default();
        let mut motion = MockMotion::new();
        assert!(m.apply(Field::AxisPosition(Axis::X), 1205, &mut motion));
        assert!(m.apply(Field::AxisPosition(Axis::Z), 9999, &mut motion));
        assert_eq!(m.position_tenths, [1205, 0, 2500]);
        assert_eq!(motion.gcode(), vec!["G0 X120.5 F3000", "G0 Z250.0 F240"]);
    }

    #[test]
    fn test_machine_home_resets_positions() {
        let mut m = MachineState::default();
        let mut motion = MockMotion::new();
        m.position_tenths = [10, 20, 30];
        m.home(HomeTarget::Y, &mut motion);
        assert_eq!(m.position_tenths, [10, 0, 30]);
        m.home(HomeTarget::All, &mut motion);
        assert_eq!(m.position_tenths, [0, 0, 0]);
        assert_eq!(motion.gcode(), vec!["G28 Y0", "G28"]);
    }

    #[test]
    fn test_machine_z_offset_in_hundredths() {
        let mut m = MachineState::default();
        let mut motion = MockMotion::new();
        assert_eq!(MachineState::range(Field::ZOffset), Some((-2000, 2000)));
        m.apply(Field::ZOffset, -125, &mut motion);
        assert_eq!(m.value(Field::ZOffset), Some(-125));
        assert_eq!(motion.calls(), &[MotionCall::ZOffset(-1.25)]);
    }

    #[test]
    fn test_machine_preset_edit_changes_next_preheat() {
        let mut m = MachineState::default();
        let mut motion = MockMotion::new();
        assert!(m.apply(Field::PresetHotend(PreheatPreset::Pla), 205, &mut motion));
        assert!(motion.calls().is_empty(), "preset edits heat nothing");
        m.preheat(PreheatPreset::Pla, &mut motion);
        assert_eq!((m.hotend, m.bed), (205, 60));
        assert_eq!(m.preset(PreheatPreset::Abs), PreheatPreset::Abs.defaults());
    }

    #[test]
    fn test_machine_preheat_and_cooldown() {
        let mut m = MachineState::default();
        let mut motion = MockMotion::new();
        m.preheat(PreheatPreset::Abs, &mut motion);
        assert_eq!((m.hotend, m.bed), (240, 100));
        m.cooldown(&mut motion);
        assert_eq!((m.hotend, m.bed, m.fan), (0, 0, 0));
        assert_eq!(motion.calls().len(), 6);
    }
}
