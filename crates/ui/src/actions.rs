//! What Enter does on each kind of row, and where edited values go.

use core::fmt::Write as _;

use mixing::persist::RECORD_CAPACITY;
use mixing::{Mixer, ModeKind};
use platform::config::{EXTRUDE_FEEDRATE_MM_MIN, EXTRUDE_MAXLENGTH_MM, EXTRUDE_MINTEMP};
use platform::{Buzzer, DisplaySurface, MotionControl, Percent, RecoveryStore, SettingsStore, Tenths};

use crate::controller::Controller;
use crate::edit::{format_value, ValueEdit};
use crate::machine::{GcodeLine, MachineState};
use crate::screen::{Action, Field, Row, Screen, ValueFormat};

/// G-code that resumes an interrupted print.
pub const GCODE_RESUME: &str = "M1000";
/// G-code that discards an interrupted print.
pub const GCODE_RESUME_CANCEL: &str = "M1000C";
/// G-code that zeroes the extruder position before a menu extrude.
pub const GCODE_RESET_E: &str = "G92 E0";
/// G-code that releases the steppers.
pub const GCODE_DISABLE_STEPPERS: &str = "M84";
/// G-code that cuts printer power.
pub const GCODE_POWER_OFF: &str = "M81";

impl<D, M, S, R, B, const K: usize, const N: usize> Controller<D, M, S, R, B, K, N>
where
    D: DisplaySurface,
    M: MotionControl,
    S: SettingsStore,
    R: RecoveryStore,
    B: Buzzer,
{
    /// Row under the cursor.
    pub fn current_row(&self) -> Option<Row> {
        self.nav.current().row(self.nav.menu().current(), K)
    }

    pub(crate) fn activate(&mut self) {
        let screen = self.nav.current();
        let Some(row) = self.current_row() else {
            return;
        };
        tracing::debug!(screen = screen.title(), row = %row.label(), "enter");
        match row {
            Row::Back => self.go_back(),
            Row::Open(target) => self.open(target),
            Row::Mode(kind) => {
                let target = match kind {
                    ModeKind::Manual => {
                        self.mixer.enter_manual();
                        Screen::MixManual
                    }
                    ModeKind::Gradient => {
                        self.mixer.enter_gradient();
                        Screen::MixGradient
                    }
                    ModeKind::Random => {
                        self.mixer.enter_random();
                        Screen::MixRandom
                    }
                };
                self.open(target);
            }
            Row::Action(action) => self.run(action),
            Row::Edit(field) => self.begin_edit(field),
            Row::Answer(yes) => self.answer(screen, yes),
        }
    }

    pub(crate) fn open(&mut self, target: Screen) {
        if self.nav.push(target, target.row_count(K)) {
            self.paint_screen();
        } else {
            tracing::warn!(
                screen = target.title(),
                depth = self.nav.depth(),
                "navigation stack full"
            );
        }
    }

    pub(crate) fn go_back(&mut self) {
        if self.nav.back() {
            self.paint_screen();
        }
    }

    fn run(&mut self, action: Action) {
        match action {
            Action::Home(target) => {
                tracing::info!(gcode = target.gcode(), "homing");
                self.machine.home(target, &mut self.io.motion);
            }
            Action::DisableSteppers => self.io.motion.queue_gcode(GCODE_DISABLE_STEPPERS),
            Action::Preheat(preset) => self.machine.preheat(preset, &mut self.io.motion),
            Action::Cooldown => self.machine.cooldown(&mut self.io.motion),
            Action::StoreSettings => {
                let ok = self.io.settings.save();
                tracing::info!(ok, "settings stored");
                self.io.buzzer.feedback(ok);
            }
            Action::LoadSettings => {
                let ok = self.io.settings.load();
                tracing::info!(ok, "settings loaded");
                self.io.buzzer.feedback(ok);
            }
            Action::ResetSettings => {
                self.io.settings.reset();
                self.machine = MachineState::default();
                tracing::info!("settings reset to defaults");
                self.io.buzzer.feedback(true);
                self.paint_screen();
            }
            Action::CommitManual => {
                let tool = self.mixer.selected_tool();
                if self.mixer.commit_manual(tool).is_some() {
                    self.paint_screen();
                }
            }
        }
    }

    fn answer(&mut self, screen: Screen, yes: bool) {
        match screen {
            Screen::PowerOffConfirm if yes => {
                tracing::info!("power off requested");
                self.io.motion.queue_gcode(GCODE_POWER_OFF);
            }
            Screen::ResumePrompt => {
                if yes {
                    self.resume_print();
                } else {
                    tracing::info!("interrupted print discarded");
                    self.io.motion.queue_gcode(GCODE_RESUME_CANCEL);
                }
                self.io.recovery.clear_interrupted();
            }
            _ => {}
        }
        self.go_back();
    }

    /// Restore the mixer from the recovery record and resume the job.
    fn resume_print(&mut self) {
        let mut buf = [0u8; RECORD_CAPACITY];
        match self.io.recovery.load(&mut buf) {
            Ok(Some(len)) => match buf.get(..len).map(Mixer::<K, N>::decode_from) {
                Some(Ok(mixer)) => {
                    tracing::info!(tool = mixer.active_mix().tool, "mixer state restored");
                    self.mixer = mixer;
                }
                Some(Err(e)) => tracing::warn!(%e, "recovery record rejected, keeping current mix"),
                None => tracing::warn!(len, "recovery record length out of range"),
            },
            Ok(None) => tracing::warn!("no recovery record stored"),
            Err(e) => tracing::warn!(?e, "recovery load failed"),
        }
        self.io.motion.queue_gcode(GCODE_RESUME);
    }

    // ── Editing ─────────────────────────────────────────────────────────────

    fn begin_edit(&mut self, field: Field) {
        if let Field::ExtruderMove(component) = field {
            if self.machine.hotend < EXTRUDE_MINTEMP {
                tracing::warn!(
                    component,
                    hotend = self.machine.hotend,
                    min = EXTRUDE_MINTEMP,
                    "hotend too cold to extrude"
                );
                self.io.buzzer.feedback(false);
                return;
            }
        }
        let value = self.field_value(field);
        let (min, max) = self.field_range(field);
        self.edit = Some(ValueEdit::new(field, value, min, max));
        self.paint_edit();
    }

    /// Current value of `field` in edit units.
    pub fn field_value(&self, field: Field) -> i32 {
        if let Some(value) = self.machine.value(field) {
            return value;
        }
        let selected = self.mixer.selected_tool();
        let gradient = self.mixer.gradient();
        let random = self.mixer.random();
        match field {
            Field::ManualPercent(component) => self
                .mixer
                .manual_row(selected)
                .and_then(|row| row.get(usize::from(component)))
                .map_or(Percent::default(), |&v| Percent::new(v))
                .get()
                .into(),
            Field::GradientZStart => Tenths::from_f32(gradient.z_start).raw(),
            Field::GradientZEnd => Tenths::from_f32(gradient.z_end).raw(),
            Field::GradientToolStart => i32::from(gradient.tool_start),
            Field::GradientToolEnd => i32::from(gradient.tool_end),
            Field::RandomZStart => Tenths::from_f32(random.z_start).raw(),
            Field::RandomZEnd => Tenths::from_f32(random.z_end).raw(),
            Field::SelectedTool => i32::from(selected),
            Field::ExtruderMove(component) => self
                .extruder_tenths
                .get(usize::from(component))
                .copied()
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Editable range of `field` in edit units.
    pub fn field_range(&self, field: Field) -> (i32, i32) {
        if let Some(range) = MachineState::range(field) {
            return range;
        }
        let last_tool = i32::from(self.mixer.tools().occupy().saturating_sub(1));
        match field {
            Field::GradientZStart | Field::GradientZEnd | Field::RandomZStart | Field::RandomZEnd => {
                (0, Tenths::from_f32(self.config.z_max_mm).raw())
            }
            Field::GradientToolStart | Field::GradientToolEnd | Field::SelectedTool => (0, last_tool),
            Field::ExtruderMove(_) => {
                // One edit moves at most EXTRUDE_MAXLENGTH_MM either way.
                let reach = EXTRUDE_MAXLENGTH_MM.saturating_mul(Tenths::SCALE);
                let at = self.field_value(field);
                (at.saturating_sub(reach), at.saturating_add(reach))
            }
            _ => (0, i32::from(Percent::FULL.get())),
        }
    }

    pub(crate) fn commit_edit(&mut self, field: Field, value: i32) {
        tracing::debug!(field = %field.label(), value, "edit committed");
        if let Field::ExtruderMove(component) = field {
            self.extrude(component, value);
        } else if self.machine.apply(field, value, &mut self.io.motion) {
            if field == Field::ZOffset {
                let ok = self.io.settings.save();
                tracing::info!(ok, "z offset stored");
            }
        } else {
            self.apply_mixer_field(field, value);
        }
        if field == Field::SelectedTool {
            // Selecting a tool switches the mode shown on the Mixer rows.
            self.paint_screen();
        } else {
            self.paint_current_row();
        }
    }

    /// Drive stepper `component` alone from its last position to `target`.
    fn extrude(&mut self, component: u8, target: i32) {
        let Some(slot) = self.extruder_tenths.get_mut(usize::from(component)) else {
            return;
        };
        let delta = target.saturating_sub(*slot);
        *slot = target;
        if delta == 0 {
            return;
        }
        tracing::debug!(component, delta, "extruder move");
        // Virtual tool `component` is the pure blend of that stepper.
        let mut select = GcodeLine::new();
        let _ = write!(select, "T{component}");
        let mut feed = GcodeLine::new();
        let _ = write!(
            feed,
            "G1 E{} F{EXTRUDE_FEEDRATE_MM_MIN}",
            format_value(ValueFormat::Tenths, delta)
        );
        self.io.motion.queue_gcode(&select);
        self.io.motion.queue_gcode(GCODE_RESET_E);
        self.io.motion.queue_gcode(&feed);
    }

    fn apply_mixer_field(&mut self, field: Field, value: i32) {
        let as_u8 = u8::try_from(value.max(0)).unwrap_or(u8::MAX);
        let z = Tenths::from_raw(value).to_f32();
        let gradient = self.mixer.gradient();
        let random = self.mixer.random();
        match field {
            Field::ManualPercent(component) => match Percent::try_new(value) {
                Ok(percent) => {
                    let tool = self.mixer.selected_tool();
                    self.mixer.set_manual_ratio(tool, usize::from(component), percent.get());
                }
                Err(e) => tracing::warn!(%e, component, "manual percent rejected"),
            },
            Field::GradientZStart => self.mixer.set_gradient_endpoints(
                z,
                gradient.z_end,
                gradient.tool_start,
                gradient.tool_end,
            ),
            Field::GradientZEnd => self.mixer.set_gradient_endpoints(
                gradient.z_start,
                z,
                gradient.tool_start,
                gradient.tool_end,
            ),
            Field::GradientToolStart => self.mixer.set_gradient_endpoints(
                gradient.z_start,
                gradient.z_end,
                as_u8,
                gradient.tool_end,
            ),
            Field::GradientToolEnd => self.mixer.set_gradient_endpoints(
                gradient.z_start,
                gradient.z_end,
                gradient.tool_start,
                as_u8,
            ),
            Field::RandomZStart => self.mixer.set_random_range(z, random.z_end),
            Field::RandomZEnd => self.mixer.set_random_range(random.z_start, z),
            Field::SelectedTool => {
                self.mixer.select_tool(as_u8);
            }
            _ => {}
        }
    }
}
