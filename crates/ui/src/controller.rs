//! Menu controller: owns navigation, the mixer and every collaborator.
//!
//! All input goes through [`Controller::handle_event`]; all housekeeping
//! through [`Controller::tick`]. The current screen is the top of the
//! [`Navigator`], and an open [`ValueEdit`] captures the encoder until
//! Enter. Modals are ordinary stack entries drawn as popups.

use mixing::persist::RECORD_CAPACITY;
use mixing::{ActiveMix, Mixer, ModeKind, TickSeeded};
use platform::config::{
    MENU_VISIBLE_ROWS, MIXING_VIRTUAL_TOOLS, STATUS_UPDATE_INTERVAL_MS, Z_MAX_POS_MM,
};
use platform::{Buzzer, DisplaySurface, EncoderEvent, EncoderSource, MotionControl, RecoveryStore, SettingsStore};

use crate::edit::ValueEdit;
use crate::machine::MachineState;
use crate::menu::ScrollMenu;
use crate::navigation::Navigator;
use crate::screen::Screen;

/// Controller tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    /// Rows below the top row that fit on screen
    pub visible_rows: u8,
    /// Minimum spacing of housekeeping ticks
    pub tick_interval_ms: u32,
    /// User virtual tools; the next slot is the computed tool
    pub occupied_tools: u8,
    /// Highest Z selectable for gradient and random bands
    pub z_max_mm: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            visible_rows: MENU_VISIBLE_ROWS,
            tick_interval_ms: STATUS_UPDATE_INTERVAL_MS,
            occupied_tools: u8::try_from(MIXING_VIRTUAL_TOOLS.saturating_sub(1)).unwrap_or(u8::MAX),
            z_max_mm: Z_MAX_POS_MM,
        }
    }
}

/// The collaborators the controller drives.
pub struct Peripherals<D, M, S, R, B> {
    /// Panel
    pub display: D,
    /// Motion planner and heaters
    pub motion: M,
    /// EEPROM settings
    pub settings: S,
    /// Power-loss record
    pub recovery: R,
    /// Feedback tones
    pub buzzer: B,
}

/// Menu controller for a `K`-stepper mixer with `N` virtual tool slots.
pub struct Controller<D, M, S, R, B, const K: usize, const N: usize> {
    pub(crate) config: ControllerConfig,
    pub(crate) io: Peripherals<D, M, S, R, B>,
    pub(crate) nav: Navigator,
    pub(crate) edit: Option<ValueEdit>,
    pub(crate) mixer: Mixer<K, N>,
    pub(crate) machine: MachineState,
    /// Extruder position of each stepper on the Move screen, tenths of mm
    pub(crate) extruder_tenths: [i32; K],
    pub(crate) rng: TickSeeded,
    pub(crate) last_tick_ms: Option<u32>,
    pub(crate) last_z: Option<f32>,
}

impl<D, M, S, R, B, const K: usize, const N: usize> Controller<D, M, S, R, B, K, N>
where
    D: DisplaySurface,
    M: MotionControl,
    S: SettingsStore,
    R: RecoveryStore,
    B: Buzzer,
{
    /// Create a controller on the Main screen. Nothing is drawn until
    /// [`start`](Self::start).
    pub fn new(config: ControllerConfig, io: Peripherals<D, M, S, R, B>) -> Self {
        Self {
            nav: Navigator::new(config.visible_rows),
            mixer: Mixer::new(config.occupied_tools),
            config,
            io,
            edit: None,
            machine: MachineState::default(),
            extruder_tenths: [0; K],
            rng: TickSeeded::default(),
            last_tick_ms: None,
            last_z: None,
        }
    }

    /// Draw the first screen. An interrupted print opens the resume prompt
    /// on top of Main.
    pub fn start(&mut self) {
        if self.io.recovery.interrupted_job() {
            tracing::info!("interrupted print found, asking to resume");
            self.nav.push(Screen::ResumePrompt, Screen::ResumePrompt.row_count(K));
        }
        self.paint_screen();
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    /// Screen on top of the stack.
    pub fn current_screen(&self) -> Screen {
        self.nav.current()
    }

    /// Cursor state of the current screen.
    pub fn menu(&self) -> &ScrollMenu {
        self.nav.menu()
    }

    /// Navigation stack.
    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    /// Value edit in progress.
    pub fn editing(&self) -> Option<&ValueEdit> {
        self.edit.as_ref()
    }

    /// Mixing engine.
    pub fn mixer(&self) -> &Mixer<K, N> {
        &self.mixer
    }

    /// Cached machine settings.
    pub fn machine(&self) -> &MachineState {
        &self.machine
    }

    /// Collaborators.
    pub fn peripherals(&self) -> &Peripherals<D, M, S, R, B> {
        &self.io
    }

    /// Mutable collaborators (the host moves Z, scripts the encoder, ...).
    pub fn peripherals_mut(&mut self) -> &mut Peripherals<D, M, S, R, B> {
        &mut self.io
    }

    // ── Input ───────────────────────────────────────────────────────────────

    /// Dispatch one encoder event to the current screen.
    pub fn handle_event(&mut self, event: EncoderEvent) {
        if self.edit.is_some() {
            self.handle_edit(event);
        } else {
            match event {
                EncoderEvent::Clockwise | EncoderEvent::CounterClockwise => {
                    let menu = self.nav.menu_mut();
                    let step = if event == EncoderEvent::Clockwise {
                        menu.step_next()
                    } else {
                        menu.step_prev()
                    };
                    if menu.take_changed() {
                        tracing::trace!(row = menu.current(), "cursor moved");
                        self.paint_step(step);
                    }
                }
                EncoderEvent::Enter => self.activate(),
            }
        }
        self.persist_if_dirty();
    }

    fn handle_edit(&mut self, event: EncoderEvent) {
        let Some(edit) = self.edit.as_mut() else {
            return;
        };
        match event {
            EncoderEvent::Clockwise | EncoderEvent::CounterClockwise => {
                if edit.step(event.step()) {
                    self.paint_edit();
                }
            }
            EncoderEvent::Enter => {
                let finished = *edit;
                self.edit = None;
                self.commit_edit(finished.field(), finished.value());
            }
        }
    }

    /// Poll `encoder` once, then run the housekeeping tick.
    pub fn poll<E: EncoderSource + ?Sized>(&mut self, encoder: &mut E, now_ms: u32) {
        if let Some(event) = encoder.poll_event() {
            self.handle_event(event);
        }
        self.tick(now_ms);
    }

    // ── Housekeeping ────────────────────────────────────────────────────────

    /// Periodic work: advance the mixer from the live Z, save the recovery
    /// record when mixing state or Z changed, and refresh the status area.
    ///
    /// Calls closer than `tick_interval_ms` to the previous run are
    /// ignored. Returns `true` when the tick ran.
    pub fn tick(&mut self, now_ms: u32) -> bool {
        if let Some(last) = self.last_tick_ms {
            if now_ms.wrapping_sub(last) < self.config.tick_interval_ms {
                return false;
            }
        }
        self.last_tick_ms = Some(now_ms);

        let z = self.io.motion.current_z();
        self.rng.reseed(now_ms);
        let mix_changed = self.mixer.tick(z, &mut self.rng);

        #[allow(clippy::float_cmp)]
        let z_moved = self.last_z.is_some_and(|last| last != z);
        self.last_z = Some(z);
        if self.mixer.take_dirty() || z_moved {
            self.save_recovery();
        }

        // Every other path onto Main repaints the whole screen.
        if mix_changed && self.nav.current() == Screen::Main {
            self.paint_status();
            self.io.display.update_frame();
        }
        true
    }

    pub(crate) fn status_snapshot(&self) -> (ModeKind, ActiveMix<K>) {
        (self.mixer.mode_kind(), self.mixer.active_mix())
    }

    fn persist_if_dirty(&mut self) {
        if self.mixer.take_dirty() {
            self.save_recovery();
        }
    }

    /// Write the mixer state to the recovery store.
    pub(crate) fn save_recovery(&mut self) {
        let mut buf = [0u8; RECORD_CAPACITY];
        let len = match self.mixer.encode_into(&mut buf) {
            Ok(len) => len,
            Err(e) => {
                tracing::warn!(%e, "mixer record encode failed");
                return;
            }
        };
        let Some(bytes) = buf.get(..len) else {
            return;
        };
        if let Err(e) = self.io.recovery.save(bytes) {
            tracing::warn!(?e, "recovery save failed");
        }
    }
}
