//! Screen identifiers and their row tables.
//!
//! Every list screen is described by a static table of [`Row`]s; the
//! controller only ever asks "what is row `i` of this screen". Row 0 of
//! every pushed screen is Back.

use core::fmt::Write as _;

use heapless::String;
use mixing::ModeKind;
use platform::config::{Preheat, PREHEAT_ABS, PREHEAT_PLA};
use platform::Axis;

/// Label text of one row.
pub type Label = String<24>;

/// Every screen or modal the navigator can push onto its stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Root menu with the mixer status area.
    Main,
    /// Moves, homing, Z offset, preheat and power.
    Prepare,
    /// Jog X/Y/Z and each mixing stepper.
    AxisMove,
    /// Home all or one axis.
    Home,
    /// Settings submenus and EEPROM actions.
    Control,
    /// Hotend, bed and fan targets.
    Temperature,
    /// Targets stored in one preheat preset.
    PreheatSettings(PreheatPreset),
    /// Motion limit tables.
    Motion,
    /// One per-axis motion table.
    MotionAxes(MotionTable),
    /// Mixing mode selection and virtual tool.
    Mixer,
    /// Per-stepper percentages of the selected tool.
    MixManual,
    /// Gradient heights and endpoint tools.
    MixGradient,
    /// Random height band.
    MixRandom,
    /// Firmware and mixer information.
    Info,
    /// Yes/No before powering off (modal).
    PowerOffConfirm,
    /// Continue/Cancel for an interrupted print (modal).
    ResumePrompt,
}

/// Per-axis tables reachable from the Motion screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionTable {
    /// mm/s
    MaxFeedrate,
    /// mm/s²
    MaxAcceleration,
    /// steps/mm
    StepsPerUnit,
}

impl MotionTable {
    /// Editable field for `axis` in this table.
    pub fn field(self, axis: Axis) -> Field {
        match self {
            MotionTable::MaxFeedrate => Field::MaxFeedrate(axis),
            MotionTable::MaxAcceleration => Field::MaxAcceleration(axis),
            MotionTable::StepsPerUnit => Field::StepsPerUnit(axis),
        }
    }

    fn title(self) -> &'static str {
        match self {
            MotionTable::MaxFeedrate => "Max Feedrate",
            MotionTable::MaxAcceleration => "Max Acceleration",
            MotionTable::StepsPerUnit => "Steps/mm",
        }
    }
}

/// Preheat presets offered on the Prepare screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PreheatPreset {
    /// PLA
    Pla,
    /// ABS
    Abs,
}

impl PreheatPreset {
    /// Both presets in menu order.
    pub const ALL: [PreheatPreset; 2] = [PreheatPreset::Pla, PreheatPreset::Abs];

    /// Factory targets for this preset.
    pub fn defaults(self) -> Preheat {
        match self {
            PreheatPreset::Pla => PREHEAT_PLA,
            PreheatPreset::Abs => PREHEAT_ABS,
        }
    }

    /// Position in [`PreheatPreset::ALL`].
    pub fn index(self) -> usize {
        match self {
            PreheatPreset::Pla => 0,
            PreheatPreset::Abs => 1,
        }
    }

    fn settings_title(self) -> &'static str {
        match self {
            PreheatPreset::Pla => "PLA Settings",
            PreheatPreset::Abs => "ABS Settings",
        }
    }
}

/// Axes the Home screen can home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomeTarget {
    /// Every axis
    All,
    /// X only
    X,
    /// Y only
    Y,
    /// Z only
    Z,
}

impl HomeTarget {
    /// Homing G-code.
    pub fn gcode(self) -> &'static str {
        match self {
            HomeTarget::All => "G28",
            HomeTarget::X => "G28 X0",
            HomeTarget::Y => "G28 Y0",
            HomeTarget::Z => "G28 Z0",
        }
    }

    /// Axes this target homes.
    pub fn axes(self) -> &'static [Axis] {
        match self {
            HomeTarget::All => &[Axis::X, Axis::Y, Axis::Z],
            HomeTarget::X => &[Axis::X],
            HomeTarget::Y => &[Axis::Y],
            HomeTarget::Z => &[Axis::Z],
        }
    }
}

/// One-shot actions triggered by Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// `G28`, all axes or one
    Home(HomeTarget),
    /// `M84`
    DisableSteppers,
    /// Apply a preheat preset
    Preheat(PreheatPreset),
    /// All heaters and the fan off
    Cooldown,
    /// Write settings to EEPROM
    StoreSettings,
    /// Read settings from EEPROM
    LoadSettings,
    /// Restore factory settings
    ResetSettings,
    /// Normalise and store the staged manual mix
    CommitManual,
}

/// Numeric values editable in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// Hotend target °C
    HotendTemp,
    /// Bed target °C
    BedTemp,
    /// Fan duty 0..=255
    FanSpeed,
    /// Hotend °C stored in a preset
    PresetHotend(PreheatPreset),
    /// Bed °C stored in a preset
    PresetBed(PreheatPreset),
    /// Fan duty stored in a preset
    PresetFan(PreheatPreset),
    /// Absolute X/Y/Z target, tenths of mm
    AxisPosition(Axis),
    /// Position of one mixing stepper's extruder, tenths of mm
    ExtruderMove(u8),
    /// Z offset, hundredths of mm
    ZOffset,
    /// Max feedrate of one axis
    MaxFeedrate(Axis),
    /// Max acceleration of one axis
    MaxAcceleration(Axis),
    /// Steps/mm of one axis, in tenths
    StepsPerUnit(Axis),
    /// Staged percentage of one stepper for the selected tool
    ManualPercent(u8),
    /// Gradient start height, tenths of mm
    GradientZStart,
    /// Gradient end height, tenths of mm
    GradientZEnd,
    /// Tool blended from
    GradientToolStart,
    /// Tool blended to
    GradientToolEnd,
    /// Random band start, tenths of mm
    RandomZStart,
    /// Random band end, tenths of mm
    RandomZEnd,
    /// Selected user tool
    SelectedTool,
}

/// How an edited integer is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Plain integer
    Integer,
    /// Fixed point, one decimal
    Tenths,
    /// Fixed point, two decimals
    Hundredths,
}

impl Field {
    /// Display format of the raw edit value.
    pub fn format(self) -> ValueFormat {
        match self {
            Field::StepsPerUnit(_)
            | Field::AxisPosition(_)
            | Field::ExtruderMove(_)
            | Field::GradientZStart
            | Field::GradientZEnd
            | Field::RandomZStart
            | Field::RandomZEnd => ValueFormat::Tenths,
            Field::ZOffset => ValueFormat::Hundredths,
            _ => ValueFormat::Integer,
        }
    }

    /// Row label.
    pub fn label(self) -> Label {
        let mut out = Label::new();
        // Labels are short literals; a formatting error only truncates.
        let _ = match self {
            Field::HotendTemp | Field::PresetHotend(_) => out.write_str("Hotend"),
            Field::BedTemp | Field::PresetBed(_) => out.write_str("Bed"),
            Field::FanSpeed | Field::PresetFan(_) => out.write_str("Fan speed"),
            Field::AxisPosition(axis) => write!(out, "Move {}", axis.letter()),
            Field::ExtruderMove(component) => {
                write!(out, "Extrude {}", u16::from(component).saturating_add(1))
            }
            Field::ZOffset => out.write_str("Z Offset"),
            Field::MaxFeedrate(axis)
            | Field::MaxAcceleration(axis)
            | Field::StepsPerUnit(axis) => write!(out, "{} axis", axis.letter()),
            Field::ManualPercent(component) => {
                write!(out, "Extruder {}", u16::from(component).saturating_add(1))
            }
            Field::GradientZStart | Field::RandomZStart => out.write_str("Start Z"),
            Field::GradientZEnd | Field::RandomZEnd => out.write_str("End Z"),
            Field::GradientToolStart => out.write_str("Start tool"),
            Field::GradientToolEnd => out.write_str("End tool"),
            Field::SelectedTool => out.write_str("VTool"),
        };
        out
    }
}

/// What a row does on Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Row {
    /// Pop the current screen
    Back,
    /// Push a submenu
    Open(Screen),
    /// Enter a mixing mode and open its screen
    Mode(ModeKind),
    /// Run an action
    Action(Action),
    /// Start editing a value
    Edit(Field),
    /// Answer a modal question
    Answer(bool),
}

impl Row {
    /// Row label.
    pub fn label(self) -> Label {
        let text = match self {
            Row::Back => "Back",
            Row::Open(screen) => screen.title(),
            Row::Mode(kind) => kind.label(),
            Row::Action(action) => match action {
                Action::Home(HomeTarget::All) => "Home All",
                Action::Home(HomeTarget::X) => "Home X",
                Action::Home(HomeTarget::Y) => "Home Y",
                Action::Home(HomeTarget::Z) => "Home Z",
                Action::DisableSteppers => "Disable Steppers",
                Action::Preheat(preset) => {
                    let mut out = Label::new();
                    let _ = write!(out, "Preheat {}", preset.defaults().label);
                    return out;
                }
                Action::Cooldown => "Cooldown",
                Action::StoreSettings => "Store Settings",
                Action::LoadSettings => "Load Settings",
                Action::ResetSettings => "Reset Settings",
                Action::CommitManual => "Apply Mix",
            },
            Row::Edit(field) => return field.label(),
            Row::Answer(true) => "Confirm",
            Row::Answer(false) => "Cancel",
        };
        let mut out = Label::new();
        let _ = out.push_str(text);
        out
    }
}

const MAIN_ROWS: [Row; 3] = [
    Row::Open(Screen::Prepare),
    Row::Open(Screen::Control),
    Row::Open(Screen::Info),
];

const PREPARE_ROWS: [Row; 9] = [
    Row::Back,
    Row::Open(Screen::AxisMove),
    Row::Action(Action::DisableSteppers),
    Row::Open(Screen::Home),
    Row::Open(Screen::PowerOffConfirm),
    Row::Edit(Field::ZOffset),
    Row::Action(Action::Preheat(PreheatPreset::Pla)),
    Row::Action(Action::Preheat(PreheatPreset::Abs)),
    Row::Action(Action::Cooldown),
];

const HOME_ROWS: [Row; 5] = [
    Row::Back,
    Row::Action(Action::Home(HomeTarget::All)),
    Row::Action(Action::Home(HomeTarget::X)),
    Row::Action(Action::Home(HomeTarget::Y)),
    Row::Action(Action::Home(HomeTarget::Z)),
];

/// Axes with a Move row, ahead of the per-stepper extrude rows.
const MOVE_AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

const CONTROL_ROWS: [Row; 8] = [
    Row::Back,
    Row::Open(Screen::Temperature),
    Row::Open(Screen::Motion),
    Row::Open(Screen::Mixer),
    Row::Action(Action::StoreSettings),
    Row::Action(Action::LoadSettings),
    Row::Action(Action::ResetSettings),
    Row::Open(Screen::Info),
];

const TEMPERATURE_ROWS: [Row; 6] = [
    Row::Back,
    Row::Edit(Field::HotendTemp),
    Row::Edit(Field::BedTemp),
    Row::Edit(Field::FanSpeed),
    Row::Open(Screen::PreheatSettings(PreheatPreset::Pla)),
    Row::Open(Screen::PreheatSettings(PreheatPreset::Abs)),
];

fn preheat_rows(preset: PreheatPreset) -> [Row; 5] {
    [
        Row::Back,
        Row::Edit(Field::PresetHotend(preset)),
        Row::Edit(Field::PresetBed(preset)),
        Row::Edit(Field::PresetFan(preset)),
        Row::Action(Action::StoreSettings),
    ]
}

const MOTION_ROWS: [Row; 4] = [
    Row::Back,
    Row::Open(Screen::MotionAxes(MotionTable::MaxFeedrate)),
    Row::Open(Screen::MotionAxes(MotionTable::MaxAcceleration)),
    Row::Open(Screen::MotionAxes(MotionTable::StepsPerUnit)),
];

const MIXER_ROWS: [Row; 5] = [
    Row::Back,
    Row::Mode(ModeKind::Manual),
    Row::Mode(ModeKind::Gradient),
    Row::Mode(ModeKind::Random),
    Row::Edit(Field::SelectedTool),
];

const GRADIENT_ROWS: [Row; 5] = [
    Row::Back,
    Row::Edit(Field::GradientZStart),
    Row::Edit(Field::GradientZEnd),
    Row::Edit(Field::GradientToolStart),
    Row::Edit(Field::GradientToolEnd),
];

const RANDOM_ROWS: [Row; 3] = [
    Row::Back,
    Row::Edit(Field::RandomZStart),
    Row::Edit(Field::RandomZEnd),
];

const ANSWER_ROWS: [Row; 2] = [Row::Answer(false), Row::Answer(true)];

impl Screen {
    /// Title bar text.
    pub fn title(self) -> &'static str {
        match self {
            Screen::Main => "Main",
            Screen::Prepare => "Prepare",
            Screen::AxisMove => "Move",
            Screen::Home => "Home",
            Screen::Control => "Control",
            Screen::Temperature => "Temperature",
            Screen::PreheatSettings(preset) => preset.settings_title(),
            Screen::Motion => "Motion",
            Screen::MotionAxes(table) => table.title(),
            Screen::Mixer => "Mixer",
            Screen::MixManual => "Manual Mix",
            Screen::MixGradient => "Gradient Mix",
            Screen::MixRandom => "Random Mix",
            Screen::Info => "Info",
            Screen::PowerOffConfirm => "Power Off",
            Screen::ResumePrompt => "Power Loss Recovery",
        }
    }

    /// Modal screens are drawn as a popup over the previous screen.
    pub fn is_modal(self) -> bool {
        matches!(self, Screen::PowerOffConfirm | Screen::ResumePrompt)
    }

    /// Question shown by a modal.
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            Screen::PowerOffConfirm => Some("Power off the printer?"),
            Screen::ResumePrompt => Some("Continue the interrupted print?"),
            _ => None,
        }
    }

    /// Number of rows for a mixer with `steppers` steppers.
    pub fn row_count(self, steppers: usize) -> u8 {
        let count = match self {
            Screen::Main => MAIN_ROWS.len(),
            Screen::Prepare => PREPARE_ROWS.len(),
            Screen::AxisMove => MOVE_AXES.len().saturating_add(steppers).saturating_add(1),
            Screen::Home => HOME_ROWS.len(),
            Screen::Control => CONTROL_ROWS.len(),
            Screen::Temperature => TEMPERATURE_ROWS.len(),
            Screen::PreheatSettings(preset) => preheat_rows(preset).len(),
            Screen::Motion => MOTION_ROWS.len(),
            Screen::MotionAxes(_) => Axis::ALL.len().saturating_add(1),
            Screen::Mixer => MIXER_ROWS.len(),
            Screen::MixManual => steppers.saturating_add(2),
            Screen::MixGradient => GRADIENT_ROWS.len(),
            Screen::MixRandom => RANDOM_ROWS.len(),
            Screen::Info => 1,
            Screen::PowerOffConfirm | Screen::ResumePrompt => ANSWER_ROWS.len(),
        };
        u8::try_from(count).unwrap_or(u8::MAX)
    }

    /// Row `index` for a mixer with `steppers` steppers.
    pub fn row(self, index: u8, steppers: usize) -> Option<Row> {
        let i = usize::from(index);
        match self {
            Screen::Main => MAIN_ROWS.get(i).copied(),
            Screen::Prepare => PREPARE_ROWS.get(i).copied(),
            Screen::AxisMove => {
                let axes = MOVE_AXES.len();
                match i {
                    0 => Some(Row::Back),
                    _ if i <= axes => MOVE_AXES
                        .get(i.saturating_sub(1))
                        .map(|&axis| Row::Edit(Field::AxisPosition(axis))),
                    _ if i <= axes.saturating_add(steppers) => {
                        let component = i.saturating_sub(axes).saturating_sub(1);
                        u8::try_from(component)
                            .ok()
                            .map(|c| Row::Edit(Field::ExtruderMove(c)))
                    }
                    _ => None,
                }
            }
            Screen::Home => HOME_ROWS.get(i).copied(),
            Screen::Control => CONTROL_ROWS.get(i).copied(),
            Screen::Temperature => TEMPERATURE_ROWS.get(i).copied(),
            Screen::PreheatSettings(preset) => preheat_rows(preset).get(i).copied(),
            Screen::Motion => MOTION_ROWS.get(i).copied(),
            Screen::MotionAxes(table) => match i {
                0 => Some(Row::Back),
                _ => Axis::from_index(i.saturating_sub(1)).map(|axis| Row::Edit(table.field(axis))),
            },
            Screen::Mixer => MIXER_ROWS.get(i).copied(),
            Screen::MixManual => match i {
                0 => Some(Row::Back),
                _ if i <= steppers => Some(Row::Edit(Field::ManualPercent(index.saturating_sub(1)))),
                _ if i == steppers.saturating_add(1) => Some(Row::Action(Action::CommitManual)),
                _ => None,
            },
            Screen::MixGradient => GRADIENT_ROWS.get(i).copied(),
            Screen::MixRandom => RANDOM_ROWS.get(i).copied(),
            Screen::Info => (i == 0).then_some(Row::Back),
            Screen::PowerOffConfirm | Screen::ResumePrompt => ANSWER_ROWS.get(i).copied(),
        }
    }
}
