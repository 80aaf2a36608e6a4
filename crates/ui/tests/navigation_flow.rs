//! Menu navigation, settings actions and value edits driven through the
//! controller with mock collaborators.

use platform::mocks::{MockBuzzer, MockMotion, MockRecovery, MockSettings, MockSurface, MotionCall};
use platform::EncoderEvent;
use ui::{Controller, ControllerConfig, Peripherals, Screen};

type Ui = Controller<MockSurface, MockMotion, MockSettings, MockRecovery, MockBuzzer, 4, 16>;

fn started_with(display: MockSurface) -> Ui {
    let io = Peripherals {
        display,
        motion: MockMotion::new(),
        settings: MockSettings::new(),
        recovery: MockRecovery::new(),
        buzzer: MockBuzzer::new(),
    };
    let mut ui = Controller::new(ControllerConfig::default(), io);
    ui.start();
    ui
}

fn started() -> Ui {
    started_with(MockSurface::new())
}

fn turn(ui: &mut Ui, event: EncoderEvent, times: usize) {
    for _ in 0..times {
        ui.handle_event(event);
    }
}

fn enter(ui: &mut Ui) {
    ui.handle_event(EncoderEvent::Enter);
}

#[test]
fn start_draws_main_menu() {
    let ui = started();
    assert_eq!(ui.current_screen(), Screen::Main);
    let display = &ui.peripherals().display;
    assert_eq!(display.frame_count(), 1, "one frame for the first screen");
    assert!(display.drew_text("Prepare"));
    assert!(display.drew_text("Control"));
    assert!(display.drew_text("Mix: Manual"), "status area shows the mode");
}

#[test]
fn enter_opens_submenu_and_back_restores_cursor() {
    let mut ui = started();
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui);
    assert_eq!(ui.current_screen(), Screen::Control);
    assert_eq!(ui.menu().current(), 0, "submenu opens on Back");

    enter(&mut ui);
    assert_eq!(ui.current_screen(), Screen::Main);
    assert_eq!(ui.menu().current(), 1, "Main cursor still on Control");
}

#[test]
fn back_at_root_is_ignored() {
    let mut ui = started();
    turn(&mut ui, EncoderEvent::CounterClockwise, 3);
    assert_eq!(ui.menu().current(), 0);
    assert_eq!(ui.current_screen(), Screen::Main);
}

#[test]
fn long_list_scrolls_with_area_move() {
    let mut ui = started();
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui);
    ui.peripherals_mut().display.clear();

    turn(&mut ui, EncoderEvent::Clockwise, 5);
    assert_eq!(ui.peripherals().display.move_count(), 0);
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    assert_eq!(ui.peripherals().display.move_count(), 1);
    assert_eq!(ui.menu().current(), 6);
    assert_eq!(ui.menu().current_screen_row(), 5);
    assert!(ui.peripherals().display.drew_text("Reset Settings"));

    turn(&mut ui, EncoderEvent::CounterClockwise, 6);
    assert_eq!(ui.menu().current(), 0);
    assert_eq!(ui.menu().top(), 5);
    assert_eq!(ui.peripherals().display.move_count(), 2);
}

#[test]
fn scroll_falls_back_to_full_repaint() {
    let mut ui = started_with(MockSurface::without_area_move());
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui);
    turn(&mut ui, EncoderEvent::Clockwise, 5);
    let frames = ui.peripherals().display.frame_count();
    ui.peripherals_mut().display.clear();

    turn(&mut ui, EncoderEvent::Clockwise, 1);
    let display = &ui.peripherals().display;
    assert_eq!(display.move_count(), 0);
    assert_eq!(display.frame_count(), frames + 1);
    assert!(display.drew_text("Control"), "title repainted");
}

#[test]
fn store_settings_beeps_result() {
    let mut ui = started();
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui);
    turn(&mut ui, EncoderEvent::Clockwise, 4);
    enter(&mut ui);
    ui.peripherals_mut().settings.save_ok = false;
    enter(&mut ui);

    let io = ui.peripherals();
    assert_eq!(io.settings.saves(), 2);
    assert_eq!(io.buzzer.tones(), &[true, false]);
}

#[test]
fn load_and_reset_settings() {
    let mut ui = started();
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui);
    turn(&mut ui, EncoderEvent::Clockwise, 5);
    enter(&mut ui);
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui);

    let io = ui.peripherals();
    assert_eq!(io.settings.loads(), 1);
    assert_eq!(io.settings.resets(), 1);
    assert_eq!(io.buzzer.tones(), &[true, true]);
}

#[test]
fn hotend_edit_commits_on_enter() {
    let mut ui = started();
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui); // Control
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui); // Temperature
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui); // edit Hotend
    assert!(ui.editing().is_some());

    turn(&mut ui, EncoderEvent::Clockwise, 5);
    assert_eq!(ui.menu().current(), 1, "encoder edits instead of moving");
    assert!(ui.peripherals().motion.calls().is_empty(), "nothing sent before Enter");

    enter(&mut ui);
    assert!(ui.editing().is_none());
    assert_eq!(ui.machine().hotend, 5);
    assert_eq!(ui.peripherals().motion.calls(), &[MotionCall::Hotend(0, 5)]);
}

#[test]
fn edit_clamps_at_zero() {
    let mut ui = started();
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui);
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui);
    turn(&mut ui, EncoderEvent::Clockwise, 2);
    enter(&mut ui); // edit Bed
    turn(&mut ui, EncoderEvent::CounterClockwise, 3);
    assert_eq!(ui.editing().map(|e| e.value()), Some(0));
}

#[test]
fn prepare_actions_queue_gcode() {
    let mut ui = started();
    enter(&mut ui); // Prepare
    turn(&mut ui, EncoderEvent::Clockwise, 2);
    enter(&mut ui); // Disable Steppers
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui); // Home
    assert_eq!(ui.current_screen(), Screen::Home);
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui); // Home All
    assert_eq!(ui.peripherals().motion.gcode(), vec!["M84", "G28"]);
}

#[test]
fn preheat_sets_targets() {
    let mut ui = started();
    enter(&mut ui);
    turn(&mut ui, EncoderEvent::Clockwise, 6);
    enter(&mut ui); // Preheat PLA
    assert_eq!((ui.machine().hotend, ui.machine().bed), (185, 60));
    turn(&mut ui, EncoderEvent::Clockwise, 2);
    enter(&mut ui); // Cooldown
    assert_eq!((ui.machine().hotend, ui.machine().bed), (0, 0));
}

#[test]
fn power_off_needs_confirmation() {
    let mut ui = started();
    enter(&mut ui);
    turn(&mut ui, EncoderEvent::Clockwise, 4);
    enter(&mut ui);
    assert_eq!(ui.current_screen(), Screen::PowerOffConfirm);
    assert!(ui.peripherals().display.drew_text("Power off the printer?"));

    enter(&mut ui); // Cancel
    assert_eq!(ui.current_screen(), Screen::Prepare);
    assert!(ui.peripherals().motion.gcode().is_empty());

    enter(&mut ui);
    turn(&mut ui, EncoderEvent::Clockwise, 3);
    enter(&mut ui); // Confirm
    assert_eq!(ui.peripherals().motion.gcode(), vec!["M81"]);
    assert_eq!(ui.current_screen(), Screen::Prepare);
}

#[test]
fn steps_per_unit_edit_uses_tenths() {
    let mut ui = started();
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui); // Control
    turn(&mut ui, EncoderEvent::Clockwise, 2);
    enter(&mut ui); // Motion
    turn(&mut ui, EncoderEvent::Clockwise, 3);
    enter(&mut ui); // Steps/mm
    assert!(ui.peripherals().display.drew_text("80.0"), "X steps shown as 80.0");
    turn(&mut ui, EncoderEvent::Clockwise, 1);
    enter(&mut ui); // edit X
    turn(&mut ui, EncoderEvent::Clockwise, 5);
    enter(&mut ui);
    assert_eq!(ui.machine().steps_tenths[0], 805);
    assert!(ui.peripherals().display.drew_text("80.5"));
}
