//! Power-loss resume prompt shown at start-up.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mixing::persist::RECORD_CAPACITY;
use mixing::{Mixer, ModeKind};
use platform::mocks::{MockBuzzer, MockMotion, MockRecovery, MockSettings, MockSurface};
use platform::{EncoderEvent, RecoveryStore};
use ui::{Controller, ControllerConfig, Peripherals, Screen};

type Ui = Controller<MockSurface, MockMotion, MockSettings, MockRecovery, MockBuzzer, 4, 16>;

fn started(recovery: MockRecovery) -> Ui {
    let io = Peripherals {
        display: MockSurface::new(),
        motion: MockMotion::new(),
        settings: MockSettings::new(),
        recovery,
        buzzer: MockBuzzer::new(),
    };
    let mut ui = Controller::new(ControllerConfig::default(), io);
    ui.start();
    ui
}

fn saved_record() -> Vec<u8> {
    let mut mixer = Mixer::<4, 16>::new(15);
    mixer.select_tool(3);
    mixer.set_gradient_endpoints(2.0, 8.0, 1, 3);
    mixer.enter_gradient();
    let mut buf = [0u8; RECORD_CAPACITY];
    let len = mixer.encode_into(&mut buf).unwrap();
    buf[..len].to_vec()
}

#[test]
fn no_prompt_without_interrupted_job() {
    let ui = started(MockRecovery::new());
    assert_eq!(ui.current_screen(), Screen::Main);
}

#[test]
fn prompt_is_modal_over_main() {
    let ui = started(MockRecovery::interrupted_with(saved_record()));
    assert_eq!(ui.current_screen(), Screen::ResumePrompt);
    assert_eq!(ui.navigator().parent(), Some(Screen::Main));
    let display = &ui.peripherals().display;
    assert!(display.drew_text("Continue the interrupted print?"));
    assert!(display.drew_text("Prepare"), "Main painted underneath");
}

#[test]
fn continue_restores_mixer_and_resumes() {
    let mut ui = started(MockRecovery::interrupted_with(saved_record()));
    ui.handle_event(EncoderEvent::Clockwise);
    ui.handle_event(EncoderEvent::Enter);

    assert_eq!(ui.current_screen(), Screen::Main);
    assert_eq!(ui.peripherals().motion.gcode(), vec!["M1000"]);
    assert!(!ui.peripherals().recovery.interrupted_job());
    assert_eq!(ui.mixer().selected_tool(), 3);
    assert_eq!(ui.mixer().mode_kind(), ModeKind::Gradient);
    assert_eq!(ui.mixer().gradient().z_end, 8.0);
}

#[test]
fn cancel_discards_job() {
    let mut ui = started(MockRecovery::interrupted_with(saved_record()));
    ui.handle_event(EncoderEvent::Enter);

    assert_eq!(ui.current_screen(), Screen::Main);
    assert_eq!(ui.peripherals().motion.gcode(), vec!["M1000C"]);
    assert!(!ui.peripherals().recovery.interrupted_job());
    assert_eq!(ui.mixer().mode_kind(), ModeKind::Manual, "mixer left at defaults");
}

#[test]
fn corrupt_record_still_resumes_print() {
    let mut record = saved_record();
    let last = record.len() - 1;
    record[last] ^= 0xFF;
    let mut ui = started(MockRecovery::interrupted_with(record));
    ui.handle_event(EncoderEvent::Clockwise);
    ui.handle_event(EncoderEvent::Enter);

    assert_eq!(ui.peripherals().motion.gcode(), vec!["M1000"]);
    assert_eq!(ui.mixer().mode_kind(), ModeKind::Manual);
}

#[test]
fn selection_saturates_between_two_buttons() {
    let mut ui = started(MockRecovery::interrupted_with(saved_record()));
    for _ in 0..3 {
        ui.handle_event(EncoderEvent::Clockwise);
    }
    assert_eq!(ui.menu().current(), 1);
    for _ in 0..3 {
        ui.handle_event(EncoderEvent::CounterClockwise);
    }
    assert_eq!(ui.menu().current(), 0);
    assert_eq!(ui.current_screen(), Screen::ResumePrompt);
}
