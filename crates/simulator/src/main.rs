//! DWIN mixer menu simulator.
//!
//! Runs the menu controller on the desktop against mock printer
//! collaborators and a headless `SimulatorDisplay`, feeding it a scripted
//! encoder sequence on a fixed tick. Every call the controller makes into
//! the printer is logged at the end of the run.
//!
//! ```text
//! RUST_LOG=debug DWIN_SCRIPT=">.>>>.>>." cargo run -p simulator
//! ```

#![allow(clippy::arithmetic_side_effects)] // layer heights are plain f32 sums

mod config;
mod script;

use std::time::Duration;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::SimulatorDisplay;
use mixing::ModeKind;
use platform::config::{MIXING_STEPPERS, MIXING_VIRTUAL_TOOLS};
use platform::mocks::{MockBuzzer, MockEncoder, MockMotion, MockRecovery, MockSettings};
use platform::{palette, DebouncedEncoder, GraphicsSurface, MotionControl};
use tokio::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{render, Controller, ControllerConfig, Peripherals};

use crate::config::SimConfig;
use crate::script::{Step, LAYER_HEIGHT_MM};

type Sim = Controller<
    GraphicsSurface<SimulatorDisplay<Rgb565>>,
    MockMotion,
    MockSettings,
    MockRecovery,
    MockBuzzer,
    MIXING_STEPPERS,
    MIXING_VIRTUAL_TOOLS,
>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SimConfig::from_env()?;
    let steps = script::parse(&config.script)?;
    tracing::info!(
        tick_ms = config.tick_ms,
        debounce_ms = config.debounce_ms,
        steps = steps.len(),
        "simulator starting"
    );

    let sim = run(&config, &steps).await;
    report(&sim);
    Ok(())
}

/// Pixels painted in anything but the background colour.
fn lit_pixels(display: &SimulatorDisplay<Rgb565>) -> usize {
    display
        .bounding_box()
        .points()
        .filter(|&point| display.get_pixel(point) != palette::BACKGROUND)
        .count()
}

fn elapsed_ms(started: Instant) -> u32 {
    let ms = started.elapsed().as_millis();
    // The controller works on a wrapping 32-bit millisecond clock.
    u32::try_from(ms.checked_rem(1_u128 << 32).unwrap_or(0)).unwrap_or(0)
}

/// Play `steps`, one per tick, then run one more tick to settle.
async fn run(config: &SimConfig, steps: &[Step]) -> Sim {
    let io = Peripherals {
        display: GraphicsSurface::new(SimulatorDisplay::new(Size::new(
            render::WIDTH,
            render::HEIGHT,
        ))),
        motion: MockMotion::new(),
        settings: MockSettings::new(),
        recovery: MockRecovery::new(),
        buzzer: MockBuzzer::new(),
    };
    // Half the loop period, so timer jitter never skips a controller tick.
    let tick_interval_ms = u32::try_from(config.tick_ms / 2).unwrap_or(u32::MAX);
    let controller_config = ControllerConfig {
        tick_interval_ms,
        ..ControllerConfig::default()
    };
    let mut sim = Controller::new(controller_config, io);
    let mut encoder = DebouncedEncoder::new(MockEncoder::new(), config.debounce_ms);
    sim.start();

    let mut interval = tokio::time::interval(Duration::from_millis(config.tick_ms));
    let started = Instant::now();
    let mut z = 0.0_f32;
    for step in steps.iter().copied().map(Some).chain(std::iter::once(None)) {
        interval.tick().await;
        let now = elapsed_ms(started);
        match step {
            Some(Step::Input(event)) => {
                if encoder.inner_mut().add_event(event).is_err() {
                    tracing::warn!(?event, "encoder queue full");
                }
            }
            Some(Step::NextLayer) => {
                z += LAYER_HEIGHT_MM;
                sim.peripherals_mut().motion.set_z(z);
                tracing::info!(z, "next layer");
            }
            None => {}
        }
        if let Some(event) = encoder.poll_at(now) {
            tracing::debug!(?event, now, "encoder");
            sim.handle_event(event);
        }
        sim.tick(now);
    }
    sim
}

fn report(sim: &Sim) {
    let io = sim.peripherals();
    for call in io.motion.calls() {
        tracing::info!(?call, "motion");
    }
    let active = sim.mixer().active_mix();
    tracing::info!(
        screen = sim.current_screen().title(),
        mode = sim.mixer().mode_kind().label(),
        tool = active.tool,
        mix = ?active.ratio.as_array(),
        z = io.motion.current_z(),
        "final state"
    );
    tracing::info!(
        frames = io.display.frames(),
        lit_pixels = lit_pixels(io.display.target()),
        recovery_saves = io.recovery.saves(),
        settings_saves = io.settings.saves(),
        tones = io.buzzer.tones().len(),
        "run summary"
    );
    if sim.mixer().mode_kind() != ModeKind::Manual {
        tracing::info!(
            computed_tool = sim.mixer().tools().computed_id(),
            "mix published under the computed tool"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
mod tests {
    use super::*;
    use ui::Screen;

    fn fast(script: &str) -> SimConfig {
        SimConfig {
            tick_ms: 1,
            debounce_ms: 0,
            script: script.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_demo_script_prints_gradient() {
        let config = fast(config::DEMO_SCRIPT);
        let steps = script::parse(&config.script).unwrap();
        let sim = run(&config, &steps).await;

        assert_eq!(sim.current_screen(), Screen::Main);
        assert_eq!(sim.mixer().mode_kind(), ModeKind::Gradient);
        let io = sim.peripherals();
        assert!(io.recovery.saves() >= 10, "one save per layer at least");
        assert!((io.motion.current_z() - 2.0).abs() < 1e-3);
        assert!(io.display.frames() > 0);
        assert!(lit_pixels(io.display.target()) > 0);
    }

    #[tokio::test]
    async fn test_store_settings_script() {
        let config = fast(">. >>>>. .");
        let steps = script::parse(&config.script).unwrap();
        let sim = run(&config, &steps).await;
        let io = sim.peripherals();
        assert_eq!(io.settings.saves(), 2);
        assert_eq!(io.buzzer.tones(), &[true, true]);
    }

    #[tokio::test]
    async fn test_panel_is_drawn_at_full_size() {
        let config = fast("");
        let sim = run(&config, &[]).await;
        let display = sim.peripherals().display.target();
        assert_eq!(display.size(), Size::new(render::WIDTH, render::HEIGHT));
        // Title bar is painted on the first frame.
        assert_ne!(display.get_pixel(Point::new(2, 2)), palette::BACKGROUND);
    }
}
