//! Desktop monitor for a serial temperature/humidity sensor.
//!
//! Polls the sensor once per second, fits a linear trend once enough
//! readings are in, and renders history, current readings and a five-minute
//! forecast in an SDL2 window via `embedded-graphics-simulator`.
//!
//! Serial settings are baked in at build time (see `build.rs`). Build with
//! `--features simulated-sensor` to run without hardware.
//!
//! # Key bindings
//!
//! | Key      | Action |
//! |----------|--------|
//! | Q / Esc  | Quit   |

mod error;
#[cfg(not(feature = "simulated-sensor"))]
mod serial;
#[cfg(feature = "simulated-sensor")]
mod simulated;

use std::time::{Duration, Instant};

use chrono::Local;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use env_logger::{Env, Target};
use log::{debug, error, info};

use hygrocast_core::config::{MonitorConfig, SerialConfig};
use hygrocast_core::pages::dashboard::TITLE;
use hygrocast_core::ui::{COLOR_BACKGROUND, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, Drawable};
use hygrocast_core::{DashboardPage, Monitor, PollOutcome, SampleSource};

use crate::error::AppError;

/// Pixel scale factor for the window
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS)
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Interval between sensor polls
const TICK_INTERVAL: Duration = Duration::from_millis(1000);

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let serial_config = SerialConfig::from_overrides(
        option_env!("HYGROCAST_SERIAL_PORT"),
        option_env!("HYGROCAST_BAUD_RATE"),
        option_env!("HYGROCAST_READ_TIMEOUT_MS"),
    )?;
    let monitor_config = MonitorConfig::from_overrides(option_env!("HYGROCAST_HISTORY_LIMIT"))?;

    info!("Starting hygrocast");
    match monitor_config.history_limit {
        Some(limit) => info!("History limited to {} records", limit),
        None => info!("History unbounded"),
    }

    let mut source = open_source(&serial_config)?;
    let mut monitor = Monitor::new(&monitor_config);

    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new(TITLE, &output_settings);

    let mut page = DashboardPage::new(Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX),
    ))?;

    // The SDL window is created on the first `update()`, which must precede
    // `events()`
    render(&mut page, &mut display);
    window.update(&display);

    let mut last_tick: Option<Instant> = None;

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. }
                    if keycode == Keycode::Q || keycode == Keycode::Escape =>
                {
                    break 'running;
                }
                _ => {}
            }
        }

        if last_tick.is_none_or(|at| at.elapsed() >= TICK_INTERVAL) {
            last_tick = Some(Instant::now());

            if let PollOutcome::Sample(record) = monitor.tick(source.as_mut(), Local::now) {
                debug!(
                    "Sample at {}: {:.2} °C, {:.2} %RH",
                    record.timestamp.format("%H:%M:%S"),
                    record.temperature,
                    record.humidity
                );
            }
            page.refresh(&monitor);
        }

        if page.is_dirty() {
            render(&mut page, &mut display);
        }

        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Exiting after {} samples", monitor.history().len());
    Ok(())
}

fn render(page: &mut DashboardPage, display: &mut SimulatorDisplay<Rgb565>) {
    let _ = display.clear(COLOR_BACKGROUND);
    if let Err(e) = page.draw(display) {
        error!("Draw error: {:?}", e);
    }
    page.mark_clean();
}

#[cfg(not(feature = "simulated-sensor"))]
fn open_source(config: &SerialConfig) -> Result<Box<dyn SampleSource>, AppError> {
    Ok(Box::new(serial::open(config)?))
}

#[cfg(feature = "simulated-sensor")]
fn open_source(_config: &SerialConfig) -> Result<Box<dyn SampleSource>, AppError> {
    info!("Using simulated sensor");
    Ok(Box::new(simulated::SimulatedSensor::new()))
}
