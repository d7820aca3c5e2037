//! Platform-independent core of the hygrocast temperature/humidity monitor
//!
//! This crate holds everything that does not touch the serial port or the
//! window: line parsing, the in-memory history, the least-squares trend
//! model, the smoothed five-minute forecast, the per-tick [`Monitor`] state
//! machine, and the embedded-graphics dashboard that renders it.
//!
//! The desktop binary (`hygrocast-desktop`) owns the transport and the SDL
//! window and drives [`Monitor::tick`] once per second.

pub mod config;
pub mod forecast;
pub mod history;
pub mod monitor;
pub mod pages;
pub mod sampling;
pub mod trend;
pub mod ui;

pub use forecast::{FORECAST_STEPS, FORECAST_STEP_SECS, Forecast, ForecastPoint};
pub use history::{History, Record};
pub use monitor::{Monitor, PollOutcome};
pub use pages::DashboardPage;
pub use sampling::{LineSampleSource, Reading, SampleError, SampleSource};
pub use trend::{LinearFit, MIN_TRAINING_RECORDS, TrendModel};
