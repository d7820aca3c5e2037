//! Five-step forecast projected from the trend model
//!
//! The trend lines are evaluated one, two, ... five minutes past the latest
//! record, and each resulting sequence is smoothed with a trailing moving
//! average (window 2, partial windows allowed).

use chrono::{DateTime, Local, TimeDelta};

use crate::history::History;
use crate::trend::TrendModel;

/// Number of projected points
pub const FORECAST_STEPS: usize = 5;

/// Spacing between projected points in seconds
pub const FORECAST_STEP_SECS: i64 = 60;

/// Trailing moving-average window applied to the raw projections
pub const SMOOTHING_WINDOW: usize = 2;

/// One projected reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    /// Seconds since the session origin
    pub elapsed_secs: f64,
    /// Wall-clock time the projection refers to
    pub timestamp: DateTime<Local>,
    pub temperature: f64,
    pub humidity: f64,
}

/// Smoothed projections, ordered by time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forecast {
    points: [ForecastPoint; FORECAST_STEPS],
}

impl Forecast {
    /// Project `model` forward from the latest record of `history`.
    ///
    /// Returns `None` when the history is empty.
    pub fn project(model: &TrendModel, history: &History) -> Option<Self> {
        let latest = history.latest()?;
        let t_last = history.elapsed_at(latest.timestamp);

        let offsets: [i64; FORECAST_STEPS] =
            core::array::from_fn(|i| FORECAST_STEP_SECS * (i as i64 + 1));

        let raw_temperature = offsets.map(|offset| model.temperature.predict(t_last + offset as f64));
        let raw_humidity = offsets.map(|offset| model.humidity.predict(t_last + offset as f64));

        let temperature = rolling_mean(raw_temperature, SMOOTHING_WINDOW);
        let humidity = rolling_mean(raw_humidity, SMOOTHING_WINDOW);

        let points = core::array::from_fn(|i| ForecastPoint {
            elapsed_secs: t_last + offsets[i] as f64,
            timestamp: latest.timestamp + TimeDelta::seconds(offsets[i]),
            temperature: temperature[i],
            humidity: humidity[i],
        });

        Some(Self { points })
    }

    pub fn points(&self) -> &[ForecastPoint; FORECAST_STEPS] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &ForecastPoint> {
        self.points.iter()
    }
}

/// Trailing mean over `window` values; the first entries average over
/// however many values are available.
pub fn rolling_mean<const N: usize>(values: [f64; N], window: usize) -> [f64; N] {
    let window = window.max(1);
    core::array::from_fn(|i| {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        slice.iter().sum::<f64>() / slice.len() as f64
    })
}
