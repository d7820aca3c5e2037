//! Linear trend of temperature and humidity over elapsed time
//!
//! Two independent ordinary least-squares fits share one feature, seconds
//! since the session origin. The model is rebuilt from the whole history on
//! every refit; nothing is carried over from the previous fit.

use crate::history::History;
use crate::sampling::Reading;

/// Records required before a trend is fitted
pub const MIN_TRAINING_RECORDS: usize = 11;

/// Spread of the feature (sum of squared deviations) below which all samples
/// are treated as taken at the same instant
const DEGENERATE_SPREAD: f64 = 1e-12;

/// Fitted line `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Least-squares fit of `ys` on `xs`.
    ///
    /// Works on deviations from the means to avoid cancellation when elapsed
    /// times grow large. If every `x` is the same the slope is undefined; the
    /// fit then falls back to a flat line through the mean of `ys`.
    ///
    /// Returns `None` for empty input. Extra elements of the longer slice are
    /// ignored.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Option<Self> {
        let n = xs.len().min(ys.len());
        if n == 0 {
            return None;
        }

        let (xs, ys) = (&xs[..n], &ys[..n]);
        let mean_x = xs.iter().sum::<f64>() / n as f64;
        let mean_y = ys.iter().sum::<f64>() / n as f64;

        let (mut sxx, mut sxy) = (0.0, 0.0);
        for (x, y) in xs.iter().zip(ys) {
            let dx = x - mean_x;
            sxx += dx * dx;
            sxy += dx * (y - mean_y);
        }

        if sxx < DEGENERATE_SPREAD {
            return Some(Self {
                slope: 0.0,
                intercept: mean_y,
            });
        }

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Temperature and humidity trends fitted on the same history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendModel {
    pub temperature: LinearFit,
    pub humidity: LinearFit,
    /// Number of records the model was fitted on
    pub samples: usize,
}

impl TrendModel {
    /// Fit both trends on the full history.
    ///
    /// Returns `None` until the history holds [`MIN_TRAINING_RECORDS`].
    pub fn refit(history: &History) -> Option<Self> {
        if history.len() < MIN_TRAINING_RECORDS {
            return None;
        }

        let elapsed = history.elapsed_secs();
        let temperatures: Vec<f64> = history.iter().map(|r| r.temperature).collect();
        let humidities: Vec<f64> = history.iter().map(|r| r.humidity).collect();

        Some(Self {
            temperature: LinearFit::fit(&elapsed, &temperatures)?,
            humidity: LinearFit::fit(&elapsed, &humidities)?,
            samples: history.len(),
        })
    }

    /// Evaluate both trends at `elapsed_secs`
    pub fn predict(&self, elapsed_secs: f64) -> Reading {
        Reading::new(
            self.temperature.predict(elapsed_secs),
            self.humidity.predict(elapsed_secs),
        )
    }
}
