//! Per-tick state machine tying sampling, history, trend and forecast together
//!
//! [`Monitor`] is owned by the presentation loop and advanced once per tick by
//! [`Monitor::tick`]. It starts untrained, becomes trained once the history
//! holds [`MIN_TRAINING_RECORDS`], and never goes back.

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::forecast::Forecast;
use crate::history::{History, Record};
use crate::sampling::{SampleError, SampleSource};
use crate::trend::{MIN_TRAINING_RECORDS, TrendModel};

/// What a single poll of the sample source produced
#[derive(Debug)]
pub enum PollOutcome {
    /// A reading was accepted and appended to the history
    Sample(Record),
    /// Nothing arrived this tick
    Idle,
    /// A line arrived but was discarded
    Rejected(SampleError),
}

impl PollOutcome {
    pub fn record(&self) -> Option<&Record> {
        match self {
            Self::Sample(record) => Some(record),
            _ => None,
        }
    }
}

/// History, trend model and forecast of one monitoring session
#[derive(Debug, Default)]
pub struct Monitor {
    history: History,
    model: Option<TrendModel>,
    forecast: Option<Forecast>,
}

impl Monitor {
    pub fn new(config: &MonitorConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => History::with_limit(limit),
            None => History::new(),
        };

        Self {
            history,
            model: None,
            forecast: None,
        }
    }

    /// Poll `source` once and fold the result into the session.
    ///
    /// An accepted reading is stamped with `now()` (taken after the read
    /// returns), appended, and, once enough history exists, triggers a full
    /// refit and a new forecast. Rejected lines are logged and otherwise
    /// ignored; the previous forecast stays in place when nothing new arrives.
    pub fn tick<S, C>(&mut self, source: &mut S, now: C) -> PollOutcome
    where
        S: SampleSource + ?Sized,
        C: FnOnce() -> DateTime<Local>,
    {
        let reading = match source.read_sample() {
            Ok(Some(reading)) => reading,
            Ok(None) => return PollOutcome::Idle,
            Err(e) => {
                warn!("Discarding sample: {}", e);
                return PollOutcome::Rejected(e);
            }
        };

        let record = self.history.append(Record::new(now(), reading));
        self.refit();
        PollOutcome::Sample(record)
    }

    fn refit(&mut self) {
        let Some(model) = TrendModel::refit(&self.history) else {
            debug!(
                "Collecting samples: {}/{}",
                self.history.len(),
                MIN_TRAINING_RECORDS
            );
            return;
        };

        if self.model.is_none() {
            info!("Trend model trained on {} records", model.samples);
        }

        debug!(
            "Refit on {} records: temperature {:+.5}/s, humidity {:+.5}/s",
            model.samples, model.temperature.slope, model.humidity.slope
        );

        self.forecast = Forecast::project(&model, &self.history);
        self.model = Some(model);
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn model(&self) -> Option<&TrendModel> {
        self.model.as_ref()
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }
}
