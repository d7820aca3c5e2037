//! In-memory history of accepted readings
//!
//! Records are kept in arrival order, which is also time order: a record whose
//! wall-clock timestamp is earlier than its predecessor's (clock stepped back)
//! is clamped to the predecessor's timestamp on append.
//!
//! By default nothing is ever evicted. [`History::with_limit`] turns the store
//! into a ring buffer; the elapsed-time origin stays pinned to the first record
//! ever appended so evictions do not shift the fit's time axis.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use log::debug;

use crate::sampling::Reading;
use crate::trend::MIN_TRAINING_RECORDS;

/// One accepted reading and the instant it was taken
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub timestamp: DateTime<Local>,
    pub temperature: f64,
    pub humidity: f64,
}

impl Record {
    pub fn new(timestamp: DateTime<Local>, reading: Reading) -> Self {
        Self {
            timestamp,
            temperature: reading.temperature,
            humidity: reading.humidity,
        }
    }
}

/// Append-only, time-ordered record store
#[derive(Debug, Clone, Default)]
pub struct History {
    records: VecDeque<Record>,
    /// Timestamp of the first record ever appended
    origin: Option<DateTime<Local>>,
    limit: Option<usize>,
}

impl History {
    /// Unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `limit` records, evicting the oldest.
    ///
    /// Limits below [`MIN_TRAINING_RECORDS`] are raised to it, otherwise the
    /// trend model could never train.
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(MIN_TRAINING_RECORDS);
        Self {
            records: VecDeque::with_capacity(limit),
            origin: None,
            limit: Some(limit),
        }
    }

    /// Append a record and return the stored copy (timestamp possibly clamped).
    pub fn append(&mut self, mut record: Record) -> Record {
        if let Some(last) = self.records.back()
            && record.timestamp < last.timestamp
        {
            debug!(
                "Clock stepped back {} ms; clamping record timestamp",
                (last.timestamp - record.timestamp).num_milliseconds()
            );
            record.timestamp = last.timestamp;
        }

        self.origin.get_or_insert(record.timestamp);

        if let Some(limit) = self.limit
            && self.records.len() >= limit
        {
            self.records.pop_front();
        }

        self.records.push_back(record);
        record
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Retention limit, if any
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Records from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Record> + ExactSizeIterator + '_ {
        self.records.iter()
    }

    /// Oldest record still held
    pub fn first(&self) -> Option<&Record> {
        self.records.front()
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&Record> {
        self.records.back()
    }

    /// Session start: timestamp of the first record ever appended
    pub fn origin(&self) -> Option<DateTime<Local>> {
        self.origin
    }

    /// Seconds between `timestamp` and the session origin
    pub fn elapsed_at(&self, timestamp: DateTime<Local>) -> f64 {
        match self.origin {
            Some(origin) => (timestamp - origin).as_seconds_f64(),
            None => 0.0,
        }
    }

    /// Elapsed seconds of every record, oldest first.
    ///
    /// Recomputed on every call.
    pub fn elapsed_secs(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|record| self.elapsed_at(record.timestamp))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn record_at(secs: i64, temperature: f64) -> Record {
        Record::new(
            t0() + TimeDelta::seconds(secs),
            Reading::new(temperature, 50.0),
        )
    }

    #[test]
    fn test_append_preserves_order() {
        let mut history = History::new();
        for i in 0..25 {
            history.append(record_at(i, 20.0 + i as f64));
        }

        assert_eq!(history.len(), 25);
        assert_eq!(history.first().unwrap().temperature, 20.0);
        assert_eq!(history.latest().unwrap().temperature, 44.0);

        let timestamps: Vec<_> = history.iter().map(|r| r.timestamp).collect();
        assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_clock_step_back_is_clamped() {
        let mut history = History::new();
        history.append(record_at(10, 20.0));
        let stored = history.append(record_at(5, 21.0));

        assert_eq!(stored.timestamp, t0() + TimeDelta::seconds(10));
        assert_eq!(stored.temperature, 21.0);
        assert_eq!(history.elapsed_secs(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_elapsed_secs() {
        let mut history = History::new();
        assert!(history.elapsed_secs().is_empty());

        history.append(record_at(0, 20.0));
        history.append(record_at(1, 20.0));
        history.append(record_at(61, 20.0));

        assert_eq!(history.elapsed_secs(), vec![0.0, 1.0, 61.0]);
        assert_eq!(history.origin(), Some(t0()));
    }

    #[test]
    fn test_elapsed_keeps_sub_millisecond_precision() {
        let mut history = History::new();
        history.append(record_at(0, 20.0));
        history.append(Record::new(
            t0() + TimeDelta::microseconds(1_500_250),
            Reading::new(20.0, 50.0),
        ));

        let elapsed = history.elapsed_secs();
        assert_eq!(elapsed[0], 0.0);
        assert!((elapsed[1] - 1.50025).abs() < 1e-12);
    }

    #[test]
    fn test_iter_newest_first() {
        let mut history = History::new();
        for i in 0..3 {
            history.append(record_at(i, i as f64));
        }

        let newest_first: Vec<f64> = history.iter().rev().map(|r| r.temperature).collect();
        assert_eq!(newest_first, vec![2.0, 1.0, 0.0]);
        assert_eq!(history.iter().len(), 3);
    }

    #[test]
    fn test_unbounded_by_default() {
        let mut history = History::new();
        for i in 0..5000 {
            history.append(record_at(i, 20.0));
        }
        assert_eq!(history.len(), 5000);
        assert_eq!(history.limit(), None);
    }

    #[test]
    fn test_limit_evicts_oldest_but_keeps_origin() {
        let mut history = History::with_limit(12);
        for i in 0..20 {
            history.append(record_at(i, i as f64));
        }

        assert_eq!(history.len(), 12);
        assert_eq!(history.first().unwrap().temperature, 8.0);
        assert_eq!(history.origin(), Some(t0()));
        assert_eq!(history.elapsed_secs()[0], 8.0);
    }

    #[test]
    fn test_limit_never_below_training_threshold() {
        let history = History::with_limit(3);
        assert_eq!(history.limit(), Some(MIN_TRAINING_RECORDS));
    }
}
