//! Synthetic sensor for running the dashboard without hardware
//!
//! Produces the same `<temperature>,<humidity>` lines the microcontroller
//! prints and feeds them through the regular line parser.

use hygrocast_core::sampling::{Reading, SampleError, SampleSource, parse_line};

/// Slowly drifting temperature and humidity, one reading per poll
#[derive(Debug, Default)]
pub struct SimulatedSensor {
    /// Seconds of simulated time
    elapsed_secs: f64,
}

impl SimulatedSensor {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_line(&mut self) -> String {
        self.elapsed_secs += 1.0;
        let t = self.elapsed_secs;

        // 20-26 °C with a slow warming drift
        let temperature = 23.0 + 3.0 * (t / 120.0).sin() + 0.5 * (t / 37.0).cos() + t / 600.0;

        // 40-60 %RH on a different period
        let humidity = 50.0 + 10.0 * (t / 180.0).sin() + 2.0 * (t / 23.0).cos();

        format!("{:.2},{:.2}\n", temperature, humidity)
    }
}

impl SampleSource for SimulatedSensor {
    fn read_sample(&mut self) -> Result<Option<Reading>, SampleError> {
        parse_line(&self.next_line()).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produces_plausible_readings() {
        let mut sensor = SimulatedSensor::new();
        for _ in 0..600 {
            let reading = sensor.read_sample().unwrap().unwrap();
            assert!((15.0..35.0).contains(&reading.temperature));
            assert!((35.0..65.0).contains(&reading.humidity));
        }
    }
}
