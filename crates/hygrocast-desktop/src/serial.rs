//! Serial transport: the microcontroller's USB CDC port wrapped as a
//! [`SampleSource`]

use std::io::BufReader;

use hygrocast_core::config::SerialConfig;
use hygrocast_core::sampling::LineSampleSource;
use log::{info, warn};
use serialport::SerialPort;

use crate::error::AppError;

/// Line reader over an open serial port
pub type SerialSampleSource = LineSampleSource<BufReader<Box<dyn SerialPort>>>;

/// Open the configured port.
///
/// Reads block for at most `config.read_timeout`; a timeout surfaces as "no
/// sample this tick".
pub fn open(config: &SerialConfig) -> Result<SerialSampleSource, AppError> {
    let port = serialport::new(&config.port, config.baud_rate)
        .timeout(config.read_timeout)
        .open()
        .map_err(|source| {
            log_available_ports();
            AppError::Serial {
                port: config.port.clone(),
                source,
            }
        })?;

    info!(
        "Opened {} at {} baud (timeout {} ms)",
        config.port,
        config.baud_rate,
        config.read_timeout.as_millis()
    );

    Ok(LineSampleSource::new(BufReader::new(port)))
}

fn log_available_ports() {
    match serialport::available_ports() {
        Ok(ports) if ports.is_empty() => warn!("No serial ports found"),
        Ok(ports) => {
            for port in ports {
                warn!("Available serial port: {}", port.port_name);
            }
        }
        Err(e) => warn!("Cannot enumerate serial ports: {}", e),
    }
}
