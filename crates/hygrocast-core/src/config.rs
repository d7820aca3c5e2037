//! Startup configuration for the serial link and the monitor
//!
//! Values are fixed for the lifetime of the process. The desktop binary bakes
//! optional overrides in at compile time (see its `build.rs`) and hands the raw
//! strings to the `from_overrides` constructors here.

use std::time::Duration;

use thiserror::Error;

/// Build-time key for the serial port name
pub const SERIAL_PORT_KEY: &str = "HYGROCAST_SERIAL_PORT";
/// Build-time key for the baud rate
pub const BAUD_RATE_KEY: &str = "HYGROCAST_BAUD_RATE";
/// Build-time key for the serial read timeout in milliseconds
pub const READ_TIMEOUT_KEY: &str = "HYGROCAST_READ_TIMEOUT_MS";
/// Build-time key for the optional history retention limit
pub const HISTORY_LIMIT_KEY: &str = "HYGROCAST_HISTORY_LIMIT";

/// Port the microcontroller enumerates as on a typical host
#[cfg(windows)]
pub const DEFAULT_SERIAL_PORT: &str = "COM6";
#[cfg(not(windows))]
pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyACM0";

pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Upper bound on how long one poll may block waiting for a line
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Serial link parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,
    pub read_timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERIAL_PORT.to_owned(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl SerialConfig {
    /// Apply optional string overrides on top of the defaults.
    ///
    /// Empty strings count as unset.
    pub fn from_overrides(
        port: Option<&str>,
        baud_rate: Option<&str>,
        read_timeout_ms: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(port) = non_empty(port) {
            config.port = port.to_owned();
        }

        if let Some(raw) = non_empty(baud_rate) {
            config.baud_rate = parse_positive(BAUD_RATE_KEY, raw)?;
        }

        if let Some(raw) = non_empty(read_timeout_ms) {
            let millis: u64 = parse_positive(READ_TIMEOUT_KEY, raw)?;
            config.read_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

/// Monitor parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Maximum number of records kept in memory; `None` keeps everything
    pub history_limit: Option<usize>,
}

impl MonitorConfig {
    pub fn from_overrides(history_limit: Option<&str>) -> Result<Self, ConfigError> {
        let history_limit = non_empty(history_limit)
            .map(|raw| parse_positive(HISTORY_LIMIT_KEY, raw))
            .transpose()?;

        Ok(Self { history_limit })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_positive<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: core::str::FromStr + PartialEq + Default,
{
    let invalid = |reason| ConfigError::InvalidValue {
        key,
        value: raw.to_owned(),
        reason,
    };

    let value: T = raw.parse().map_err(|_| invalid("not an unsigned integer"))?;
    if value == T::default() {
        return Err(invalid("must be greater than zero"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_overrides() {
        let config = SerialConfig::from_overrides(None, None, None).unwrap();
        assert_eq!(config, SerialConfig::default());
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.read_timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_overrides_applied() {
        let config =
            SerialConfig::from_overrides(Some("/dev/ttyUSB1"), Some("115200"), Some("250"))
                .unwrap();
        assert_eq!(config.port, "/dev/ttyUSB1");
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.read_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_empty_override_is_unset() {
        let config = SerialConfig::from_overrides(Some(""), Some("  "), None).unwrap();
        assert_eq!(config, SerialConfig::default());
    }

    #[test]
    fn test_invalid_baud_rate() {
        let err = SerialConfig::from_overrides(None, Some("fast"), None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: BAUD_RATE_KEY,
                value: "fast".to_owned(),
                reason: "not an unsigned integer",
            }
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(SerialConfig::from_overrides(None, None, Some("0")).is_err());
    }

    #[test]
    fn test_history_limit() {
        assert_eq!(MonitorConfig::from_overrides(None).unwrap().history_limit, None);
        assert_eq!(
            MonitorConfig::from_overrides(Some("3600")).unwrap().history_limit,
            Some(3600)
        );
        assert!(MonitorConfig::from_overrides(Some("-1")).is_err());
    }
}
