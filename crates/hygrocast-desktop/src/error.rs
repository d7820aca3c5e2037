use hygrocast_core::config::ConfigError;
use hygrocast_core::ui::components::graph::GraphError;
use thiserror::Error;

/// Fatal startup failures
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot build dashboard: {0}")]
    Dashboard(#[from] GraphError),

    #[error("cannot open serial port {port}: {source}")]
    Serial {
        port: String,
        #[source]
        source: serialport::Error,
    },
}
