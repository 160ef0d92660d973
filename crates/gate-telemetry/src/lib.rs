//! # Gate Telemetry
//!
//! Structured logging and Prometheus counters for Session-Gate.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gate_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `session-gate` | Service name attached to startup logs |
//! | `SG_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SG_CONSOLE_OUTPUT` | `true` | Write logs to stderr |
//! | `SG_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{encode_metrics, register_metrics};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Register metrics, then install the log subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}
