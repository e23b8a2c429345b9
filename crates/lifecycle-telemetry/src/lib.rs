//! # Lifecycle Telemetry
//!
//! Observability plumbing shared by the manager host.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an env filter and either a
//!   human-readable or JSON formatter
//! - **Metrics**: Prometheus counters for manager creation and disposal
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lifecycle_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! // Logs and metrics are collected until the guard is dropped.
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LC_SERVICE_NAME` | `lifecycle-host` | Service name attached to startup logs |
//! | `LC_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `LC_JSON_LOGS` | `false` | Emit JSON formatted logs |
//! | `LC_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, LoggingGuard};
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, ACTIVE_MANAGERS, MANAGERS_CREATED,
    MANAGERS_DISPOSED, MANAGER_CONSTRUCTION_SECONDS, MANAGER_CREATE_FAILURES,
    MANAGER_DISPOSE_FAILURES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first so that startup counters land in the registry.
    let metrics = register_metrics()?;
    let logging = init_logging(&config)?;

    tracing::info!(
        service = %config.service_name,
        json = logging.is_json(),
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        _logging: logging,
        _metrics: metrics,
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _logging: LoggingGuard,
    _metrics: MetricsHandle,
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}

/// Convenience macro for creating a span with manager context.
///
/// ```rust,ignore
/// let _span = manager_span!("flush", kind = "analytics").entered();
/// ```
#[macro_export]
macro_rules! manager_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
