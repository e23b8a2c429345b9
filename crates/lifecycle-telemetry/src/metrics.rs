//! Prometheus metrics for the manager lifecycle.
//!
//! All metrics follow the naming convention: `lc_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Managers successfully constructed, by kind
    pub static ref MANAGERS_CREATED: CounterVec = CounterVec::new(
        Opts::new("lc_managers_created_total", "Managers constructed by the factory"),
        &["kind"]
    ).expect("metric creation failed");

    /// Rejected or failed constructions, by kind
    pub static ref MANAGER_CREATE_FAILURES: CounterVec = CounterVec::new(
        Opts::new("lc_manager_create_failures_total", "Manager constructions that failed"),
        &["kind", "reason"]
    ).expect("metric creation failed");

    /// Managers disposed and removed from the registry, by kind
    pub static ref MANAGERS_DISPOSED: CounterVec = CounterVec::new(
        Opts::new("lc_managers_disposed_total", "Managers disposed by the factory"),
        &["kind"]
    ).expect("metric creation failed");

    /// Disposal attempts that failed, by kind
    pub static ref MANAGER_DISPOSE_FAILURES: CounterVec = CounterVec::new(
        Opts::new("lc_manager_dispose_failures_total", "Manager disposals that failed"),
        &["kind"]
    ).expect("metric creation failed");

    /// Managers currently held by the registry
    pub static ref ACTIVE_MANAGERS: Gauge = Gauge::new(
        "lc_active_managers",
        "Number of managers currently active"
    ).expect("metric creation failed");

    /// Time spent inside kind-specific constructors
    pub static ref MANAGER_CONSTRUCTION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "lc_manager_construction_seconds",
            "Time spent constructing managers"
        ).buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 1.0]),
        &["kind"]
    ).expect("metric creation failed");
}

/// Handle proving the metrics have been registered.
pub struct MetricsHandle {
    registered: usize,
}

impl MetricsHandle {
    /// Number of collectors registered by this call.
    pub fn registered(&self) -> usize {
        self.registered
    }
}

/// Register all metrics with the global registry.
///
/// Registering twice is harmless; already-registered collectors are skipped.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(MANAGERS_CREATED.clone()),
        Box::new(MANAGER_CREATE_FAILURES.clone()),
        Box::new(MANAGERS_DISPOSED.clone()),
        Box::new(MANAGER_DISPOSE_FAILURES.clone()),
        Box::new(ACTIVE_MANAGERS.clone()),
        Box::new(MANAGER_CONSTRUCTION_SECONDS.clone()),
    ];

    let mut registered = 0;
    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) => registered += 1,
            Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { registered })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
