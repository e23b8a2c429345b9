//! # Lifecycle Host
//!
//! Entry point: telemetry, bring-up, wait for Ctrl+C, ordered teardown.

use anyhow::Result;
use lifecycle_runtime::{HostRuntime, RuntimeConfig};
use lifecycle_telemetry::{init_telemetry, TelemetryConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())?;

    let config = RuntimeConfig::from_env()?;
    let host = HostRuntime::start(config).await?;

    info!("Host is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    host.shutdown().await
}
