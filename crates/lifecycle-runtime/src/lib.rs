//! # Lifecycle Runtime
//!
//! Host process for the standard managers.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (tracing subscriber + metrics registry)
//! 2. Load [`RuntimeConfig`] from the environment
//! 3. Bring up the standard managers in dependency order
//! 4. Run until Ctrl+C
//! 5. Dispose every manager in reverse order, bounded by the shutdown timeout

pub mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use lifecycle_core::{FactoryOptions, ManagerFactory, ManagerKind};
use lifecycle_managers::{StandardManagers, StandardProvider};
use lifecycle_telemetry::manager_span;
use tracing::{debug, error, info, Instrument};

pub use config::{ConfigError, RuntimeConfig};

/// A running host: configuration plus the live manager set.
pub struct HostRuntime {
    config: RuntimeConfig,
    managers: StandardManagers,
}

impl HostRuntime {
    /// Bring up every standard manager on the process-wide factory.
    pub async fn start(config: RuntimeConfig) -> Result<Self> {
        let context = config.workspace_context().into_host_context();
        let factory = ManagerFactory::get_instance(FactoryOptions::new(
            context,
            Arc::new(StandardProvider),
        ));
        Self::start_on(config, factory).await
    }

    /// Bring up every standard manager on the given factory.
    pub async fn start_on(config: RuntimeConfig, factory: Arc<ManagerFactory>) -> Result<Self> {
        info!(workspace = %config.workspace_name, "Starting lifecycle host");

        let managers = StandardManagers::bring_up(factory)
            .await
            .context("standard manager bring-up failed")?;

        let active: Vec<&str> = managers
            .factory
            .get_active_managers()
            .iter()
            .map(ManagerKind::name)
            .collect();
        info!(active = ?active, "Host ready");
        managers
            .logging_manager
            .info(format!("workspace {} ready", config.workspace_name));

        Ok(Self { config, managers })
    }

    /// Typed handles to the live managers.
    pub fn managers(&self) -> &StandardManagers {
        &self.managers
    }

    /// Dispose every manager, bounded by the configured timeout.
    pub async fn shutdown(self) -> Result<()> {
        info!("Shutting down lifecycle host");

        let timeout = self.config.shutdown_timeout;
        let span = manager_span!("host_shutdown", workspace = %self.config.workspace_name);
        let outcome = tokio::time::timeout(timeout, self.managers.shutdown())
            .instrument(span)
            .await;

        match lifecycle_telemetry::encode_metrics() {
            Ok(text) => debug!(metrics = %text, "Final lifecycle metrics"),
            Err(e) => debug!(error = %e, "Metrics unavailable"),
        }

        match outcome {
            Ok(Ok(())) => {
                info!("All managers disposed");
                Ok(())
            }
            Ok(Err(e)) => {
                error!(error = %e, "Shutdown finished with failures");
                Err(e.into())
            }
            Err(_) => {
                error!(timeout_secs = timeout.as_secs(), "Shutdown timed out");
                anyhow::bail!("shutdown exceeded {}s", timeout.as_secs())
            }
        }
    }
}
