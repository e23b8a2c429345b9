//! # Standard Bring-up
//!
//! Builds every standard manager in the one valid dependency order and
//! returns typed handles.
//!
//! ```text
//! logging → config → error-boundary → process → webview → command-palette
//!         → analytics (logging + config wired) → ai-assistant
//! ```
//!
//! If any step fails, the managers created by this call are disposed in
//! reverse order and the original error is returned. Managers that were
//! already active before the call are left alone.

use std::any::Any;
use std::sync::Arc;

use lifecycle_core::{
    downcast_manager, FactoryError, FactoryOptions, HostContext, Manager, ManagerFactory,
    ManagerKind,
};
use tracing::{info, instrument, warn};

use crate::managers::{
    AiAssistantService, AnalyticsService, CommandPaletteManager, ConfigService, ErrorBoundary,
    LoggingManager, ProcessManager, WebViewManager,
};
use crate::provider::StandardProvider;

/// Handles to the complete standard manager set.
pub struct StandardManagers {
    pub factory: Arc<ManagerFactory>,
    pub logging_manager: Arc<LoggingManager>,
    pub config_service: Arc<ConfigService>,
    pub error_boundary: Arc<ErrorBoundary>,
    pub process_manager: Arc<ProcessManager>,
    pub web_view_manager: Arc<WebViewManager>,
    pub command_palette_manager: Arc<CommandPaletteManager>,
    pub analytics_service: Arc<AnalyticsService>,
    pub ai_assistant_service: Arc<AiAssistantService>,
}

/// Bring up the standard managers on the process-wide factory.
pub async fn create_standard_managers(context: HostContext) -> Result<StandardManagers, FactoryError> {
    let factory = ManagerFactory::get_instance(FactoryOptions::new(
        context,
        Arc::new(StandardProvider),
    ));
    StandardManagers::bring_up(factory).await
}

impl StandardManagers {
    /// Bring up the standard managers on an explicitly provided factory.
    #[instrument(name = "standard_bring_up", skip(factory))]
    pub async fn bring_up(factory: Arc<ManagerFactory>) -> Result<Self, FactoryError> {
        let mut created = Vec::with_capacity(ManagerKind::COUNT);

        match Self::build(&factory, &mut created).await {
            Ok(bundle) => {
                info!(created = created.len(), "Standard managers ready");
                Ok(bundle)
            }
            Err(err) => {
                warn!(error = %err, "Bring-up failed, disposing {} managers", created.len());
                for kind in created.iter().rev() {
                    if let Err(e) = factory.dispose_manager(*kind).await {
                        warn!(kind = %kind, error = %e, "Rollback disposal failed");
                    }
                }
                Err(err)
            }
        }
    }

    async fn build(
        factory: &Arc<ManagerFactory>,
        created: &mut Vec<ManagerKind>,
    ) -> Result<Self, FactoryError> {
        let logging_manager = step(factory, ManagerKind::Logging, created).await?;
        let config_service = step(factory, ManagerKind::Config, created).await?;
        let error_boundary = step(factory, ManagerKind::ErrorBoundary, created).await?;
        let process_manager = step(factory, ManagerKind::Process, created).await?;
        let web_view_manager = step(factory, ManagerKind::WebView, created).await?;
        let command_palette_manager = step(factory, ManagerKind::CommandPalette, created).await?;
        let analytics_service = step(factory, ManagerKind::Analytics, created).await?;
        let ai_assistant_service = step(factory, ManagerKind::AiAssistant, created).await?;

        Ok(Self {
            factory: Arc::clone(factory),
            logging_manager,
            config_service,
            error_boundary,
            process_manager,
            web_view_manager,
            command_palette_manager,
            analytics_service,
            ai_assistant_service,
        })
    }

    /// Dispose every manager held by the factory.
    pub async fn shutdown(&self) -> Result<(), FactoryError> {
        self.factory.dispose_all().await
    }
}

/// Create one manager, remembering it if this call built it.
async fn step<T: Manager + Any>(
    factory: &ManagerFactory,
    kind: ManagerKind,
    created: &mut Vec<ManagerKind>,
) -> Result<Arc<T>, FactoryError> {
    let existed = factory.has_manager(kind);
    let manager = factory.create_manager(kind).await?;
    if !existed {
        created.push(kind);
    }
    downcast_manager::<T>(manager).ok_or(FactoryError::TypeMismatch { kind })
}
