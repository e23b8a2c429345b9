//! Constructor table for the standard managers.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use lifecycle_core::{HostContext, Manager, ManagerDependencies, ManagerKind, ManagerProvider};

use crate::context::WorkspaceContext;
use crate::error::ManagerError;
use crate::managers::{
    AiAssistantService, AnalyticsService, CommandPaletteManager, ConfigService, ErrorBoundary,
    LoggingManager, ProcessManager, WebViewManager,
};

/// Builds the standard collaborator for every kind.
///
/// Expects the host context to hold a [`WorkspaceContext`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardProvider;

#[async_trait]
impl ManagerProvider for StandardProvider {
    async fn construct(
        &self,
        kind: ManagerKind,
        context: &HostContext,
        deps: &ManagerDependencies,
    ) -> anyhow::Result<Arc<dyn Manager>> {
        let workspace = WorkspaceContext::from_host(context)?;

        let manager: Arc<dyn Manager> = match kind {
            ManagerKind::Logging => Arc::new(LoggingManager::new(workspace.workspace_name.clone())),
            ManagerKind::Config => {
                Arc::new(ConfigService::load(workspace.settings_path.clone()).await?)
            }
            ManagerKind::ErrorBoundary => Arc::new(ErrorBoundary::new()),
            ManagerKind::Process => Arc::new(ProcessManager::new(workspace.storage_dir.clone())),
            ManagerKind::WebView => Arc::new(WebViewManager::new()),
            ManagerKind::CommandPalette => Arc::new(CommandPaletteManager::new()),
            ManagerKind::Analytics => {
                let logging = required::<LoggingManager>(deps, ManagerKind::Logging)?;
                let config = required::<ConfigService>(deps, ManagerKind::Config)?;
                Arc::new(AnalyticsService::start(logging, &config))
            }
            ManagerKind::AiAssistant => {
                let logging = required::<LoggingManager>(deps, ManagerKind::Logging)?;
                let config = required::<ConfigService>(deps, ManagerKind::Config)?;
                let analytics = deps.get_as::<AnalyticsService>(ManagerKind::Analytics);
                Arc::new(AiAssistantService::new(logging, &config, analytics))
            }
        };

        Ok(manager)
    }
}

fn required<T: Manager + Any>(
    deps: &ManagerDependencies,
    kind: ManagerKind,
) -> Result<Arc<T>, ManagerError> {
    deps.get_as::<T>(kind)
        .ok_or(ManagerError::MissingDependency(kind.name()))
}
