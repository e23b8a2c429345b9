//! Host context understood by the standard managers.

use std::path::PathBuf;

use lifecycle_core::HostContext;

use crate::error::ManagerError;

/// Workspace the host process runs for.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    /// Display name, also used as the logging channel name.
    pub workspace_name: String,
    /// Directory the host may write to; child processes start here.
    pub storage_dir: PathBuf,
    /// JSON settings file read by the config service.
    pub settings_path: Option<PathBuf>,
}

impl WorkspaceContext {
    pub fn new(workspace_name: impl Into<String>, storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            workspace_name: workspace_name.into(),
            storage_dir: storage_dir.into(),
            settings_path: None,
        }
    }

    /// Read settings from `path`.
    #[must_use]
    pub fn with_settings(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Wrap into an opaque [`HostContext`].
    pub fn into_host_context(self) -> HostContext {
        HostContext::new(self)
    }

    /// Borrow the workspace context out of a host context.
    pub fn from_host(context: &HostContext) -> Result<&WorkspaceContext, ManagerError> {
        context
            .downcast_ref::<WorkspaceContext>()
            .ok_or(ManagerError::UnsupportedContext)
    }
}
