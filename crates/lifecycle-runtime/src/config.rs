//! # Runtime Configuration
//!
//! Host settings read from the environment.
//!
//! - `LC_WORKSPACE_NAME`: workspace name (default: `default`)
//! - `LC_STORAGE_DIR`: storage directory (default: `./data`)
//! - `LC_SETTINGS_PATH`: optional JSON settings file
//! - `LC_SHUTDOWN_TIMEOUT_SECS`: bound on `dispose_all` (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use lifecycle_managers::WorkspaceContext;

/// Configuration errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Complete host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Workspace name, also the logging channel.
    pub workspace_name: String,
    /// Working directory for spawned processes.
    pub storage_dir: PathBuf,
    /// Settings file for the config service.
    pub settings_path: Option<PathBuf>,
    /// Upper bound on shutdown.
    pub shutdown_timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            workspace_name: "default".to_string(),
            storage_dir: PathBuf::from("./data"),
            settings_path: None,
            shutdown_timeout: Duration::from_secs(10),
        }
    }
}

impl RuntimeConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("LC_WORKSPACE_NAME") {
            if name.trim().is_empty() {
                return Err(ConfigError::Empty("LC_WORKSPACE_NAME"));
            }
            config.workspace_name = name;
        }
        if let Some(dir) = lookup("LC_STORAGE_DIR") {
            config.storage_dir = PathBuf::from(dir);
        }
        config.settings_path = lookup("LC_SETTINGS_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        if let Some(secs) = lookup("LC_SHUTDOWN_TIMEOUT_SECS") {
            let parsed = secs.trim().parse::<u64>().map_err(|_| ConfigError::InvalidTimeout {
                var: "LC_SHUTDOWN_TIMEOUT_SECS",
                value: secs.clone(),
            })?;
            config.shutdown_timeout = Duration::from_secs(parsed);
        }

        Ok(config)
    }

    /// Host context handed to the manager factory.
    pub fn workspace_context(&self) -> WorkspaceContext {
        let context = WorkspaceContext::new(self.workspace_name.clone(), self.storage_dir.clone());
        match &self.settings_path {
            Some(path) => context.with_settings(path.clone()),
            None => context,
        }
    }
}
