//! Errors raised by the standard managers.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Standard manager error type.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Host context is not a workspace context")]
    UnsupportedContext,

    #[error("Required {0} manager is not wired")]
    MissingDependency(&'static str),

    #[error("{0} manager has been disposed")]
    Disposed(&'static str),

    #[error("Failed to read settings from {path:?}: {source}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings in {path:?}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Setting {key} has an unexpected type: {source}")]
    SettingType {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Process already running: {0}")]
    ProcessExists(String),

    #[error("Failed to spawn process {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown process: {0}")]
    UnknownProcess(String),

    #[error("Panel already open: {0}")]
    PanelExists(String),

    #[error("Unknown panel: {0}")]
    UnknownPanel(String),

    #[error("Command already registered: {0}")]
    CommandExists(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown assistant request: {0}")]
    UnknownRequest(Uuid),
}
