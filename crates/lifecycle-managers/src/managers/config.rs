//! # Config Service
//!
//! Flat key/value settings loaded from a JSON object file, e.g.
//!
//! ```json
//! { "analytics.flushIntervalSecs": 30, "aiAssistant.model": "small" }
//! ```
//!
//! Every successful `set` bumps a revision published on a `watch` channel.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lifecycle_core::{Manager, ManagerKind};
use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::ManagerError;

/// Settings store.
pub struct ConfigService {
    source: Option<PathBuf>,
    values: RwLock<Map<String, Value>>,
    revision_tx: Mutex<Option<watch::Sender<u64>>>,
    revision_rx: watch::Receiver<u64>,
}

impl ConfigService {
    /// Load settings from `path`. A missing file yields empty settings.
    pub async fn load(path: Option<PathBuf>) -> Result<Self, ManagerError> {
        let Some(path) = path else {
            return Ok(Self::from_values(None, Map::new()));
        };

        let values = match tokio::fs::read_to_string(&path).await {
            Ok(text) => parse_settings(&path, &text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?path, "Settings file not found, starting empty");
                Map::new()
            }
            Err(source) => return Err(ManagerError::SettingsRead { path, source }),
        };

        Ok(Self::from_values(Some(path), values))
    }

    /// Build from in-memory values.
    pub fn from_values(source: Option<PathBuf>, values: Map<String, Value>) -> Self {
        let (revision_tx, revision_rx) = watch::channel(0);
        Self {
            source,
            values: RwLock::new(values),
            revision_tx: Mutex::new(Some(revision_tx)),
            revision_rx,
        }
    }

    /// File the settings were read from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Typed lookup. `Ok(None)` when the key is absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ManagerError> {
        let Some(value) = self.values.read().get(key).cloned() else {
            return Ok(None);
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(|source| ManagerError::SettingType {
                key: key.to_string(),
                source,
            })
    }

    /// Typed lookup falling back to `default` when absent or mistyped.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                warn!(error = %e, "Ignoring mistyped setting");
                default
            }
        }
    }

    /// Update one key and notify subscribers.
    pub fn set(&self, key: impl Into<String>, value: Value) -> Result<(), ManagerError> {
        let tx = self.revision_tx.lock();
        let Some(tx) = tx.as_ref() else {
            return Err(ManagerError::Disposed("config"));
        };
        self.values.write().insert(key.into(), value);
        tx.send_modify(|rev| *rev += 1);
        Ok(())
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.values.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Receive the settings revision; changes on every `set`, closes on dispose.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision_rx.clone()
    }
}

fn parse_settings(path: &Path, text: &str) -> Result<Map<String, Value>, ManagerError> {
    if text.trim().is_empty() {
        return Ok(Map::new());
    }
    serde_json::from_str(text).map_err(|source| ManagerError::SettingsParse {
        path: path.to_path_buf(),
        source,
    })
}

#[async_trait]
impl Manager for ConfigService {
    fn kind(&self) -> ManagerKind {
        ManagerKind::Config
    }

    async fn dispose(&self) -> anyhow::Result<()> {
        // Dropping the sender closes every subscriber.
        self.revision_tx.lock().take();
        self.values.write().clear();
        Ok(())
    }
}
