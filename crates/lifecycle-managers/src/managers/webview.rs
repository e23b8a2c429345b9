//! # WebView Manager
//!
//! Tracks open panels and the JSON messages queued for each of them.
//! Rendering is done by the host; this manager only owns panel state.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lifecycle_core::{Manager, ManagerKind};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use crate::error::ManagerError;

struct Panel {
    title: String,
    opened_at: DateTime<Utc>,
    outbox: Vec<Value>,
}

/// Summary of an open panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelInfo {
    pub id: String,
    pub title: String,
    pub opened_at: DateTime<Utc>,
    pub queued_messages: usize,
}

/// Panel registry.
#[derive(Default)]
pub struct WebViewManager {
    panels: Mutex<BTreeMap<String, Panel>>,
}

impl WebViewManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_panel(&self, id: &str, title: &str) -> Result<(), ManagerError> {
        let mut panels = self.panels.lock();
        if panels.contains_key(id) {
            return Err(ManagerError::PanelExists(id.to_string()));
        }
        panels.insert(
            id.to_string(),
            Panel {
                title: title.to_string(),
                opened_at: Utc::now(),
                outbox: Vec::new(),
            },
        );
        debug!(manager = "webview", panel = id, "Panel opened");
        Ok(())
    }

    /// Queue a message for delivery to panel `id`.
    pub fn post_message(&self, id: &str, message: Value) -> Result<(), ManagerError> {
        self.panels
            .lock()
            .get_mut(id)
            .map(|panel| panel.outbox.push(message))
            .ok_or_else(|| ManagerError::UnknownPanel(id.to_string()))
    }

    /// Drain the queued messages of panel `id`.
    pub fn take_messages(&self, id: &str) -> Result<Vec<Value>, ManagerError> {
        self.panels
            .lock()
            .get_mut(id)
            .map(|panel| std::mem::take(&mut panel.outbox))
            .ok_or_else(|| ManagerError::UnknownPanel(id.to_string()))
    }

    pub fn close_panel(&self, id: &str) -> Result<(), ManagerError> {
        self.panels
            .lock()
            .remove(id)
            .map(|_| debug!(manager = "webview", panel = id, "Panel closed"))
            .ok_or_else(|| ManagerError::UnknownPanel(id.to_string()))
    }

    pub fn panels(&self) -> Vec<PanelInfo> {
        self.panels
            .lock()
            .iter()
            .map(|(id, panel)| PanelInfo {
                id: id.clone(),
                title: panel.title.clone(),
                opened_at: panel.opened_at,
                queued_messages: panel.outbox.len(),
            })
            .collect()
    }
}

#[async_trait]
impl Manager for WebViewManager {
    fn kind(&self) -> ManagerKind {
        ManagerKind::WebView
    }

    async fn dispose(&self) -> anyhow::Result<()> {
        let closed = std::mem::take(&mut *self.panels.lock());
        debug!(manager = "webview", count = closed.len(), "All panels closed");
        Ok(())
    }
}
