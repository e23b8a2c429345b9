//! # AI Assistant Service
//!
//! Queues assistant requests for the host. Routing a request to a model
//! backend happens outside this manager; it only tracks what is pending.
//! Requires the logging manager and the config service, and reports to the
//! analytics service when one is wired.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lifecycle_core::{Manager, ManagerKind};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::error::ManagerError;
use crate::managers::{AnalyticsService, ConfigService, LoggingManager};

/// Setting selecting the model name attached to requests.
pub const MODEL_KEY: &str = "aiAssistant.model";

/// A queued request.
#[derive(Debug, Clone)]
pub struct AssistantRequest {
    pub id: Uuid,
    pub prompt: String,
    pub model: String,
    pub submitted_at: DateTime<Utc>,
}

/// Assistant request queue.
pub struct AiAssistantService {
    logging: Arc<LoggingManager>,
    analytics: Option<Arc<AnalyticsService>>,
    model: String,
    pending: Mutex<Vec<AssistantRequest>>,
    disposed: AtomicBool,
}

impl AiAssistantService {
    pub fn new(
        logging: Arc<LoggingManager>,
        config: &ConfigService,
        analytics: Option<Arc<AnalyticsService>>,
    ) -> Self {
        Self {
            logging,
            analytics,
            model: config.get_or(MODEL_KEY, "default".to_string()),
            pending: Mutex::new(Vec::new()),
            disposed: AtomicBool::new(false),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Queue a prompt.
    pub fn submit(&self, prompt: impl Into<String>) -> Result<Uuid, ManagerError> {
        if self.disposed.load(Ordering::Acquire) {
            return Err(ManagerError::Disposed("ai-assistant"));
        }
        let request = AssistantRequest {
            id: Uuid::new_v4(),
            prompt: prompt.into(),
            model: self.model.clone(),
            submitted_at: Utc::now(),
        };
        let id = request.id;
        self.pending.lock().push(request);

        self.logging.debug(format!("assistant request {id} queued"));
        if let Some(analytics) = &self.analytics {
            analytics.track("ai-assistant.request");
        }
        Ok(id)
    }

    /// Remove a request from the queue once the host has answered it.
    pub fn complete(&self, id: Uuid) -> Result<AssistantRequest, ManagerError> {
        let mut pending = self.pending.lock();
        let index = pending
            .iter()
            .position(|r| r.id == id)
            .ok_or(ManagerError::UnknownRequest(id))?;
        let request = pending.remove(index);
        drop(pending);

        if let Some(analytics) = &self.analytics {
            analytics.track("ai-assistant.completed");
        }
        Ok(request)
    }

    pub fn pending(&self) -> Vec<AssistantRequest> {
        self.pending.lock().clone()
    }
}

#[async_trait]
impl Manager for AiAssistantService {
    fn kind(&self) -> ManagerKind {
        ManagerKind::AiAssistant
    }

    async fn dispose(&self) -> anyhow::Result<()> {
        self.disposed.store(true, Ordering::Release);
        let cancelled = std::mem::take(&mut *self.pending.lock());
        if !cancelled.is_empty() {
            self.logging
                .warn(format!("{} assistant requests cancelled", cancelled.len()));
        }
        Ok(())
    }
}
