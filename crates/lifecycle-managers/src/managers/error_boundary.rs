//! # Error Boundary
//!
//! Runs fallible work and keeps a bounded record of what failed, so one
//! failing feature does not take the host down.

use std::collections::VecDeque;
use std::future::Future;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lifecycle_core::{Manager, ManagerKind};
use parking_lot::Mutex;
use tracing::error;

/// A failure caught by the boundary.
#[derive(Debug, Clone)]
pub struct CapturedError {
    /// Which feature produced the error.
    pub source: String,
    /// Error chain rendered as `outer: inner: ...`.
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Error capture manager.
pub struct ErrorBoundary {
    captured: Mutex<VecDeque<CapturedError>>,
    capacity: usize,
}

impl Default for ErrorBoundary {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorBoundary {
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self {
            captured: Mutex::new(VecDeque::new()),
            capacity: Self::DEFAULT_CAPACITY,
        }
    }

    /// Record an error from `source`.
    pub fn capture(&self, source: &str, err: &anyhow::Error) {
        let message = format!("{err:#}");
        error!(manager = "error-boundary", source, error = %message, "Captured error");

        let mut captured = self.captured.lock();
        if captured.len() == self.capacity {
            captured.pop_front();
        }
        captured.push_back(CapturedError {
            source: source.to_string(),
            message,
            at: Utc::now(),
        });
    }

    /// Await `work`; on failure capture the error and return `None`.
    pub async fn guard<T, F>(&self, source: &str, work: F) -> Option<T>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        match work.await {
            Ok(value) => Some(value),
            Err(err) => {
                self.capture(source, &err);
                None
            }
        }
    }

    pub fn captured(&self) -> Vec<CapturedError> {
        self.captured.lock().iter().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.captured.lock().len()
    }
}

#[async_trait]
impl Manager for ErrorBoundary {
    fn kind(&self) -> ManagerKind {
        ManagerKind::ErrorBoundary
    }

    async fn dispose(&self) -> anyhow::Result<()> {
        self.captured.lock().clear();
        Ok(())
    }
}
