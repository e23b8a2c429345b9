//! # Logging Manager
//!
//! Named output channel for the workspace. Records go to `tracing` and into
//! a bounded in-memory history that panels can replay.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lifecycle_core::{Manager, ManagerKind};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// One entry in the channel history.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Output channel manager.
pub struct LoggingManager {
    channel: String,
    history: Mutex<VecDeque<LogRecord>>,
    capacity: usize,
    disposed: AtomicBool,
}

impl LoggingManager {
    /// Records kept when no capacity is given.
    pub const DEFAULT_HISTORY: usize = 500;

    pub fn new(channel: impl Into<String>) -> Self {
        Self::with_capacity(channel, Self::DEFAULT_HISTORY)
    }

    pub fn with_capacity(channel: impl Into<String>, capacity: usize) -> Self {
        Self {
            channel: channel.into(),
            history: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
            disposed: AtomicBool::new(false),
        }
    }

    /// Channel name.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Append a record. Ignored once the manager is disposed.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if self.is_disposed() {
            return;
        }
        let message = message.into();
        let channel = self.channel.as_str();
        match level {
            LogLevel::Debug => debug!(manager = "logging", channel, "{}", message),
            LogLevel::Info => info!(manager = "logging", channel, "{}", message),
            LogLevel::Warn => warn!(manager = "logging", channel, "{}", message),
            LogLevel::Error => error!(manager = "logging", channel, "{}", message),
        }

        let mut history = self.history.lock();
        if history.len() == self.capacity {
            history.pop_front();
        }
        history.push_back(LogRecord {
            level,
            message,
            at: Utc::now(),
        });
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// The last `n` records, oldest first.
    pub fn recent(&self, n: usize) -> Vec<LogRecord> {
        let history = self.history.lock();
        let skip = history.len().saturating_sub(n);
        history.iter().skip(skip).cloned().collect()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

#[async_trait]
impl Manager for LoggingManager {
    fn kind(&self) -> ManagerKind {
        ManagerKind::Logging
    }

    async fn dispose(&self) -> anyhow::Result<()> {
        self.disposed.store(true, Ordering::Release);
        self.history.lock().clear();
        debug!(channel = %self.channel, "Logging channel closed");
        Ok(())
    }
}
