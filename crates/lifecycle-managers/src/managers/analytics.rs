//! # Analytics Service
//!
//! Counts tracked events and periodically writes a summary to the logging
//! channel. Requires the logging manager and the config service.
//!
//! | Setting | Default | Meaning |
//! |---------|---------|---------|
//! | `analytics.flushIntervalSecs` | `60` | Seconds between summaries |

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lifecycle_core::{Manager, ManagerKind};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::managers::{ConfigService, LoggingManager};

/// Setting controlling the flush interval.
pub const FLUSH_INTERVAL_KEY: &str = "analytics.flushIntervalSecs";

const DEFAULT_FLUSH_INTERVAL_SECS: u64 = 60;

struct AnalyticsState {
    counters: Mutex<BTreeMap<String, u64>>,
    flushes: AtomicU64,
    logging: Arc<LoggingManager>,
}

impl AnalyticsState {
    fn flush(&self) {
        let counters = self.counters.lock().clone();
        let total: u64 = counters.values().sum();
        let summary = counters
            .iter()
            .map(|(event, count)| format!("{event}={count}"))
            .collect::<Vec<_>>()
            .join(" ");
        self.logging
            .info(format!("analytics: {total} events [{summary}]"));
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }
}

/// Event counter with a background flush task.
pub struct AnalyticsService {
    state: Arc<AnalyticsState>,
    interval: Duration,
    flusher: Mutex<Option<JoinHandle<()>>>,
}

impl AnalyticsService {
    /// Start the service and its flush task. Must run inside a tokio runtime.
    pub fn start(logging: Arc<LoggingManager>, config: &ConfigService) -> Self {
        let secs = config
            .get_or(FLUSH_INTERVAL_KEY, DEFAULT_FLUSH_INTERVAL_SECS)
            .max(1);
        let interval = Duration::from_secs(secs);
        let state = Arc::new(AnalyticsState {
            counters: Mutex::new(BTreeMap::new()),
            flushes: AtomicU64::new(0),
            logging,
        });

        let task_state = Arc::clone(&state);
        let flusher = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                task_state.flush();
            }
        });
        debug!(manager = "analytics", interval_secs = secs, "Flush task started");

        Self {
            state,
            interval,
            flusher: Mutex::new(Some(flusher)),
        }
    }

    /// Count one occurrence of `event`.
    pub fn track(&self, event: &str) {
        *self
            .state
            .counters
            .lock()
            .entry(event.to_string())
            .or_insert(0) += 1;
    }

    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.state.counters.lock().clone()
    }

    pub fn flush_count(&self) -> u64 {
        self.state.flushes.load(Ordering::Relaxed)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.flusher
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

#[async_trait]
impl Manager for AnalyticsService {
    fn kind(&self) -> ManagerKind {
        ManagerKind::Analytics
    }

    async fn dispose(&self) -> anyhow::Result<()> {
        let task = self.flusher.lock().take();
        if let Some(task) = task {
            task.abort();
            self.state.flush();
        }
        Ok(())
    }
}

impl Drop for AnalyticsService {
    fn drop(&mut self) {
        if let Some(task) = self.flusher.get_mut().take() {
            task.abort();
        }
    }
}
