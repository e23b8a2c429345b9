//! # Factory Configuration
//!
//! Shared state read by every construction: the host context and the
//! published instances of the kinds other managers depend on.
//!
//! A slot is filled when its kind is created and cleared when that
//! instance is disposed.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::kind::ManagerKind;
use crate::manager::{HostContext, Manager, ManagerDependencies};

/// Per-factory configuration and dependency slots.
pub struct FactoryConfig {
    /// Host context (read-only, passed to every constructor).
    context: HostContext,
    /// Published `logging` instance.
    logging_manager: RwLock<Option<Arc<dyn Manager>>>,
    /// Published `config` instance.
    config_service: RwLock<Option<Arc<dyn Manager>>>,
    /// Published `analytics` instance.
    analytics_service: RwLock<Option<Arc<dyn Manager>>>,
}

impl FactoryConfig {
    /// Create a configuration with empty slots.
    pub fn new(context: HostContext) -> Self {
        Self {
            context,
            logging_manager: RwLock::new(None),
            config_service: RwLock::new(None),
            analytics_service: RwLock::new(None),
        }
    }

    /// Get the host context.
    pub fn context(&self) -> &HostContext {
        &self.context
    }

    pub fn logging_manager(&self) -> Option<Arc<dyn Manager>> {
        self.logging_manager.read().clone()
    }

    pub fn config_service(&self) -> Option<Arc<dyn Manager>> {
        self.config_service.read().clone()
    }

    pub fn analytics_service(&self) -> Option<Arc<dyn Manager>> {
        self.analytics_service.read().clone()
    }

    /// Set the logging slot directly.
    ///
    /// White-box seam for tests; production wiring goes through
    /// `ManagerFactory::create_manager`.
    pub fn set_logging_manager(&self, manager: Option<Arc<dyn Manager>>) {
        *self.logging_manager.write() = manager;
    }

    /// Set the config slot directly. White-box seam, see [`Self::set_logging_manager`].
    pub fn set_config_service(&self, manager: Option<Arc<dyn Manager>>) {
        *self.config_service.write() = manager;
    }

    /// Snapshot the slots as an explicit dependency set.
    pub fn dependencies(&self) -> ManagerDependencies {
        ManagerDependencies {
            logging: self.logging_manager(),
            config: self.config_service(),
            analytics: self.analytics_service(),
        }
    }

    /// Publish a newly built instance. No-op for kinds nothing depends on.
    pub(crate) fn publish(&self, kind: ManagerKind, manager: &Arc<dyn Manager>) {
        if let Some(slot) = self.slot(kind) {
            *slot.write() = Some(Arc::clone(manager));
        }
    }

    /// Clear the slot for `kind`, but only if it still holds `manager`.
    pub(crate) fn retract(&self, kind: ManagerKind, manager: &Arc<dyn Manager>) {
        if let Some(slot) = self.slot(kind) {
            let mut slot = slot.write();
            if slot.as_ref().is_some_and(|m| Arc::ptr_eq(m, manager)) {
                *slot = None;
            }
        }
    }

    fn slot(&self, kind: ManagerKind) -> Option<&RwLock<Option<Arc<dyn Manager>>>> {
        match kind {
            ManagerKind::Logging => Some(&self.logging_manager),
            ManagerKind::Config => Some(&self.config_service),
            ManagerKind::Analytics => Some(&self.analytics_service),
            ManagerKind::ErrorBoundary
            | ManagerKind::Process
            | ManagerKind::WebView
            | ManagerKind::CommandPalette
            | ManagerKind::AiAssistant => None,
        }
    }
}
