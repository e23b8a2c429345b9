//! # Manager Contract
//!
//! The boundary between the factory and the collaborators it builds.
//!
//! - [`Manager`]: what every constructed instance must expose (disposal)
//! - [`ManagerProvider`]: the kind-to-constructor table supplied by collaborators
//! - [`HostContext`]: opaque host data passed through to every constructor
//! - [`ManagerDependencies`]: already-wired prerequisites handed to constructors

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::kind::ManagerKind;

/// Upcast helper so `Arc<dyn Manager>` can be turned back into its concrete type.
pub trait AsAnyArc: Send + Sync {
    /// Convert into `Arc<dyn Any>` for downcasting.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAnyArc for T {
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Trait that every constructed manager implements.
///
/// Instances are owned by the factory registry from construction until
/// disposal completes. Callers only ever hold `Arc` clones.
#[async_trait]
pub trait Manager: AsAnyArc {
    /// Kind this instance was built for.
    fn kind(&self) -> ManagerKind;

    /// Release every resource the manager holds (timers, channels, child
    /// processes, ...).
    ///
    /// A failing dispose leaves the instance registered so it can be retried.
    async fn dispose(&self) -> anyhow::Result<()>;
}

impl fmt::Debug for dyn Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager").field("kind", &self.kind()).finish()
    }
}

/// Recover the concrete collaborator type behind a manager handle.
#[must_use]
pub fn downcast_manager<T: Manager + Any>(manager: Arc<dyn Manager>) -> Option<Arc<T>> {
    manager.into_any_arc().downcast::<T>().ok()
}

/// Opaque host context.
///
/// The factory never looks inside; collaborators downcast it to the type
/// the host put in.
#[derive(Clone)]
pub struct HostContext {
    inner: Arc<dyn Any + Send + Sync>,
}

impl HostContext {
    /// Wrap a host value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Borrow the host value as `T`, if that is what it holds.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Whether two handles wrap the same host value.
    #[must_use]
    pub fn ptr_eq(&self, other: &HostContext) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HostContext(..)")
    }
}

/// Prerequisite managers handed to a constructor.
#[derive(Clone, Default)]
pub struct ManagerDependencies {
    pub logging: Option<Arc<dyn Manager>>,
    pub config: Option<Arc<dyn Manager>>,
    pub analytics: Option<Arc<dyn Manager>>,
}

impl ManagerDependencies {
    /// Get the wired instance for a shared-dependency kind.
    #[must_use]
    pub fn get(&self, kind: ManagerKind) -> Option<&Arc<dyn Manager>> {
        match kind {
            ManagerKind::Logging => self.logging.as_ref(),
            ManagerKind::Config => self.config.as_ref(),
            ManagerKind::Analytics => self.analytics.as_ref(),
            _ => None,
        }
    }

    /// Typed access to a wired dependency.
    #[must_use]
    pub fn get_as<T: Manager + Any>(&self, kind: ManagerKind) -> Option<Arc<T>> {
        self.get(kind).cloned().and_then(downcast_manager::<T>)
    }

    /// Prerequisites of `kind` that are not wired.
    #[must_use]
    pub fn missing_for(&self, kind: ManagerKind) -> Vec<ManagerKind> {
        kind.dependencies()
            .iter()
            .copied()
            .filter(|dep| self.get(*dep).is_none())
            .collect()
    }
}

impl fmt::Debug for ManagerDependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerDependencies")
            .field("logging", &self.logging.is_some())
            .field("config", &self.config.is_some())
            .field("analytics", &self.analytics.is_some())
            .finish()
    }
}

/// Kind-specific constructor table supplied by collaborators.
///
/// Implementations are expected to `match` exhaustively on [`ManagerKind`]
/// so that adding a kind is a compile error until it has a constructor.
#[async_trait]
pub trait ManagerProvider: Send + Sync {
    /// Build a fresh instance of `kind`.
    async fn construct(
        &self,
        kind: ManagerKind,
        context: &HostContext,
        deps: &ManagerDependencies,
    ) -> anyhow::Result<Arc<dyn Manager>>;
}
