//! # Manager Factory
//!
//! Single authority for constructing, locating and disposing managers.
//!
//! ## Creation
//!
//! ```text
//! create_manager(kind)
//!   │  lock guard[kind]            (same-kind callers queue here)
//!   ├─ already active? ──────────► return existing instance
//!   ├─ prerequisites wired? ─no──► MissingDependency
//!   ├─ provider.construct(..) ─err► ConstructionFailure (registry untouched)
//!   ├─ insert into active set
//!   └─ publish into FactoryConfig (logging / config / analytics)
//! ```
//!
//! ## Thread Safety
//!
//! - One `tokio::sync::Mutex` per kind serializes creation and disposal of
//!   that kind; different kinds run concurrently
//! - The active set and the config slots sit behind `parking_lot::RwLock`
//!   and are never held across an `.await`

use std::any::Any;
use std::cmp::Reverse;
use std::sync::Arc;

use lazy_static::lazy_static;
use lifecycle_telemetry::{
    ACTIVE_MANAGERS, MANAGERS_CREATED, MANAGERS_DISPOSED, MANAGER_CONSTRUCTION_SECONDS,
    MANAGER_CREATE_FAILURES, MANAGER_DISPOSE_FAILURES,
};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::config::FactoryConfig;
use crate::error::FactoryError;
use crate::kind::ManagerKind;
use crate::manager::{downcast_manager, HostContext, Manager, ManagerDependencies, ManagerProvider};

lazy_static! {
    /// Process-wide factory used by [`ManagerFactory::get_instance`].
    static ref INSTANCE: Mutex<Option<Arc<ManagerFactory>>> = Mutex::new(None);
}

/// Metric label for names that do not parse as a kind.
const UNKNOWN_KIND_LABEL: &str = "unknown";

/// Options for building a factory.
#[derive(Clone)]
pub struct FactoryOptions {
    /// Opaque host context handed to every constructor.
    pub context: HostContext,
    /// Kind-to-constructor table.
    pub provider: Arc<dyn ManagerProvider>,
}

impl FactoryOptions {
    pub fn new(context: HostContext, provider: Arc<dyn ManagerProvider>) -> Self {
        Self { context, provider }
    }
}

/// The manager registry.
pub struct ManagerFactory {
    /// Host context and published dependency slots.
    config: FactoryConfig,
    /// Kind-specific constructors.
    provider: Arc<dyn ManagerProvider>,
    /// Active managers in insertion order, at most one per kind.
    active: RwLock<Vec<(ManagerKind, Arc<dyn Manager>)>>,
    /// Per-kind creation/disposal guards, indexed by bring-up rank.
    guards: [tokio::sync::Mutex<()>; ManagerKind::COUNT],
}

impl ManagerFactory {
    /// Create a standalone factory.
    ///
    /// Prefer this and pass the `Arc` to consumers explicitly.
    pub fn new(options: FactoryOptions) -> Self {
        Self {
            config: FactoryConfig::new(options.context),
            provider: options.provider,
            active: RwLock::new(Vec::new()),
            guards: std::array::from_fn(|_| tokio::sync::Mutex::new(())),
        }
    }

    /// Get the process-wide factory, creating it on first use.
    ///
    /// Options passed after the first call are ignored: the first caller's
    /// context wins.
    pub fn get_instance(options: FactoryOptions) -> Arc<ManagerFactory> {
        let mut instance = INSTANCE.lock();
        if let Some(existing) = instance.as_ref() {
            debug!("Factory already initialized, ignoring new options");
            return Arc::clone(existing);
        }

        info!("Initializing process-wide manager factory");
        let factory = Arc::new(Self::new(options));
        *instance = Some(Arc::clone(&factory));
        factory
    }

    /// Get the process-wide factory if one has been created.
    pub fn instance() -> Option<Arc<ManagerFactory>> {
        INSTANCE.lock().clone()
    }

    /// Forget the process-wide factory.
    ///
    /// Test-only: production code creates the factory once and never resets
    /// it. Active managers of the old factory are not disposed.
    pub fn reset_instance() -> Option<Arc<ManagerFactory>> {
        INSTANCE.lock().take()
    }

    /// Get the factory configuration.
    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Get the host context.
    pub fn context(&self) -> &HostContext {
        self.config.context()
    }

    /// Create a manager, wiring in whatever dependencies are currently published.
    ///
    /// Returns the existing instance if `kind` is already active.
    pub async fn create_manager(&self, kind: ManagerKind) -> Result<Arc<dyn Manager>, FactoryError> {
        let deps = self.config.dependencies();
        self.create_manager_with(kind, deps).await
    }

    /// Create a manager from its string name.
    pub async fn create_manager_by_name(&self, name: &str) -> Result<Arc<dyn Manager>, FactoryError> {
        let kind = name.parse::<ManagerKind>().inspect_err(|e| {
            // Bounded label set: every unknown name lands in one series.
            MANAGER_CREATE_FAILURES
                .with_label_values(&[UNKNOWN_KIND_LABEL, e.reason()])
                .inc();
            warn!(name = %name, "Manager creation rejected: unknown kind");
        })?;
        self.create_manager(kind).await
    }

    /// Create a manager with an explicit dependency set.
    #[instrument(name = "create_manager", skip(self, deps), fields(kind = %kind))]
    pub async fn create_manager_with(
        &self,
        kind: ManagerKind,
        deps: ManagerDependencies,
    ) -> Result<Arc<dyn Manager>, FactoryError> {
        let _guard = self.guard(kind).lock().await;

        if let Some(existing) = self.get_manager(kind) {
            debug!("Manager already active, returning existing instance");
            return Ok(existing);
        }

        let missing = deps.missing_for(kind);
        if !missing.is_empty() {
            return Err(reject(FactoryError::MissingDependency { kind, missing }));
        }

        let timer = MANAGER_CONSTRUCTION_SECONDS
            .with_label_values(&[kind.name()])
            .start_timer();
        let constructed = self.provider.construct(kind, self.config.context(), &deps).await;
        timer.observe_duration();

        let manager = match constructed {
            Ok(manager) if manager.kind() == kind => manager,
            Ok(manager) => {
                let built = manager.kind();
                if let Err(e) = manager.dispose().await {
                    warn!(built = %built, error = %e, "Failed to dispose rejected manager");
                }
                let source = anyhow::anyhow!("provider returned a {built} manager");
                return Err(reject(FactoryError::ConstructionFailure { kind, source }));
            }
            Err(source) => {
                return Err(reject(FactoryError::ConstructionFailure { kind, source }));
            }
        };

        self.active.write().push((kind, Arc::clone(&manager)));
        self.config.publish(kind, &manager);

        MANAGERS_CREATED.with_label_values(&[kind.name()]).inc();
        ACTIVE_MANAGERS.inc();
        info!("Manager created");

        Ok(manager)
    }

    /// Create a manager and downcast it to its concrete type.
    pub async fn create_typed<T: Manager + Any>(&self, kind: ManagerKind) -> Result<Arc<T>, FactoryError> {
        let manager = self.create_manager(kind).await?;
        downcast_manager::<T>(manager).ok_or(FactoryError::TypeMismatch { kind })
    }

    /// Get the active instance of `kind`. Never constructs.
    pub fn get_manager(&self, kind: ManagerKind) -> Option<Arc<dyn Manager>> {
        self.active
            .read()
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, m)| Arc::clone(m))
    }

    /// Get an active instance by name. Unknown names are simply absent.
    pub fn get_manager_by_name(&self, name: &str) -> Option<Arc<dyn Manager>> {
        name.parse::<ManagerKind>()
            .ok()
            .and_then(|kind| self.get_manager(kind))
    }

    /// Get the active instance of `kind` as its concrete type.
    pub fn get_typed<T: Manager + Any>(&self, kind: ManagerKind) -> Option<Arc<T>> {
        self.get_manager(kind).and_then(downcast_manager::<T>)
    }

    /// Check whether `kind` is active.
    pub fn has_manager(&self, kind: ManagerKind) -> bool {
        self.active.read().iter().any(|(k, _)| *k == kind)
    }

    /// Active kinds in insertion order.
    pub fn get_active_managers(&self) -> Vec<ManagerKind> {
        self.active.read().iter().map(|(k, _)| *k).collect()
    }

    /// Dispose the active instance of `kind`, if any.
    ///
    /// The entry is removed only after dispose succeeds; on failure it stays
    /// registered so the caller can retry.
    #[instrument(name = "dispose_manager", skip(self), fields(kind = %kind))]
    pub async fn dispose_manager(&self, kind: ManagerKind) -> Result<(), FactoryError> {
        let _guard = self.guard(kind).lock().await;

        let Some(manager) = self.get_manager(kind) else {
            debug!("Manager not active, nothing to dispose");
            return Ok(());
        };

        if let Err(source) = manager.dispose().await {
            MANAGER_DISPOSE_FAILURES.with_label_values(&[kind.name()]).inc();
            warn!(error = %source, "Manager disposal failed, keeping entry");
            return Err(FactoryError::DisposalFailure { kind, source });
        }

        self.active.write().retain(|(k, _)| *k != kind);
        self.config.retract(kind, &manager);

        MANAGERS_DISPOSED.with_label_values(&[kind.name()]).inc();
        ACTIVE_MANAGERS.dec();
        info!("Manager disposed");

        Ok(())
    }

    /// Dispose every active manager, dependents before their prerequisites.
    ///
    /// Failures do not stop the teardown; they are collected and reported
    /// together once every kind has been attempted.
    #[instrument(name = "dispose_all", skip(self))]
    pub async fn dispose_all(&self) -> Result<(), FactoryError> {
        let mut kinds = self.get_active_managers();
        kinds.sort_by_key(|k| Reverse(k.bring_up_rank()));
        info!(count = kinds.len(), "Disposing all managers");

        let mut failures = Vec::new();
        for kind in kinds {
            match self.dispose_manager(kind).await {
                Ok(()) => {}
                Err(FactoryError::DisposalFailure { kind, source }) => failures.push((kind, source)),
                Err(other) => failures.push((kind, anyhow::Error::new(other))),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(FactoryError::AggregateDisposal { failures })
        }
    }

    fn guard(&self, kind: ManagerKind) -> &tokio::sync::Mutex<()> {
        &self.guards[kind.bring_up_rank()]
    }
}

/// Record a rejected creation and hand the error back.
fn reject(err: FactoryError) -> FactoryError {
    for kind in err.failed_kinds() {
        MANAGER_CREATE_FAILURES
            .with_label_values(&[kind.name(), err.reason()])
            .inc();
    }
    warn!(error = %err, "Manager creation rejected");
    err
}
