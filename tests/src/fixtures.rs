//! Shared test fixtures.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use lifecycle_core::{
    FactoryOptions, HostContext, Manager, ManagerDependencies, ManagerFactory, ManagerKind,
    ManagerProvider,
};
use lifecycle_managers::{StandardProvider, WorkspaceContext};

/// Host context rooted in the system temp directory.
pub fn workspace(name: &str) -> HostContext {
    WorkspaceContext::new(name, std::env::temp_dir()).into_host_context()
}

/// Private factory over the standard provider.
pub fn standard_factory(name: &str) -> Arc<ManagerFactory> {
    factory_with(name, Arc::new(StandardProvider))
}

/// Private factory over any provider.
pub fn factory_with(name: &str, provider: Arc<dyn ManagerProvider>) -> Arc<ManagerFactory> {
    Arc::new(ManagerFactory::new(FactoryOptions::new(
        workspace(name),
        provider,
    )))
}

/// Manager whose disposal always fails.
pub struct StuckManager(pub ManagerKind);

#[async_trait]
impl Manager for StuckManager {
    fn kind(&self) -> ManagerKind {
        self.0
    }

    async fn dispose(&self) -> anyhow::Result<()> {
        anyhow::bail!("{} still holds resources", self.0)
    }
}

/// Standard provider with configurable faults.
#[derive(Default)]
pub struct FaultyProvider {
    /// Kind whose constructor fails.
    pub fail_construct: Option<ManagerKind>,
    /// Kinds built as [`StuckManager`].
    pub stuck: Vec<ManagerKind>,
    constructed: AtomicUsize,
}

impl FaultyProvider {
    pub fn failing(kind: ManagerKind) -> Self {
        Self {
            fail_construct: Some(kind),
            ..Self::default()
        }
    }

    pub fn stuck(kinds: &[ManagerKind]) -> Self {
        Self {
            stuck: kinds.to_vec(),
            ..Self::default()
        }
    }

    /// Also fail construction of `kind`.
    pub fn and_failing(mut self, kind: ManagerKind) -> Self {
        self.fail_construct = Some(kind);
        self
    }

    /// Constructor invocations so far.
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ManagerProvider for FaultyProvider {
    async fn construct(
        &self,
        kind: ManagerKind,
        context: &HostContext,
        deps: &ManagerDependencies,
    ) -> anyhow::Result<Arc<dyn Manager>> {
        self.constructed.fetch_add(1, Ordering::SeqCst);
        if self.fail_construct == Some(kind) {
            anyhow::bail!("{kind} backend unavailable");
        }
        if self.stuck.contains(&kind) {
            return Ok(Arc::new(StuckManager(kind)));
        }
        StandardProvider.construct(kind, context, deps).await
    }
}
