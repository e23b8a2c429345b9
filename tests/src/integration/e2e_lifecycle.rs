//! # End-to-End Lifecycle
//!
//! Full host flows: explicit slot wiring, standard bring-up on the
//! process-wide factory, rollback after a failed step, and teardown.
//!
//! ## Flow Tested
//!
//! ```text
//! logging ─┐
//! config  ─┼─► FactoryConfig slots ─► analytics ─► dispose_all ─► empty
//!          │
//! create_standard_managers ─► bundle (8 kinds) ─► shutdown
//! ```

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use lifecycle_core::{FactoryError, FactoryOptions, ManagerFactory, ManagerKind};
    use lifecycle_managers::{
        create_standard_managers, StandardManagers, StandardProvider, WorkspaceContext,
    };

    use crate::fixtures::{factory_with, standard_factory, workspace, FaultyProvider};

    #[tokio::test]
    async fn test_explicit_wiring_then_teardown() {
        let factory = standard_factory("e2e");

        let logging = factory.create_manager(ManagerKind::Logging).await.unwrap();
        let config = factory.create_manager(ManagerKind::Config).await.unwrap();
        factory.config().set_logging_manager(Some(logging));
        factory.config().set_config_service(Some(config));

        let analytics = factory.create_manager(ManagerKind::Analytics).await.unwrap();
        assert_eq!(analytics.kind(), ManagerKind::Analytics);
        assert!(factory.config().analytics_service().is_some());

        factory.dispose_all().await.unwrap();
        assert!(factory.get_active_managers().is_empty());
        assert!(factory.config().logging_manager().is_none());
        assert!(factory.config().config_service().is_none());
        assert!(factory.config().analytics_service().is_none());
    }

    #[tokio::test]
    async fn test_settings_file_reaches_dependents() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.json");
        std::fs::write(
            &settings,
            r#"{ "aiAssistant.model": "local-small", "analytics.flushIntervalSecs": 5 }"#,
        )
        .unwrap();
        let context = WorkspaceContext::new("settings", dir.path())
            .with_settings(&settings)
            .into_host_context();
        let factory = Arc::new(ManagerFactory::new(FactoryOptions::new(
            context,
            Arc::new(StandardProvider),
        )));

        let bundle = StandardManagers::bring_up(Arc::clone(&factory)).await.unwrap();

        assert_eq!(bundle.ai_assistant_service.model(), "local-small");
        assert_eq!(bundle.analytics_service.interval(), Duration::from_secs(5));

        let id = bundle.ai_assistant_service.submit("explain this").unwrap();
        bundle.ai_assistant_service.complete(id).unwrap();
        let counts = bundle.analytics_service.snapshot();
        assert_eq!(counts.get("ai-assistant.request"), Some(&1));
        assert_eq!(counts.get("ai-assistant.completed"), Some(&1));

        bundle.shutdown().await.unwrap();
    }

    /// The only test in this crate that touches the process-wide factory.
    #[tokio::test]
    async fn test_standard_managers_on_process_factory() {
        ManagerFactory::reset_instance();

        let bundle = create_standard_managers(workspace("global")).await.unwrap();

        let again = ManagerFactory::get_instance(FactoryOptions::new(
            workspace("ignored"),
            Arc::new(StandardProvider),
        ));
        assert!(Arc::ptr_eq(&bundle.factory, &again));
        assert!(bundle
            .factory
            .context()
            .downcast_ref::<WorkspaceContext>()
            .is_some_and(|w| w.workspace_name == "global"));
        for kind in ManagerKind::STANDARD_ORDER {
            assert!(again.has_manager(kind), "{kind} not active");
        }

        // bring-up against a populated factory reuses every instance
        let second = create_standard_managers(workspace("other")).await.unwrap();
        assert!(Arc::ptr_eq(
            &bundle.logging_manager,
            &second.logging_manager
        ));

        bundle.shutdown().await.unwrap();
        assert!(again.get_active_managers().is_empty());
        ManagerFactory::reset_instance();
    }

    #[tokio::test]
    async fn test_failed_bring_up_rolls_back() {
        let factory = factory_with(
            "rollback",
            Arc::new(FaultyProvider::failing(ManagerKind::CommandPalette)),
        );
        factory.create_manager(ManagerKind::Logging).await.unwrap();

        let err = StandardManagers::bring_up(Arc::clone(&factory))
            .await
            .err()
            .unwrap();

        assert!(matches!(
            err,
            FactoryError::ConstructionFailure {
                kind: ManagerKind::CommandPalette,
                ..
            }
        ));
        assert_eq!(factory.get_active_managers(), vec![ManagerKind::Logging]);
        assert!(factory.config().config_service().is_none());
    }

    #[tokio::test]
    async fn test_rollback_ignores_failed_disposals() {
        let factory = factory_with(
            "rollback-stuck",
            Arc::new(
                FaultyProvider::stuck(&[ManagerKind::ErrorBoundary])
                    .and_failing(ManagerKind::Analytics),
            ),
        );

        let err = StandardManagers::bring_up(Arc::clone(&factory))
            .await
            .err()
            .unwrap();

        assert!(matches!(
            err,
            FactoryError::ConstructionFailure {
                kind: ManagerKind::Analytics,
                ..
            }
        ));
        assert_eq!(
            factory.get_active_managers(),
            vec![ManagerKind::ErrorBoundary]
        );
    }

    #[tokio::test]
    async fn test_creation_is_fast() {
        let factory = standard_factory("timing");

        for kind in ManagerKind::STANDARD_ORDER {
            let started = Instant::now();
            factory.create_manager(kind).await.unwrap();
            let elapsed = started.elapsed();
            assert!(
                elapsed < Duration::from_millis(100),
                "{kind} took {elapsed:?}"
            );
        }

        factory.dispose_all().await.unwrap();
    }
}
