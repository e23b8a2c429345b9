//! # Registry Properties
//!
//! Factory behaviour exercised with the real standard managers rather than
//! mocks: name parsing, dependency refusal, wiring, concurrent fan-out and
//! teardown.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::future::join_all;
    use lifecycle_core::{FactoryError, ManagerKind};
    use lifecycle_managers::{AnalyticsService, ConfigService, LoggingManager};

    use crate::fixtures::{factory_with, standard_factory, FaultyProvider};

    // =========================================================================
    // CREATION
    // =========================================================================

    #[tokio::test]
    async fn test_unknown_kind_rejected_by_name() {
        let factory = standard_factory("unknown");

        let err = factory.create_manager_by_name("bogus-kind").await.err().unwrap();

        assert_eq!(err.to_string(), "Unknown manager type: bogus-kind");
        assert!(factory.get_active_managers().is_empty());
    }

    #[tokio::test]
    async fn test_dependents_refused_on_fresh_factory() {
        let factory = standard_factory("fresh");

        let analytics = factory.create_manager(ManagerKind::Analytics).await.err().unwrap();
        let assistant = factory.create_manager(ManagerKind::AiAssistant).await.err().unwrap();

        assert_eq!(
            analytics.to_string(),
            "Analytics manager requires logging and config services"
        );
        assert_eq!(
            assistant.to_string(),
            "AI Assistant manager requires logging and config services"
        );
        assert!(factory.get_active_managers().is_empty());
    }

    #[tokio::test]
    async fn test_logging_and_config_both_active() {
        let factory = standard_factory("pair");

        factory.create_manager_by_name("logging").await.unwrap();
        factory.create_manager_by_name("config").await.unwrap();

        let active = factory.get_active_managers();
        assert_eq!(active.len(), 2);
        assert!(active.contains(&ManagerKind::Logging));
        assert!(active.contains(&ManagerKind::Config));
    }

    #[tokio::test]
    async fn test_analytics_receives_published_logging() {
        let factory = standard_factory("wired");
        let logging = factory
            .create_typed::<LoggingManager>(ManagerKind::Logging)
            .await
            .unwrap();
        factory.create_manager(ManagerKind::Config).await.unwrap();

        let analytics = factory
            .create_typed::<AnalyticsService>(ManagerKind::Analytics)
            .await
            .unwrap();
        analytics.track("startup");

        assert!(analytics.is_running());
        factory.dispose_manager(ManagerKind::Analytics).await.unwrap();

        // final flush goes to the wired logging manager
        let last = logging.recent(1);
        assert_eq!(last.len(), 1);
        assert!(last[0].message.contains("startup=1"), "{}", last[0].message);
    }

    #[tokio::test]
    async fn test_second_create_returns_same_instance() {
        let provider = Arc::new(FaultyProvider::default());
        let factory = factory_with("idempotent", provider.clone());

        let first = factory.create_manager(ManagerKind::WebView).await.unwrap();
        let second = factory.create_manager(ManagerKind::WebView).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.constructed(), 1);
    }

    #[tokio::test]
    async fn test_construction_failure_leaves_no_entry() {
        let factory = factory_with(
            "broken",
            Arc::new(FaultyProvider::failing(ManagerKind::Process)),
        );

        let err = factory.create_manager(ManagerKind::Process).await.err().unwrap();

        assert!(matches!(
            err,
            FactoryError::ConstructionFailure {
                kind: ManagerKind::Process,
                ..
            }
        ));
        assert!(err.to_string().contains("process backend unavailable"));
        assert!(!factory.has_manager(ManagerKind::Process));
    }

    // =========================================================================
    // CONCURRENCY
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_five_level_zero_kinds_concurrently() {
        let factory = standard_factory("fan-out");
        let kinds = [
            ManagerKind::Logging,
            ManagerKind::Config,
            ManagerKind::ErrorBoundary,
            ManagerKind::Process,
            ManagerKind::WebView,
        ];

        let results = join_all(kinds.iter().map(|k| factory.create_manager(*k))).await;

        let managers: Vec<_> = results.into_iter().map(Result::unwrap).collect();
        for (manager, kind) in managers.iter().zip(kinds) {
            assert_eq!(manager.kind(), kind);
        }
        for (i, a) in managers.iter().enumerate() {
            for b in &managers[i + 1..] {
                assert!(!Arc::ptr_eq(a, b));
            }
        }
        assert_eq!(factory.get_active_managers().len(), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_same_kind_constructs_once() {
        let provider = Arc::new(FaultyProvider::default());
        let factory = factory_with("same-kind", provider.clone());

        let results = join_all((0..8).map(|_| factory.create_manager(ManagerKind::Config))).await;

        let first = results[0].as_ref().unwrap();
        for result in &results {
            assert!(Arc::ptr_eq(first, result.as_ref().unwrap()));
        }
        assert_eq!(provider.constructed(), 1);
    }

    // =========================================================================
    // DISPOSAL
    // =========================================================================

    #[tokio::test]
    async fn test_dispose_logging_clears_entry_and_slot() {
        let factory = standard_factory("dispose-one");
        let logging = factory
            .create_typed::<LoggingManager>(ManagerKind::Logging)
            .await
            .unwrap();

        factory.dispose_manager(ManagerKind::Logging).await.unwrap();

        assert!(!factory.has_manager(ManagerKind::Logging));
        assert!(factory.config().logging_manager().is_none());
        assert!(logging.is_disposed());
    }

    #[tokio::test]
    async fn test_dispose_all_drains_registry() {
        let factory = standard_factory("drain");
        for kind in ManagerKind::STANDARD_ORDER {
            factory.create_manager(kind).await.unwrap();
        }
        let config = factory
            .get_typed::<ConfigService>(ManagerKind::Config)
            .unwrap();
        config.set("editor.fontSize", serde_json::json!(14)).unwrap();

        factory.dispose_all().await.unwrap();

        assert!(factory.get_active_managers().is_empty());
        assert!(config.keys().is_empty());
    }

    #[tokio::test]
    async fn test_dispose_all_keeps_only_failed_kinds() {
        let factory = factory_with(
            "stuck",
            Arc::new(FaultyProvider::stuck(&[
                ManagerKind::ErrorBoundary,
                ManagerKind::WebView,
            ])),
        );
        for kind in ManagerKind::STANDARD_ORDER {
            factory.create_manager(kind).await.unwrap();
        }

        let err = factory.dispose_all().await.err().unwrap();

        assert_eq!(
            err.to_string(),
            "Failed to dispose managers: webview, error-boundary"
        );
        assert_eq!(
            err.failed_kinds(),
            vec![ManagerKind::WebView, ManagerKind::ErrorBoundary]
        );
        assert_eq!(
            factory.get_active_managers(),
            vec![ManagerKind::ErrorBoundary, ManagerKind::WebView]
        );
    }
}
