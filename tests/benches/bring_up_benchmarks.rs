//! # Lifecycle Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | Single `create_manager` | < 100ms |
//! | Standard bring-up (8 kinds) + `dispose_all` | < 100ms |
//! | `get_manager` lookup | sub-microsecond |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lifecycle_core::{FactoryOptions, ManagerFactory, ManagerKind};
use lifecycle_managers::{StandardManagers, StandardProvider, WorkspaceContext};
use tokio::runtime::Runtime;

fn factory() -> Arc<ManagerFactory> {
    let context = WorkspaceContext::new("bench", std::env::temp_dir()).into_host_context();
    Arc::new(ManagerFactory::new(FactoryOptions::new(
        context,
        Arc::new(StandardProvider),
    )))
}

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime")
}

fn bench_create_single(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("create-manager");
    group.measurement_time(Duration::from_secs(5));

    for kind in [ManagerKind::Logging, ManagerKind::Config, ManagerKind::WebView] {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, &kind| {
            b.iter(|| {
                rt.block_on(async {
                    let factory = factory();
                    let manager = factory.create_manager(kind).await.unwrap();
                    black_box(&manager);
                    factory.dispose_manager(kind).await.unwrap();
                })
            })
        });
    }

    group.finish();
}

fn bench_standard_bring_up(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("standard-bring-up");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("bring_up_and_dispose_all", |b| {
        b.iter(|| {
            rt.block_on(async {
                let bundle = StandardManagers::bring_up(factory()).await.unwrap();
                black_box(&bundle.ai_assistant_service);
                bundle.shutdown().await.unwrap();
            })
        })
    });

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let rt = runtime();
    let factory = factory();
    rt.block_on(async {
        for kind in ManagerKind::STANDARD_ORDER {
            factory.create_manager(kind).await.unwrap();
        }
    });

    c.bench_function("get_manager", |b| {
        b.iter(|| black_box(factory.get_manager(black_box(ManagerKind::AiAssistant))))
    });
    c.bench_function("get_active_managers", |b| {
        b.iter(|| black_box(factory.get_active_managers()))
    });

    rt.block_on(factory.dispose_all()).unwrap();
}

criterion_group!(
    benches,
    bench_create_single,
    bench_standard_bring_up,
    bench_lookup
);
criterion_main!(benches);
