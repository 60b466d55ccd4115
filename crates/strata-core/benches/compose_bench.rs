//! # Composition Benchmarks
//!
//! Run with: `cargo bench -p strata-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use strata_core::{
    Catalog, Composer, DataLossPolicy, Requirements, compose_architecture, export_canonical,
};

/// Named inputs from the lightest to the heaviest composition.
fn scenarios() -> Vec<(&'static str, Requirements)> {
    vec![
        ("defaults", Requirements::default()),
        (
            "gateway",
            Requirements {
                needs_central_policy: true,
                data_volume: 50,
                ..Requirements::default()
            },
        ),
        (
            "everything",
            Requirements {
                needs_infra_logs: true,
                needs_infra_metrics: true,
                needs_per_service_isolation: true,
                needs_tail_sampling: true,
                needs_multi_backend: true,
                data_loss_policy: DataLossPolicy::Zero,
                data_volume: 100,
                ..Requirements::default()
            },
        ),
    ]
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");

    for (name, req) in scenarios() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &req, |b, req| {
            b.iter(|| black_box(compose_architecture(black_box(req))));
        });
    }

    group.finish();
}

fn bench_catalog_build(c: &mut Criterion) {
    let layers: Vec<_> = Catalog::builtin().all_layers().cloned().collect();

    c.bench_function("catalog_from_layers", |b| {
        b.iter(|| black_box(Catalog::from_layers(layers.clone())))
    });
}

fn bench_export_canonical(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_canonical");
    let composer = Composer::new(Catalog::builtin());

    for (name, req) in scenarios() {
        let arch = composer.compose(&req);
        group.bench_with_input(BenchmarkId::from_parameter(name), &arch, |b, arch| {
            b.iter(|| black_box(export_canonical(arch)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compose,
    bench_catalog_build,
    bench_export_canonical,
);

criterion_main!(benches);
