//! # QC-18 Property Registry Benchmarks
//!
//! Claims to validate:
//! - Accessors read one record field without taking an ordering slot
//! - `view` cost is independent of how many assets are registered
//! - Transfers cost the same whether or not the asset carries debt
//!
//! Conditions:
//! - Registries pre-populated with up to 10k assets
//! - Batched mints to measure per-asset write throughput

use std::time::Duration;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use qc_18_property_registry::{PropertyRegistryApi, RegistryConfig};
use tokio::runtime::Runtime;

use crate::integration::{asset, mint_request, usd, Node, ADMIN, BUYER, SELLER};

fn populated(rt: &Runtime, assets: usize) -> Node {
    let node = Node::start(RegistryConfig::default());
    rt.block_on(async {
        for i in 0..assets {
            node.registry
                .mint(ADMIN, mint_request(&format!("lot-{i}")))
                .await
                .expect("mint");
        }
    });
    node
}

/// Mint throughput.
pub fn bench_mint(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("qc-18/mint");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("mint_single", |b| {
        let node = Node::start(RegistryConfig::default());
        let mut next = 0u64;
        b.iter(|| {
            next += 1;
            rt.block_on(node.registry.mint(ADMIN, mint_request(&format!("bench-{next}"))))
                .expect("mint")
        })
    });

    for size in [10usize, 100, 1_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("mint_batch", size), &size, |b, &size| {
            b.iter(|| black_box(populated(&rt, size)))
        });
    }
    group.finish();
}

/// Unified view and single-field accessors against growing registries.
pub fn bench_reads(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("qc-18/reads");
    group.measurement_time(Duration::from_secs(10));

    for size in [100usize, 10_000] {
        let node = populated(&rt, size);
        let target = asset(&format!("lot-{}", size / 2));

        group.bench_with_input(BenchmarkId::new("view", size), &size, |b, _| {
            b.iter(|| black_box(rt.block_on(node.registry.view(&target)).expect("view")))
        });
        group.bench_with_input(
            BenchmarkId::new("operating_agreement_hash_of", size),
            &size,
            |b, _| {
                b.iter(|| {
                    black_box(
                        node.registry
                            .operating_agreement_hash_of(&target)
                            .expect("hash"),
                    )
                })
            },
        );
    }
    group.finish();
}

/// Debt updates and token transfers on an encumbered asset.
pub fn bench_mutations(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("qc-18/mutations");
    group.measurement_time(Duration::from_secs(10));

    let node = populated(&rt, 1);
    let target = asset("lot-0");
    rt.block_on(node.registry.set_debt(ADMIN, &target, usd(), 1_000_000))
        .expect("debt");

    let mut amount = 0i128;
    group.bench_function("set_debt", |b| {
        b.iter(|| {
            amount += 1;
            rt.block_on(node.registry.set_debt(ADMIN, &target, usd(), amount))
                .expect("debt")
        })
    });

    let mut holder = SELLER;
    group.bench_function("transfer_with_auditor", |b| {
        b.iter(|| {
            let next = if holder == SELLER { BUYER } else { SELLER };
            rt.block_on(node.ledger.transfer(&target, holder, next))
                .expect("transfer");
            holder = next;
        })
    });
    group.finish();
}

/// Register all registry benchmarks.
pub fn register_benchmarks(c: &mut Criterion) {
    bench_mint(c);
    bench_reads(c);
    bench_mutations(c);
}
