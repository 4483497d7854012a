//! Criterion benchmarks for the expiring cache: add, get hit, get miss, sweep.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use pokedex_cache::ExpiringCache;

const PAYLOAD: &[u8] = &[b'x'; 4096];

fn bench_add(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _guard = rt.enter();
    let cache = ExpiringCache::new(Duration::from_secs(300));

    let mut g = c.benchmark_group("add");
    g.throughput(Throughput::Bytes(PAYLOAD.len() as u64));
    let mut i = 0u64;
    g.bench_function("add_4k", |b| {
        b.iter(|| {
            i += 1;
            cache.add(format!("key-{}", i % 1024), PAYLOAD);
        });
    });
    g.finish();
}

fn bench_get(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _guard = rt.enter();
    let cache = ExpiringCache::new(Duration::from_secs(300));
    for i in 0..1024 {
        cache.add(format!("key-{i}"), PAYLOAD);
    }

    let mut g = c.benchmark_group("get");
    g.throughput(Throughput::Elements(1));
    g.bench_function("get_hit", |b| {
        b.iter(|| black_box(cache.get(black_box("key-512"))));
    });
    g.bench_function("get_miss", |b| {
        b.iter(|| black_box(cache.get(black_box("missing"))));
    });
    g.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _guard = rt.enter();

    let mut g = c.benchmark_group("sweep");
    g.bench_function("sweep_10k_live", |b| {
        b.iter_batched(
            || {
                let cache = ExpiringCache::new(Duration::from_secs(300));
                for i in 0..10_000 {
                    cache.add(format!("key-{i}"), PAYLOAD);
                }
                cache
            },
            |cache| black_box(cache.sweep()),
            BatchSize::LargeInput,
        );
    });
    g.finish();
}

criterion_group!(benches, bench_add, bench_get, bench_sweep);
criterion_main!(benches);
