//! 快取命中與重新計算的效能比較

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matcache::{make_random_matrix_seeded, InvertOptions};

fn bench_inverse(c: &mut Criterion) {
    let options = InvertOptions::default();
    let mut group = c.benchmark_group("inverse");

    for dimension in [4usize, 8, 16] {
        group.bench_with_input(BenchmarkId::new("cache_hit", dimension), &dimension, |b, &n| {
            let mut cache = make_random_matrix_seeded(n, 7);
            cache.inverse(&options).unwrap();
            b.iter(|| {
                black_box(cache.inverse(&options).unwrap());
            });
        });

        group.bench_with_input(BenchmarkId::new("recompute", dimension), &dimension, |b, &n| {
            let mut cache = make_random_matrix_seeded(n, 7);
            let source = cache.source().clone();
            b.iter(|| {
                cache.set_source(source.clone());
                black_box(cache.inverse(&options).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_inverse);
criterion_main!(benches);
