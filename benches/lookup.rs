use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use chd_table::{ChdConfig, ChdTable};

fn make_pairs(num_keys: usize) -> Vec<(String, usize)> {
    let mut rng = SmallRng::seed_from_u64(0x5678);
    (0..num_keys)
        .map(|i| (format!("{:016x}-{}", rng.random::<u64>(), i), i))
        .collect()
}

fn benchmark_lookup(c: &mut Criterion, num_keys: usize) {
    let pairs = make_pairs(num_keys);
    let hits: Vec<String> = pairs.iter().map(|(k, _)| k.clone()).collect();
    let misses: Vec<String> = (0..num_keys).map(|i| format!("absent-{}", i)).collect();

    let table = ChdTable::new(pairs, &ChdConfig::default()).unwrap();

    let mut group = c.benchmark_group(format!("Chd_Lookup_{}", num_keys));

    group.bench_function("Hit", |b| {
        b.iter(|| {
            for key in hits.iter() {
                black_box(table.get(black_box(key.as_str())));
            }
        });
    });

    group.bench_function("Miss", |b| {
        b.iter(|| {
            for key in misses.iter() {
                black_box(table.get(black_box(key.as_str())));
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_lookup_1_000,
    benchmark_lookup_100_000
);
criterion_main!(benches);

fn benchmark_lookup_1_000(c: &mut Criterion) {
    benchmark_lookup(c, 1_000);
}

fn benchmark_lookup_100_000(c: &mut Criterion) {
    benchmark_lookup(c, 100_000);
}
