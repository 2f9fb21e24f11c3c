use btindex::BTreeIndex;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

criterion_group!(benches, bench_insert, bench_search, bench_delete);
criterion_main!(benches);

/// Scrambled key order so inserts land all over the tree.
fn scrambled(n: u64) -> Vec<u64> {
    // 1_000_003 is prime, so this is a permutation for any n < 1_000_003
    (0..n).map(|i| (i * 1_000_003) % n).collect()
}

fn build(t: usize, keys: &[u64]) -> BTreeIndex<u64, u64> {
    let mut index = BTreeIndex::new(t).unwrap();
    for &k in keys {
        index.insert(k, k).unwrap();
    }
    index
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("Insert");
    let keys = scrambled(10_000);
    for t in [2, 6, 32].iter() {
        group.bench_function(BenchmarkId::new("Index", t), |b| {
            b.iter(|| build(*t, &keys))
        });
    }
    group.bench_function("Std", |b| {
        b.iter(|| {
            let mut std_map = std::collections::BTreeMap::new();
            for &k in &keys {
                std_map.insert(k, k);
            }
            std_map
        })
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Search");
    let keys = scrambled(10_000);
    for t in [2, 6, 32].iter() {
        let index = build(*t, &keys);
        group.bench_function(BenchmarkId::new("Index", t), |b| {
            b.iter(|| keys.iter().filter(|k| index.search(k).is_some()).count())
        });
    }
    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("Delete");
    let keys = scrambled(10_000);
    for t in [2, 6, 32].iter() {
        group.bench_function(BenchmarkId::new("Index", t), |b| {
            b.iter_batched(
                || build(*t, &keys),
                |mut index| {
                    for k in &keys {
                        index.delete(k);
                    }
                    index
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}
