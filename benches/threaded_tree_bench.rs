//! Benchmark for ThreadedTree vs standard BTreeMap.
//!
//! Compares the threaded tree under both balancing strategies against the
//! standard BTreeMap for inserts, lookups, range scans and proximity queries.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;
use threaded_tree::iter::LazyIterator;
use threaded_tree::tree::{NaturalOrder, ThreadedTree, Unbalanced};

/// Deterministic shuffle of `0..size` so the unbalanced tree stays shallow.
fn scrambled(size: i32) -> Vec<i32> {
    (0..size).map(|index| (index * 7919) % size).collect()
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [100, 1000, 10000] {
        let keys = scrambled(size);

        group.bench_with_input(BenchmarkId::new("ThreadedTree/Avl", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut tree = ThreadedTree::new();
                for &key in keys {
                    tree.insert(black_box(key), black_box(key * 2));
                }
                black_box(tree)
            });
        });

        group.bench_with_input(
            BenchmarkId::new("ThreadedTree/Unbalanced", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    let mut tree = ThreadedTree::with_parts(Unbalanced, NaturalOrder);
                    for &key in keys {
                        tree.insert(black_box(key), black_box(key * 2));
                    }
                    black_box(tree)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
                for &key in keys {
                    map.entry(black_box(key)).or_default().push(black_box(key * 2));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// find Benchmark
// =============================================================================

fn benchmark_find(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("find");

    for size in [100, 1000, 10000] {
        let tree: ThreadedTree<i32, i32> = (0..size).map(|key| (key, key * 2)).collect();
        let map: BTreeMap<i32, i32> = (0..size).map(|key| (key, key * 2)).collect();

        group.bench_with_input(BenchmarkId::new("ThreadedTree", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0;
                for key in 0..size {
                    if let Some(&value) = tree.find(&black_box(key)).and_then(|node| node.value()) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0;
                for key in 0..size {
                    if let Some(&value) = map.get(&black_box(key)) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// range Benchmark
// =============================================================================

fn benchmark_range(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("range");

    for size in [1000, 10000] {
        let tree: ThreadedTree<i32, i32> = (0..size).map(|key| (key, key)).collect();
        let map: BTreeMap<i32, i32> = (0..size).map(|key| (key, key)).collect();
        let lower = size / 4;
        let upper = size / 2;

        group.bench_with_input(BenchmarkId::new("ThreadedTree", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i32 = tree
                    .get_range(&black_box(lower), &upper)
                    .map(|node| node.value().copied().unwrap_or_default())
                    .into_std()
                    .sum();
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i32 = map.range(black_box(lower)..=upper).map(|(_, value)| *value).sum();
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// neighbors Benchmark
// =============================================================================

fn benchmark_neighbors(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("neighbors");

    for size in [1000, 10000] {
        let tree: ThreadedTree<i32, ()> = (0..size).map(|key| (key * 10, ())).collect();
        let target = size * 5 + 3;

        group.bench_with_input(BenchmarkId::new("window", size), &size, |bencher, _| {
            bencher.iter(|| black_box(tree.get_neighbors(&black_box(target), 8, 8).count()));
        });

        group.bench_with_input(BenchmarkId::new("nearest", size), &size, |bencher, _| {
            let distance = |left: &i32, right: &i32| f64::from((left - right).abs());
            bencher.iter(|| {
                black_box(
                    tree.get_nearest_neighbors(&target, black_box(16), distance)
                        .count(),
                )
            });
        });
    }

    group.finish();
}

// =============================================================================
// remove Benchmark
// =============================================================================

fn benchmark_remove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove");

    for size in [1000, 10000] {
        let keys = scrambled(size);

        group.bench_with_input(BenchmarkId::new("ThreadedTree", size), &keys, |bencher, keys| {
            bencher.iter_batched(
                || keys.iter().map(|&key| (key, key)).collect::<ThreadedTree<i32, i32>>(),
                |mut tree| {
                    for key in keys.iter().step_by(2) {
                        tree.remove(black_box(key));
                    }
                    black_box(tree)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_find,
    benchmark_range,
    benchmark_neighbors,
    benchmark_remove
);

criterion_main!(benches);
