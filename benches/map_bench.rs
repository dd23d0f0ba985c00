//! Benchmark for the ordmaps engines vs standard collections.
//!
//! Compares ArrayMap and AvlTreeMap against the standard library's BTreeMap
//! and HashMap for common operations.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ordmaps::map::{ArrayMap, AvlTreeMap, ValueOwnership};
use std::collections::{BTreeMap, HashMap};
use std::hint::black_box;

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [100, 1000, 10000] {
        let keys: Vec<String> = (0..size).map(|index| format!("key-{index}")).collect();

        group.bench_with_input(BenchmarkId::new("ArrayMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = ArrayMap::new(ValueOwnership::Owned);
                for (index, key) in keys.iter().enumerate() {
                    map.insert(black_box(key), black_box(index)).unwrap();
                }
                black_box(map)
            });
        });

        group.bench_with_input(
            BenchmarkId::new("AvlTreeMap", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    let mut map = AvlTreeMap::new();
                    for (index, key) in keys.iter().enumerate() {
                        map.insert(black_box(key.clone()), black_box(index));
                    }
                    black_box(map)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for (index, key) in keys.iter().enumerate() {
                    map.insert(black_box(key.clone()), black_box(index));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// lookup Benchmark
// =============================================================================

fn benchmark_lookup(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("lookup");

    for size in [100, 1000, 10000] {
        let keys: Vec<String> = (0..size).map(|index| format!("key-{index}")).collect();

        let mut array_map = ArrayMap::new(ValueOwnership::Owned);
        let mut tree_map = AvlTreeMap::new();
        let mut hash_map = HashMap::new();
        for (index, key) in keys.iter().enumerate() {
            array_map.insert(key, index).unwrap();
            tree_map.insert(key.clone(), index);
            hash_map.insert(key.clone(), index);
        }

        group.bench_with_input(
            BenchmarkId::new("ArrayMap", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    for key in keys {
                        black_box(array_map.find(black_box(key)));
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("AvlTreeMap", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    for key in keys {
                        black_box(tree_map.get(black_box(key)));
                    }
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("HashMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                for key in keys {
                    black_box(hash_map.get(black_box(key)));
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// remove-heavy Benchmark
// =============================================================================

/// Exercises the lazy-deletion path: many removals, one compaction.
fn benchmark_remove_then_size(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove_then_size");

    for size in [100, 1000, 10000] {
        let keys: Vec<String> = (0..size).map(|index| format!("key-{index}")).collect();

        group.bench_with_input(BenchmarkId::new("ArrayMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = ArrayMap::new(ValueOwnership::Owned);
                for (index, key) in keys.iter().enumerate() {
                    map.insert(key, index).unwrap();
                }
                for key in keys.iter().step_by(2) {
                    map.remove(black_box(key));
                }
                black_box(map.size())
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for (index, key) in keys.iter().enumerate() {
                    map.insert(key.clone(), index);
                }
                for key in keys.iter().step_by(2) {
                    map.remove(black_box(key));
                }
                black_box(map.len())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_lookup,
    benchmark_remove_then_size
);
criterion_main!(benches);
