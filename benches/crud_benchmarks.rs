use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeSet;

use kiri_tree::OSAvlSet;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for a deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 88172645463325252;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Insertion benchmarks ───────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_ordered");

    group.bench_function(BenchmarkId::new("OSAvlSet", N), |b| {
        b.iter(|| {
            let mut set = OSAvlSet::new();
            for i in 0..N as i64 {
                set.insert(i);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for i in 0..N as i64 {
                set.insert(i);
            }
            set
        });
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    let keys = random_keys(N);

    group.bench_function(BenchmarkId::new("OSAvlSet", N), |b| {
        b.iter(|| {
            let mut set = OSAvlSet::new();
            for &key in &keys {
                set.insert(key);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &key in &keys {
                set.insert(key);
            }
            set
        });
    });

    group.finish();
}

// ─── Removal benchmarks ─────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_random");
    let keys = random_keys(N);

    group.bench_function(BenchmarkId::new("OSAvlSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<OSAvlSet<i64>>(),
            |mut set| {
                for &key in &keys {
                    let _ = set.remove(&key);
                }
                set
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<BTreeSet<i64>>(),
            |mut set| {
                for &key in &keys {
                    let _ = set.remove(&key);
                }
                set
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Order-statistic benchmarks ─────────────────────────────────────────────

// BTreeSet has no rank/select; iterating to the position is its only
// equivalent, so these groups measure OSAvlSet against that baseline.

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    let set: OSAvlSet<i64> = ordered_keys(N).into_iter().collect();
    let bt_set: BTreeSet<i64> = ordered_keys(N).into_iter().collect();

    group.bench_function(BenchmarkId::new("OSAvlSet", N), |b| {
        b.iter(|| {
            let mut checksum = 0_i64;
            for rank in (1..=N).step_by(97) {
                checksum += set.select(rank).copied().unwrap_or(0);
            }
            checksum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet_nth", N), |b| {
        b.iter(|| {
            let mut checksum = 0_i64;
            for rank in (1..=N).step_by(97) {
                checksum += bt_set.iter().nth(rank - 1).copied().unwrap_or(0);
            }
            checksum
        });
    });

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let set: OSAvlSet<i64> = ordered_keys(N).into_iter().collect();

    group.bench_function(BenchmarkId::new("OSAvlSet", N), |b| {
        b.iter(|| {
            let mut checksum = 0_usize;
            for value in (0..N as i64).step_by(97) {
                checksum += set.rank(&value);
            }
            checksum
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_ordered,
    bench_insert_random,
    bench_remove_random,
    bench_select,
    bench_rank,
);
criterion_main!(benches);
