//! Criterion micro-benchmarks for snapshot log push, rollback and checkpoints.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use mach_arena::SnapshotLog;
use mach_core::Tick;

/// Build a log holding the retained subset of `n` consecutive pushes.
fn filled_log(n: i64) -> SnapshotLog<u64> {
    let mut log = SnapshotLog::new();
    for t in 0..n {
        log.push(Tick(t), t as u64);
    }
    log
}

/// Benchmark: 10K consecutive pushes into a fresh log.
fn bench_push_10k(c: &mut Criterion) {
    c.bench_function("snapshot_push_10k", |b| {
        b.iter(|| {
            let log = filled_log(10_000);
            black_box(log.len());
        });
    });
}

/// Benchmark: steady-state single push onto a log of ~1M history.
fn bench_push_steady(c: &mut Criterion) {
    let mut log = filled_log(1 << 20);
    let mut tick = 1i64 << 20;
    c.bench_function("snapshot_push_steady", |b| {
        b.iter(|| {
            log.push(Tick(tick), tick as u64);
            tick += 1;
        });
    });
    black_box(log.len());
}

/// Benchmark: roll back half the history and push back to the head.
fn bench_rollback_recover(c: &mut Criterion) {
    let n = 1i64 << 12;
    c.bench_function("snapshot_rollback_half", |b| {
        b.iter_batched(
            || filled_log(n),
            |mut log| {
                let dropped = log.rollback_to(Tick(n / 2));
                let mut t = log.head().map_or(0, |h| h.tick().0 + 1);
                while t < n {
                    log.push(Tick(t), t as u64);
                    t += 1;
                }
                black_box(dropped);
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: checkpoint, diverge for 1K pushes, restore.
fn bench_checkpoint_restore(c: &mut Criterion) {
    let mut log = filled_log(1 << 12);
    let base = log.head().map_or(0, |h| h.tick().0);
    c.bench_function("snapshot_checkpoint_restore", |b| {
        b.iter(|| {
            let cp = log.checkpoint();
            for t in 1..=1_000 {
                log.push(Tick(base + t), t as u64);
            }
            log.restore(cp).unwrap();
        });
    });
    black_box(log.live_nodes());
}

criterion_group!(
    benches,
    bench_push_10k,
    bench_push_steady,
    bench_rollback_recover,
    bench_checkpoint_restore
);
criterion_main!(benches);
