//! Benchmark workloads for the Mach re-simulation engine.
//!
//! Provides deterministic inputs shared by the criterion benches:
//!
//! - [`scattered_deposits`]: pseudo-random deposits over a time window
//! - [`warmed_mach`]: an engine already computed through a given tick
//! - [`BENCH_TICK_RATE`]: the tick rate every profile runs at

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use mach_core::Tick;
use mach_engine::{Mach, MachConfig};
use mach_test_utils::{tick_time, CounterGame, Deposit};

/// Tick rate used by every benchmark profile.
pub const BENCH_TICK_RATE: i64 = 20;

/// Millisecond time at the start of `tick` at [`BENCH_TICK_RATE`].
pub fn bench_time(tick: i64) -> f64 {
    tick_time(BENCH_TICK_RATE, Tick(tick)) as f64
}

/// Generate `n` deposits spread over `[0, window_ms)`.
///
/// Uses a fixed multiplicative hash of the seed, so equal arguments give
/// equal workloads. Values are distinct, so no deposit is a duplicate.
pub fn scattered_deposits(n: usize, window_ms: i64, seed: u64) -> Vec<Deposit> {
    let window = window_ms.max(1) as u64;
    (0..n)
        .map(|i| {
            let h = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add((i as u64).wrapping_mul(1442695040888963407));
            Deposit::new(((h >> 16) % window) as i64, i as i64 + 1)
        })
        .collect()
}

/// An engine with `deposits` registered and computed through `ticks`.
///
/// The replay budget is raised to cover the whole warm-up in one call.
pub fn warmed_mach(ticks: i64, deposits: &[Deposit]) -> Mach<i64, Deposit> {
    let budget = ticks.unsigned_abs().max(1);
    let config =
        MachConfig::new(BENCH_TICK_RATE as f64).with_max_replay_ticks(budget.saturating_add(1));
    let mut mach = match Mach::new(config) {
        Ok(mach) => mach,
        Err(e) => panic!("bench config rejected: {e}"),
    };
    for d in deposits {
        mach.register_action(d.clone());
    }
    mach.compute(&CounterGame, bench_time(ticks));
    mach
}
