//! Integration test: end-to-end compute and late-action scenarios.
//!
//! Runs the counter game at 10 ticks per second: `init = 0`, each tick
//! adds one, each deposit adds its value. Times are in milliseconds, so
//! tick `t` covers `[100t, 100t + 100)`.

use mach_core::Tick;
use mach_engine::{Mach, MachConfig};
use mach_test_utils::{tick_time, CounterGame, Deposit};

fn counter_mach() -> Mach<i64, Deposit> {
    Mach::with_tick_rate(10.0).unwrap()
}

fn at(tick: i64) -> f64 {
    tick_time(10, Tick(tick)) as f64
}

// ── Reference scenarios ─────────────────────────────────────────────

#[test]
fn deposit_then_compute() {
    let mut m = counter_mach();
    m.register_action(Deposit::new(250, 100));
    assert_eq!(m.compute(&CounterGame, 300.0), 104);
    assert_eq!(m.cached_tick(), Some(Tick(3)));
    assert_eq!(m.genesis_tick(), Some(Tick(2)));
}

#[test]
fn late_deposit_is_replayed() {
    let mut m = counter_mach();
    m.register_action(Deposit::new(250, 100));
    assert_eq!(m.compute(&CounterGame, 300.0), 104);

    m.register_action(Deposit::new(50, 1000));
    assert_eq!(m.cached_tick(), Some(Tick(0)));
    assert_eq!(m.genesis_tick(), Some(Tick(0)));
    assert_eq!(m.metrics().rollbacks, 1);

    assert_eq!(m.compute(&CounterGame, 300.0), 1104);
    assert_eq!(m.cached_tick(), Some(Tick(3)));
}

#[test]
fn stale_request_returns_head_state() {
    let mut m = counter_mach();
    m.register_action(Deposit::new(250, 100));
    assert_eq!(m.compute(&CounterGame, 300.0), 104);

    let head = m.snapshots().head().unwrap();
    let (head_tick, head_state) = (head.tick(), *head.state());

    let far = at(head_tick.0 + 1001);
    assert_eq!(m.compute(&CounterGame, far), head_state);
    assert_eq!(m.metrics().budget_exceeded, 1);
    assert_eq!(m.cached_tick(), Some(Tick(3)));
    assert_eq!(m.snapshots().head().unwrap().tick(), head_tick);
}

#[test]
fn request_at_exact_budget_replays() {
    let mut m = counter_mach();
    m.register_action(Deposit::new(250, 100));
    assert_eq!(m.compute(&CounterGame, 300.0), 104);

    let head_tick = m.snapshots().head().unwrap().tick();
    let end = head_tick.0 + 1000;
    assert_eq!(m.compute(&CounterGame, at(end)), end + 1 + 100);
    assert_eq!(m.metrics().budget_exceeded, 0);
    assert_eq!(m.cached_tick(), Some(Tick(end)));
}

#[test]
fn first_compute_far_from_origin_is_refused() {
    let mut m = counter_mach();
    assert_eq!(m.compute(&CounterGame, at(1001)), 0);
    assert!(m.snapshots().is_empty());
    assert_eq!(m.compute(&CounterGame, at(1000)), 1001);
}

// ── Registration semantics ──────────────────────────────────────────

#[test]
fn duplicate_delivery_is_idempotent() {
    let mut once = counter_mach();
    let mut twice = counter_mach();
    for d in [Deposit::new(120, 5), Deposit::new(480, 7), Deposit::new(120, 9)] {
        once.register_action(d.clone());
        twice.register_action(d.clone());
        twice.register_action(d);
    }
    assert_eq!(twice.metrics().duplicate_actions, 3);
    assert_eq!(
        once.compute(&CounterGame, 900.0),
        twice.compute(&CounterGame, 900.0)
    );
}

#[test]
fn duplicate_of_late_action_does_not_roll_back() {
    let mut m = counter_mach();
    m.register_action(Deposit::new(350, 10));
    m.compute(&CounterGame, 2000.0);
    m.register_action(Deposit::new(350, 10));
    assert_eq!(m.metrics().rollbacks, 0);
    assert_eq!(m.cached_tick(), Some(Tick(20)));
}

#[test]
fn same_tick_order_follows_arrival() {
    let mut m = counter_mach();
    m.register_action(Deposit::new(510, 3));
    m.register_action(Deposit::new(590, 4));
    let values: Vec<i64> = m.actions().actions_at(Tick(5)).map(|d| d.value).collect();
    assert_eq!(values, vec![3, 4]);
}

// ── Rollback edge cases ─────────────────────────────────────────────

#[test]
fn action_older_than_every_snapshot_resets_log() {
    let config = MachConfig::new(10.0).with_origin_tick(Tick(10));
    let mut m: Mach<i64, Deposit> = Mach::new(config).unwrap();
    // Origin 10: ticks 10..=20 are processed.
    assert_eq!(m.compute(&CounterGame, 2000.0), 11);

    m.register_action(Deposit::new(400, 100));
    assert_eq!(m.metrics().log_resets, 1);
    assert!(m.snapshots().is_empty());
    assert_eq!(m.origin(), Tick(4));

    // Origin moves to 4: ticks 4..=20 plus the deposit.
    assert_eq!(m.compute(&CounterGame, 2000.0), 117);
    assert_eq!(
        m.compute(&CounterGame, 2000.0),
        m.replay_from_genesis(&CounterGame, 2000.0)
    );
}

#[test]
fn negative_time_action_before_first_compute() {
    let mut m = counter_mach();
    m.register_action(Deposit::new(-1, 50));
    assert_eq!(m.genesis_tick(), Some(Tick(-1)));
    assert_eq!(m.compute(&CounterGame, 0.0), 52);
}

#[test]
fn cached_tick_tracks_compute_and_rollback() {
    let mut m = counter_mach();
    let mut last = None;
    for ms in (0..3000).step_by(170) {
        m.compute(&CounterGame, ms as f64);
        assert!(m.cached_tick() >= last);
        last = m.cached_tick();
    }

    m.register_action(Deposit::new(730, 1));
    let cached = m.cached_tick().unwrap();
    assert_eq!(cached, Tick(7));
    assert!(cached >= m.genesis_tick().unwrap());
    assert!(m.snapshots().head().unwrap().tick() <= cached);
}

#[test]
fn compute_backwards_does_not_move_cache() {
    let mut m = counter_mach();
    m.register_action(Deposit::new(1500, 1));
    assert_eq!(m.compute(&CounterGame, 3000.0), 32);
    let ticks = m.snapshots().ticks();

    for (ms, expected) in [(0.0, 1), (1400.0, 15), (1500.0, 17), (2900.0, 31)] {
        assert_eq!(m.compute(&CounterGame, ms), expected, "at {ms}ms");
    }
    assert_eq!(m.snapshots().ticks(), ticks);
    assert_eq!(m.cached_tick(), Some(Tick(30)));
}

// ── Resource bounds ─────────────────────────────────────────────────

#[test]
fn snapshot_log_stays_logarithmic() {
    let mut m = counter_mach();
    for t in 0..4096 {
        m.compute(&CounterGame, at(t));
    }
    assert_eq!(m.compute(&CounterGame, at(4095)), 4096);
    let len = m.snapshots().len();
    assert!(len <= 14, "retained {len} snapshots after 4096 ticks");
    assert_eq!(m.snapshots().live_nodes(), len);
    assert_eq!(m.metrics().snapshots_retained, len);
}
