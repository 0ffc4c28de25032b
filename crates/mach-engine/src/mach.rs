//! The re-simulation aggregate.
//!
//! [`Mach`] ties together the tick clock, the action log, and the
//! snapshot log. [`register_action`](Mach::register_action) records input
//! and invalidates any computed future it contradicts;
//! [`compute`](Mach::compute) replays forward from the newest retained
//! snapshot to the requested tick.
//!
//! # Snapshot semantics
//!
//! The snapshot stored at tick `t` is the state *before* tick `t` is
//! processed. Processing tick `t` applies `Game::tick` and then every
//! action registered at `t`, in log order. `compute(time)` returns the
//! state after processing `time_to_tick(time)`.
//!
//! # Ownership model
//!
//! `Mach` is [`Send`] when its state and action types are, and all
//! mutating methods take `&mut self`. No internal synchronization exists.

use std::hash::Hash;
use std::time::Instant;

use mach_arena::{ArenaError, Checkpoint, SnapshotLog, SnapshotNode};
use mach_core::{ConfigError, Game, Tick, TickClock, Time, Timed};
use mach_replay::ActionLog;
use tracing::{debug, trace, warn};

use crate::config::MachConfig;
use crate::metrics::MachMetrics;

// Compile-time assertion: Mach is Send for Send state and actions.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Mach<u64, u64>>();
    }
};

/// Deterministic re-simulation engine with bounded-memory rollback.
pub struct Mach<S, A> {
    config: MachConfig,
    clock: TickClock,
    genesis_tick: Option<Tick>,
    cached_tick: Option<Tick>,
    actions: ActionLog<A>,
    snapshots: SnapshotLog<S>,
    /// Tick of every newly registered action, in arrival order.
    arrivals: Vec<Tick>,
    metrics: MachMetrics,
}

/// A pinned copy of the engine's snapshot cache.
///
/// Taken with [`Mach::checkpoint`] and handed back to [`Mach::restore`]
/// or [`Mach::discard`]. Holds a reference on the pinned snapshot chain
/// until then.
#[must_use = "dropping a checkpoint without discarding it pins its snapshots"]
#[derive(Debug)]
pub struct MachCheckpoint {
    snapshots: Checkpoint,
    cached_tick: Option<Tick>,
    arrivals: usize,
}

impl MachCheckpoint {
    /// Cached high-water mark when the checkpoint was taken.
    pub fn cached_tick(&self) -> Option<Tick> {
        self.cached_tick
    }
}

impl<S, A> Mach<S, A> {
    /// The configuration this engine was created with.
    pub fn config(&self) -> &MachConfig {
        &self.config
    }

    /// The tick clock.
    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    /// The tick `time` falls into.
    pub fn time_to_tick(&self, time: Time) -> Tick {
        self.clock.time_to_tick(time)
    }

    /// Smallest tick of any registered action, or `None` before the first.
    pub fn genesis_tick(&self) -> Option<Tick> {
        self.genesis_tick
    }

    /// Highest tick computed and still valid, or `None` before the first
    /// compute.
    pub fn cached_tick(&self) -> Option<Tick> {
        self.cached_tick
    }

    /// The tick at which replay from `Game::init` starts.
    ///
    /// The configured origin, moved earlier if an action precedes it.
    pub fn origin(&self) -> Tick {
        match self.genesis_tick {
            Some(genesis) => genesis.min(self.config.origin_tick),
            None => self.config.origin_tick,
        }
    }

    /// The action log.
    pub fn actions(&self) -> &ActionLog<A> {
        &self.actions
    }

    /// The snapshot log.
    pub fn snapshots(&self) -> &SnapshotLog<S> {
        &self.snapshots
    }

    /// Cumulative counters.
    pub fn metrics(&self) -> &MachMetrics {
        &self.metrics
    }
}

impl<S, A> Mach<S, A>
where
    S: Clone,
    A: Timed + Hash + Eq,
{
    /// Create an engine with empty logs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(config: MachConfig) -> Result<Self, ConfigError> {
        let clock = config.validated_clock()?;
        Ok(Self {
            config,
            clock,
            genesis_tick: None,
            cached_tick: None,
            actions: ActionLog::new(),
            snapshots: SnapshotLog::new(),
            arrivals: Vec::new(),
            metrics: MachMetrics::default(),
        })
    }

    /// Create an engine at `ticks_per_second` with default settings.
    pub fn with_tick_rate(ticks_per_second: f64) -> Result<Self, ConfigError> {
        Self::new(MachConfig::new(ticks_per_second))
    }

    /// Record `action` at the tick its time falls into.
    ///
    /// Returns `false` if an equal action was already registered at that
    /// tick; the call is then a no-op apart from the duplicate counter.
    ///
    /// A new action for a tick before the cached high-water mark rolls
    /// the snapshot log back to the newest node at or before that tick,
    /// so the next compute re-simulates from there. If every retained
    /// node is newer than the action, the snapshot log is cleared and the
    /// next compute restarts from `Game::init`.
    pub fn register_action(&mut self, action: A) -> bool {
        let tick = self.clock.time_to_tick(action.time());
        self.genesis_tick = Some(self.genesis_tick.map_or(tick, |g| g.min(tick)));

        if !self.actions.register(tick, action) {
            self.metrics.duplicate_actions += 1;
            trace!(tick = tick.0, "duplicate action ignored");
            return false;
        }
        self.metrics.actions_registered += 1;
        self.arrivals.push(tick);

        if let Some(cached) = self.cached_tick {
            if tick < cached {
                self.invalidate_from(tick, cached);
            }
        }
        true
    }

    fn invalidate_from(&mut self, tick: Tick, cached: Tick) {
        let dropped = self.snapshots.rollback_to(tick);
        let reset = self
            .snapshots
            .head()
            .is_some_and(|head| head.tick() > tick);
        if reset {
            self.snapshots.clear();
            self.metrics.log_resets += 1;
        }
        self.cached_tick = Some(cached.min(tick));

        self.metrics.rollbacks += 1;
        self.metrics.snapshots_dropped += dropped as u64;
        self.metrics.snapshots_retained = self.snapshots.len();
        debug!(
            tick = tick.0,
            cached = cached.0,
            dropped,
            reset,
            "late action rolled back snapshot log"
        );
    }

    /// Pin the current snapshot cache.
    ///
    /// Typically taken before a speculative compute far ahead, so the
    /// snapshots it creates can be dropped again with
    /// [`restore`](Mach::restore).
    pub fn checkpoint(&mut self) -> MachCheckpoint {
        MachCheckpoint {
            snapshots: self.snapshots.checkpoint(),
            cached_tick: self.cached_tick,
            arrivals: self.arrivals.len(),
        }
    }

    /// Return to the snapshot cache pinned by `checkpoint`.
    ///
    /// Actions registered since the checkpoint stay in the action log. If
    /// any of them lies before the pinned high-water mark, the restored
    /// cache is rolled back exactly as a late registration would.
    ///
    /// # Errors
    ///
    /// [`ArenaError::ForeignCheckpoint`] if `checkpoint` came from another
    /// engine; the current cache is left untouched.
    pub fn restore(&mut self, checkpoint: MachCheckpoint) -> Result<(), ArenaError> {
        let MachCheckpoint {
            snapshots,
            cached_tick,
            arrivals,
        } = checkpoint;
        self.snapshots.restore(snapshots)?;
        self.cached_tick = cached_tick;

        let earliest_since = self
            .arrivals
            .get(arrivals..)
            .and_then(|since| since.iter().min().copied());
        if let (Some(tick), Some(cached)) = (earliest_since, cached_tick) {
            if tick < cached {
                self.invalidate_from(tick, cached);
            }
        }
        self.metrics.snapshots_retained = self.snapshots.len();
        debug!(cached = ?self.cached_tick, "restored snapshot checkpoint");
        Ok(())
    }

    /// Release a checkpoint without restoring it.
    ///
    /// # Errors
    ///
    /// [`ArenaError::ForeignCheckpoint`] if `checkpoint` came from another
    /// engine.
    pub fn discard(&mut self, checkpoint: MachCheckpoint) -> Result<(), ArenaError> {
        self.snapshots.discard(checkpoint.snapshots)
    }

    /// The state after processing the tick `time` falls into.
    ///
    /// Replays from the newest retained snapshot, pushing each
    /// intermediate state into the snapshot log and advancing the cached
    /// high-water mark. A tick before the snapshot head is answered by a
    /// read-only replay from the nearest older snapshot, leaving the logs
    /// untouched.
    ///
    /// If the gap from the starting snapshot exceeds
    /// [`MachConfig::max_replay_ticks`], the starting state is returned
    /// as-is without replaying.
    pub fn compute<G>(&mut self, game: &G, time: Time) -> S
    where
        G: Game<State = S, Action = A>,
    {
        let started = Instant::now();
        let end = self.clock.time_to_tick(time);
        let head_tick = self.snapshots.head().map(SnapshotNode::tick);

        let state = match head_tick {
            Some(head) if end < head => {
                self.metrics.historical_queries += 1;
                self.replay_historical(game, end)
            }
            _ => {
                let (start, state, stored) = match self.snapshots.head() {
                    Some(node) => (node.tick(), node.state().clone(), true),
                    None => (self.origin(), game.init(), false),
                };
                self.advance(game, start, state, end, stored)
            }
        };

        self.metrics.snapshots_retained = self.snapshots.len();
        self.metrics.last_compute_us = started.elapsed().as_micros() as u64;
        state
    }

    /// Replay `start..=end`, recording snapshots along the way.
    ///
    /// `start_stored` marks that `state` already sits in the log at
    /// `start`, so it is not pushed again.
    fn advance<G>(&mut self, game: &G, start: Tick, state: S, end: Tick, start_stored: bool) -> S
    where
        G: Game<State = S, Action = A>,
    {
        let Some(gap) = end.ticks_since(start) else {
            return state;
        };
        if gap > self.config.max_replay_ticks {
            self.budget_exceeded(start, end);
            return state;
        }

        let mut state = state;
        let mut t = start;
        loop {
            self.cached_tick = Some(self.cached_tick.map_or(t, |c| c.max(t)));
            if !(start_stored && t == start) {
                self.snapshots.push(t, state.clone());
            }
            state = self.process_tick(game, t, state);
            if t == end {
                break;
            }
            t = t.next();
        }

        self.metrics.ticks_replayed += gap + 1;
        trace!(start = start.0, end = end.0, replayed = gap + 1, "advanced");
        state
    }

    fn replay_historical<G>(&mut self, game: &G, end: Tick) -> S
    where
        G: Game<State = S, Action = A>,
    {
        let (start, state) = match self.snapshots.nearest_at_or_before(end) {
            Some(node) => (node.tick(), node.state().clone()),
            None => (self.origin(), game.init()),
        };
        let Some(gap) = end.ticks_since(start) else {
            return state;
        };
        if gap > self.config.max_replay_ticks {
            self.budget_exceeded(start, end);
            return state;
        }
        self.metrics.ticks_replayed += gap + 1;
        self.replay_range(game, start, end, state)
    }

    /// Process ticks `start..=end` on `state` without touching any log.
    pub(crate) fn replay_range<G>(&self, game: &G, start: Tick, end: Tick, state: S) -> S
    where
        G: Game<State = S, Action = A>,
    {
        if end < start {
            return state;
        }
        let mut state = state;
        let mut t = start;
        loop {
            state = self.process_tick(game, t, state);
            if t == end {
                return state;
            }
            t = t.next();
        }
    }

    #[inline]
    fn process_tick<G>(&self, game: &G, t: Tick, state: S) -> S
    where
        G: Game<State = S, Action = A>,
    {
        let state = game.tick(state);
        self.actions
            .actions_at(t)
            .fold(state, |state, action| game.when(action, state))
    }

    fn budget_exceeded(&mut self, start: Tick, end: Tick) {
        self.metrics.budget_exceeded += 1;
        warn!(
            start = start.0,
            end = end.0,
            budget = self.config.max_replay_ticks,
            "replay gap exceeds budget; returning starting state"
        );
    }
}
