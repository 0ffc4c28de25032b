//! Reusable fixture games.

use mach_core::{Game, Tick, Time, Timed};

/// Adds `value` to the counter at `time_ms`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Deposit {
    pub time_ms: i64,
    pub value: i64,
}

impl Deposit {
    pub fn new(time_ms: i64, value: i64) -> Self {
        Self { time_ms, value }
    }
}

impl Timed for Deposit {
    fn time(&self) -> Time {
        self.time_ms as Time
    }
}

/// `init = 0`, `tick = s + 1`, `when = s + value`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CounterGame;

impl Game for CounterGame {
    type State = i64;
    type Action = Deposit;

    fn init(&self) -> i64 {
        0
    }

    fn tick(&self, state: i64) -> i64 {
        state + 1
    }

    fn when(&self, action: &Deposit, state: i64) -> i64 {
        state + action.value
    }
}

/// An action carrying an opaque label.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Stamp {
    pub time_ms: i64,
    pub label: u32,
}

impl Stamp {
    pub fn new(time_ms: i64, label: u32) -> Self {
        Self { time_ms, label }
    }
}

impl Timed for Stamp {
    fn time(&self) -> Time {
        self.time_ms as Time
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LedgerEntry {
    Ticked,
    Applied(u32),
}

/// Records every transition, in order.
///
/// The state is the full history of the run, so two replays agree only if
/// they applied exactly the same ticks and actions in exactly the same
/// order. `tick` counts processed ticks in the first field.
#[derive(Clone, Copy, Debug, Default)]
pub struct LedgerGame;

impl Game for LedgerGame {
    type State = (u64, Vec<LedgerEntry>);
    type Action = Stamp;

    fn init(&self) -> Self::State {
        (0, Vec::new())
    }

    fn tick(&self, (ticks, mut entries): Self::State) -> Self::State {
        entries.push(LedgerEntry::Ticked);
        (ticks + 1, entries)
    }

    fn when(&self, action: &Stamp, (ticks, mut entries): Self::State) -> Self::State {
        entries.push(LedgerEntry::Applied(action.label));
        (ticks, entries)
    }
}

/// Millisecond time at the start of `tick` for a `ticks_per_second` clock.
///
/// Exact for rates that divide 1000.
pub fn tick_time(ticks_per_second: i64, tick: Tick) -> i64 {
    tick.0 * 1000 / ticks_per_second
}
