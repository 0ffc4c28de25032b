//! The exact, de-duplicated per-tick action log.
//!
//! [`ActionLog`] maps each tick to an insertion-ordered set of actions.
//! Registration is idempotent: an action structurally equal (`Hash` +
//! `Eq`) to one already at the same tick is dropped, which makes it safe
//! for a transport to deliver the same action more than once.
//!
//! # Ordering
//!
//! Actions at the same tick are applied in arrival order. No other
//! ordering is imposed; transition functions that do not commute across
//! same-tick actions must tolerate whatever order callers deliver.

use std::collections::BTreeMap;
use std::hash::Hash;

use indexmap::IndexSet;
use mach_core::Tick;

/// Tick-indexed record of every registered action.
///
/// Entries are never removed. Rolling back the snapshot log leaves this
/// log untouched; it is the input every replay is re-derived from.
#[derive(Clone, Debug)]
pub struct ActionLog<A> {
    by_tick: BTreeMap<Tick, IndexSet<A>>,
    len: usize,
}

impl<A: Hash + Eq> ActionLog<A> {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            by_tick: BTreeMap::new(),
            len: 0,
        }
    }

    /// Append `action` to `tick`'s sequence.
    ///
    /// Returns `false` (and leaves the log unchanged) if an equal action
    /// is already registered at `tick`.
    pub fn register(&mut self, tick: Tick, action: A) -> bool {
        let added = self.by_tick.entry(tick).or_default().insert(action);
        if added {
            self.len += 1;
        }
        added
    }

    /// Whether an equal action is registered at `tick`.
    pub fn contains(&self, tick: Tick, action: &A) -> bool {
        self.by_tick
            .get(&tick)
            .is_some_and(|actions| actions.contains(action))
    }

    /// Actions registered at `tick`, in arrival order.
    pub fn actions_at(&self, tick: Tick) -> impl Iterator<Item = &A> + '_ {
        self.by_tick.get(&tick).into_iter().flatten()
    }

    /// Number of actions registered at `tick`.
    pub fn count_at(&self, tick: Tick) -> usize {
        self.by_tick.get(&tick).map_or(0, IndexSet::len)
    }
}

impl<A> ActionLog<A> {
    /// Total number of actions across all ticks.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no action has been registered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct ticks with at least one action.
    pub fn tick_count(&self) -> usize {
        self.by_tick.len()
    }

    /// The earliest tick holding an action.
    pub fn earliest_tick(&self) -> Option<Tick> {
        self.by_tick.keys().next().copied()
    }

    /// The latest tick holding an action.
    pub fn latest_tick(&self) -> Option<Tick> {
        self.by_tick.keys().next_back().copied()
    }

    /// Iterate `(tick, actions)` pairs in tick order.
    pub fn iter(&self) -> impl Iterator<Item = (Tick, &IndexSet<A>)> + '_ {
        self.by_tick.iter().map(|(&tick, actions)| (tick, actions))
    }
}

impl<A: Hash + Eq> Default for ActionLog<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mach_test_utils::Deposit;

    #[test]
    fn register_appends_in_arrival_order() {
        let mut log = ActionLog::new();
        assert!(log.register(Tick(2), Deposit::new(250, 100)));
        assert!(log.register(Tick(2), Deposit::new(210, 7)));
        assert!(log.register(Tick(2), Deposit::new(299, 3)));
        let values: Vec<i64> = log.actions_at(Tick(2)).map(|d| d.value).collect();
        assert_eq!(values, vec![100, 7, 3]);
        assert_eq!(log.len(), 3);
        assert_eq!(log.tick_count(), 1);
    }

    #[test]
    fn duplicate_is_a_no_op() {
        let mut log = ActionLog::new();
        assert!(log.register(Tick(2), Deposit::new(250, 100)));
        assert!(!log.register(Tick(2), Deposit::new(250, 100)));
        assert_eq!(log.count_at(Tick(2)), 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn equal_actions_at_different_ticks_are_distinct() {
        let mut log = ActionLog::new();
        let d = Deposit::new(250, 100);
        assert!(log.register(Tick(2), d.clone()));
        assert!(log.register(Tick(3), d.clone()));
        assert!(log.contains(Tick(2), &d));
        assert!(log.contains(Tick(3), &d));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn duplicate_does_not_reorder() {
        let mut log = ActionLog::new();
        log.register(Tick(0), Deposit::new(0, 1));
        log.register(Tick(0), Deposit::new(0, 2));
        log.register(Tick(0), Deposit::new(0, 1));
        let values: Vec<i64> = log.actions_at(Tick(0)).map(|d| d.value).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn empty_tick_yields_nothing() {
        let log: ActionLog<Deposit> = ActionLog::new();
        assert_eq!(log.actions_at(Tick(5)).count(), 0);
        assert_eq!(log.count_at(Tick(5)), 0);
        assert!(log.is_empty());
        assert_eq!(log.earliest_tick(), None);
    }

    #[test]
    fn earliest_and_latest() {
        let mut log = ActionLog::new();
        log.register(Tick(9), Deposit::new(900, 1));
        log.register(Tick(-3), Deposit::new(-300, 1));
        log.register(Tick(4), Deposit::new(400, 1));
        assert_eq!(log.earliest_tick(), Some(Tick(-3)));
        assert_eq!(log.latest_tick(), Some(Tick(9)));
        let ticks: Vec<Tick> = log.iter().map(|(t, _)| t).collect();
        assert_eq!(ticks, vec![Tick(-3), Tick(4), Tick(9)]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn len_counts_distinct_per_tick(
                entries in proptest::collection::vec((0i64..8, 0i64..4), 0..64),
            ) {
                let mut log = ActionLog::new();
                for &(tick, value) in &entries {
                    log.register(Tick(tick), Deposit::new(tick * 100, value));
                }
                let distinct: std::collections::HashSet<_> = entries.iter().collect();
                prop_assert_eq!(log.len(), distinct.len());
                let summed: usize = log.iter().map(|(_, a)| a.len()).sum();
                prop_assert_eq!(summed, log.len());
            }
        }
    }
}
