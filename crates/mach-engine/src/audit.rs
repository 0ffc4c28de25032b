//! Determinism audit: cached replay versus replay from genesis.
//!
//! Snapshot reuse is only sound if replaying the action log from
//! `Game::init` reaches the same state the cache does. These methods make
//! that check available to callers, typically in tests or debug builds.

use std::hash::Hash;

use mach_core::{Game, Time, Timed};
use mach_replay::{state_digest, ReplayError};
use tracing::warn;

use crate::mach::Mach;

impl<S, A> Mach<S, A>
where
    S: Clone,
    A: Timed + Hash + Eq,
{
    /// The state at `time`, replayed from `Game::init` at the origin.
    ///
    /// Ignores the snapshot log and the replay budget and mutates
    /// nothing. Cost is linear in the distance from the origin.
    pub fn replay_from_genesis<G>(&self, game: &G, time: Time) -> S
    where
        G: Game<State = S, Action = A>,
    {
        let end = self.time_to_tick(time);
        self.replay_range(game, self.origin(), end, game.init())
    }

    /// [`compute`](Mach::compute) `time` and check the result against
    /// [`replay_from_genesis`](Mach::replay_from_genesis).
    ///
    /// # Errors
    ///
    /// [`ReplayError::Divergence`] if the two states hash differently.
    /// The engine has still advanced as `compute` would.
    pub fn audit<G>(&mut self, game: &G, time: Time) -> Result<S, ReplayError>
    where
        G: Game<State = S, Action = A>,
        S: Hash,
    {
        let state = self.compute(game, time);
        let cached = state_digest(&state);
        let replayed = state_digest(&self.replay_from_genesis(game, time));
        if cached != replayed {
            let tick = self.time_to_tick(time);
            warn!(tick = tick.0, cached, replayed, "replay divergence");
            return Err(ReplayError::Divergence {
                tick,
                cached,
                replayed,
            });
        }
        Ok(state)
    }
}
