//! Transition function traits supplied by the caller.

use std::hash::Hash;
use std::marker::PhantomData;

use crate::id::Time;

/// A value stamped with the wall-clock time it takes effect.
pub trait Timed {
    /// Wall-clock time in milliseconds.
    fn time(&self) -> Time;
}

/// The deterministic transition triple driving a simulation.
///
/// All three functions must be pure: the replay engine calls them
/// repeatedly with identical inputs while re-simulating after a late
/// action and requires identical outputs every time.
///
/// Actions are compared structurally (`Hash` + `Eq`) to suppress
/// duplicate registrations.
pub trait Game {
    /// Simulation state. Cloned into the snapshot log as replay proceeds.
    type State: Clone;
    /// Caller-defined event applied after a tick's baseline transition.
    type Action: Timed + Hash + Eq;

    /// State at the origin tick, before any transition.
    fn init(&self) -> Self::State;

    /// Advance `state` by one tick.
    fn tick(&self, state: Self::State) -> Self::State;

    /// Apply `action` to `state`.
    fn when(&self, action: &Self::Action, state: Self::State) -> Self::State;
}

/// A [`Game`] assembled from three closures.
///
/// ```
/// use mach_core::{Game, GameFns, Timed};
///
/// #[derive(Hash, PartialEq, Eq)]
/// struct Bump { at_ms: u32 }
/// impl Timed for Bump {
///     fn time(&self) -> f64 { self.at_ms as f64 }
/// }
///
/// let game = GameFns::new(|| 0u32, |s| s + 1, |_a: &Bump, s| s * 2);
/// assert_eq!(game.tick(game.init()), 1);
/// assert_eq!(game.when(&Bump { at_ms: 0 }, 3), 6);
/// ```
pub struct GameFns<A, I, T, W> {
    init: I,
    tick: T,
    when: W,
    _action: PhantomData<fn(&A)>,
}

impl<A, I, T, W> GameFns<A, I, T, W> {
    /// Bundle `init`, `tick` and `when` into a [`Game`].
    pub fn new<S>(init: I, tick: T, when: W) -> Self
    where
        I: Fn() -> S,
        T: Fn(S) -> S,
        W: Fn(&A, S) -> S,
    {
        Self {
            init,
            tick,
            when,
            _action: PhantomData,
        }
    }
}

impl<S, A, I, T, W> Game for GameFns<A, I, T, W>
where
    S: Clone,
    A: Timed + Hash + Eq,
    I: Fn() -> S,
    T: Fn(S) -> S,
    W: Fn(&A, S) -> S,
{
    type State = S;
    type Action = A;

    fn init(&self) -> S {
        (self.init)()
    }

    fn tick(&self, state: S) -> S {
        (self.tick)(state)
    }

    fn when(&self, action: &A, state: S) -> S {
        (self.when)(action, state)
    }
}
