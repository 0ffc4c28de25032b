//! Mach: deterministic re-simulation with late-action rollback.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Mach sub-crates. For most users, adding `mach` as a single dependency is
//! sufficient.
//!
//! A simulation is a pure transition triple (`init`, `tick`, `when`) over a
//! caller-defined state. Actions carry a wall-clock time and may arrive in
//! any order; asking for the state at some time replays the action log
//! forward from the nearest retained snapshot. An action arriving for a
//! tick that was already computed rolls the snapshot log back so the next
//! query re-simulates from before it.
//!
//! # Quick start
//!
//! ```rust
//! use mach::prelude::*;
//!
//! #[derive(Clone, Debug, Hash, PartialEq, Eq)]
//! struct Deposit { at_ms: i64, value: i64 }
//! impl Timed for Deposit {
//!     fn time(&self) -> Time { self.at_ms as Time }
//! }
//!
//! let game = GameFns::new(|| 0i64, |s| s + 1, |d: &Deposit, s| s + d.value);
//! let mut mach: Mach<i64, Deposit> = Mach::with_tick_rate(10.0).unwrap();
//!
//! // Tick 2 at 10 ticks per second.
//! mach.register_action(Deposit { at_ms: 250, value: 100 });
//! assert_eq!(mach.compute(&game, 300.0), 104);
//!
//! // A late action for tick 0 rolls back and re-simulates.
//! mach.register_action(Deposit { at_ms: 50, value: 1000 });
//! assert_eq!(mach.compute(&game, 300.0), 1104);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mach-core` | Ticks, the tick clock, transition traits, config errors |
//! | [`arena`] | `mach-arena` | Snapshot arena, snapshot log, checkpoints |
//! | [`replay`] | `mach-replay` | Action log and state digests |
//! | [`engine`] | `mach-engine` | The `Mach` engine, its config and metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`mach-core`).
///
/// Contains [`types::Tick`], the [`types::TickClock`] quantizer, and the
/// [`types::Game`] transition trait.
pub use mach_core as types;

/// Snapshot storage (`mach-arena`).
///
/// Most users only read [`arena::SnapshotLog`] through
/// [`engine::Mach::snapshots`] for diagnostics.
pub use mach_arena as arena;

/// Action log and state digests (`mach-replay`).
pub use mach_replay as replay;

/// The re-simulation engine (`mach-engine`).
///
/// [`engine::Mach`] with its [`engine::MachConfig`] and
/// [`engine::MachMetrics`].
pub use mach_engine as engine;

/// Common imports for typical Mach usage.
///
/// ```rust
/// use mach::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use mach_core::{Game, GameFns, Tick, TickClock, Time, Timed};

    // Errors
    pub use mach_core::ConfigError;
    pub use mach_replay::ReplayError;

    // Engine
    pub use mach_engine::{Mach, MachCheckpoint, MachConfig, MachMetrics};
}
