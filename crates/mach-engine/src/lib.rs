//! Replay engine orchestrating Mach re-simulation.
//!
//! [`Mach`] owns one tick clock, one [`ActionLog`](mach_replay::ActionLog)
//! and one [`SnapshotLog`](mach_arena::SnapshotLog). Callers register
//! actions in any order and ask for the state at any time; the engine
//! replays forward from the nearest retained snapshot and rolls the
//! snapshot log back whenever an action arrives for a tick it has
//! already computed past.
//!
//! The engine is single-threaded and synchronous. Every mutating call
//! takes `&mut self`; callers sharing a `Mach` must serialize access.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod audit;
pub mod config;
pub mod mach;
pub mod metrics;

pub use config::MachConfig;
pub use mach::{Mach, MachCheckpoint};
pub use metrics::MachMetrics;
