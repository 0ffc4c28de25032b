//! Exact action logging and state digests for Mach re-simulation.
//!
//! The [`ActionLog`] is the only persistent record of causal input: it
//! maps every tick to the actions registered for it, in arrival order,
//! with structural duplicates suppressed. Snapshot rollback never touches
//! it, so any state can always be re-derived from it.
//!
//! [`state_digest`] folds any `Hash` value into a 64-bit FNV-1a digest,
//! used to compare a cached replay against a from-genesis replay without
//! requiring `PartialEq` or `Debug` on the state type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action_log;
pub mod error;
pub mod hash;

pub use action_log::ActionLog;
pub use error::ReplayError;
pub use hash::{state_digest, FnvHasher};
