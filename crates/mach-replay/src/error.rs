//! Error types for replay verification.

use std::fmt;

use mach_core::Tick;

/// Errors raised while verifying replay determinism.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplayError {
    /// The state reached through the snapshot cache differs from the
    /// state re-derived from genesis.
    Divergence {
        /// Tick at which the states were compared.
        tick: Tick,
        /// Digest of the cached replay.
        cached: u64,
        /// Digest of the from-genesis replay.
        replayed: u64,
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Divergence {
                tick,
                cached,
                replayed,
            } => write!(
                f,
                "replay divergence at tick {tick}: \
                 cached={cached:#018x}, replayed={replayed:#018x}"
            ),
        }
    }
}

impl std::error::Error for ReplayError {}
