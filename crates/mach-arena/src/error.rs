//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors from checked arena access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// A [`NodeHandle`](crate::NodeHandle) whose slot has been vacated or reused.
    StaleHandle {
        /// Slot index encoded in the handle.
        index: u32,
        /// Generation encoded in the handle.
        handle_generation: u32,
        /// Current generation of the slot.
        slot_generation: u32,
    },
    /// A handle index beyond the arena's slot table.
    OutOfBounds {
        /// Slot index encoded in the handle.
        index: u32,
        /// Number of slots in the arena.
        slots: usize,
    },
    /// A [`Checkpoint`](crate::Checkpoint) taken from a different log.
    ForeignCheckpoint {
        /// Id of the log the operation was called on.
        expected: u64,
        /// Id recorded in the checkpoint.
        found: u64,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleHandle {
                index,
                handle_generation,
                slot_generation,
            } => write!(
                f,
                "stale handle: slot {index} generation {handle_generation}, current {slot_generation}"
            ),
            Self::OutOfBounds { index, slots } => {
                write!(f, "handle index {index} out of bounds ({slots} slots)")
            }
            Self::ForeignCheckpoint { expected, found } => {
                write!(f, "checkpoint belongs to log {found}, not log {expected}")
            }
        }
    }
}

impl Error for ArenaError {}
