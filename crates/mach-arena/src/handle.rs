//! Node handles.
//!
//! A [`NodeHandle`] names a slot in the [`SnapshotArena`](crate::SnapshotArena).
//! It is generation-scoped: when a slot is vacated its generation is bumped,
//! so a handle kept past its node's lifetime is detected in O(1).

use std::fmt;

/// Location of a snapshot node within the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct NodeHandle {
    /// Slot index.
    pub(crate) index: u32,
    /// Slot generation at allocation time.
    pub(crate) generation: u32,
}

impl NodeHandle {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// The slot index this handle points into.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The slot generation this handle was issued for.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle(idx={}, gen={})", self.index, self.generation)
    }
}
