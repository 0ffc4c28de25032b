//! Arena-backed persistent snapshot log for Mach simulations.
//!
//! Retained states form a singly-linked chain running from the newest
//! snapshot back towards genesis. Nodes live in a slab
//! ([`SnapshotArena`]) and link to each other through generation-checked
//! [`NodeHandle`]s instead of pointers.
//!
//! # Architecture
//!
//! ```text
//! SnapshotLog (live head + checkpoints)
//! └── SnapshotArena
//!     ├── Slot[] (generation, refcount, Option<SnapshotNode>)
//!     └── free list (indices of vacated slots)
//! ```
//!
//! # Structural sharing
//!
//! Every slot carries a reference count covering chain heads and `older`
//! links. Chain operations consume one reference to the chain they are
//! given and return one reference to the new head. A node shared between
//! chains is cloned before it is modified, so a [`Checkpoint`] never
//! observes later pushes or rollbacks on the live chain. Nodes return to
//! the free list as soon as their count reaches zero.
//!
//! # Retention
//!
//! [`SnapshotLog::push`] behaves like incrementing a binary counter: each
//! node is a digit, and exhausting a node's `life` carries its state one
//! level deeper into history. N pushes leave O(log N) nodes, dense near
//! the head and exponentially sparser with age.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod chain;
pub mod error;
pub mod handle;
pub mod log;
pub mod slab;

pub use chain::ChainIter;
pub use error::ArenaError;
pub use handle::NodeHandle;
pub use log::{Checkpoint, LogId, SnapshotLog};
pub use slab::{SnapshotArena, SnapshotNode};
