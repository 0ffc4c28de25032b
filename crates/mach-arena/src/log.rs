//! The live snapshot log and its checkpoints.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use mach_core::Tick;
use smallvec::SmallVec;

use crate::chain::ChainIter;
use crate::error::ArenaError;
use crate::handle::NodeHandle;
use crate::slab::{SnapshotArena, SnapshotNode};

/// Counter for unique [`LogId`] allocation.
static LOG_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a [`SnapshotLog`].
///
/// Checkpoints record the id of the log that issued them so they cannot
/// be restored into, or discarded from, a different log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogId(u64);

impl LogId {
    fn next() -> Self {
        Self(LOG_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pinned chain head sharing structure with the live log.
///
/// Holds one reference on its head node. Return it with
/// [`SnapshotLog::discard`] or [`SnapshotLog::restore`]; a checkpoint
/// that is simply dropped keeps its nodes alive until the log is dropped.
#[must_use = "dropping a checkpoint without discarding it pins its nodes"]
#[derive(Debug)]
pub struct Checkpoint {
    log: LogId,
    head: Option<NodeHandle>,
}

impl Checkpoint {
    /// Handle of the pinned head, if the chain was non-empty.
    pub fn head(&self) -> Option<NodeHandle> {
        self.head
    }

    /// Id of the issuing log.
    pub fn log_id(&self) -> LogId {
        self.log
    }
}

/// The retained-snapshot history of one simulation.
///
/// Owns the arena and the live chain head. Ticks read from the head
/// through `older` links are strictly decreasing.
pub struct SnapshotLog<S> {
    id: LogId,
    arena: SnapshotArena<S>,
    head: Option<NodeHandle>,
}

impl<S> SnapshotLog<S> {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            id: LogId::next(),
            arena: SnapshotArena::new(),
            head: None,
        }
    }

    /// This log's id.
    pub fn id(&self) -> LogId {
        self.id
    }

    /// The newest retained snapshot.
    pub fn head(&self) -> Option<&SnapshotNode<S>> {
        self.head.map(|h| self.arena.node(h))
    }

    /// Iterate retained snapshots, newest first.
    pub fn iter(&self) -> ChainIter<'_, S> {
        self.arena.walk(self.head)
    }

    /// Number of retained snapshots in the live chain.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the live chain is empty.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Ticks of the live chain, newest first.
    pub fn ticks(&self) -> SmallVec<[Tick; 32]> {
        self.iter().map(SnapshotNode::tick).collect()
    }

    /// The newest retained snapshot at or before `tick`.
    pub fn nearest_at_or_before(&self, tick: Tick) -> Option<&SnapshotNode<S>> {
        self.iter().find(|node| node.tick <= tick)
    }

    /// Nodes alive in the arena, counting those pinned only by checkpoints.
    pub fn live_nodes(&self) -> usize {
        self.arena.live_count()
    }

    /// Read-only access to the backing arena.
    pub fn arena(&self) -> &SnapshotArena<S> {
        &self.arena
    }

    /// Release the whole live chain.
    pub fn clear(&mut self) {
        if let Some(head) = self.head.take() {
            self.arena.release(head);
        }
    }

    /// Pin the current live chain.
    pub fn checkpoint(&mut self) -> Checkpoint {
        if let Some(head) = self.head {
            self.arena.retain(head);
        }
        Checkpoint {
            log: self.id,
            head: self.head,
        }
    }

    /// Iterate a pinned chain, newest first.
    ///
    /// # Errors
    ///
    /// [`ArenaError::ForeignCheckpoint`] if `checkpoint` came from another log.
    pub fn view(&self, checkpoint: &Checkpoint) -> Result<ChainIter<'_, S>, ArenaError> {
        self.check_owner(checkpoint)?;
        Ok(self.arena.walk(checkpoint.head))
    }

    /// Replace the live chain with a pinned one, consuming the checkpoint.
    ///
    /// # Errors
    ///
    /// [`ArenaError::ForeignCheckpoint`] if `checkpoint` came from another
    /// log; the live chain is left untouched.
    pub fn restore(&mut self, checkpoint: Checkpoint) -> Result<(), ArenaError> {
        self.check_owner(&checkpoint)?;
        self.clear();
        self.head = checkpoint.head;
        Ok(())
    }

    /// Release a pinned chain.
    ///
    /// # Errors
    ///
    /// [`ArenaError::ForeignCheckpoint`] if `checkpoint` came from another log.
    pub fn discard(&mut self, checkpoint: Checkpoint) -> Result<(), ArenaError> {
        self.check_owner(&checkpoint)?;
        if let Some(head) = checkpoint.head {
            self.arena.release(head);
        }
        Ok(())
    }

    fn check_owner(&self, checkpoint: &Checkpoint) -> Result<(), ArenaError> {
        if checkpoint.log != self.id {
            return Err(ArenaError::ForeignCheckpoint {
                expected: self.id.0,
                found: checkpoint.log.0,
            });
        }
        Ok(())
    }
}

impl<S: Clone> SnapshotLog<S> {
    /// Offer `state` at `tick` to the retention policy.
    ///
    /// See [`SnapshotArena::push`] for the decay rules. `tick` must be
    /// newer than the current head.
    pub fn push(&mut self, tick: Tick, state: S) {
        let head = self.head.take();
        self.head = Some(self.arena.push(head, tick, state));
    }

    /// Number of head nodes newer than `target` (clamped to keep the
    /// oldest node).
    pub fn find_rollback_amount(&self, target: Tick) -> usize {
        self.arena.find_rollback_amount(target, self.head)
    }

    /// Drop `amount` nodes from the head, folding their weight into the
    /// landing node.
    pub fn rollback(&mut self, amount: usize) {
        let head = self.head.take();
        self.head = self.arena.rollback(amount, head);
    }

    /// Roll back to the newest node at or before `target` and return the
    /// number of nodes dropped.
    pub fn rollback_to(&mut self, target: Tick) -> usize {
        let amount = self.find_rollback_amount(target);
        self.rollback(amount);
        amount
    }
}

impl<S> Default for SnapshotLog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for SnapshotLog<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotLog")
            .field("id", &self.id)
            .field("ticks", &self.ticks())
            .field("live_nodes", &self.live_nodes())
            .finish()
    }
}
