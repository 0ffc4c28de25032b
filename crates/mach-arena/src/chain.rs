//! Persistent chain operations: push, rollback, and rollback search.
//!
//! Each operation takes a chain by its head handle and returns the head
//! of the resulting chain. Mutating operations consume the caller's
//! reference to the input head and hand back a reference to the output
//! head; nodes shared with other chains are copied before they change.

use mach_core::Tick;

use crate::handle::NodeHandle;
use crate::slab::{SnapshotArena, SnapshotNode};

impl<S: Clone> SnapshotArena<S> {
    /// Offer `state` at `tick` to the chain headed by `chain`.
    ///
    /// - Empty chain: a single provisional node.
    /// - Provisional head (`keep == false`): the head is marked kept and
    ///   `state` is discarded.
    /// - Kept head with `life > 0`: a new head is created and the old head
    ///   is demoted (`keep = false`, `life - 1`).
    /// - Kept head with `life == 0`: a new head is created at `tick` and
    ///   the old head's state carries into the older chain as if pushed
    ///   there at the old head's tick.
    ///
    /// `tick` must be greater than the head's tick.
    pub fn push(&mut self, chain: Option<NodeHandle>, tick: Tick, state: S) -> NodeHandle {
        let Some(head) = chain else {
            return self.alloc(SnapshotNode::new(tick, state, None));
        };
        debug_assert!(
            self.node(head).tick < tick,
            "push at {tick} onto head at {}",
            self.node(head).tick
        );

        let head = self.make_mut(head);
        let node = self.node_mut(head);
        if !node.keep {
            node.keep = true;
            return head;
        }
        if node.life > 0 {
            node.keep = false;
            node.life -= 1;
            return self.alloc(SnapshotNode::new(tick, state, Some(head)));
        }

        // Carry: the head's slot becomes the new head and its old
        // contents move one level down.
        let old_tick = std::mem::replace(&mut node.tick, tick);
        let old_state = std::mem::replace(&mut node.state, state);
        let older = node.older.take();
        node.keep = false;
        let carried = self.push(older, old_tick, old_state);
        self.node_mut(head).older = Some(carried);
        head
    }

    /// Drop `amount` nodes from the head of `chain`.
    ///
    /// Each dropped node contributes `life + 1` to a running `cut`, which is
    /// folded into the landing node's `life` (and its `keep` is reset) so
    /// the decay schedule continues from where the dropped nodes left it.
    /// Dropping past the oldest node yields an empty chain.
    pub fn rollback(&mut self, amount: usize, chain: Option<NodeHandle>) -> Option<NodeHandle> {
        let mut current = chain?;
        let mut cut: u32 = 0;
        for _ in 0..amount {
            let node = self.node(current);
            cut = cut.saturating_add(node.life).saturating_add(1);
            let older = node.older;
            if let Some(older) = older {
                self.retain(older);
            }
            self.release(current);
            current = older?;
        }
        if cut == 0 && !self.node(current).keep {
            return Some(current);
        }
        let current = self.make_mut(current);
        let node = self.node_mut(current);
        node.keep = false;
        node.life = node.life.saturating_add(cut);
        Some(current)
    }

    /// Count the nodes newer than `target` from the head of `chain`.
    ///
    /// The walk stops at the first node whose tick is at or before
    /// `target`. When no such node exists the count is clamped to one less
    /// than the chain length, so the oldest node survives the rollback.
    pub fn find_rollback_amount(&self, target: Tick, chain: Option<NodeHandle>) -> usize {
        let mut amount = 0;
        for node in self.walk(chain) {
            if node.tick <= target {
                return amount;
            }
            amount += 1;
        }
        amount.saturating_sub(1)
    }
}

impl<S> SnapshotArena<S> {
    /// Iterate the chain headed by `chain`, newest first.
    pub fn walk(&self, chain: Option<NodeHandle>) -> ChainIter<'_, S> {
        ChainIter {
            arena: self,
            cursor: chain,
        }
    }
}

/// Iterator over a snapshot chain from newest to oldest.
pub struct ChainIter<'a, S> {
    arena: &'a SnapshotArena<S>,
    cursor: Option<NodeHandle>,
}

impl<'a, S> Iterator for ChainIter<'a, S> {
    type Item = &'a SnapshotNode<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.arena.node(self.cursor?);
        self.cursor = node.older;
        Some(node)
    }
}
