//! Reference-counted slab storage for snapshot nodes.
//!
//! [`SnapshotArena`] owns every [`SnapshotNode`] of every chain built on
//! it. Vacated slots go onto a free list and are handed out again by the
//! next allocation, so a long-running simulation reuses a small, stable
//! set of slots instead of allocating per tick.

use mach_core::Tick;

use crate::error::ArenaError;
use crate::handle::NodeHandle;

/// One retained state in a snapshot chain.
#[derive(Clone, Debug)]
pub struct SnapshotNode<S> {
    pub(crate) tick: Tick,
    pub(crate) keep: bool,
    pub(crate) life: u32,
    pub(crate) state: S,
    pub(crate) older: Option<NodeHandle>,
}

impl<S> SnapshotNode<S> {
    /// A fresh, provisional node (`keep = false`, `life = 0`).
    pub(crate) fn new(tick: Tick, state: S, older: Option<NodeHandle>) -> Self {
        Self {
            tick,
            keep: false,
            life: 0,
            state,
            older,
        }
    }

    /// The tick whose state this node holds.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Whether the node has earned retention by surviving a second push.
    pub fn keep(&self) -> bool {
        self.keep
    }

    /// Remaining demotions this node absorbs before carrying deeper.
    pub fn life(&self) -> u32 {
        self.life
    }

    /// The stored state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Link to the next-older node.
    pub fn older(&self) -> Option<NodeHandle> {
        self.older
    }
}

struct Slot<S> {
    generation: u32,
    refs: u32,
    node: Option<SnapshotNode<S>>,
}

/// Slab allocator for [`SnapshotNode`]s with per-slot reference counts.
///
/// A slot's count covers every chain head and every `older` link that
/// names it. [`release`](SnapshotArena::release) frees a slot when its count
/// reaches zero and then releases the node's `older` link, iteratively,
/// so dropping a long chain never recurses.
pub struct SnapshotArena<S> {
    slots: Vec<Slot<S>>,
    free_list: Vec<u32>,
    live: usize,
}

impl<S> SnapshotArena<S> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Store `node` and return a handle holding its single reference.
    ///
    /// The caller transfers its own reference to `node.older` (if any)
    /// into the new node.
    pub(crate) fn alloc(&mut self, node: SnapshotNode<S>) -> NodeHandle {
        self.live += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.refs = 1;
            slot.node = Some(node);
            return NodeHandle::new(index, slot.generation);
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        assert!(index < u32::MAX, "snapshot arena exhausted u32 slot space");
        self.slots.push(Slot {
            generation: 0,
            refs: 1,
            node: Some(node),
        });
        NodeHandle::new(index, 0)
    }

    /// Resolve a handle, checking that it is still live.
    ///
    /// # Errors
    ///
    /// [`ArenaError::OutOfBounds`] if the index was never allocated,
    /// [`ArenaError::StaleHandle`] if the slot has since been vacated.
    pub fn get(&self, handle: NodeHandle) -> Result<&SnapshotNode<S>, ArenaError> {
        let slot = self
            .slots
            .get(handle.index as usize)
            .ok_or(ArenaError::OutOfBounds {
                index: handle.index,
                slots: self.slots.len(),
            })?;
        match &slot.node {
            Some(node) if slot.generation == handle.generation => Ok(node),
            _ => Err(ArenaError::StaleHandle {
                index: handle.index,
                handle_generation: handle.generation,
                slot_generation: slot.generation,
            }),
        }
    }

    /// Resolve a handle owned by a chain of this arena.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale. Chain handles are kept alive by
    /// their reference counts, so this indicates a refcount bug.
    pub(crate) fn node(&self, handle: NodeHandle) -> &SnapshotNode<S> {
        match self.get(handle) {
            Ok(node) => node,
            Err(e) => panic!("snapshot chain invariant violated: {e}"),
        }
    }

    pub(crate) fn node_mut(&mut self, handle: NodeHandle) -> &mut SnapshotNode<S> {
        let slot = &mut self.slots[handle.index as usize];
        assert_eq!(
            slot.generation, handle.generation,
            "snapshot chain invariant violated: stale {handle}"
        );
        match slot.node.as_mut() {
            Some(node) => node,
            None => panic!("snapshot chain invariant violated: vacant {handle}"),
        }
    }

    /// Number of references currently held on `handle`'s slot.
    pub fn refs(&self, handle: NodeHandle) -> Result<u32, ArenaError> {
        self.get(handle)?;
        Ok(self.slots[handle.index as usize].refs)
    }

    /// Add a reference to `handle`.
    pub(crate) fn retain(&mut self, handle: NodeHandle) {
        let slot = &mut self.slots[handle.index as usize];
        debug_assert_eq!(slot.generation, handle.generation);
        slot.refs += 1;
    }

    /// Drop one reference to `handle`, freeing every node that becomes
    /// unreachable as a result.
    pub(crate) fn release(&mut self, handle: NodeHandle) {
        let mut next = Some(handle);
        while let Some(h) = next {
            let slot = &mut self.slots[h.index as usize];
            debug_assert_eq!(slot.generation, h.generation);
            slot.refs -= 1;
            if slot.refs > 0 {
                return;
            }
            let Some(node) = slot.node.take() else {
                return;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free_list.push(h.index);
            self.live -= 1;
            next = node.older;
        }
    }

    /// Number of live nodes across all chains.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Total slots (live + vacant).
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    /// Number of vacant slots available for reuse.
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }
}

impl<S: Clone> SnapshotArena<S> {
    /// Obtain a uniquely referenced handle for `handle`'s node.
    ///
    /// Consumes one reference to `handle`. If that was the only reference
    /// the same handle comes back; otherwise the node is cloned into a new
    /// slot (retaining its `older` link) and the new handle is returned.
    pub(crate) fn make_mut(&mut self, handle: NodeHandle) -> NodeHandle {
        if self.slots[handle.index as usize].refs == 1 {
            return handle;
        }
        let copy = self.node(handle).clone();
        if let Some(older) = copy.older {
            self.retain(older);
        }
        self.release(handle);
        self.alloc(copy)
    }
}

impl<S> Default for SnapshotArena<S> {
    fn default() -> Self {
        Self::new()
    }
}
