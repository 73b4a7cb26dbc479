use std::cell::Cell;

use log::{debug, trace};

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::node::PosNode;
use crate::types::{NodeId, NodeKey, OrderedNode, Weighted};
use crate::util::{
    append, assert_ordered_tree, balance, find_by_offset, find_by_position, first, fix, height,
    index, insert_before, last, next, prev, print, remove, root_of, size, start_index,
};

/// Sequence of payloads indexed by position, stored as an AVL tree whose
/// in-order rank is the index.
///
/// Besides the node count, every subtree tracks the sum of `length + 1` of
/// its payloads (the "weighted length") and the largest single `length`, so
/// character offsets and the widest line are available without a scan.
///
/// Lookups remember the last position they resolved. Asking for the same
/// position or one of its neighbours next is O(1); any structural change
/// forgets it.
///
/// Not synchronized. [`crate::SharedPositionTree`] wraps it in a mutex.
#[derive(Clone, Debug)]
pub struct PositionTree<T> {
    arena: Vec<PosNode<T>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    cache: Cell<Option<(usize, NodeId)>>,
    config: TreeConfig,
}

impl<T: Weighted> Default for PositionTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Weighted> PositionTree<T> {
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
            cache: Cell::new(None),
            config,
        }
    }

    /// Tree holding the single node `item`, the way a document starts out
    /// with one empty line.
    pub fn with_root(item: T) -> Self {
        let mut tree = Self::new();
        tree.add(item);
        tree
    }

    pub fn config(&self) -> TreeConfig {
        self.config
    }

    pub fn set_config(&mut self, config: TreeConfig) {
        debug!("position tree config changed: {config:?}");
        self.config = config;
        self.invalidate();
    }

    // ── arena ─────────────────────────────────────────────────────────────

    fn alloc(&mut self, item: T) -> NodeId {
        if let Some(slot) = self.free.pop() {
            self.arena[slot as usize].reset(item);
            return slot;
        }
        self.arena.push(PosNode::new(item));
        (self.arena.len() - 1) as NodeId
    }

    fn release(&mut self, slot: NodeId) -> T {
        self.free.push(slot);
        let node = &mut self.arena[slot as usize];
        node.generation = node.generation.wrapping_add(1);
        node.v.take().expect("released node holds a payload")
    }

    fn key(&self, slot: NodeId) -> NodeKey {
        NodeKey {
            slot,
            generation: self.arena[slot as usize].generation,
        }
    }

    fn is_live(&self, slot: NodeId) -> bool {
        self.arena.get(slot as usize).is_some_and(|n| !n.is_free())
    }

    /// Slot of `key` if its node is still in the tree.
    fn resolve(&self, key: NodeKey) -> Option<NodeId> {
        self.arena
            .get(key.slot as usize)
            .filter(|n| !n.is_free() && n.generation == key.generation)
            .map(|_| key.slot)
    }

    /// Whether `key` names a node currently in the tree.
    pub fn contains(&self, key: NodeKey) -> bool {
        self.resolve(key).is_some()
    }

    fn check(&self, key: NodeKey) -> Result<NodeId, TreeError> {
        self.resolve(key).ok_or(TreeError::StaleNode(key))
    }

    #[inline]
    fn invalidate(&self) {
        self.cache.set(None);
    }

    fn fix_root(&mut self, from: NodeId) {
        self.root = Some(root_of(&self.arena, from));
    }

    // ── aggregates ────────────────────────────────────────────────────────

    pub fn root(&self) -> Option<NodeKey> {
        self.root.map(|r| self.key(r))
    }

    pub fn count(&self) -> usize {
        self.root.map_or(0, |r| self.arena[r as usize].count())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Sum of `length + 1` over all payloads.
    pub fn total_weighted_length(&self) -> usize {
        self.root.map_or(0, |r| self.arena[r as usize].weighted_len())
    }

    /// Largest payload `length`, `0` when empty.
    pub fn max_weighted_length(&self) -> usize {
        self.root.map_or(0, |r| self.arena[r as usize].max_len())
    }

    /// Height of the root; `-1` when empty, `0` for a single node.
    pub fn height(&self) -> i32 {
        height(&self.arena, self.root)
    }

    // ── positional access ─────────────────────────────────────────────────

    fn slot_at(&self, index: usize) -> Option<NodeId> {
        if index >= self.count() {
            trace!("position {index} past end of {} nodes", self.count());
            return None;
        }
        if !self.config.sequential_cache {
            return find_by_position(&self.arena, self.root, index);
        }
        let found = match self.cache.get() {
            Some((cached, node)) if cached == index => Some(node),
            Some((cached, node)) if cached + 1 == index => next(&self.arena, node),
            Some((cached, node)) if index + 1 == cached => prev(&self.arena, node),
            _ => find_by_position(&self.arena, self.root, index),
        };
        self.cache.set(found.map(|node| (index, node)));
        found
    }

    /// Node at in-order rank `index`, or `None` past the end.
    pub fn node_at(&self, index: usize) -> Option<NodeKey> {
        self.slot_at(index).map(|slot| self.key(slot))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slot_at(index)
            .and_then(|slot| self.arena[slot as usize].v.as_ref())
    }

    pub fn payload(&self, key: NodeKey) -> Option<&T> {
        self.resolve(key)
            .and_then(|slot| self.arena[slot as usize].v.as_ref())
    }

    pub fn first(&self) -> Option<NodeKey> {
        first(&self.arena, self.root).map(|slot| self.key(slot))
    }

    pub fn last(&self) -> Option<NodeKey> {
        last(&self.arena, self.root).map(|slot| self.key(slot))
    }

    pub fn next(&self, key: NodeKey) -> Option<NodeKey> {
        let slot = next(&self.arena, self.resolve(key)?)?;
        Some(self.key(slot))
    }

    pub fn prev(&self, key: NodeKey) -> Option<NodeKey> {
        let slot = prev(&self.arena, self.resolve(key)?)?;
        Some(self.key(slot))
    }

    /// In-order rank of `key`; the inverse of [`PositionTree::node_at`].
    pub fn index_of(&self, key: NodeKey) -> Option<usize> {
        self.resolve(key).map(|slot| index(&self.arena, slot))
    }

    /// Weighted offset at which `key` starts, i.e. the sum of `length + 1`
    /// over every node before it.
    pub fn start_index(&self, key: NodeKey) -> Option<usize> {
        self.resolve(key).map(|slot| start_index(&self.arena, slot))
    }

    /// Node covering weighted `offset` and the offset within it. Each node
    /// covers `length + 1` positions, the last one being its terminator.
    pub fn find_by_offset(&self, offset: usize) -> Option<(NodeKey, usize)> {
        find_by_offset(&self.arena, self.root, offset).map(|(slot, at)| (self.key(slot), at))
    }

    fn slots(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(first(&self.arena, self.root), move |&i| next(&self.arena, i))
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.slots().map(move |slot| self.key(slot))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots()
            .filter_map(move |slot| self.arena[slot as usize].v.as_ref())
    }

    // ── mutation ──────────────────────────────────────────────────────────

    fn rebalance_after_insert(&mut self, slot: NodeId) {
        let early = self.config.early_fix_stop;
        fix(&mut self.arena, slot, early);
        let top = balance(&mut self.arena, slot, self.config.full_rebalance, early);
        self.fix_root(top);
    }

    /// Appends `item` after the last node.
    pub fn add(&mut self, item: T) -> NodeKey {
        let slot = self.alloc(item);
        match self.root {
            None => self.root = Some(slot),
            Some(root) => {
                append(&mut self.arena, root, slot);
                self.rebalance_after_insert(slot);
            }
        }
        self.invalidate();
        trace!("appended node {slot}, count {}", self.count());
        self.key(slot)
    }

    /// Inserts `item` so that it ends up at rank `index`. Positions at or
    /// past the end append.
    pub fn insert(&mut self, item: T, index: usize) -> NodeKey {
        let Some(target) = self.slot_at(index) else {
            return self.add(item);
        };
        let slot = self.alloc(item);
        insert_before(&mut self.arena, target, slot);
        self.rebalance_after_insert(slot);
        self.invalidate();
        trace!("inserted node {slot} at {index}, count {}", self.count());
        self.key(slot)
    }

    /// Removes the node at rank `index` and hands its payload back.
    pub fn delete(&mut self, index: usize) -> Result<T, TreeError> {
        let count = self.count();
        if count == 0 {
            return Err(TreeError::EmptyTree);
        }
        let slot = self
            .slot_at(index)
            .ok_or(TreeError::IndexOutOfRange { index, count })?;
        let item = self.unlink(slot);
        trace!("deleted position {index}, count {}", self.count());
        Ok(item)
    }

    /// Removes node `key` wherever it currently sits.
    pub fn remove_node(&mut self, key: NodeKey) -> Result<T, TreeError> {
        let slot = self.check(key)?;
        Ok(self.unlink(slot))
    }

    fn unlink(&mut self, slot: NodeId) -> T {
        self.root = remove(&mut self.arena, slot, self.config.early_fix_stop);
        if let Some(root) = self.root {
            self.fix_root(root);
        }
        self.invalidate();
        self.release(slot)
    }

    /// Drops every node and starts over with the single node `empty_item`.
    /// Keys from before the clear stay invalid.
    pub fn clear(&mut self, empty_item: T) -> NodeKey {
        debug!("clearing position tree of {} nodes", self.count());
        for slot in 0..self.arena.len() as NodeId {
            if self.is_live(slot) {
                self.release(slot);
            }
        }
        self.root = None;
        self.invalidate();
        self.add(empty_item)
    }

    /// Mutates the payload at rank `index` and refreshes the aggregates its
    /// length feeds into.
    pub fn update<R>(&mut self, index: usize, f: impl FnOnce(&mut T) -> R) -> Result<R, TreeError> {
        let count = self.count();
        let slot = self
            .slot_at(index)
            .ok_or(TreeError::IndexOutOfRange { index, count })?;
        Ok(self.update_slot(slot, f))
    }

    /// Same as [`PositionTree::update`], addressed by node.
    pub fn update_node<R>(&mut self, key: NodeKey, f: impl FnOnce(&mut T) -> R) -> Result<R, TreeError> {
        let slot = self.check(key)?;
        Ok(self.update_slot(slot, f))
    }

    fn update_slot<R>(&mut self, slot: NodeId, f: impl FnOnce(&mut T) -> R) -> R {
        let payload = self.arena[slot as usize]
            .v
            .as_mut()
            .expect("live node holds a payload");
        let out = f(payload);
        fix(&mut self.arena, slot, self.config.early_fix_stop);
        out
    }

    // ── diagnostics ───────────────────────────────────────────────────────

    /// Verifies every structural invariant plus the arena bookkeeping.
    pub fn assert_valid(&self) -> Result<(), String> {
        assert_ordered_tree(&self.arena, self.root)?;
        let reachable = size(&self.arena, self.root);
        let live = self.arena.len() - self.free.len();
        if reachable != live {
            return Err(format!("{live} live nodes but {reachable} reachable from root"));
        }
        if let Some((cached, node)) = self.cache.get() {
            if !self.is_live(node) || index(&self.arena, node) != cached {
                return Err(format!("Stale position cache ({cached}, {node})"));
            }
        }
        Ok(())
    }

    pub fn print(&self, tab: &str) -> String {
        format!("PositionTree\n{tab}{}", print(&self.arena, self.root, tab))
    }
}

impl<T: Weighted> FromIterator<T> for PositionTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Weighted> Extend<T> for PositionTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}
