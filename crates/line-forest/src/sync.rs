use parking_lot::{Mutex, MutexGuard};

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::tree::PositionTree;
use crate::types::{NodeKey, Weighted};

/// [`PositionTree`] behind a single mutex, for trees shared between a UI
/// thread and background callers.
///
/// Every method holds the lock for its whole duration, lookups included:
/// a lookup updates the position cache. Payload references cannot outlive
/// the lock, so reads go through closures ([`SharedPositionTree::with`]) or
/// clones. Use [`SharedPositionTree::lock`] to run several operations as one
/// critical section.
pub struct SharedPositionTree<T> {
    inner: Mutex<PositionTree<T>>,
}

impl<T: Weighted> Default for SharedPositionTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Weighted> From<PositionTree<T>> for SharedPositionTree<T> {
    fn from(tree: PositionTree<T>) -> Self {
        Self {
            inner: Mutex::new(tree),
        }
    }
}

impl<T: Weighted> SharedPositionTree<T> {
    pub fn new() -> Self {
        PositionTree::new().into()
    }

    pub fn with_config(config: TreeConfig) -> Self {
        PositionTree::with_config(config).into()
    }

    pub fn with_root(item: T) -> Self {
        PositionTree::with_root(item).into()
    }

    pub fn into_inner(self) -> PositionTree<T> {
        self.inner.into_inner()
    }

    pub fn lock(&self) -> MutexGuard<'_, PositionTree<T>> {
        self.inner.lock()
    }

    /// Runs `f` with the tree locked.
    pub fn transaction<R>(&self, f: impl FnOnce(&mut PositionTree<T>) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    pub fn count(&self) -> usize {
        self.inner.lock().count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn total_weighted_length(&self) -> usize {
        self.inner.lock().total_weighted_length()
    }

    pub fn max_weighted_length(&self) -> usize {
        self.inner.lock().max_weighted_length()
    }

    pub fn node_at(&self, index: usize) -> Option<NodeKey> {
        self.inner.lock().node_at(index)
    }

    /// Calls `f` on the payload at `index`, if there is one.
    pub fn with<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.inner.lock().get(index).map(f)
    }

    pub fn get_cloned(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.with(index, T::clone)
    }

    pub fn next(&self, id: NodeKey) -> Option<NodeKey> {
        self.inner.lock().next(id)
    }

    pub fn prev(&self, id: NodeKey) -> Option<NodeKey> {
        self.inner.lock().prev(id)
    }

    pub fn index_of(&self, id: NodeKey) -> Option<usize> {
        self.inner.lock().index_of(id)
    }

    pub fn start_index(&self, id: NodeKey) -> Option<usize> {
        self.inner.lock().start_index(id)
    }

    pub fn find_by_offset(&self, offset: usize) -> Option<(NodeKey, usize)> {
        self.inner.lock().find_by_offset(offset)
    }

    pub fn add(&self, item: T) -> NodeKey {
        self.inner.lock().add(item)
    }

    pub fn insert(&self, item: T, index: usize) -> NodeKey {
        self.inner.lock().insert(item, index)
    }

    pub fn delete(&self, index: usize) -> Result<T, TreeError> {
        self.inner.lock().delete(index)
    }

    pub fn clear(&self, empty_item: T) -> NodeKey {
        self.inner.lock().clear(empty_item)
    }

    pub fn update<R>(&self, index: usize, f: impl FnOnce(&mut T) -> R) -> Result<R, TreeError> {
        self.inner.lock().update(index, f)
    }

    /// Clones every payload in order.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.lock().iter().cloned().collect()
    }

    pub fn assert_valid(&self) -> Result<(), String> {
        self.inner.lock().assert_valid()
    }
}
