use crate::types::{Node, NodeId, OrderedNode, Weighted};

/// Arena node of a [`crate::PositionTree`].
#[derive(Clone, Debug)]
pub struct PosNode<T> {
    pub p: Option<NodeId>,
    pub l: Option<NodeId>,
    pub r: Option<NodeId>,
    pub is_right: bool,
    pub height: i32,
    pub count: usize,
    pub weighted_len: usize,
    pub max_len: usize,
    /// Bumped each time the slot is freed.
    pub generation: u32,
    // Wrapped in Option so deletes can hand the payload back by value
    // without moving the node out of the arena. `None` marks a free slot.
    pub v: Option<T>,
}

impl<T: Weighted> PosNode<T> {
    /// Detached single-node subtree with consistent aggregates.
    pub fn new(v: T) -> Self {
        let len = v.length();
        Self {
            p: None,
            l: None,
            r: None,
            is_right: false,
            height: 0,
            count: 1,
            weighted_len: len + 1,
            max_len: len,
            generation: 0,
            v: Some(v),
        }
    }

    /// Re-initializes a recycled slot, keeping its generation.
    pub(crate) fn reset(&mut self, v: T) {
        let generation = self.generation;
        *self = Self::new(v);
        self.generation = generation;
    }

    pub(crate) fn is_free(&self) -> bool {
        self.v.is_none()
    }
}

impl<T> Node for PosNode<T> {
    fn p(&self) -> Option<NodeId> {
        self.p
    }

    fn l(&self) -> Option<NodeId> {
        self.l
    }

    fn r(&self) -> Option<NodeId> {
        self.r
    }

    fn set_p(&mut self, v: Option<NodeId>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<NodeId>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<NodeId>) {
        self.r = v;
    }
}

impl<T: Weighted> OrderedNode for PosNode<T> {
    fn is_right(&self) -> bool {
        self.is_right
    }

    fn set_is_right(&mut self, v: bool) {
        self.is_right = v;
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn set_height(&mut self, v: i32) {
        self.height = v;
    }

    fn count(&self) -> usize {
        self.count
    }

    fn set_count(&mut self, v: usize) {
        self.count = v;
    }

    fn weighted_len(&self) -> usize {
        self.weighted_len
    }

    fn set_weighted_len(&mut self, v: usize) {
        self.weighted_len = v;
    }

    fn max_len(&self) -> usize {
        self.max_len
    }

    fn set_max_len(&mut self, v: usize) {
        self.max_len = v;
    }

    fn length(&self) -> usize {
        self.v.as_ref().map_or(0, Weighted::length)
    }
}
