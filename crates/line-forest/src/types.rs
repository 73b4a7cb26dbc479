//! Node trait definitions.
//!
//! Nodes live in a [`Vec`]-backed arena and refer to each other by `u32`
//! slot index. Structural links (`p`, `l`, `r`) are plain indices: the tree
//! owns every node top-down through `l`/`r`, and `p` is a navigation-only
//! back-reference.

/// Arena slot of a node.
pub type NodeId = u32;

/// Handle to a node of a [`crate::PositionTree`].
///
/// Freed arena slots are reused, so a bare [`NodeId`] may name a different
/// node later on. The key also carries the generation its slot had when the
/// node was created; the slot's generation moves on when the node leaves the
/// tree, and lookups with an older key find nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub(crate) slot: NodeId,
    pub(crate) generation: u32,
}

impl NodeKey {
    pub const fn slot(self) -> NodeId {
        self.slot
    }

    pub const fn generation(self) -> u32 {
        self.generation
    }
}

/// Payload contract: the weighted size a node contributes.
///
/// For a text line this is its character count; the tree adds one for the
/// line terminator when it aggregates.
pub trait Weighted {
    fn length(&self) -> usize;
}

impl Weighted for String {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl Weighted for usize {
    fn length(&self) -> usize {
        *self
    }
}

/// Structural links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<NodeId>;
    fn l(&self) -> Option<NodeId>;
    fn r(&self) -> Option<NodeId>;
    fn set_p(&mut self, v: Option<NodeId>);
    fn set_l(&mut self, v: Option<NodeId>);
    fn set_r(&mut self, v: Option<NodeId>);
}

/// Order-statistics node: links plus the aggregates the balancing code keeps
/// up to date.
///
/// Aggregates are derived from the children and must be recomputed with
/// [`crate::util::fix`] after any structural or length change.
pub trait OrderedNode: Node {
    /// `true` iff this node is its parent's right child. Meaningless at the
    /// root.
    fn is_right(&self) -> bool;
    fn set_is_right(&mut self, v: bool);

    /// `0` for a leaf. Absent subtrees count as `-1`.
    fn height(&self) -> i32;
    fn set_height(&mut self, v: i32);

    /// Nodes in the subtree rooted here.
    fn count(&self) -> usize;
    fn set_count(&mut self, v: usize);

    /// Sum of `length + 1` over the subtree.
    fn weighted_len(&self) -> usize;
    fn set_weighted_len(&mut self, v: usize);

    /// Largest own `length` in the subtree.
    fn max_len(&self) -> usize;
    fn set_max_len(&mut self, v: usize);

    /// Own weighted size, supplied by the payload.
    fn length(&self) -> usize;
}
