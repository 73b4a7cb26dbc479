//! Arena-level structural primitives of the order-statistics tree.
//!
//! - this module: link helpers, attachment (`append`, `insert_before`),
//!   navigation (`first`, `last`, `next`, `prev`), rank and weighted-offset
//!   queries.
//! - [`balance`]: aggregate recomputation (`fix`), rotations, `balance`.
//! - [`remove`]: AVL deletion.
//! - [`assert`]: whole-tree invariant checker used by tests.
//! - [`print`]: debug dump.
//!
//! Every function assumes a structurally valid tree on entry. Violated
//! structural preconditions are programming errors and trip `debug_assert!`.

pub mod assert;
pub mod balance;
pub mod print;
pub mod remove;

use crate::types::{NodeId, OrderedNode};

pub use assert::assert_ordered_tree;
pub use balance::{balance, balance_factor, fix, fix_one, rotate_left, rotate_right};
pub use print::print;
pub use remove::remove;

#[inline]
pub(crate) fn get_p<N: OrderedNode>(arena: &[N], idx: NodeId) -> Option<NodeId> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: OrderedNode>(arena: &[N], idx: NodeId) -> Option<NodeId> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: OrderedNode>(arena: &[N], idx: NodeId) -> Option<NodeId> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn is_right<N: OrderedNode>(arena: &[N], idx: NodeId) -> bool {
    arena[idx as usize].is_right()
}

/// Height of an optional subtree; absent is `-1`.
#[inline]
pub fn height<N: OrderedNode>(arena: &[N], node: Option<NodeId>) -> i32 {
    node.map_or(-1, |i| arena[i as usize].height())
}

/// Node count of an optional subtree.
#[inline]
pub fn count<N: OrderedNode>(arena: &[N], node: Option<NodeId>) -> usize {
    node.map_or(0, |i| arena[i as usize].count())
}

/// Weighted length of an optional subtree.
#[inline]
pub fn weighted_len<N: OrderedNode>(arena: &[N], node: Option<NodeId>) -> usize {
    node.map_or(0, |i| arena[i as usize].weighted_len())
}

/// Largest own length in an optional subtree.
#[inline]
pub fn max_len<N: OrderedNode>(arena: &[N], node: Option<NodeId>) -> usize {
    node.map_or(0, |i| arena[i as usize].max_len())
}

/// Hangs `child` on the right (or left) side of `parent`, keeping `p` and
/// `is_right` in sync. `child == None` clears the slot.
pub(crate) fn set_child<N: OrderedNode>(
    arena: &mut [N],
    parent: NodeId,
    right: bool,
    child: Option<NodeId>,
) {
    if right {
        arena[parent as usize].set_r(child);
    } else {
        arena[parent as usize].set_l(child);
    }
    if let Some(c) = child {
        arena[c as usize].set_p(Some(parent));
        arena[c as usize].set_is_right(right);
    }
}

/// Puts `child` where `old` hung from `parent` (or at the root when
/// `parent` is `None`). `child` inherits `old`'s side.
pub(crate) fn replace_in_parent<N: OrderedNode>(
    arena: &mut [N],
    parent: Option<NodeId>,
    old_is_right: bool,
    child: Option<NodeId>,
) {
    match parent {
        Some(p) => set_child(arena, p, old_is_right, child),
        None => {
            if let Some(c) = child {
                arena[c as usize].set_p(None);
                arena[c as usize].set_is_right(false);
            }
        }
    }
}

/// Walks parent links up to the node with no parent.
pub fn root_of<N: OrderedNode>(arena: &[N], mut node: NodeId) -> NodeId {
    while let Some(p) = get_p(arena, node) {
        node = p;
    }
    node
}

/// Leftmost node of the subtree.
pub fn first<N: OrderedNode>(arena: &[N], root: Option<NodeId>) -> Option<NodeId> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node of the subtree.
pub fn last<N: OrderedNode>(arena: &[N], root: Option<NodeId>) -> Option<NodeId> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: OrderedNode>(arena: &[N], mut curr: NodeId) -> Option<NodeId> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    while is_right(arena, curr) {
        curr = get_p(arena, curr)?;
    }
    get_p(arena, curr)
}

/// In-order predecessor.
pub fn prev<N: OrderedNode>(arena: &[N], mut curr: NodeId) -> Option<NodeId> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    loop {
        let p = get_p(arena, curr)?;
        if is_right(arena, curr) {
            return Some(p);
        }
        curr = p;
    }
}

/// Attaches detached `item` as the new rightmost node of the subtree at
/// `root`. The caller must `fix` and `balance` from `item` afterwards.
pub fn append<N: OrderedNode>(arena: &mut [N], root: NodeId, item: NodeId) {
    debug_assert!(get_p(arena, item).is_none(), "append: item is attached");
    let Some(tail) = last(arena, Some(root)) else {
        return;
    };
    debug_assert!(get_r(arena, tail).is_none());
    set_child(arena, tail, true, Some(item));
}

/// Attaches detached `item` immediately before `node` in sequence order.
/// The caller must `fix` and `balance` from `item` afterwards.
pub fn insert_before<N: OrderedNode>(arena: &mut [N], node: NodeId, item: NodeId) {
    debug_assert!(get_p(arena, item).is_none(), "insert_before: item is attached");
    match get_l(arena, node) {
        None => set_child(arena, node, false, Some(item)),
        Some(l) => append(arena, l, item),
    }
}

/// In-order rank of `node`.
pub fn index<N: OrderedNode>(arena: &[N], node: NodeId) -> usize {
    let mut idx = count(arena, get_l(arena, node));
    let mut curr = node;
    while let Some(p) = get_p(arena, curr) {
        if is_right(arena, curr) {
            idx += count(arena, get_l(arena, p)) + 1;
        }
        curr = p;
    }
    idx
}

/// Weighted offset at which `node` starts: the sum of `length + 1` over
/// every node before it.
pub fn start_index<N: OrderedNode>(arena: &[N], node: NodeId) -> usize {
    let mut offset = weighted_len(arena, get_l(arena, node));
    let mut curr = node;
    while let Some(p) = get_p(arena, curr) {
        if is_right(arena, curr) {
            offset += weighted_len(arena, get_l(arena, p)) + arena[p as usize].length() + 1;
        }
        curr = p;
    }
    offset
}

/// Node at in-order rank `pos`, descending from `root`.
pub fn find_by_position<N: OrderedNode>(
    arena: &[N],
    root: Option<NodeId>,
    mut pos: usize,
) -> Option<NodeId> {
    let mut curr = root;
    while let Some(i) = curr {
        let lc = count(arena, get_l(arena, i));
        if pos < lc {
            curr = get_l(arena, i);
        } else if pos == lc {
            return Some(i);
        } else {
            pos -= lc + 1;
            curr = get_r(arena, i);
        }
    }
    None
}

/// Node whose weighted extent `[start, start + length]` contains `offset`,
/// along with the offset relative to that node's start.
pub fn find_by_offset<N: OrderedNode>(
    arena: &[N],
    root: Option<NodeId>,
    mut offset: usize,
) -> Option<(NodeId, usize)> {
    let mut curr = root;
    while let Some(i) = curr {
        let lw = weighted_len(arena, get_l(arena, i));
        if offset < lw {
            curr = get_l(arena, i);
            continue;
        }
        offset -= lw;
        let own = arena[i as usize].length() + 1;
        if offset < own {
            return Some((i, offset));
        }
        offset -= own;
        curr = get_r(arena, i);
    }
    None
}

/// Number of nodes reachable from `root`, counted by traversal rather than
/// from the cached aggregate.
pub fn size<N: OrderedNode>(arena: &[N], root: Option<NodeId>) -> usize {
    fn inner<N: OrderedNode>(arena: &[N], node: NodeId) -> usize {
        1 + get_l(arena, node).map_or(0, |l| inner(arena, l))
            + get_r(arena, node).map_or(0, |r| inner(arena, r))
    }
    root.map_or(0, |r| inner(arena, r))
}
