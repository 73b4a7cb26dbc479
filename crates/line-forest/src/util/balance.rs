use crate::types::{NodeId, OrderedNode};

use super::{count, get_l, get_p, get_r, height, is_right, max_len, replace_in_parent, set_child, weighted_len};

/// Recomputes the aggregates of `node` from its children.
///
/// Returns `true` if any stored value changed.
pub fn fix_one<N: OrderedNode>(arena: &mut [N], node: NodeId) -> bool {
    let l = get_l(arena, node);
    let r = get_r(arena, node);
    let own = arena[node as usize].length();

    let h = 1 + height(arena, l).max(height(arena, r));
    let c = 1 + count(arena, l) + count(arena, r);
    let w = own + 1 + weighted_len(arena, l) + weighted_len(arena, r);
    let m = own.max(max_len(arena, l)).max(max_len(arena, r));

    let n = &mut arena[node as usize];
    let changed = n.height() != h || n.count() != c || n.weighted_len() != w || n.max_len() != m;
    n.set_height(h);
    n.set_count(c);
    n.set_weighted_len(w);
    n.set_max_len(m);
    changed
}

/// Recomputes aggregates from `node` up to the root.
///
/// With `early_stop`, propagation ends at the first ancestor whose
/// aggregates come out unchanged. `node` itself never stops the walk: it may
/// already be correct while its parent is stale.
pub fn fix<N: OrderedNode>(arena: &mut [N], node: NodeId, early_stop: bool) {
    fix_one(arena, node);
    let mut curr = node;
    while let Some(p) = get_p(arena, curr) {
        if !fix_one(arena, p) && early_stop {
            break;
        }
        curr = p;
    }
}

/// `height(right) - height(left)`, absent subtrees being `-1`.
pub fn balance_factor<N: OrderedNode>(arena: &[N], node: NodeId) -> i32 {
    height(arena, get_r(arena, node)) - height(arena, get_l(arena, node))
}

/// Rotates `node` down to the left; its right child takes its place.
///
/// ```text
///   n               r
///  / \             / \
/// a   r     →     n   c
///    / \         / \
///   b   c       a   b
/// ```
///
/// Returns the new subtree root. Aggregates of the two moved nodes are
/// recomputed; ancestors are left to the caller.
pub fn rotate_left<N: OrderedNode>(arena: &mut [N], node: NodeId) -> NodeId {
    let pivot = get_r(arena, node).expect("rotate_left: right child exists");
    let parent = get_p(arena, node);
    let side = is_right(arena, node);

    let inner = get_l(arena, pivot);
    set_child(arena, node, true, inner);
    set_child(arena, pivot, false, Some(node));
    replace_in_parent(arena, parent, side, Some(pivot));

    fix_one(arena, node);
    fix_one(arena, pivot);
    pivot
}

/// Mirror of [`rotate_left`]: the left child takes `node`'s place.
pub fn rotate_right<N: OrderedNode>(arena: &mut [N], node: NodeId) -> NodeId {
    let pivot = get_l(arena, node).expect("rotate_right: left child exists");
    let parent = get_p(arena, node);
    let side = is_right(arena, node);

    let inner = get_r(arena, pivot);
    set_child(arena, node, false, inner);
    set_child(arena, pivot, true, Some(node));
    replace_in_parent(arena, parent, side, Some(pivot));

    fix_one(arena, node);
    fix_one(arena, pivot);
    pivot
}

/// Restores the AVL property on the path from `node` to the root and
/// returns the root.
///
/// Without `recursive` the walk ends after the first rotation, which is
/// enough after a single insertion: the rotated subtree regains its
/// pre-insert height. Deletion needs `recursive`, since a rotation there can
/// still shorten the subtree. Either way the remaining ancestors get their
/// aggregates fixed.
pub fn balance<N: OrderedNode>(
    arena: &mut [N],
    node: NodeId,
    recursive: bool,
    early_stop: bool,
) -> NodeId {
    let mut curr = node;
    loop {
        let bf = balance_factor(arena, curr);
        let top = if bf < -1 {
            let l = get_l(arena, curr).expect("left-heavy node has a left child");
            if balance_factor(arena, l) > 0 {
                rotate_left(arena, l);
            }
            Some(rotate_right(arena, curr))
        } else if bf > 1 {
            let r = get_r(arena, curr).expect("right-heavy node has a right child");
            if balance_factor(arena, r) < 0 {
                rotate_right(arena, r);
            }
            Some(rotate_left(arena, curr))
        } else {
            fix_one(arena, curr);
            None
        };

        let at = top.unwrap_or(curr);
        let Some(p) = get_p(arena, at) else {
            return at;
        };
        if top.is_some() && !recursive {
            fix(arena, p, early_stop);
            return super::root_of(arena, p);
        }
        curr = p;
    }
}
