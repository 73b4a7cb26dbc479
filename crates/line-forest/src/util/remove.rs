use crate::types::{NodeId, OrderedNode};

use super::balance::{balance, fix};
use super::{first, get_l, get_p, get_r, is_right, replace_in_parent, set_child};

/// Unlinks `node` from the tree it belongs to and rebalances.
///
/// Returns the new root, or `None` when `node` was the only node. `node` is
/// left fully detached: no parent, no children.
///
/// With two children, `node` is replaced by its in-order successor `s`, the
/// leftmost node of its right subtree. If `s` hangs deeper than the right
/// child, `s.r` takes `s`'s old slot first and rebalancing starts there (or
/// at `s`'s old parent when `s.r` is absent).
pub fn remove<N: OrderedNode>(arena: &mut [N], node: NodeId, early_stop: bool) -> Option<NodeId> {
    let p = get_p(arena, node);
    let side = is_right(arena, node);
    let l = get_l(arena, node);
    let r = get_r(arena, node);
    {
        let n = &mut arena[node as usize];
        n.set_p(None);
        n.set_l(None);
        n.set_r(None);
        n.set_is_right(false);
    }

    let start = match (l, r) {
        (None, None) => {
            replace_in_parent(arena, p, side, None);
            p
        }
        (Some(c), None) | (None, Some(c)) => {
            replace_in_parent(arena, p, side, Some(c));
            Some(c)
        }
        (Some(l), Some(r)) => {
            let s = first(arena, Some(r)).expect("right subtree has a leftmost node");
            if s == r {
                set_child(arena, s, false, Some(l));
                replace_in_parent(arena, p, side, Some(s));
                Some(s)
            } else {
                let sp = get_p(arena, s).expect("successor below the right child has a parent");
                let sr = get_r(arena, s);
                set_child(arena, sp, false, sr);
                set_child(arena, s, false, Some(l));
                set_child(arena, s, true, Some(r));
                replace_in_parent(arena, p, side, Some(s));
                Some(sr.unwrap_or(sp))
            }
        }
    };

    let start = start?;
    fix(arena, start, early_stop);
    Some(balance(arena, start, true, early_stop))
}
