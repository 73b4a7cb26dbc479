use crate::types::{NodeId, OrderedNode};

use super::{count, first, get_l, get_p, get_r, height, index, max_len, next, prev, weighted_len};

/// Checks every structural invariant of the tree under `root`:
///
/// - the root has no parent;
/// - each child points back at its parent from the side its `is_right`
///   flag names;
/// - `count`, `height`, `weighted_len` and `max_len` match their recursive
///   definitions;
/// - `|height(right) - height(left)| <= 1` everywhere;
/// - walking `next` from the first node visits `count` nodes whose ranks are
///   `0..count`, and `prev` walks the same sequence backwards.
///
/// O(n log n). Meant for tests, not for production paths.
pub fn assert_ordered_tree<N: OrderedNode>(arena: &[N], root: Option<NodeId>) -> Result<(), String> {
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err(format!("Root {root} has parent"));
    }

    fn validate<N: OrderedNode>(arena: &[N], node: NodeId) -> Result<(), String> {
        let l = get_l(arena, node);
        let r = get_r(arena, node);

        for (child, right) in [(l, false), (r, true)] {
            let Some(c) = child else {
                continue;
            };
            if get_p(arena, c) != Some(node) {
                return Err(format!("Broken parent link on child {c} of {node}"));
            }
            if arena[c as usize].is_right() != right {
                return Err(format!("Wrong side flag on child {c} of {node}"));
            }
            validate(arena, c)?;
        }

        let n = &arena[node as usize];
        let expected_height = 1 + height(arena, l).max(height(arena, r));
        if n.height() != expected_height {
            return Err(format!(
                "Height mismatch at {node}: expected {expected_height}, got {}",
                n.height()
            ));
        }
        let expected_count = 1 + count(arena, l) + count(arena, r);
        if n.count() != expected_count {
            return Err(format!(
                "Count mismatch at {node}: expected {expected_count}, got {}",
                n.count()
            ));
        }
        let own = n.length();
        let expected_weighted = own + 1 + weighted_len(arena, l) + weighted_len(arena, r);
        if n.weighted_len() != expected_weighted {
            return Err(format!(
                "Weighted length mismatch at {node}: expected {expected_weighted}, got {}",
                n.weighted_len()
            ));
        }
        let expected_max = own.max(max_len(arena, l)).max(max_len(arena, r));
        if n.max_len() != expected_max {
            return Err(format!(
                "Max length mismatch at {node}: expected {expected_max}, got {}",
                n.max_len()
            ));
        }
        let bf = height(arena, r) - height(arena, l);
        if !(-1..=1).contains(&bf) {
            return Err(format!("AVL balance violated at {node}: balance factor {bf}"));
        }
        Ok(())
    }

    validate(arena, root)?;

    let total = count(arena, Some(root));
    let mut visited = 0usize;
    let mut curr = first(arena, Some(root));
    let mut tail = None;
    while let Some(i) = curr {
        let rank = index(arena, i);
        if rank != visited {
            return Err(format!("Node {i} has rank {rank}, expected {visited}"));
        }
        visited += 1;
        if visited > total {
            return Err("Forward traversal does not terminate".to_string());
        }
        tail = Some(i);
        curr = next(arena, i);
    }
    if visited != total {
        return Err(format!("Forward traversal visited {visited} of {total} nodes"));
    }

    let mut remaining = total;
    let mut curr = tail;
    while let Some(i) = curr {
        remaining -= 1;
        if index(arena, i) != remaining {
            return Err(format!("Backward traversal out of order at {i}"));
        }
        curr = prev(arena, i);
        if curr.is_some() && remaining == 0 {
            return Err("Backward traversal does not terminate".to_string());
        }
    }
    if remaining != 0 {
        return Err(format!("Backward traversal stopped with {remaining} nodes left"));
    }

    Ok(())
}
