use line_forest::util::{
    append, assert_ordered_tree, balance, balance_factor, find_by_position, first, fix, index,
    insert_before, next, prev, remove, root_of, rotate_left, rotate_right, size, start_index,
};
use line_forest::{Node, NodeId, OrderedNode, PosNode};

fn arena_of(lengths: &[usize]) -> Vec<PosNode<usize>> {
    lengths.iter().map(|&len| PosNode::new(len)).collect()
}

/// Appends every arena node in slot order, rebalancing like the container.
fn build(arena: &mut Vec<PosNode<usize>>) -> Option<NodeId> {
    let mut root: Option<NodeId> = None;
    for id in 0..arena.len() as NodeId {
        root = Some(match root {
            None => id,
            Some(r) => {
                append(arena, r, id);
                fix(arena, id, true);
                balance(arena, id, false, true)
            }
        });
        if let Err(err) = assert_ordered_tree(arena, root) {
            panic!("invalid tree after appending {id}: {err}");
        }
    }
    root
}

fn in_order(arena: &[PosNode<usize>], root: Option<NodeId>) -> Vec<usize> {
    let mut out = Vec::new();
    let mut curr = first(arena, root);
    while let Some(i) = curr {
        out.push(arena[i as usize].v.unwrap());
        curr = next(arena, i);
    }
    out
}

#[test]
fn leaf_aggregates_matrix() {
    let node = PosNode::new(4usize);
    assert_eq!(node.height(), 0);
    assert_eq!(node.count(), 1);
    assert_eq!(node.weighted_len(), 5);
    assert_eq!(node.max_len(), 4);
    assert_eq!(node.p(), None);
}

#[test]
fn append_ladder_matrix() {
    let mut arena = arena_of(&[3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5]);
    let root = build(&mut arena);
    assert_eq!(size(&arena, root), 11);
    assert_eq!(in_order(&arena, root), vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5]);
    let r = root.unwrap();
    assert_eq!(arena[r as usize].weighted_len(), 44 + 11);
    assert_eq!(arena[r as usize].max_len(), 9);
    for pos in 0..11 {
        assert_eq!(find_by_position(&arena, root, pos), Some(pos as NodeId));
        assert_eq!(index(&arena, pos as NodeId), pos);
    }
    assert_eq!(find_by_position(&arena, root, 11), None);
}

#[test]
fn insert_before_leftmost_and_inner_matrix() {
    let mut arena = arena_of(&[10, 20, 30]);
    let mut root = build(&mut arena);

    arena.push(PosNode::new(5));
    let head = first(&arena, root).unwrap();
    insert_before(&mut arena, head, 3);
    fix(&mut arena, 3, true);
    root = Some(balance(&mut arena, 3, false, true));
    assert_ordered_tree(&arena, root).unwrap();

    arena.push(PosNode::new(25));
    insert_before(&mut arena, 2, 4);
    fix(&mut arena, 4, true);
    root = Some(balance(&mut arena, 4, false, true));
    assert_ordered_tree(&arena, root).unwrap();

    assert_eq!(in_order(&arena, root), vec![5, 10, 20, 25, 30]);
    assert_eq!(prev(&arena, 2), Some(4));
    assert_eq!(next(&arena, 4), Some(2));
}

#[test]
fn rotations_preserve_order_matrix() {
    // 0 -> 1 -> 2 chained to the right, without balancing.
    let mut arena = arena_of(&[1, 2, 3]);
    append(&mut arena, 0, 1);
    fix(&mut arena, 1, false);
    append(&mut arena, 0, 2);
    fix(&mut arena, 2, false);
    assert_eq!(balance_factor(&arena, 0), 2);

    let top = rotate_left(&mut arena, 0);
    assert_eq!(top, 1);
    assert_eq!(root_of(&arena, 0), 1);
    assert_ordered_tree(&arena, Some(1)).unwrap();
    assert_eq!(in_order(&arena, Some(1)), vec![1, 2, 3]);

    let top = rotate_right(&mut arena, 1);
    assert_eq!(top, 0);
    assert_eq!(arena[0].p(), None);
    assert_eq!(arena[1].p(), Some(0));
    assert!(arena[1].is_right());
    assert_eq!(in_order(&arena, Some(0)), vec![1, 2, 3]);
    assert_eq!(balance_factor(&arena, 0), 2);
}

#[test]
fn double_rotation_matrix() {
    // 0 with right child 2, which has left child 1: right-left shape.
    let mut arena = arena_of(&[0, 1, 2]);
    append(&mut arena, 0, 2);
    fix(&mut arena, 2, false);
    insert_before(&mut arena, 2, 1);
    fix(&mut arena, 1, false);
    assert_eq!(in_order(&arena, Some(0)), vec![0, 1, 2]);

    let root = balance(&mut arena, 1, false, true);
    assert_eq!(root, 1);
    assert_ordered_tree(&arena, Some(root)).unwrap();
    assert_eq!(arena[1].l(), Some(0));
    assert_eq!(arena[1].r(), Some(2));
}

#[test]
fn start_index_matrix() {
    let mut arena = arena_of(&[3, 1, 4, 1, 5]);
    build(&mut arena);
    let starts: Vec<usize> = (0..5).map(|i| start_index(&arena, i)).collect();
    assert_eq!(starts, vec![0, 4, 6, 11, 13]);
}

fn remove_and_check(arena: &mut [PosNode<usize>], node: NodeId) -> Option<NodeId> {
    let root = remove(arena, node, true);
    if let Err(err) = assert_ordered_tree(arena, root) {
        panic!("invalid tree after removing {node}: {err}");
    }
    assert_eq!(arena[node as usize].p(), None);
    assert_eq!(arena[node as usize].l(), None);
    assert_eq!(arena[node as usize].r(), None);
    root
}

#[test]
fn remove_leaf_single_child_and_root_matrix() {
    let mut arena = arena_of(&[0, 1, 2, 3]);
    let root = build(&mut arena);
    // Shape: 1 { 0, 2 { -, 3 } }
    assert_eq!(root, Some(1));

    let root = remove_and_check(&mut arena, 0);
    assert_eq!(in_order(&arena, root), vec![1, 2, 3]);

    let root = remove_and_check(&mut arena, 2);
    assert_eq!(in_order(&arena, root), vec![1, 3]);

    assert_eq!(root, Some(3));
    let root = remove_and_check(&mut arena, 3);
    assert_eq!(in_order(&arena, root), vec![1]);

    let root = remove_and_check(&mut arena, 1);
    assert_eq!(root, None);
}

#[test]
fn remove_with_direct_successor_matrix() {
    let mut arena = arena_of(&[0, 1, 2]);
    let root = build(&mut arena);
    assert_eq!(root, Some(1));

    let root = remove_and_check(&mut arena, 1);
    assert_eq!(root, Some(2));
    assert_eq!(in_order(&arena, root), vec![0, 2]);
}

#[test]
fn remove_with_deep_successor_matrix() {
    let mut arena = arena_of(&(0..15).collect::<Vec<_>>());
    let root = build(&mut arena).unwrap();

    // Successor of the root is the leftmost node of its right subtree,
    // which sits below the right child in a tree of this size.
    let succ = first(&arena, arena[root as usize].r()).unwrap();
    assert_ne!(Some(succ), arena[root as usize].r());

    let new_root = remove_and_check(&mut arena, root);
    assert_eq!(new_root, Some(succ));
    let expected: Vec<usize> = (0..15).filter(|&i| i != root as usize).collect();
    assert_eq!(in_order(&arena, new_root), expected);
}

#[test]
fn remove_every_position_matrix() {
    for victim in 0..33 {
        let mut arena = arena_of(&(0..33).collect::<Vec<_>>());
        build(&mut arena);
        let root = remove_and_check(&mut arena, victim);
        let expected: Vec<usize> = (0..33).filter(|&i| i != victim as usize).collect();
        assert_eq!(in_order(&arena, root), expected);
    }
}
