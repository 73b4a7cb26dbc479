use crate::types::{NodeId, OrderedNode};

/// Debug printer.
///
/// ```text
/// Node[1] [h=1 c=2 w=7 len=4]
///   L=Node[0] [h=0 c=1 w=2 len=1]
///     L=∅
///     R=∅
///   R=∅
/// ```
pub fn print<N: OrderedNode>(arena: &[N], node: Option<NodeId>, tab: &str) -> String {
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let child_tab = format!("{tab}  ");
            let left = print(arena, n.l(), &child_tab);
            let right = print(arena, n.r(), &child_tab);
            format!(
                "Node[{i}] [h={} c={} w={} len={}]\n{child_tab}L={left}\n{child_tab}R={right}",
                n.height(),
                n.count(),
                n.weighted_len(),
                n.length(),
            )
        }
    }
}
