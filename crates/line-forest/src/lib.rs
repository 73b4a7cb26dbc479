//! Position-indexed AVL tree for the lines of a text document.
//!
//! Each node is one payload (a line). Nodes are kept in in-order sequence
//! and looked up by rank, not by key. Subtrees carry order-statistics
//! aggregates: node count, height, weighted length (sum of `length + 1`,
//! i.e. characters plus a terminator per line) and the largest single
//! length.
//!
//! Nodes live in an arena: all "pointers" are `Option<u32>` slot indices into
//! a `Vec<N>`. The tree owns nodes top-down through `l`/`r`; `p` is a
//! navigation-only back-link, so there are no reference cycles.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`], [`OrderedNode`] and [`Weighted`] traits, [`NodeKey`] handles |
//! | [`node`] | [`PosNode`], the concrete arena node |
//! | [`util`] | arena algorithms: navigation, `fix`, rotations, `balance`, `remove` |
//! | [`tree`] | [`PositionTree`], the positional container with its lookup cache |
//! | [`sync`] | [`SharedPositionTree`], the mutex-guarded container |
//! | [`config`] | [`TreeConfig`] |
//! | [`error`] | [`TreeError`] |
//!
//! # Example
//!
//! ```
//! use line_forest::PositionTree;
//!
//! let mut tree: PositionTree<usize> = [3, 1, 4, 1, 5].into_iter().collect();
//! assert_eq!(tree.count(), 5);
//! assert_eq!(tree.get(2), Some(&4));
//! assert_eq!(tree.total_weighted_length(), 19);
//!
//! tree.insert(0, 0);
//! assert_eq!(tree.get(3), Some(&4));
//! ```

pub mod config;
pub mod error;
pub mod node;
pub mod sync;
pub mod tree;
pub mod types;
pub mod util;

pub use config::TreeConfig;
pub use error::TreeError;
pub use node::PosNode;
pub use sync::SharedPositionTree;
pub use tree::PositionTree;
pub use types::{Node, NodeId, NodeKey, OrderedNode, Weighted};
