use thiserror::Error;

use crate::types::NodeKey;

/// Caller-contract violations a [`crate::PositionTree`] reports instead of
/// misbehaving silently.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("index {index} out of range for tree of {count} nodes")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("tree is empty")]
    EmptyTree,
    #[error("node {} (generation {}) is not in the tree", .0.slot(), .0.generation())]
    StaleNode(NodeKey),
}
