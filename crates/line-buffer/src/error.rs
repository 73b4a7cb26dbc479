use line_forest::TreeError;
use thiserror::Error;

use crate::Position;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("line {line} out of range for buffer of {count} lines")]
    LineOutOfRange { line: usize, count: usize },
    #[error("column {} out of range for line {} of {len} chars", .position.col, .position.line)]
    ColumnOutOfRange { position: Position, len: usize },
    #[error("offset {offset} out of range for buffer of {len} chars")]
    OffsetOutOfRange { offset: usize, len: usize },
    #[error("range start {start:?} is after end {end:?}")]
    InvertedRange { start: Position, end: Position },
    #[error(transparent)]
    Tree(#[from] TreeError),
}
