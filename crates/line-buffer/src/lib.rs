//! Line-oriented text buffer on top of [`line_forest`].
//!
//! Each line of the document is one node of a position-indexed AVL tree, so
//! line lookup, line insertion/removal and offset ↔ position conversion are
//! all O(log n) in the number of lines.
//!
//! ```
//! use line_buffer::{LineBuffer, Position};
//!
//! let buffer = LineBuffer::from_text("fn main() {\n}");
//! buffer.insert(Position::new(0, 11), "\n    run();").unwrap();
//! assert_eq!(buffer.line(1), "    run();");
//! assert_eq!(buffer.position_of(12).unwrap(), Position::new(1, 0));
//! ```

mod buffer;
mod error;
mod line;

pub use buffer::{LineBuffer, Position};
pub use error::BufferError;
pub use line::Line;
