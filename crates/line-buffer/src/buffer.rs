use std::ops::Range;

use line_forest::{NodeKey, PositionTree, SharedPositionTree, TreeConfig, TreeError};
use log::{debug, trace};

use crate::error::BufferError;
use crate::line::Line;

/// Line/column location in a [`LineBuffer`]. Columns count `char`s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Text document stored one line per node of a [`SharedPositionTree`].
///
/// A buffer always holds at least one (possibly empty) line. Offsets are
/// `char` offsets into the whole text, with one position per line break:
/// the weighted length the tree aggregates is exactly that, plus one for
/// the missing terminator of the last line.
///
/// Every method runs as a single critical section on the tree, so the
/// buffer can be shared between threads.
pub struct LineBuffer {
    lines: SharedPositionTree<Line>,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        let lines = SharedPositionTree::with_config(config);
        lines.add(Line::default());
        Self { lines }
    }

    pub fn from_text(text: &str) -> Self {
        let buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    /// Replaces the whole content, splitting at `\n`.
    pub fn set_text(&self, text: &str) {
        let count = self.lines.transaction(|t| {
            fill(t, text);
            t.count()
        });
        debug!("loaded {count} lines into buffer");
    }

    pub fn line_count(&self) -> usize {
        self.lines.count()
    }

    /// Characters in the document, line breaks included.
    pub fn char_count(&self) -> usize {
        self.lines.total_weighted_length().saturating_sub(1)
    }

    /// Length in chars of the longest line.
    pub fn longest_line(&self) -> usize {
        self.lines.max_weighted_length()
    }

    /// Text of `line`, or an empty string past the last line.
    pub fn line(&self, line: usize) -> String {
        self.lines
            .with(line, |l| l.as_str().to_owned())
            .unwrap_or_default()
    }

    /// Length of `line` in chars, `0` past the last line.
    pub fn line_len(&self, line: usize) -> usize {
        self.lines.with(line, Line::len).unwrap_or(0)
    }

    /// Consecutive lines, walked through node adjacency after a single
    /// positional lookup. Out-of-range lines are skipped.
    pub fn lines_in(&self, range: Range<usize>) -> Vec<String> {
        let t = self.lines.lock();
        let mut out = Vec::with_capacity(range.len().min(t.count().saturating_sub(range.start)));
        let mut curr = t.node_at(range.start);
        for _ in range {
            let Some(id) = curr else {
                break;
            };
            if let Some(line) = t.payload(id) {
                out.push(line.as_str().to_owned());
            }
            curr = t.next(id);
        }
        out
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .snapshot()
            .into_iter()
            .map(Line::into_string)
            .collect()
    }

    pub fn text(&self) -> String {
        let t = self.lines.lock();
        let mut out = String::with_capacity(t.total_weighted_length());
        for (i, line) in t.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(line.as_str());
        }
        out
    }

    /// Document offset of `position`.
    pub fn offset_of(&self, position: Position) -> Result<usize, BufferError> {
        let t = self.lines.lock();
        let id = locate(&t, position)?;
        let start = t.start_index(id).ok_or(TreeError::StaleNode(id))?;
        Ok(start + position.col)
    }

    /// Line and column of document offset `offset`. The offset of a line
    /// break maps to the end of the line it terminates.
    pub fn position_of(&self, offset: usize) -> Result<Position, BufferError> {
        let t = self.lines.lock();
        let (id, col) = t.find_by_offset(offset).ok_or(BufferError::OffsetOutOfRange {
            offset,
            len: t.total_weighted_length().saturating_sub(1),
        })?;
        let line = t.index_of(id).ok_or(TreeError::StaleNode(id))?;
        Ok(Position { line, col })
    }

    /// Inserts `text` at `position` and returns the position right after
    /// it. Line breaks in `text` split the line.
    pub fn insert(&self, position: Position, text: &str) -> Result<Position, BufferError> {
        let end = self.lines.transaction(|t| insert_text(t, position, text))?;
        trace!("inserted {} chars at {position:?}", text.chars().count());
        Ok(end)
    }

    pub fn insert_char(&self, position: Position, ch: char) -> Result<Position, BufferError> {
        self.insert(position, ch.encode_utf8(&mut [0; 4]))
    }

    /// Breaks the line at `position`; returns the start of the new line.
    pub fn split_line(&self, position: Position) -> Result<Position, BufferError> {
        self.insert(position, "\n")
    }

    /// Removes the text between `start` and `end` and returns it.
    pub fn delete(&self, start: Position, end: Position) -> Result<String, BufferError> {
        if start > end {
            return Err(BufferError::InvertedRange { start, end });
        }
        let removed = self.lines.transaction(|t| delete_range(t, start, end))?;
        trace!("deleted {start:?}..{end:?}");
        Ok(removed)
    }

    /// Deletes the character at `position`. At the end of a line this joins
    /// the next line; at the end of the document it does nothing.
    pub fn delete_char(&self, position: Position) -> Result<Option<char>, BufferError> {
        let removed = self.lines.transaction(|t| {
            let id = locate(t, position)?;
            let len = t.payload(id).map_or(0, Line::len);
            let end = if position.col < len {
                Position::new(position.line, position.col + 1)
            } else if position.line + 1 < t.count() {
                Position::new(position.line + 1, 0)
            } else {
                return Ok(String::new());
            };
            delete_range(t, position, end)
        })?;
        Ok(removed.chars().next())
    }

    /// Appends line `line + 1` to `line`. Returns `false` when `line` is the
    /// last line.
    pub fn merge_lines(&self, line: usize) -> Result<bool, BufferError> {
        self.lines.transaction(|t| {
            let count = t.count();
            let len = t
                .get(line)
                .map(Line::len)
                .ok_or(BufferError::LineOutOfRange { line, count })?;
            if line + 1 >= count {
                return Ok(false);
            }
            delete_range(t, Position::new(line, len), Position::new(line + 1, 0))?;
            Ok(true)
        })
    }

    /// Empties the document down to a single blank line.
    pub fn clear(&self) {
        self.lines.clear(Line::default());
    }

    pub fn assert_valid(&self) -> Result<(), String> {
        self.lines.assert_valid()
    }
}

fn fill(t: &mut PositionTree<Line>, text: &str) {
    let mut pieces = text.split('\n');
    t.clear(Line::new(pieces.next().unwrap_or_default()));
    t.extend(pieces.map(Line::new));
}

/// Resolves `position` to its line node, checking the column.
fn locate(t: &PositionTree<Line>, position: Position) -> Result<NodeKey, BufferError> {
    let id = t.node_at(position.line).ok_or(BufferError::LineOutOfRange {
        line: position.line,
        count: t.count(),
    })?;
    let len = t.payload(id).map_or(0, Line::len);
    if position.col > len {
        return Err(BufferError::ColumnOutOfRange { position, len });
    }
    Ok(id)
}

fn insert_text(
    t: &mut PositionTree<Line>,
    position: Position,
    text: &str,
) -> Result<Position, BufferError> {
    let id = locate(t, position)?;
    let mut pieces = text.split('\n');
    let head = pieces.next().unwrap_or_default();
    let rest: Vec<&str> = pieces.collect();

    let Some((last, middle)) = rest.split_last() else {
        t.update_node(id, |l| l.insert_str(position.col, head))?;
        return Ok(Position::new(position.line, position.col + head.chars().count()));
    };

    let tail = t.update_node(id, |l| {
        let tail = l.split_off(position.col);
        l.push_str(head);
        tail
    })?;
    let mut at = position.line + 1;
    for piece in middle {
        t.insert(Line::new(*piece), at);
        at += 1;
    }
    let mut closing = Line::new(*last);
    closing.push_str(&tail);
    t.insert(closing, at);
    Ok(Position::new(at, last.chars().count()))
}

fn delete_range(
    t: &mut PositionTree<Line>,
    start: Position,
    end: Position,
) -> Result<String, BufferError> {
    let first = locate(t, start)?;
    locate(t, end)?;

    if start.line == end.line {
        return Ok(t.update_node(first, |l| l.remove_range(start.col, end.col))?);
    }

    let mut removed = t.update_node(first, |l| l.split_off(start.col))?;
    for _ in start.line + 1..end.line {
        let line = t.delete(start.line + 1)?;
        removed.push('\n');
        removed.push_str(line.as_str());
    }
    let mut closing = t.delete(start.line + 1)?;
    let kept = closing.split_off(end.col);
    removed.push('\n');
    removed.push_str(closing.as_str());
    t.update_node(first, |l| l.push_str(&kept))?;
    Ok(removed)
}
