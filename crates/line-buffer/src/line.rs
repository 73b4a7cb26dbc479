use line_forest::Weighted;

/// One line of text, without its terminator.
///
/// Columns are `char` positions. The character count is cached because the
/// tree asks for it on every aggregate recomputation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    text: String,
    chars: usize,
}

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        debug_assert!(!text.contains('\n'), "line text holds a terminator");
        let chars = text.chars().count();
        Self { text, chars }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }

    /// Byte index of column `col`; `col == len()` maps to the end.
    fn byte_at(&self, col: usize) -> usize {
        self.text
            .char_indices()
            .nth(col)
            .map_or(self.text.len(), |(i, _)| i)
    }

    pub(crate) fn insert_str(&mut self, col: usize, s: &str) {
        let at = self.byte_at(col);
        self.text.insert_str(at, s);
        self.chars += s.chars().count();
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.chars += s.chars().count();
    }

    /// Cuts the line at `col` and returns everything after it.
    pub(crate) fn split_off(&mut self, col: usize) -> String {
        let at = self.byte_at(col);
        let tail = self.text.split_off(at);
        self.chars = col;
        tail
    }

    /// Removes columns `start..end` and returns them.
    pub(crate) fn remove_range(&mut self, start: usize, end: usize) -> String {
        let (from, to) = (self.byte_at(start), self.byte_at(end));
        let removed: String = self.text.drain(from..to).collect();
        self.chars -= end - start;
        removed
    }

    pub(crate) fn into_string(self) -> String {
        self.text
    }
}

impl Weighted for Line {
    fn length(&self) -> usize {
        self.chars
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_track_char_count() {
        let mut line = Line::new("grüße");
        assert_eq!(line.len(), 5);
        line.insert_str(2, "--");
        assert_eq!(line.as_str(), "gr--üße");
        assert_eq!(line.len(), 7);
        assert_eq!(line.remove_range(2, 5), "--ü");
        assert_eq!(line.as_str(), "grße");
        assert_eq!(line.split_off(3), "e");
        assert_eq!(line.len(), 3);
        line.push_str("é");
        assert_eq!(line.length(), 4);
    }
}
