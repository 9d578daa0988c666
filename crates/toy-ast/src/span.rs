//! Source location tracking

use serde::{Deserialize, Serialize};

/// A span representing a range in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the start
    pub start: usize,
    /// Byte offset of the end (exclusive)
    pub end: usize,
    /// 1-based line of `start`
    pub line: u32,
    /// 1-based column of `start`, counted in characters
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    pub fn dummy() -> Self {
        Self {
            start: 0,
            end: 0,
            line: 1,
            column: 1,
        }
    }

    /// Merge two spans into one that covers both
    pub fn merge(self, other: Span) -> Span {
        let (line, column) = if other.start < self.start {
            (other.line, other.column)
        } else {
            (self.line, self.column)
        };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line,
            column,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::dummy()
    }
}

/// A human-facing line/column pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Maps byte offsets to line/column positions.
///
/// Built once per source text; lookups are a binary search over line starts.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .char_indices()
                .filter(|(_, c)| *c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            source,
            line_starts,
        }
    }

    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - line_start);
        Position {
            line: line as u32 + 1,
            column: column as u32 + 1,
        }
    }

    /// Build a span for a byte range, resolving its start position
    pub fn span(&self, start: usize, end: usize) -> Span {
        let pos = self.position(start);
        Span::new(start, end, pos.line, pos.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_based() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.position(0), Position { line: 1, column: 1 });
        assert_eq!(index.position(1), Position { line: 1, column: 2 });
        assert_eq!(index.position(3), Position { line: 2, column: 1 });
        assert_eq!(index.position(6), Position { line: 3, column: 1 });
        assert_eq!(index.position(7), Position { line: 4, column: 1 });
    }

    #[test]
    fn columns_count_characters() {
        let index = LineIndex::new("é = 1");
        // 'é' is two bytes
        assert_eq!(index.position(3), Position { line: 1, column: 3 });
    }

    #[test]
    fn merge_keeps_earliest_position() {
        let index = LineIndex::new("a\nbc");
        let a = index.span(0, 1);
        let c = index.span(3, 4);
        let merged = c.merge(a);
        assert_eq!(merged.start, 0);
        assert_eq!(merged.end, 4);
        assert_eq!(merged.position(), Position { line: 1, column: 1 });
    }
}
