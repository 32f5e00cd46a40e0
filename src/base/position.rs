use text_size::{TextRange, TextSize};

/// Position tracking for syntax nodes
///
/// Stores the source location (line/column) of a node together with its byte
/// range, so line and character counts can be derived without the source text.
/// A span representing a range in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
    pub range: TextRange,
}

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: Position, end: Position, range: TextRange) -> Self {
        Self { start, end, range }
    }

    /// Create a span from line/column coordinates and byte offsets
    pub fn from_coords(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
        start_offset: u32,
        end_offset: u32,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
            range: TextRange::new(TextSize::from(start_offset), TextSize::from(end_offset)),
        }
    }

    /// Number of line breaks covered by the span.
    pub fn line_count(&self) -> usize {
        self.end.line.saturating_sub(self.start.line)
    }

    /// Number of bytes covered by the span.
    pub fn character_count(&self) -> usize {
        u32::from(self.range.len()) as usize
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: Position) -> bool {
        if position.line < self.start.line || position.line > self.end.line {
            return false;
        }
        if position.line == self.start.line && position.column < self.start.column {
            return false;
        }
        if position.line == self.end.line && position.column > self.end.column {
            return false;
        }
        true
    }
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}
