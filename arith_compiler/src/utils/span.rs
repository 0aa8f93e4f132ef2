//! Source location tracking
//!
//! Positions and spans are attached to every token and to every diagnostic.
//! Offsets are byte offsets into the source; lines and columns are 1-based.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Offset 0, line 1, column 1
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Advance position by one character; tabs move to the next 4-column stop
    pub fn advance(self, ch: char) -> Self {
        match ch {
            '\n' => Self::new(self.offset + 1, self.line + 1, 1),
            '\t' => Self::new(
                self.offset + 1,
                self.line,
                self.column + 4 - ((self.column - 1) % 4),
            ),
            _ => Self::new(self.offset + ch.len_utf8(), self.line, self.column + 1),
        }
    }

    pub fn advance_str(self, s: &str) -> Self {
        s.chars().fold(self, |pos, ch| pos.advance(ch))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text; `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Span covering the single character `ch` at `pos`
    pub fn single(pos: Position, ch: char) -> Self {
        Self {
            start: pos,
            end: pos.advance(ch),
        }
    }

    /// Zero-width span at `pos`
    pub fn point(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        let start = if self.start.offset <= other.start.offset {
            self.start
        } else {
            other.start
        };

        let end = if self.end.offset >= other.end.offset {
            self.end
        } else {
            other.end
        };

        Self { start, end }
    }

    /// Byte length
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Source text for this span, or `None` when the span lies outside `input`
    pub fn slice<'a>(&self, input: &'a str) -> Option<&'a str> {
        input.get(self.start.offset..self.end.offset)
    }

    /// Placeholder span for values not tied to source text
    pub fn dummy() -> Self {
        Self::point(Position::start())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Line index over a source string, used to render diagnostics
#[derive(Debug, Clone)]
pub struct SourceMap {
    pub source: String,
    /// Byte offsets of line starts
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: String) -> Self {
        let mut line_starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Line and column for a byte offset (clamped to the end of the source)
    pub fn position_at(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };

        let line_start = self.line_starts[line];
        Position::start()
            .advance_str(&self.source[..line_start])
            .advance_str(&self.source[line_start..offset])
    }

    /// Text of a 1-based line without its terminator
    pub fn get_line(&self, line_num: u32) -> Option<&str> {
        let line_idx = (line_num as usize).checked_sub(1)?;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());

        Some(self.source[start..end].trim_end_matches('\r'))
    }

    /// Cargo-style diagnostic with the offending line and a caret underline
    pub fn format_error(&self, span: &Span, message: &str) -> String {
        let mut result = String::new();

        result.push_str(&format!("error: {}\n", message));
        result.push_str(&format!(
            "  --> {}:{}\n",
            span.start.line, span.start.column
        ));

        if let Some(line) = self.get_line(span.start.line) {
            let line_num_str = span.start.line.to_string();
            let padding = " ".repeat(line_num_str.len());

            result.push_str(&format!("{} |\n", padding));
            result.push_str(&format!("{} | {}\n", line_num_str, line));

            let line_width = line.chars().count() as u32 + 1;
            let caret_end = if span.start.line == span.end.line {
                span.end.column
            } else {
                line_width
            };
            let caret_count = caret_end.saturating_sub(span.start.column).max(1);

            result.push_str(&format!(
                "{} | {}{}\n",
                padding,
                " ".repeat(span.start.column.saturating_sub(1) as usize),
                "^".repeat(caret_count as usize)
            ));
        }

        result
    }
}
