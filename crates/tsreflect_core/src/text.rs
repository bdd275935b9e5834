//! Text span and line mapping types for source location tracking.
//!
//! Spans are byte offsets into the source text. Line and character
//! coordinates are zero-based, matching what diagnostics print.

use std::fmt;
use std::ops::Range;

/// A position in source text, measured as a byte offset from the start.
pub type TextPos = u32;

/// A span in source text, defined by a start position and a length.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextSpan {
    /// The byte offset where this span starts.
    pub start: TextPos,
    /// The length of this span in bytes.
    pub length: TextPos,
}

impl TextSpan {
    /// Create a new text span.
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from start and end positions.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    /// Create an empty span at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self {
            start: pos,
            length: 0,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    /// Whether this span is empty (zero-length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether this span contains the given position.
    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.start && pos < self.end()
    }

    /// Convert to a byte range for slicing source text.
    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end() as usize
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end())
    }
}

/// A zero-based line/character coordinate pair.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LineAndCharacter {
    pub line: u32,
    pub character: u32,
}

/// Maps byte offsets to zero-based line/character coordinates.
///
/// Built once per source file; lookups binary-search the line starts.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    /// Compute the line map for a source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        let bytes = text.as_bytes();
        let mut pos = 0;
        while pos < bytes.len() {
            match bytes[pos] {
                b'\r' => {
                    if pos + 1 < bytes.len() && bytes[pos + 1] == b'\n' {
                        pos += 1;
                    }
                    line_starts.push((pos + 1) as TextPos);
                }
                b'\n' => {
                    line_starts.push((pos + 1) as TextPos);
                }
                _ => {}
            }
            pos += 1;
        }
        Self { line_starts }
    }

    /// The zero-based line/character of a byte offset.
    pub fn line_and_character_of_pos(&self, pos: TextPos) -> LineAndCharacter {
        let line = match self.line_starts.binary_search(&pos) {
            Ok(line) => line,
            Err(insert) => insert - 1,
        };
        LineAndCharacter {
            line: line as u32,
            character: pos - self.line_starts[line],
        }
    }

    /// Number of lines in the mapped text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
