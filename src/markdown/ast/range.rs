//! Position and location tracking for source locations
//!
//! This module defines the data structures for representing points and positions in the
//! Markdown source, as well as utilities for converting byte offsets to line/column points.
//!
//! ## Types
//!
//! - [`Point`] - A line:column point plus its byte offset
//! - [`Position`] - A start/end pair of points
//! - [`SourceLocation`] - Utility for converting byte offsets to points
//!
//! ## Key Design
//!
//! - **1-based lines and columns**: the first character of a document is at `1:1`
//! - **0-based byte offsets**: offsets index directly into the UTF-8 source
//! - **Byte columns**: a column advances by the byte width of each character, so
//!   `column - 1` is always the byte distance from the start of the line
//! - **Efficient conversion**: O(log n) binary search for byte-to-point conversion
//!
//! Nodes carry `Option<Position>`: block nodes always have one, the root has none when
//! the document is empty, and inline nodes only get one when the inline parser was given
//! a start point.

use serde::Serialize;
use std::fmt;

/// A single location in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Point {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Point {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// The point `bytes` further along the same line.
    pub fn advance(self, bytes: usize) -> Self {
        Self {
            line: self.line,
            column: self.column + bytes,
            offset: self.offset + bytes,
        }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Represents a span of source (start and end points)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub start: Point,
    pub end: Point,
}

impl Position {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Check if a point is contained within this position
    pub fn contains(&self, point: Point) -> bool {
        self.start.offset <= point.offset && point.offset <= self.end.offset
    }

    /// Check if `other` lies completely within this position
    pub fn encloses(&self, other: &Position) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }

    /// Build a bounding box that contains all provided positions.
    pub fn bounding_box<'a, I>(mut positions: I) -> Option<Position>
    where
        I: Iterator<Item = &'a Position>,
    {
        let first = *positions.next()?;
        let mut start = first.start;
        let mut end = first.end;

        for position in positions {
            if position.start.offset < start.offset {
                start = position.start;
            }
            if position.end.offset > end.offset {
                end = position.end;
            }
        }

        Some(Position::new(start, end))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Provides fast conversion from byte offsets to points
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl SourceLocation {
    /// Create a new SourceLocation from source text
    ///
    /// `\n`, `\r\n` and a bare `\r` all end a line.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        let bytes = source.as_bytes();

        for (byte_pos, &byte) in bytes.iter().enumerate() {
            match byte {
                b'\n' => line_starts.push(byte_pos + 1),
                b'\r' if bytes.get(byte_pos + 1) != Some(&b'\n') => {
                    line_starts.push(byte_pos + 1)
                }
                _ => {}
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a point, as if the source began at `origin`.
    ///
    /// Lines after the first are assumed to start at column 1.
    pub fn point_from(&self, origin: Point, byte_offset: usize) -> Point {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);
        let column = byte_offset - self.line_starts[line];

        if line == 0 {
            origin.advance(column)
        } else {
            Point::new(origin.line + line, column + 1, origin.offset + byte_offset)
        }
    }

    /// Convert a byte offset to a point in a document starting at `1:1`.
    pub fn byte_to_point(&self, byte_offset: usize) -> Point {
        self.point_from(Point::default(), byte_offset)
    }

    /// Get the total number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the byte offset for the start of a 0-based line index
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }
}
