//! Phrasing content of paragraphs and headings
//!
//!     Block parsing does not look inside a paragraph or heading: it only records the text
//!     that belongs to it. That text stays [`Phrasing::Unresolved`] until the assembling
//!     stage hands it to the inline parser, which turns it into [`Phrasing::Resolved`]
//!     children. The two states are explicit so that a half-built tree can be inspected
//!     (and serialized) at either stage.
//!
//! Anchors
//!
//!     A raw span is built from several source lines with their leading whitespace
//!     removed and joined with `\n`. Each line records an anchor, the source point where
//!     its text begins, so that any byte offset into the span can be traced back to the
//!     original document. Within a line the span text is a byte-for-byte copy of the
//!     source, which keeps the mapping exact.

use super::nodes::Inline;
use super::range::{Point, Position, SourceLocation};
use serde::ser::{Serialize, Serializer};

/// A raw text span awaiting inline resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSpan {
    text: String,
    anchors: Vec<Anchor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    at: usize,
    point: Point,
}

impl RawSpan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a span from free-standing text.
    ///
    /// With a start point every line gets an anchor (lines after the first start at
    /// column 1). Without one the span carries no anchors and maps to no positions.
    pub fn from_text(text: &str, start: Option<Point>) -> Self {
        let anchors = match start {
            Some(origin) => {
                let location = SourceLocation::new(text);
                (0..location.line_count())
                    .filter_map(|line| location.line_start(line))
                    .map(|at| Anchor {
                        at,
                        point: location.point_from(origin, at),
                    })
                    .collect()
            }
            None => Vec::new(),
        };
        Self {
            text: text.to_string(),
            anchors,
        }
    }

    /// Append one line whose first byte sits at `point` in the source.
    pub fn push_line(&mut self, line: &str, point: Point) {
        if !self.anchors.is_empty() || !self.text.is_empty() {
            self.text.push('\n');
        }
        self.anchors.push(Anchor {
            at: self.text.len(),
            point,
        });
        self.text.push_str(line);
    }

    /// Drop trailing spaces and tabs of the last line.
    pub fn trim_end(&mut self) {
        let trimmed = self.text.trim_end_matches([' ', '\t']).len();
        self.text.truncate(trimmed);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Map a byte offset within the span to its source point.
    pub fn point_at(&self, offset: usize) -> Option<Point> {
        let index = self.anchors.partition_point(|anchor| anchor.at <= offset);
        let anchor = self.anchors.get(index.checked_sub(1)?)?;
        Some(anchor.point.advance(offset - anchor.at))
    }

    /// Source position of the byte range `start..end` of this span.
    pub fn position(&self, start: usize, end: usize) -> Option<Position> {
        Some(Position::new(self.point_at(start)?, self.point_at(end)?))
    }

    /// A sub-span covering `start..end` of this span, keeping the source mapping.
    pub fn slice(&self, start: usize, end: usize) -> RawSpan {
        let mut anchors = Vec::new();
        if let Some(point) = self.point_at(start) {
            anchors.push(Anchor { at: 0, point });
        }
        for anchor in &self.anchors {
            if anchor.at > start && anchor.at < end {
                anchors.push(Anchor {
                    at: anchor.at - start,
                    point: anchor.point,
                });
            }
        }
        RawSpan {
            text: self.text[start..end].to_string(),
            anchors,
        }
    }
}

/// Children of a paragraph or heading.
#[derive(Debug, Clone, PartialEq)]
pub enum Phrasing {
    /// Raw text recorded by the block parser.
    Unresolved(RawSpan),
    /// Inline nodes produced by the inline parser.
    Resolved(Vec<Inline>),
}

impl Phrasing {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Phrasing::Resolved(_))
    }

    /// Resolved children, or an empty slice while the span is unresolved.
    pub fn children(&self) -> &[Inline] {
        match self {
            Phrasing::Resolved(children) => children,
            Phrasing::Unresolved(_) => &[],
        }
    }

    /// The raw text while unresolved.
    pub fn raw(&self) -> Option<&str> {
        match self {
            Phrasing::Unresolved(span) => Some(span.text()),
            Phrasing::Resolved(_) => None,
        }
    }
}

impl Default for Phrasing {
    fn default() -> Self {
        Phrasing::Resolved(Vec::new())
    }
}

impl From<Vec<Inline>> for Phrasing {
    fn from(children: Vec<Inline>) -> Self {
        Phrasing::Resolved(children)
    }
}

impl Serialize for Phrasing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Phrasing::Resolved(children) => children.serialize(serializer),
            Phrasing::Unresolved(span) => serializer.serialize_str(span.text()),
        }
    }
}
