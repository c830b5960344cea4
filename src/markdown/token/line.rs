//! Line tokens
//!
//!     Markdown block structure is decided line by line, so the tokenizer produces exactly
//!     one token per source line. Each token carries the classification of the line and
//!     the attributes the block parser needs to act on it without looking at the text
//!     again: heading level, list marker shape and content width, fence character and
//!     info string, and so on.
//!
//!     A line may look like more than one construct (`---` is both a thematic break and a
//!     setext underline, `- ` could open a list or underline a heading). Classification
//!     order settles the ambiguity; the block parser resolves the cases that depend on
//!     context (see [classify](crate::markdown::lexing::line_classification::classify)).
//!
//! Line Kinds
//!
//!         - Blank: empty or only spaces and tabs
//!         - AtxHeading: `#` to `######` followed by whitespace or end of line
//!         - SetextUnderline: a run of `=` or `-`
//!         - ThematicBreak: three or more `*`, `-` or `_`
//!         - ListMarker: a bullet (`-`, `+`, `*`) or an ordered marker (`1.`, `1)`)
//!         - BlockquoteMarker: a line starting with `>`
//!         - CodeFence: three or more backticks or tildes
//!         - IndentedCode: indented four or more columns
//!         - Paragraph: anything else

use crate::markdown::ast::Point;
use serde::Serialize;
use std::fmt;

/// How a line was terminated in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    CrLf,
    Cr,
    /// Last line of input without a terminator.
    #[default]
    None,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Cr => "\r",
            LineEnding::None => "",
        }
    }
}

/// Bullet or ordered list marker attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListMarker {
    pub kind: ListKind,
    /// Length of the marker itself in bytes (`-` is 1, `10.` is 3).
    pub marker_len: usize,
    /// Column at which item content starts, counted from the start of the line.
    pub width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Bullet(char),
    Ordered { start: u32, delimiter: char },
}

impl ListKind {
    /// Two markers belong to the same list when they are the same kind. Bullets must
    /// also use the same character; ordered markers may mix `.` and `)`.
    pub fn continues(&self, other: &ListKind) -> bool {
        match (self, other) {
            (ListKind::Bullet(a), ListKind::Bullet(b)) => a == b,
            (ListKind::Ordered { .. }, ListKind::Ordered { .. }) => true,
            _ => false,
        }
    }
}

/// Code fence attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fence {
    pub marker: char,
    pub length: usize,
    pub info: String,
}

/// The classification of a line token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TokenKind {
    Blank,
    AtxHeading { level: u8 },
    SetextUnderline { level: u8 },
    /// `compact` is set when the marker characters have no separators between them.
    ThematicBreak { marker: char, compact: bool },
    ListMarker(ListMarker),
    BlockquoteMarker,
    CodeFence(Fence),
    IndentedCode,
    Paragraph,
}

impl TokenKind {
    pub fn is_blank(&self) -> bool {
        matches!(self, TokenKind::Blank)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Blank => "BLANK",
            TokenKind::AtxHeading { .. } => "ATX_HEADING",
            TokenKind::SetextUnderline { .. } => "SETEXT_UNDERLINE",
            TokenKind::ThematicBreak { .. } => "THEMATIC_BREAK",
            TokenKind::ListMarker(_) => "LIST_MARKER",
            TokenKind::BlockquoteMarker => "BLOCKQUOTE_MARKER",
            TokenKind::CodeFence(_) => "CODE_FENCE",
            TokenKind::IndentedCode => "INDENTED_CODE",
            TokenKind::Paragraph => "PARAGRAPH",
        };
        write!(f, "{name}")
    }
}

/// One classified source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// The line exactly as given to the tokenizer, without its line ending.
    pub raw: String,
    /// The line with its block-level prefix removed (indentation, markers).
    pub content: String,
    /// Leading whitespace width in columns, tabs expanded.
    pub indent: usize,
    /// Expanded column at which `raw` begins in the full source line.
    #[serde(skip)]
    pub origin: usize,
    pub start: Point,
    pub end: Point,
    pub ending: LineEnding,
}

impl Token {
    /// 1-based line number
    pub fn line(&self) -> usize {
        self.start.line
    }

    /// Byte offset of the first character of the line
    pub fn offset(&self) -> usize {
        self.start.offset
    }

    pub fn is_blank(&self) -> bool {
        self.kind.is_blank()
    }

    pub fn list_marker(&self) -> Option<&ListMarker> {
        match &self.kind {
            TokenKind::ListMarker(marker) => Some(marker),
            _ => None,
        }
    }

    pub fn fence(&self) -> Option<&Fence> {
        match &self.kind {
            TokenKind::CodeFence(fence) => Some(fence),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_ending_as_str() {
        assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
        assert_eq!(LineEnding::None.as_str(), "");
    }

    #[test]
    fn test_list_kind_continues() {
        let dash = ListKind::Bullet('-');
        let star = ListKind::Bullet('*');
        let dot = ListKind::Ordered {
            start: 1,
            delimiter: '.',
        };
        let dot_later = ListKind::Ordered {
            start: 7,
            delimiter: '.',
        };
        let paren = ListKind::Ordered {
            start: 1,
            delimiter: ')',
        };

        assert!(dash.continues(&dash));
        assert!(!dash.continues(&star));
        assert!(dot.continues(&dot_later));
        assert!(dot.continues(&paren));
        assert!(!dash.continues(&dot));
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::AtxHeading { level: 2 }.to_string(), "ATX_HEADING");
        assert_eq!(TokenKind::Blank.to_string(), "BLANK");
    }
}
