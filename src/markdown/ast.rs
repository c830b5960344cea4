//! AST definitions and utilities for Markdown documents
//!
//!     This module provides the document tree produced by the parser, along with
//!     utilities for tracking source positions and for walking the tree uniformly.
//!
//! Blocks and inlines
//!
//!     A document is a [`Root`] holding a sequence of [`Block`]s. Containers (list items,
//!     blockquotes) hold blocks again, so the structure nests arbitrarily. Paragraphs and
//!     headings hold [`Phrasing`], which is either the raw text recorded by block parsing
//!     or the [`Inline`] nodes resolved from it.
//!
//! ## How Location Tracking Works
//!
//!     Every token records the [`Point`] where its line starts. Block nodes span from the
//!     start of their first line to the end of their last line. Container bodies are
//!     re-parsed from extracted lines that keep their original points, so positions of
//!     nested blocks are always relative to the whole document.
//!
//!     Paragraph and heading text is stored as a [`RawSpan`] with one anchor per line. The
//!     inline parser maps byte offsets of the span through these anchors, which gives each
//!     inline node an exact source position.

pub mod nodes;
pub mod phrasing;
pub mod range;
pub mod snapshot;
pub mod traits;

pub use nodes::{
    plain_text, Block, Blockquote, Break, Code, Emphasis, Heading, Image, Inline, InlineCode,
    Link, List, ListItem, Paragraph, Root, Strong, Text, ThematicBreak,
};
pub use phrasing::{Phrasing, RawSpan};
pub use range::{Point, Position, SourceLocation};
pub use snapshot::{snapshot_from_root, AstSnapshot};
pub use traits::AstNode;
