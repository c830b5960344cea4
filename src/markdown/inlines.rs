//! Inline parsing
//!
//!     The inline parser turns the raw text of a paragraph or heading into inline nodes:
//!     text, emphasis, strong emphasis, code spans, links, images and hard breaks.
//!
//!     It runs in two passes. The [scanner](parser) walks the text once, emitting nodes
//!     for everything it can decide locally and recording runs of `*` and `_` as
//!     delimiters. [Delimiter resolution](delimiters) then pairs those runs into emphasis.
//!     Links are decided during the scan; their text is parsed by a nested scanner, so
//!     emphasis never spans a link boundary.
//!
//!     Link references are looked up in the [ReferenceMap] collected by the block parser.
//!     Like the block parser, the inline parser never fails: anything that does not form
//!     a construct is kept as literal text.
//!
//! Positions
//!
//!     Every node produced from a [RawSpan] with source anchors carries a position. For
//!     free-standing text, [parse_inline] takes the point where the text starts; without
//!     one, nodes carry no position.

mod delimiters;
pub mod entities;
mod links;
mod parser;

use crate::markdown::ast::{Inline, Point, RawSpan};
use crate::markdown::parsing::ReferenceMap;
use parser::InlineParser;

pub use entities::decode_entity;

/// Parse inline content of free-standing text.
///
/// With a start point, lines after the first are taken to start at column 1.
pub fn parse_inline(text: &str, references: &ReferenceMap, start: Option<Point>) -> Vec<Inline> {
    parse_span(&RawSpan::from_text(text, start), references)
}

/// Parse inline content of a raw span recorded by the block parser.
pub fn parse_span(span: &RawSpan, references: &ReferenceMap) -> Vec<Inline> {
    InlineParser::new(span, references).parse()
}
