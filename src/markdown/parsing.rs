//! Block parsing
//!
//!     Block parsing turns the line tokens into the block structure of the document:
//!     headings, paragraphs, lists, blockquotes, code and thematic breaks. It does not
//!     look inside paragraph or heading text; that text is kept as an unresolved raw span
//!     for the inline parser.
//!
//!     Link reference definitions are collected here, into a [ReferenceMap] shared by
//!     the whole document. See [references].
//!
//!     Parsing never fails. A construct that does not parse degrades to a more general
//!     one: an unterminated fence runs to the end of input, a line that almost is a
//!     reference definition is ordinary paragraph text.
//!
//!     The engine is in [engine], leaf builders in [leaves] and the containers (lists and
//!     blockquotes) in [containers].

mod containers;
pub(crate) mod engine;
mod leaves;
pub mod references;

use crate::markdown::ast::Root;
use crate::markdown::lexing;
use crate::markdown::token::Token;
use engine::BlockParser;
use serde::{Deserialize, Serialize};

pub use references::{normalize_label, Definition, ReferenceMap};

/// Limits applied while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Deepest level of nested containers that is parsed. Content nested deeper is kept
    /// as paragraph text.
    pub max_nesting_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: 64,
        }
    }
}

/// Parse the block structure of a document.
///
/// Paragraph and heading text stays unresolved. Returns the tree and the reference
/// definitions found anywhere in the document.
pub fn parse_blocks(source: &str) -> (Root, ReferenceMap) {
    parse_blocks_with_options(source, &ParseOptions::default())
}

pub fn parse_blocks_with_options(source: &str, options: &ParseOptions) -> (Root, ReferenceMap) {
    parse_tokens(&lexing::tokenize(source), options)
}

/// Parse the block structure from an already tokenized document.
pub fn parse_tokens(tokens: &[Token], options: &ParseOptions) -> (Root, ReferenceMap) {
    let mut references = ReferenceMap::new();
    let children = BlockParser::new(&mut references, options).parse(tokens);
    tracing::debug!(
        blocks = children.len(),
        references = references.len(),
        "parsed block structure"
    );
    (Root::new(children), references)
}
