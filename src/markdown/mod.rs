//! Markdown parsing
//!
//!     Parsing runs in stages, each a pure function of the one before:
//!
//!         source ──tokenize──▶ line tokens ──parse_blocks──▶ block tree + references
//!                ──resolve_inlines──▶ tree
//!
//!     - [lexing] splits the source into lines and classifies each one.
//!     - [parsing] builds the block structure from the line tokens, collecting link
//!       reference definitions. Paragraph and heading text is kept raw.
//!     - [inlines] parses raw text into inline nodes.
//!     - [assembling] resolves every raw span once the reference map is complete.
//!
//!     The stages are also available as composable [transforms]. None of them can fail:
//!     every input, including the empty string, produces a tree.

pub mod assembling;
pub mod ast;
pub mod config;
pub mod error;
pub mod formats;
pub mod inlines;
pub mod lexing;
pub mod parsing;
pub mod testing;
pub mod token;
pub mod transforms;

use ast::Root;
use parsing::ParseOptions;

pub use inlines::parse_inline;
pub use lexing::tokenize;
pub use parsing::{parse_blocks, parse_blocks_with_options};

/// Parse a document into a fully resolved tree.
pub fn parse(source: &str) -> Root {
    parse_with_options(source, &ParseOptions::default())
}

pub fn parse_with_options(source: &str, options: &ParseOptions) -> Root {
    let (root, references) = parse_blocks_with_options(source, options);
    assembling::resolve_inlines(root, &references)
}
