//! # marktree
//!
//! A Markdown parser producing an mdast-shaped syntax tree with source positions.
//!
//! ```rust,ignore
//! let root = marktree::parse("# Hello\n\nSome *text*.");
//! println!("{}", serde_json::to_string_pretty(&root)?);
//! ```
//!
//! The work happens in the [markdown] module; the most used entry points are re-exported
//! here. For testing guidelines, see the [testing module](markdown::testing).

pub mod markdown;

pub use markdown::ast::{Block, Inline, Phrasing, Point, Position, RawSpan, Root};
pub use markdown::error::{Error, Result};
pub use markdown::parsing::{ParseOptions, ReferenceMap};
pub use markdown::token::{Token, TokenKind};
pub use markdown::{
    parse, parse_blocks, parse_blocks_with_options, parse_inline, parse_with_options, testing,
    tokenize,
};
