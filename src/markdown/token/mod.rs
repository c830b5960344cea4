//! Token types produced by the tokenizer
//!
//! Markdown is tokenized line by line, so the only token is the [`Token`] for one line.
//! See [line] for the kinds and their attributes.

pub mod line;

pub use line::{Fence, LineEnding, ListKind, ListMarker, Token, TokenKind};
