//! Standard transform definitions
//!
//! Pre-built pipelines for the common paths, defined as `once_cell::sync::Lazy` statics.
//! They use the default [ParseOptions](crate::markdown::parsing::ParseOptions); build a
//! pipeline from the [stages](super::stages) to use others.

use crate::markdown::ast::Root;
use crate::markdown::token::Token;
use crate::markdown::transforms::stages::{BlockTree, ParseBlocks, ResolveInlines, Tokenize};
use crate::markdown::transforms::Transform;
use once_cell::sync::Lazy;

pub type TokenizationTransform = Transform<String, Vec<Token>>;
pub type BlockTransform = Transform<String, BlockTree>;
pub type AstTransform = Transform<String, Root>;

/// String → line tokens.
///
/// ```rust
/// use marktree::markdown::transforms::standard::TOKENIZATION;
///
/// let tokens = TOKENIZATION.run("# Title\ntext\n".to_string());
/// assert_eq!(tokens.len(), 2);
/// ```
pub static TOKENIZATION: Lazy<TokenizationTransform> =
    Lazy::new(|| Transform::from_fn(|source: String| source).then(Tokenize));

/// String → block tree with unresolved inline content, plus the reference map.
pub static BLOCK_PARSING: Lazy<BlockTransform> = Lazy::new(|| {
    Transform::from_fn(|source: String| source)
        .then_transform(&TOKENIZATION)
        .then(ParseBlocks::default())
});

/// String → fully resolved tree.
///
/// ```rust
/// use marktree::markdown::transforms::standard::PARSING;
///
/// let root = PARSING.run("*hi*".to_string());
/// assert!(root.children[0].as_paragraph().unwrap().children.is_resolved());
/// ```
pub static PARSING: Lazy<AstTransform> = Lazy::new(|| {
    Transform::from_fn(|source: String| source)
        .then_transform(&BLOCK_PARSING)
        .then(ResolveInlines)
});
