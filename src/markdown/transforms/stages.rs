//! Individual transformation stages
//!
//! Each stage wraps one step of the parse behind the [Runnable] trait.

use crate::markdown::assembling::resolve_inlines;
use crate::markdown::ast::Root;
use crate::markdown::lexing;
use crate::markdown::parsing::{parse_tokens, ParseOptions, ReferenceMap};
use crate::markdown::token::Token;
use crate::markdown::transforms::Runnable;

/// A block tree with unresolved inline content, and the references it defines.
pub type BlockTree = (Root, ReferenceMap);

/// Source text into line tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenize;

impl Runnable<String, Vec<Token>> for Tokenize {
    fn run(&self, input: String) -> Vec<Token> {
        lexing::tokenize(&input)
    }
}

impl Runnable<&str, Vec<Token>> for Tokenize {
    fn run(&self, input: &str) -> Vec<Token> {
        lexing::tokenize(input)
    }
}

/// Line tokens into the block tree.
#[derive(Debug, Clone, Default)]
pub struct ParseBlocks {
    options: ParseOptions,
}

impl ParseBlocks {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl Runnable<Vec<Token>, BlockTree> for ParseBlocks {
    fn run(&self, input: Vec<Token>) -> BlockTree {
        parse_tokens(&input, &self.options)
    }
}

/// Raw spans of a block tree into inline nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveInlines;

impl Runnable<BlockTree, Root> for ResolveInlines {
    fn run(&self, (root, references): BlockTree) -> Root {
        resolve_inlines(root, &references)
    }
}
