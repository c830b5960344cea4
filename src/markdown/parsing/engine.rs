//! Block parsing engine
//!
//!     The engine walks the token stream with a cursor and dispatches on the kind of the
//!     token under it. Every builder returns the index of the first token it did not
//!     consume, so the loop always makes progress and every token ends up in a block, in
//!     the reference map, or skipped as blank.
//!
//!     Containers (blockquotes and list items) extract their lines, strip their markers
//!     and parse the result with the same engine one level deeper. The reference map and
//!     the depth counter are shared by all levels of one document.

use super::leaves;
use super::references::{parse_definition, ReferenceMap};
use super::ParseOptions;
use crate::markdown::ast::{Block, Heading, Phrasing};
use crate::markdown::lexing::{tokenize_lines, SourceLine};
use crate::markdown::token::{Token, TokenKind};

pub(crate) struct BlockParser<'r> {
    pub(super) references: &'r mut ReferenceMap,
    pub(super) max_depth: usize,
    pub(super) depth: usize,
}

impl<'r> BlockParser<'r> {
    pub(crate) fn new(references: &'r mut ReferenceMap, options: &ParseOptions) -> Self {
        Self {
            references,
            max_depth: options.max_nesting_depth,
            depth: 0,
        }
    }

    /// Parse a token stream into blocks.
    pub(crate) fn parse(&mut self, tokens: &[Token]) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut cursor = 0;

        while let Some(token) = tokens.get(cursor) {
            let (block, next) = match &token.kind {
                TokenKind::Blank => (None, cursor + 1),
                TokenKind::AtxHeading { level } => {
                    (Some(leaves::atx_heading(token, *level)), cursor + 1)
                }
                TokenKind::ThematicBreak { .. } => {
                    (Some(leaves::thematic_break(token)), cursor + 1)
                }
                TokenKind::CodeFence(fence) => {
                    let (block, next) = leaves::fenced_code(tokens, cursor, fence);
                    (Some(block), next)
                }
                TokenKind::IndentedCode => {
                    let (block, next) = leaves::indented_code(tokens, cursor);
                    (Some(block), next)
                }
                TokenKind::BlockquoteMarker => {
                    let (block, next) = self.blockquote(tokens, cursor);
                    (Some(block), next)
                }
                TokenKind::ListMarker(marker) => {
                    let (block, next) = self.list(tokens, cursor, *marker);
                    (Some(block), next)
                }
                TokenKind::Paragraph | TokenKind::SetextUnderline { .. } => {
                    self.paragraph(tokens, cursor)
                }
            };
            blocks.extend(block);
            cursor = next;
        }

        blocks
    }

    /// Parse lines extracted from a container one level deeper.
    pub(super) fn parse_nested(&mut self, lines: Vec<SourceLine>) -> Vec<Block> {
        if self.depth >= self.max_depth {
            tracing::warn!(
                depth = self.depth,
                line = lines.first().map(|line| line.start.line),
                "nesting limit reached, keeping container content as text"
            );
            return leaves::flattened(&lines).into_iter().collect();
        }

        let tokens = tokenize_lines(&lines);
        self.depth += 1;
        let blocks = self.parse(&tokens);
        self.depth -= 1;
        blocks
    }

    /// A run of paragraph lines: a setext heading, a reference definition or a paragraph.
    fn paragraph(&mut self, tokens: &[Token], start: usize) -> (Option<Block>, usize) {
        let end = leaves::paragraph_run(tokens, start);
        let lines = &tokens[start..end];

        if let Some(underline) = tokens.get(end) {
            if let Some(level) = leaves::setext_level(underline) {
                let heading = Heading {
                    depth: level,
                    children: Phrasing::Unresolved(leaves::paragraph_text(lines)),
                    position: leaves::span(&tokens[start], underline),
                };
                return (Some(Block::Heading(heading)), end + 1);
            }
        }

        if let [line] = lines {
            if let Some((label, definition)) = parse_definition(line.raw.trim()) {
                if !self.references.insert(&label, definition) {
                    tracing::debug!(label = %label, "duplicate reference definition ignored");
                }
                return (None, end);
            }
        }

        (leaves::paragraph(lines), end)
    }
}
