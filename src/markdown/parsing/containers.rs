//! Container blocks
//!
//! Blockquotes and lists collect the lines that belong to them, remove their markers
//! and indentation, and hand the remaining lines to
//! [parse_nested](super::engine::BlockParser::parse_nested).
//!
//! Blockquotes
//!
//!     A blockquote is a run of `>` lines. A paragraph line without `>` continues the
//!     quote lazily when the quoted line before it had content. A blank line ends it.
//!
//! Lists
//!
//!     A list is a run of items with markers of the same type: the same bullet character,
//!     or ordered markers with either delimiter. A marker starts a new item when it is
//!     indented less than the content column of the current item. Other lines belong to
//!     the current item when they are indented at least to its content column, or when
//!     they are paragraph or indented code lines directly following it (lazy
//!     continuation). Blank lines belong to the item only when more item content follows.
//!
//!     The list is loose (`spread`) when a blank line appears anywhere between two item
//!     markers. Blank lines after the last item do not count.

use super::engine::BlockParser;
use super::leaves::span;
use crate::markdown::ast::{Block, Blockquote, List, ListItem};
use crate::markdown::lexing::indentation::is_blank;
use crate::markdown::lexing::SourceLine;
use crate::markdown::token::{ListKind, ListMarker, Token, TokenKind};

impl BlockParser<'_> {
    pub(super) fn blockquote(&mut self, tokens: &[Token], start: usize) -> (Block, usize) {
        let mut lines = Vec::new();
        let mut last = start;
        let mut open_content = false;

        for (index, token) in tokens.iter().enumerate().skip(start) {
            match token.kind {
                TokenKind::BlockquoteMarker => {
                    let line = quoted_line(token);
                    open_content = !is_blank(&line.text);
                    lines.push(line);
                }
                TokenKind::Paragraph if open_content => lines.push(SourceLine::from(token)),
                _ => break,
            }
            last = index;
        }

        let children = self.parse_nested(lines);
        let quote = Blockquote {
            children,
            position: span(&tokens[start], &tokens[last]),
        };
        (Block::Blockquote(quote), last + 1)
    }

    pub(super) fn list(
        &mut self,
        tokens: &[Token],
        start: usize,
        first: ListMarker,
    ) -> (Block, usize) {
        let mut items = Vec::new();
        let mut current = PendingItem::open(start, &tokens[start], &first);
        let mut blanks: Vec<&Token> = Vec::new();
        let mut blank_since_marker = false;
        let mut spread = false;
        let mut index = start + 1;

        while let Some(token) = tokens.get(index) {
            match &token.kind {
                TokenKind::Blank => {
                    blanks.push(token);
                    blank_since_marker = true;
                }
                TokenKind::ListMarker(marker)
                    if marker.kind.continues(&first.kind) && token.indent < current.width =>
                {
                    spread |= blank_since_marker;
                    blank_since_marker = false;
                    blanks.clear();
                    let next = PendingItem::open(index, token, marker);
                    items.push(std::mem::replace(&mut current, next));
                }
                _ if token.indent >= current.width => {
                    for blank in blanks.drain(..) {
                        current.lines.push(SourceLine::from(blank).strip_columns(current.width));
                    }
                    current.push(index, SourceLine::from(token).strip_columns(current.width));
                }
                TokenKind::Paragraph | TokenKind::IndentedCode if blanks.is_empty() => {
                    let columns = token.indent.min(current.width);
                    current.push(index, SourceLine::from(token).strip_columns(columns));
                }
                _ => break,
            }
            index += 1;
        }
        items.push(current);

        let end = items.last().map_or(start, |item| item.last);
        let children = items
            .into_iter()
            .map(|item| ListItem {
                position: span(&tokens[item.first], &tokens[item.last]),
                children: self.parse_nested(item.lines),
            })
            .collect();

        let (ordered, number) = match first.kind {
            ListKind::Ordered { start, .. } => (true, Some(start)),
            ListKind::Bullet(_) => (false, None),
        };
        let list = List {
            ordered,
            start: number,
            spread,
            children,
            position: span(&tokens[start], &tokens[end]),
        };
        (Block::List(list), end + 1)
    }
}

/// Content of a `>` line after the marker and one optional space.
fn quoted_line(token: &Token) -> SourceLine {
    let line = SourceLine::from(token).strip_columns(token.indent);
    line.skip_bytes(1, line.origin + 1).strip_columns(1)
}

/// Lines collected for one list item.
struct PendingItem {
    first: usize,
    last: usize,
    width: usize,
    lines: Vec<SourceLine>,
}

impl PendingItem {
    fn open(index: usize, token: &Token, marker: &ListMarker) -> Self {
        let line = SourceLine::from(token).strip_columns(token.indent);
        let line = line.skip_bytes(marker.marker_len, line.origin + marker.marker_len);
        let padding = marker.width - token.indent - marker.marker_len;
        Self {
            first: index,
            last: index,
            width: marker.width,
            lines: vec![line.strip_columns(padding)],
        }
    }

    fn push(&mut self, index: usize, line: SourceLine) {
        self.lines.push(line);
        self.last = index;
    }
}

#[cfg(test)]
mod tests {
    use super::super::references::ReferenceMap;
    use super::super::ParseOptions;
    use super::*;
    use crate::markdown::lexing::tokenize;

    fn parse(source: &str) -> Vec<Block> {
        let mut references = ReferenceMap::new();
        BlockParser::new(&mut references, &ParseOptions::default()).parse(&tokenize(source))
    }

    fn paragraph_text(block: &Block) -> String {
        block
            .as_paragraph()
            .and_then(|p| p.children.raw())
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_blockquote_with_lazy_line() {
        let blocks = parse("> foo\nbar\n\nbaz");
        let quote = blocks[0].as_blockquote().unwrap();
        assert_eq!(quote.children.len(), 1);
        assert_eq!(paragraph_text(&quote.children[0]), "foo\nbar");
        assert_eq!(quote.position.end.line, 2);
        assert_eq!(paragraph_text(&blocks[1]), "baz");
    }

    #[test]
    fn test_blockquote_positions_are_absolute() {
        let blocks = parse("text\n\n> # Title");
        let quote = blocks[1].as_blockquote().unwrap();
        let heading = quote.children[0].as_heading().unwrap();
        assert_eq!(heading.position.start.line, 3);
        assert_eq!(heading.position.start.column, 3);
        assert_eq!(heading.position.start.offset, 8);
    }

    #[test]
    fn test_nested_blockquote() {
        let blocks = parse("> > deep");
        let outer = blocks[0].as_blockquote().unwrap();
        let inner = outer.children[0].as_blockquote().unwrap();
        assert_eq!(paragraph_text(&inner.children[0]), "deep");
    }

    #[test]
    fn test_tight_list() {
        let blocks = parse("- a\n- b");
        let list = blocks[0].as_list().unwrap();
        assert!(!list.ordered);
        assert!(!list.spread);
        assert_eq!(list.start, None);
        assert_eq!(list.children.len(), 2);
        assert_eq!(paragraph_text(&list.children[1].children[0]), "b");
    }

    #[test]
    fn test_loose_list() {
        let blocks = parse("- a\n\n- b");
        let list = blocks[0].as_list().unwrap();
        assert!(list.spread);
        assert_eq!(list.children.len(), 2);
    }

    #[test]
    fn test_ordered_list_start() {
        let blocks = parse("3. three\n4. four");
        let list = blocks[0].as_list().unwrap();
        assert!(list.ordered);
        assert_eq!(list.start, Some(3));
    }

    #[test]
    fn test_ordered_delimiters_share_a_list() {
        let blocks = parse("1. a\n2) b");
        assert_eq!(blocks.len(), 1);
        let list = blocks[0].as_list().unwrap();
        assert!(list.ordered);
        assert_eq!(list.start, Some(1));
        assert_eq!(list.children.len(), 2);
        assert_eq!(paragraph_text(&list.children[1].children[0]), "b");
    }

    #[test]
    fn test_different_bullet_starts_new_list() {
        let blocks = parse("- a\n* b");
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|block| block.as_list().is_some()));
    }

    #[test]
    fn test_item_continuation_and_nested_list() {
        let blocks = parse("- a\n\n  more\n  - nested\n- b");
        let list = blocks[0].as_list().unwrap();
        assert_eq!(list.children.len(), 2);

        let first = &list.children[0];
        assert_eq!(first.children.len(), 3);
        assert_eq!(paragraph_text(&first.children[1]), "more");
        assert!(first.children[2].as_list().is_some());
        assert_eq!(first.position.end.line, 4);
        assert!(list.spread);
    }

    #[test]
    fn test_lazy_list_continuation() {
        let blocks = parse("- a\nb");
        let list = blocks[0].as_list().unwrap();
        assert_eq!(paragraph_text(&list.children[0].children[0]), "a\nb");
    }

    #[test]
    fn test_trailing_blank_ends_list() {
        let blocks = parse("- a\n\nafter");
        assert_eq!(blocks.len(), 2);
        let list = blocks[0].as_list().unwrap();
        assert_eq!(list.position.end.line, 1);
        assert_eq!(paragraph_text(&blocks[1]), "after");
    }

    #[test]
    fn test_code_in_list_item() {
        let blocks = parse("- ```\n  x\n\n  y\n  ```");
        let list = blocks[0].as_list().unwrap();
        let code = list.children[0].children[0].as_code().unwrap();
        assert_eq!(code.value, "x\n\ny");
    }

    #[test]
    fn test_nesting_limit_flattens() {
        let mut references = ReferenceMap::new();
        let options = ParseOptions {
            max_nesting_depth: 1,
        };
        let blocks = BlockParser::new(&mut references, &options).parse(&tokenize("> > > deep"));
        let outer = blocks[0].as_blockquote().unwrap();
        let inner = outer.children[0].as_blockquote().unwrap();
        assert_eq!(paragraph_text(&inner.children[0]), "> deep");
    }
}
