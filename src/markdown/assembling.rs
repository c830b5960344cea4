//! Assembling
//!
//!     The last stage. Block parsing leaves the text of every paragraph and heading as an
//!     unresolved raw span, because link references can be defined anywhere in the
//!     document, including after their first use. Once the whole document has been
//!     parsed and the reference map is complete, assembling walks the tree and replaces
//!     each raw span with the inline nodes parsed from it.
//!
//!     Raw spans keep their source anchors, so the inline nodes get exact positions even
//!     inside containers.

use crate::markdown::ast::{Block, Phrasing, Root};
use crate::markdown::inlines::parse_span;
use crate::markdown::parsing::ReferenceMap;

/// Resolve every raw span in the tree.
pub fn resolve_inlines(mut root: Root, references: &ReferenceMap) -> Root {
    let mut resolver = InlineResolver {
        references,
        resolved: 0,
    };
    resolver.process_blocks(&mut root.children);
    tracing::debug!(spans = resolver.resolved, "resolved inline content");
    root
}

struct InlineResolver<'r> {
    references: &'r ReferenceMap,
    resolved: usize,
}

impl InlineResolver<'_> {
    fn process_blocks(&mut self, blocks: &mut [Block]) {
        for block in blocks {
            self.process_block(block);
        }
    }

    fn process_block(&mut self, block: &mut Block) {
        match block {
            Block::Heading(heading) => self.process_phrasing(&mut heading.children),
            Block::Paragraph(paragraph) => self.process_phrasing(&mut paragraph.children),
            Block::Blockquote(quote) => self.process_blocks(&mut quote.children),
            Block::List(list) => {
                for item in &mut list.children {
                    self.process_blocks(&mut item.children);
                }
            }
            // Code is literal.
            Block::Code(_) | Block::ThematicBreak(_) => {}
        }
    }

    fn process_phrasing(&mut self, phrasing: &mut Phrasing) {
        if let Phrasing::Unresolved(span) = phrasing {
            *phrasing = Phrasing::Resolved(parse_span(span, self.references));
            self.resolved += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::ast::Inline;
    use crate::markdown::parsing::parse_blocks;

    fn resolve(source: &str) -> Root {
        let (root, references) = parse_blocks(source);
        resolve_inlines(root, &references)
    }

    #[test]
    fn test_resolves_nested_spans() {
        let root = resolve("> - *a*\n\n# b");
        let quote = root.children[0].as_blockquote().unwrap();
        let list = quote.children[0].as_list().unwrap();
        let paragraph = list.children[0].children[0].as_paragraph().unwrap();
        assert!(paragraph.children.is_resolved());
        assert!(matches!(paragraph.children.children()[0], Inline::Emphasis(_)));

        let heading = root.children[1].as_heading().unwrap();
        assert!(heading.children.is_resolved());
    }

    #[test]
    fn test_reference_defined_after_use() {
        let root = resolve("[docs]\n\n[docs]: /manual");
        assert_eq!(root.children.len(), 1);
        let paragraph = root.children[0].as_paragraph().unwrap();
        match &paragraph.children.children()[0] {
            Inline::Link(link) => assert_eq!(link.url, "/manual"),
            other => panic!("expected link, got {other:?}"),
        }
    }

    #[test]
    fn test_inline_positions_inside_containers() {
        let root = resolve("> a *b*");
        let quote = root.children[0].as_blockquote().unwrap();
        let paragraph = quote.children[0].as_paragraph().unwrap();
        let emphasis = paragraph.children.children()[1].position().unwrap();
        assert_eq!(emphasis.start.column, 5);
        assert_eq!(emphasis.start.offset, 4);
        assert_eq!(emphasis.end.column, 8);
    }
}
