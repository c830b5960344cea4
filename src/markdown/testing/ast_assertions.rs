//! Fluent assertion API for parsed trees
//!
//!     Tests that walk the tree by hand are verbose and break whenever a node changes
//!     shape. The assertions here wrap each node kind in a builder with semantic checks
//!     (`.text(..)`, `.item_count(..)`, `.child(..)`), so a test states what it expects
//!     and a change to the tree types only needs fixing here.
//!
//!     Every builder carries a context path such as `blocks[1]:items[0]:children[2]`,
//!     which prefixes each failure message.
//!
//! Usage Example
//!
//!     ```rust,ignore
//!     use marktree::testing::assert_ast;
//!
//!     let root = marktree::parse("# Title\n\n- *one*\n- two");
//!     assert_ast(&root)
//!         .block_count(2)
//!         .block(0, |block| {
//!             block.assert_heading().depth(1).text("Title");
//!         })
//!         .block(1, |block| {
//!             block
//!                 .assert_list()
//!                 .tight()
//!                 .item_count(2)
//!                 .item(0, |item| {
//!                     item.child(0, |child| {
//!                         child
//!                             .assert_paragraph()
//!                             .inline(0, |inline| inline.assert_emphasis().text("one"));
//!                     });
//!                 });
//!         });
//!     ```

use super::matchers::TextMatch;
use crate::markdown::ast::{
    plain_text, AstNode, Block, Blockquote, Code, Heading, Inline, List, ListItem, Paragraph,
    Phrasing, Position, Root,
};

/// Create an assertion builder for a parsed tree
pub fn assert_ast(root: &Root) -> RootAssertion<'_> {
    RootAssertion { root }
}

fn summarize_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|block| block.node_type())
        .collect::<Vec<_>>()
        .join(", ")
}

fn phrasing_nodes<'a>(phrasing: &'a Phrasing, context: &str) -> &'a [Inline] {
    match phrasing {
        Phrasing::Resolved(children) => children,
        Phrasing::Unresolved(span) => panic!(
            "{}: Expected resolved inline content, found raw text {:?}",
            context,
            span.text()
        ),
    }
}

fn phrasing_text(phrasing: &Phrasing) -> String {
    match phrasing {
        Phrasing::Resolved(children) => plain_text(children),
        Phrasing::Unresolved(span) => span.text().to_string(),
    }
}

fn assert_starts_at(position: Option<&Position>, line: usize, column: usize, context: &str) {
    let Some(position) = position else {
        panic!("{}: Expected a position, found none", context);
    };
    assert_eq!(
        (position.start.line, position.start.column),
        (line, column),
        "{}: Expected start at {}:{}, found {}",
        context,
        line,
        column,
        position.start
    );
}

fn assert_ends_at(position: Option<&Position>, line: usize, column: usize, context: &str) {
    let Some(position) = position else {
        panic!("{}: Expected a position, found none", context);
    };
    assert_eq!(
        (position.end.line, position.end.column),
        (line, column),
        "{}: Expected end at {}:{}, found {}",
        context,
        line,
        column,
        position.end
    );
}

/// Assertions over a run of child blocks, shared by the containers.
fn child_block<'a, F>(blocks: &'a [Block], index: usize, context: &str, assertion: F)
where
    F: FnOnce(BlockAssertion<'a>),
{
    assert!(
        index < blocks.len(),
        "{}: Child index {} out of bounds ({} children: [{}])",
        context,
        index,
        blocks.len(),
        summarize_blocks(blocks)
    );
    assertion(BlockAssertion {
        block: &blocks[index],
        context: format!("{}:children[{}]", context, index),
    });
}

fn child_count(blocks: &[Block], expected: usize, context: &str) {
    assert_eq!(
        blocks.len(),
        expected,
        "{}: Expected {} children, found {}: [{}]",
        context,
        expected,
        blocks.len(),
        summarize_blocks(blocks)
    );
}

fn inline_at<'a, F>(nodes: &'a [Inline], index: usize, context: &str, assertion: F)
where
    F: FnOnce(InlineAssertion<'a>),
{
    assert!(
        index < nodes.len(),
        "{}: Inline index {} out of bounds ({} inline nodes)",
        context,
        index,
        nodes.len()
    );
    assertion(InlineAssertion {
        inline: &nodes[index],
        context: format!("{}:inline[{}]", context, index),
    });
}

// ============================================================================
// Root
// ============================================================================

pub struct RootAssertion<'a> {
    pub(crate) root: &'a Root,
}

impl<'a> RootAssertion<'a> {
    pub fn block_count(self, expected: usize) -> Self {
        let actual = self.root.children.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} blocks, found {} blocks: [{}]",
            expected,
            actual,
            summarize_blocks(&self.root.children)
        );
        self
    }

    pub fn block<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        assert!(
            index < self.root.children.len(),
            "Block index {} out of bounds (document has {} blocks)",
            index,
            self.root.children.len()
        );
        assertion(BlockAssertion {
            block: &self.root.children[index],
            context: format!("blocks[{}]", index),
        });
        self
    }

    pub fn is_empty(self) -> Self {
        assert!(
            self.root.is_empty(),
            "Expected an empty document, found [{}]",
            summarize_blocks(&self.root.children)
        );
        assert!(
            self.root.position.is_none(),
            "Expected no position on an empty document"
        );
        self
    }

    pub fn ends_at(self, line: usize, column: usize) -> Self {
        assert_ends_at(self.root.position.as_ref(), line, column, "root");
        self
    }
}

// ============================================================================
// Blocks
// ============================================================================

pub struct BlockAssertion<'a> {
    pub(crate) block: &'a Block,
    pub(crate) context: String,
}

impl<'a> BlockAssertion<'a> {
    fn wrong_kind(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.block.node_type()
        )
    }

    pub fn starts_at(self, line: usize, column: usize) -> Self {
        assert_starts_at(Some(self.block.position()), line, column, &self.context);
        self
    }

    pub fn ends_at(self, line: usize, column: usize) -> Self {
        assert_ends_at(Some(self.block.position()), line, column, &self.context);
        self
    }

    pub fn assert_paragraph(self) -> ParagraphAssertion<'a> {
        match self.block {
            Block::Paragraph(paragraph) => ParagraphAssertion {
                paragraph,
                context: self.context,
            },
            _ => self.wrong_kind("Paragraph"),
        }
    }

    pub fn assert_heading(self) -> HeadingAssertion<'a> {
        match self.block {
            Block::Heading(heading) => HeadingAssertion {
                heading,
                context: self.context,
            },
            _ => self.wrong_kind("Heading"),
        }
    }

    pub fn assert_list(self) -> ListAssertion<'a> {
        match self.block {
            Block::List(list) => ListAssertion {
                list,
                context: self.context,
            },
            _ => self.wrong_kind("List"),
        }
    }

    pub fn assert_code(self) -> CodeAssertion<'a> {
        match self.block {
            Block::Code(code) => CodeAssertion {
                code,
                context: self.context,
            },
            _ => self.wrong_kind("Code"),
        }
    }

    pub fn assert_blockquote(self) -> BlockquoteAssertion<'a> {
        match self.block {
            Block::Blockquote(quote) => BlockquoteAssertion {
                quote,
                context: self.context,
            },
            _ => self.wrong_kind("Blockquote"),
        }
    }

    pub fn assert_thematic_break(self) -> Self {
        if !matches!(self.block, Block::ThematicBreak(_)) {
            self.wrong_kind("ThematicBreak");
        }
        self
    }
}

pub struct ParagraphAssertion<'a> {
    pub(crate) paragraph: &'a Paragraph,
    pub(crate) context: String,
}

impl<'a> ParagraphAssertion<'a> {
    pub fn text(self, expected: &str) -> Self {
        TextMatch::from(expected).assert(&phrasing_text(&self.paragraph.children), &self.context);
        self
    }

    pub fn text_starts_with(self, prefix: &str) -> Self {
        TextMatch::StartsWith(prefix.to_string())
            .assert(&phrasing_text(&self.paragraph.children), &self.context);
        self
    }

    pub fn text_contains(self, substring: &str) -> Self {
        TextMatch::Contains(substring.to_string())
            .assert(&phrasing_text(&self.paragraph.children), &self.context);
        self
    }

    pub fn inline_count(self, expected: usize) -> Self {
        let nodes = phrasing_nodes(&self.paragraph.children, &self.context);
        assert_eq!(
            nodes.len(),
            expected,
            "{}: Expected {} inline nodes, found {}",
            self.context,
            expected,
            nodes.len()
        );
        self
    }

    pub fn inline<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(InlineAssertion<'a>),
    {
        let nodes = phrasing_nodes(&self.paragraph.children, &self.context);
        inline_at(nodes, index, &self.context, assertion);
        self
    }
}

pub struct HeadingAssertion<'a> {
    pub(crate) heading: &'a Heading,
    pub(crate) context: String,
}

impl<'a> HeadingAssertion<'a> {
    pub fn depth(self, expected: u8) -> Self {
        assert_eq!(
            self.heading.depth, expected,
            "{}: Expected heading depth {}, found {}",
            self.context, expected, self.heading.depth
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        TextMatch::from(expected).assert(&phrasing_text(&self.heading.children), &self.context);
        self
    }

    pub fn inline<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(InlineAssertion<'a>),
    {
        let nodes = phrasing_nodes(&self.heading.children, &self.context);
        inline_at(nodes, index, &self.context, assertion);
        self
    }
}

pub struct ListAssertion<'a> {
    pub(crate) list: &'a List,
    pub(crate) context: String,
}

impl<'a> ListAssertion<'a> {
    pub fn ordered(self, start: u32) -> Self {
        assert!(self.list.ordered, "{}: Expected an ordered list", self.context);
        assert_eq!(
            self.list.start,
            Some(start),
            "{}: Expected list start {}",
            self.context,
            start
        );
        self
    }

    pub fn bullet(self) -> Self {
        assert!(!self.list.ordered, "{}: Expected a bullet list", self.context);
        self
    }

    pub fn tight(self) -> Self {
        assert!(!self.list.spread, "{}: Expected a tight list", self.context);
        self
    }

    pub fn loose(self) -> Self {
        assert!(self.list.spread, "{}: Expected a loose list", self.context);
        self
    }

    pub fn item_count(self, expected: usize) -> Self {
        let actual = self.list.children.len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} list items, found {} list items",
            self.context, expected, actual
        );
        self
    }

    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ListItemAssertion<'a>),
    {
        assert!(
            index < self.list.children.len(),
            "{}: Item index {} out of bounds (list has {} items)",
            self.context,
            index,
            self.list.children.len()
        );
        assertion(ListItemAssertion {
            item: &self.list.children[index],
            context: format!("{}:items[{}]", self.context, index),
        });
        self
    }
}

pub struct ListItemAssertion<'a> {
    pub(crate) item: &'a ListItem,
    pub(crate) context: String,
}

impl<'a> ListItemAssertion<'a> {
    /// Text of the item's first block.
    pub fn text_starts_with(self, prefix: &str) -> Self {
        TextMatch::StartsWith(prefix.to_string()).assert(&self.item.display_label(), &self.context);
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        child_count(&self.item.children, expected, &self.context);
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        child_block(&self.item.children, index, &self.context, assertion);
        self
    }
}

pub struct BlockquoteAssertion<'a> {
    pub(crate) quote: &'a Blockquote,
    pub(crate) context: String,
}

impl<'a> BlockquoteAssertion<'a> {
    pub fn child_count(self, expected: usize) -> Self {
        child_count(&self.quote.children, expected, &self.context);
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        child_block(&self.quote.children, index, &self.context, assertion);
        self
    }
}

pub struct CodeAssertion<'a> {
    pub(crate) code: &'a Code,
    pub(crate) context: String,
}

impl<'a> CodeAssertion<'a> {
    pub fn lang(self, expected: Option<&str>) -> Self {
        assert_eq!(
            self.code.lang.as_deref(),
            expected,
            "{}: Unexpected code language",
            self.context
        );
        self
    }

    pub fn meta(self, expected: Option<&str>) -> Self {
        assert_eq!(
            self.code.meta.as_deref(),
            expected,
            "{}: Unexpected code meta",
            self.context
        );
        self
    }

    pub fn value(self, expected: &str) -> Self {
        TextMatch::from(expected).assert(&self.code.value, &self.context);
        self
    }
}

// ============================================================================
// Inlines
// ============================================================================

pub struct InlineAssertion<'a> {
    pub(crate) inline: &'a Inline,
    pub(crate) context: String,
}

impl<'a> InlineAssertion<'a> {
    fn expect_kind(self, expected: &str) -> Self {
        assert_eq!(
            self.inline.node_type(),
            expected,
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.inline.node_type()
        );
        self
    }

    pub fn assert_text(self) -> Self {
        self.expect_kind("Text")
    }

    pub fn assert_emphasis(self) -> Self {
        self.expect_kind("Emphasis")
    }

    pub fn assert_strong(self) -> Self {
        self.expect_kind("Strong")
    }

    pub fn assert_inline_code(self) -> Self {
        self.expect_kind("InlineCode")
    }

    pub fn assert_link(self) -> Self {
        self.expect_kind("Link")
    }

    pub fn assert_image(self) -> Self {
        self.expect_kind("Image")
    }

    pub fn assert_break(self) -> Self {
        self.expect_kind("Break")
    }

    /// Plain text of the node: the value, the concatenated children, or the alt text.
    pub fn text(self, expected: &str) -> Self {
        let actual = match self.inline {
            Inline::Image(image) => image.alt.clone(),
            other => other.plain_text(),
        };
        TextMatch::from(expected).assert(&actual, &self.context);
        self
    }

    pub fn url(self, expected: &str) -> Self {
        let actual = match self.inline {
            Inline::Link(link) => &link.url,
            Inline::Image(image) => &image.url,
            other => panic!(
                "{}: Expected Link or Image, found {}",
                self.context,
                other.node_type()
            ),
        };
        TextMatch::from(expected).assert(actual, &self.context);
        self
    }

    pub fn title(self, expected: Option<&str>) -> Self {
        let actual = match self.inline {
            Inline::Link(link) => link.title.as_deref(),
            Inline::Image(image) => image.title.as_deref(),
            other => panic!(
                "{}: Expected Link or Image, found {}",
                self.context,
                other.node_type()
            ),
        };
        assert_eq!(actual, expected, "{}: Unexpected title", self.context);
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.inline.children().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} children, found {}",
            self.context, expected, actual
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(InlineAssertion<'a>),
    {
        inline_at(self.inline.children(), index, &self.context, assertion);
        self
    }

    pub fn starts_at(self, line: usize, column: usize) -> Self {
        assert_starts_at(self.inline.position(), line, column, &self.context);
        self
    }

    pub fn ends_at(self, line: usize, column: usize) -> Self {
        assert_ends_at(self.inline.position(), line, column, &self.context);
        self
    }
}
