//! Testing utilities
//!
//!     Parser tests check trees through the fluent [assert_ast] API rather than by
//!     walking nodes by hand. A test reads as a description of the expected tree, and a
//!     failure names the path to the node that did not match.
//!
//!     ```rust,ignore
//!     use marktree::testing::assert_ast;
//!
//!     let root = marktree::parse("Some **bold** text");
//!     assert_ast(&root).block(0, |block| {
//!         block
//!             .assert_paragraph()
//!             .inline_count(3)
//!             .inline(1, |inline| inline.assert_strong().text("bold"));
//!     });
//!     ```
//!
//!     Text checks take a [TextMatch]: exact, prefix or substring.

mod ast_assertions;
pub mod matchers;

pub use ast_assertions::{
    assert_ast, BlockAssertion, BlockquoteAssertion, CodeAssertion, HeadingAssertion,
    InlineAssertion, ListAssertion, ListItemAssertion, ParagraphAssertion, RootAssertion,
};
pub use matchers::TextMatch;
