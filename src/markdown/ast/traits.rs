//! AST traits - Common interfaces for uniform node access
//!
//! [`AstNode`] gives formatters and test helpers one way to ask any node for its type,
//! a short human label and its position, without matching on every node kind.

use super::nodes::{Block, Inline, ListItem, Root};
use super::phrasing::Phrasing;
use super::range::Position;

/// Common interface for all AST nodes
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;
    fn position(&self) -> Option<Position>;
}

fn phrasing_label(phrasing: &Phrasing) -> String {
    match phrasing {
        Phrasing::Unresolved(span) => span.text().to_string(),
        Phrasing::Resolved(children) => super::nodes::plain_text(children),
    }
}

impl AstNode for Root {
    fn node_type(&self) -> &'static str {
        "Root"
    }

    fn display_label(&self) -> String {
        format!("Document ({} blocks)", self.children.len())
    }

    fn position(&self) -> Option<Position> {
        self.position
    }
}

impl AstNode for Block {
    fn node_type(&self) -> &'static str {
        match self {
            Block::Heading(_) => "Heading",
            Block::Paragraph(_) => "Paragraph",
            Block::List(_) => "List",
            Block::Code(_) => "Code",
            Block::Blockquote(_) => "Blockquote",
            Block::ThematicBreak(_) => "ThematicBreak",
        }
    }

    fn display_label(&self) -> String {
        match self {
            Block::Heading(node) => {
                format!("{} {}", "#".repeat(node.depth as usize), phrasing_label(&node.children))
            }
            Block::Paragraph(node) => phrasing_label(&node.children),
            Block::List(node) => {
                let kind = if node.ordered { "ordered" } else { "bullet" };
                format!("{} items ({})", node.children.len(), kind)
            }
            Block::Code(node) => match &node.lang {
                Some(lang) => format!("{}: {}", lang, node.value),
                None => node.value.clone(),
            },
            Block::Blockquote(node) => format!("{} blocks", node.children.len()),
            Block::ThematicBreak(_) => "---".to_string(),
        }
    }

    fn position(&self) -> Option<Position> {
        Some(*Block::position(self))
    }
}

impl AstNode for ListItem {
    fn node_type(&self) -> &'static str {
        "ListItem"
    }

    fn display_label(&self) -> String {
        match self.children.first() {
            Some(first) => first.display_label(),
            None => String::new(),
        }
    }

    fn position(&self) -> Option<Position> {
        Some(self.position)
    }
}

impl AstNode for Inline {
    fn node_type(&self) -> &'static str {
        match self {
            Inline::Text(_) => "Text",
            Inline::Emphasis(_) => "Emphasis",
            Inline::Strong(_) => "Strong",
            Inline::InlineCode(_) => "InlineCode",
            Inline::Link(_) => "Link",
            Inline::Image(_) => "Image",
            Inline::Break(_) => "Break",
        }
    }

    fn display_label(&self) -> String {
        match self {
            Inline::Link(node) => format!("{} -> {}", self.plain_text(), node.url),
            Inline::Image(node) => format!("{} -> {}", node.alt, node.url),
            Inline::Break(_) => "\\n".to_string(),
            _ => self.plain_text(),
        }
    }

    fn position(&self) -> Option<Position> {
        Inline::position(self).copied()
    }
}
