//! AST Snapshot - a normalized intermediate representation of the AST tree
//!
//! The snapshot captures the tree structure with node types, labels, attributes and
//! children, so that presentation formats (treeviz, test helpers) do not reimplement the
//! traversal. All of them should consume [`snapshot_from_root`].

use super::nodes::{Block, Inline, ListItem, Root};
use super::phrasing::Phrasing;
use super::range::Position;
use super::traits::AstNode;
use std::collections::BTreeMap;

/// A snapshot of an AST node in a normalized form
#[derive(Debug, Clone, PartialEq)]
pub struct AstSnapshot {
    /// The type of node (e.g., "Paragraph", "List")
    pub node_type: String,

    /// The primary label or text content of the node
    pub label: String,

    pub position: Option<Position>,

    /// Additional attributes specific to the node type
    pub attributes: BTreeMap<String, String>,

    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: String, label: String) -> Self {
        Self {
            node_type,
            label,
            position: None,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl ToString) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Create a snapshot of a single node, without its children
fn snapshot_node<T: AstNode>(node: &T) -> AstSnapshot {
    let mut snapshot = AstSnapshot::new(node.node_type().to_string(), node.display_label());
    snapshot.position = node.position();
    snapshot
}

/// Create a snapshot of the whole document
pub fn snapshot_from_root(root: &Root) -> AstSnapshot {
    snapshot_node(root).with_children(root.children.iter().map(snapshot_from_block).collect())
}

pub fn snapshot_from_block(block: &Block) -> AstSnapshot {
    let snapshot = snapshot_node(block);
    match block {
        Block::Heading(node) => snapshot
            .with_attribute("depth", node.depth)
            .with_children(snapshot_phrasing(&node.children)),
        Block::Paragraph(node) => snapshot.with_children(snapshot_phrasing(&node.children)),
        Block::List(node) => {
            let mut snapshot = snapshot
                .with_attribute("ordered", node.ordered)
                .with_attribute("spread", node.spread);
            if let Some(start) = node.start {
                snapshot = snapshot.with_attribute("start", start);
            }
            snapshot.with_children(node.children.iter().map(snapshot_list_item).collect())
        }
        Block::Code(node) => {
            let mut snapshot = snapshot;
            if let Some(meta) = &node.meta {
                snapshot = snapshot.with_attribute("meta", meta);
            }
            snapshot
        }
        Block::Blockquote(node) => {
            snapshot.with_children(node.children.iter().map(snapshot_from_block).collect())
        }
        Block::ThematicBreak(_) => snapshot,
    }
}

fn snapshot_list_item(item: &ListItem) -> AstSnapshot {
    snapshot_node(item).with_children(item.children.iter().map(snapshot_from_block).collect())
}

fn snapshot_phrasing(phrasing: &Phrasing) -> Vec<AstSnapshot> {
    match phrasing {
        Phrasing::Unresolved(_) => Vec::new(),
        Phrasing::Resolved(children) => children.iter().map(snapshot_from_inline).collect(),
    }
}

pub fn snapshot_from_inline(inline: &Inline) -> AstSnapshot {
    let snapshot = snapshot_node(inline);
    let snapshot = match inline {
        Inline::Link(node) => match &node.title {
            Some(title) => snapshot.with_attribute("title", title),
            None => snapshot,
        },
        Inline::Image(node) => match &node.title {
            Some(title) => snapshot.with_attribute("title", title),
            None => snapshot,
        },
        _ => snapshot,
    };
    snapshot.with_children(inline.children().iter().map(snapshot_from_inline).collect())
}
