//! Node types of the document tree
//!
//!     Blocks and inlines are two closed enums. Every variant wraps a struct of its own so
//!     that parsers and tests can name a concrete node (a [`Heading`], a [`Link`]) without
//!     matching through the enum. Serialization follows the mdast shape: a `type` tag in
//!     camelCase, `children` for parents, `value` for literals and an optional `position`.
//!
//!     Block positions are always present. Inline positions exist only when the inline
//!     parser was given a way to map text back to the source.

use super::phrasing::Phrasing;
use super::range::Position;
use serde::Serialize;

/// The document root.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename = "root")]
pub struct Root {
    pub children: Vec<Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Root {
    pub fn new(children: Vec<Block>) -> Self {
        let position = Position::bounding_box(children.iter().map(Block::position));
        Self { children, position }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    List(List),
    Code(Code),
    Blockquote(Blockquote),
    ThematicBreak(ThematicBreak),
}

impl Block {
    pub fn position(&self) -> &Position {
        match self {
            Block::Heading(node) => &node.position,
            Block::Paragraph(node) => &node.position,
            Block::List(node) => &node.position,
            Block::Code(node) => &node.position,
            Block::Blockquote(node) => &node.position,
            Block::ThematicBreak(node) => &node.position,
        }
    }

    pub fn as_heading(&self) -> Option<&Heading> {
        match self {
            Block::Heading(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Block::List(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_code(&self) -> Option<&Code> {
        match self {
            Block::Code(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_blockquote(&self) -> Option<&Blockquote> {
        match self {
            Block::Blockquote(node) => Some(node),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub depth: u8,
    pub children: Phrasing,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub children: Phrasing,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    pub ordered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    pub spread: bool,
    pub children: Vec<ListItem>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "listItem")]
pub struct ListItem {
    pub children: Vec<Block>,
    pub position: Position,
}

/// Fenced or indented code.
///
/// `lang` is the first word of the info string and `meta` the rest, so together they
/// keep the whole info string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Code {
    pub lang: Option<String>,
    pub meta: Option<String>,
    pub value: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Blockquote {
    pub children: Vec<Block>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThematicBreak {
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    Text(Text),
    Emphasis(Emphasis),
    Strong(Strong),
    InlineCode(InlineCode),
    Link(Link),
    Image(Image),
    Break(Break),
}

impl Inline {
    pub fn text(value: impl Into<String>, position: Option<Position>) -> Self {
        Inline::Text(Text {
            value: value.into(),
            position,
        })
    }

    pub fn position(&self) -> Option<&Position> {
        match self {
            Inline::Text(node) => node.position.as_ref(),
            Inline::Emphasis(node) => node.position.as_ref(),
            Inline::Strong(node) => node.position.as_ref(),
            Inline::InlineCode(node) => node.position.as_ref(),
            Inline::Link(node) => node.position.as_ref(),
            Inline::Image(node) => node.position.as_ref(),
            Inline::Break(node) => node.position.as_ref(),
        }
    }

    pub fn children(&self) -> &[Inline] {
        match self {
            Inline::Emphasis(node) => &node.children,
            Inline::Strong(node) => &node.children,
            Inline::Link(node) => &node.children,
            _ => &[],
        }
    }

    /// Text content with all markup removed, as used for image `alt`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Inline::Text(node) => out.push_str(&node.value),
            Inline::InlineCode(node) => out.push_str(&node.value),
            Inline::Image(node) => out.push_str(&node.alt),
            Inline::Break(_) => out.push('\n'),
            _ => {
                for child in self.children() {
                    child.push_plain_text(out);
                }
            }
        }
    }
}

/// Concatenated plain text of a run of inlines.
pub fn plain_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::plain_text).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Emphasis {
    pub children: Vec<Inline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strong {
    pub children: Vec<Inline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineCode {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub url: String,
    pub title: Option<String>,
    pub children: Vec<Inline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub url: String,
    pub title: Option<String>,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Break {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[cfg(test)]
mod tests {
    use super::super::range::Point;
    use super::*;
    use serde_json::json;

    fn span(start: usize, end: usize) -> Position {
        Position::new(Point::new(1, start + 1, start), Point::new(1, end + 1, end))
    }

    #[test]
    fn test_root_position_spans_children() {
        let root = Root::new(vec![
            Block::ThematicBreak(ThematicBreak {
                position: span(0, 3),
            }),
            Block::ThematicBreak(ThematicBreak {
                position: span(10, 13),
            }),
        ]);
        assert_eq!(root.position, Some(span(0, 13)));
    }

    #[test]
    fn test_empty_root_has_no_position() {
        let root = Root::new(Vec::new());
        assert!(root.position.is_none());
        assert_eq!(serde_json::to_value(&root).unwrap(), json!({"type": "root", "children": []}));
    }

    #[test]
    fn test_block_serializes_with_camel_case_tag() {
        let block = Block::ThematicBreak(ThematicBreak {
            position: span(0, 3),
        });
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "thematicBreak");
        assert_eq!(value["position"]["end"]["offset"], 3);
    }

    #[test]
    fn test_inline_serialization() {
        let link = Inline::Link(Link {
            url: "/u".to_string(),
            title: None,
            children: vec![Inline::text("x", None)],
            position: None,
        });
        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            json!({
                "type": "link",
                "url": "/u",
                "title": null,
                "children": [{"type": "text", "value": "x"}]
            })
        );
    }

    #[test]
    fn test_plain_text_flattens_markup() {
        let inlines = vec![
            Inline::text("a ", None),
            Inline::Strong(Strong {
                children: vec![Inline::text("b", None)],
                position: None,
            }),
            Inline::InlineCode(InlineCode {
                value: "c".to_string(),
                position: None,
            }),
        ];
        assert_eq!(plain_text(&inlines), "a bc");
    }
}
