//! Treeviz formatter
//!
//! Treeviz shows the tree one line per node, which makes it quick to scan. Nesting is
//! drawn with box connectors, and each line holds an icon and the node's label,
//! truncated to 30 characters.
//!
//!     ⧉ Document (2 blocks)
//!     ├─ § # Title
//!     │ └─ ◦ Title
//!     └─ ¶ Some *emphasized* text
//!       ├─ ◦ Some
//!       ...
//!
//! Icons
//!     Blocks:
//!         Root: ⧉
//!         Heading: §
//!         Paragraph: ¶
//!         List: ☰
//!         ListItem: •
//!         Code: 𝒱
//!         Blockquote: "
//!         ThematicBreak: ―
//!     Inlines:
//!         Text: ◦
//!         Emphasis: 𝐼
//!         Strong: 𝐁
//!         InlineCode: ƒ
//!         Link: ⊕
//!         Image: ▣
//!         Break: ↵

use super::registry::Formatter;
use crate::markdown::ast::{snapshot_from_root, AstSnapshot, Root};
use crate::markdown::error::Result;

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    let single_line = s.replace('\n', " ");
    if single_line.chars().count() > max_chars {
        let mut truncated = single_line.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        single_line
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Root" => "⧉",
        "Heading" => "§",
        "Paragraph" => "¶",
        "List" => "☰",
        "ListItem" => "•",
        "Code" => "𝒱",
        "Blockquote" => "\"",
        "ThematicBreak" => "―",
        "Text" => "◦",
        "Emphasis" => "𝐼",
        "Strong" => "𝐁",
        "InlineCode" => "ƒ",
        "Link" => "⊕",
        "Image" => "▣",
        "Break" => "↵",
        _ => "○",
    }
}

fn format_snapshot(
    snapshot: &AstSnapshot,
    prefix: &str,
    is_last: bool,
    show_linum: bool,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    let linum_prefix = match (show_linum, snapshot.position) {
        (true, Some(position)) => format!("{:02} ", position.start.line),
        (true, None) => "   ".to_string(),
        (false, _) => String::new(),
    };

    output.push_str(&format!(
        "{}{}{} {} {}\n",
        linum_prefix,
        prefix,
        connector,
        get_icon(&snapshot.node_type),
        truncate(&snapshot.label, LABEL_WIDTH)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, &child_prefix, i + 1 == child_count, show_linum, output);
    }
}

/// Render a tree, optionally prefixing each line with its source line number.
pub fn to_treeviz_str(root: &Root, show_linum: bool) -> String {
    let snapshot = snapshot_from_root(root);
    let mut output = format!(
        "{} {}\n",
        get_icon(&snapshot.node_type),
        truncate(&snapshot.label, LABEL_WIDTH)
    );

    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, "", i + 1 == child_count, show_linum, &mut output);
    }
    output
}

/// Formatter implementation for treeviz format
#[derive(Debug, Clone, Copy, Default)]
pub struct TreevizFormatter {
    pub show_linum: bool,
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, root: &Root) -> Result<String> {
        Ok(to_treeviz_str(root, self.show_linum))
    }

    fn description(&self) -> &str {
        "One line per node with connectors and icons"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::parse;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("two\nlines", 30), "two lines");
    }

    #[test]
    fn test_treeviz_output() {
        let root = parse("# Title\n\n- *one*\n- two");
        insta::assert_snapshot!(to_treeviz_str(&root, false), @r###"
        ⧉ Document (2 blocks)
        ├─ § # Title
        │ └─ ◦ Title
        └─ ☰ 2 items (bullet)
          ├─ • one
          │ └─ ¶ one
          │   └─ 𝐼 one
          │     └─ ◦ one
          └─ • two
            └─ ¶ two
              └─ ◦ two
        "###);
    }

    #[test]
    fn test_treeviz_line_numbers() {
        let root = parse("a\n\n---");
        insta::assert_snapshot!(to_treeviz_str(&root, true), @r###"
        ⧉ Document (2 blocks)
        01 ├─ ¶ a
        01 │ └─ ◦ a
        03 └─ ― ---
        "###);
    }
}
