//! Line Classification
//!
//! Core classification logic for determining the kind of a single line. Rules are tried
//! in a fixed order and the first one that matches wins:
//!
//!     1. blank
//!     2. indented code (four or more columns)
//!     3. ATX heading
//!     4. thematic break
//!     5. setext underline
//!     6. bullet list marker
//!     7. ordered list marker
//!     8. blockquote marker
//!     9. backtick fence
//!     10. tilde fence
//!     11. paragraph
//!
//! Rules 3 to 11 look at the line with up to three columns of indentation removed.

use super::indentation::{is_blank, measure_indent, strip_columns};
use crate::markdown::token::{Fence, ListKind, ListMarker, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

static ATX_CLOSING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|[ \t]+)#+[ \t]*$").unwrap());

static THEMATIC_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:\*[ \t]*){3,}|(?:-[ \t]*){3,}|(?:_[ \t]*){3,})$").unwrap()
});

static SETEXT_UNDERLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:=+|-+)[ \t]*$").unwrap());

static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([-+*])[ \t]").unwrap());

static ORDERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,9})([.)])[ \t]").unwrap());

static BACKTICK_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(`{3,})([^`]*)$").unwrap());

static TILDE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(~{3,})(.*)$").unwrap());

/// Result of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub kind: TokenKind,
    pub content: String,
    pub indent: usize,
}

/// Classify a line whose text begins at expanded column `origin`.
pub fn classify(text: &str, origin: usize) -> Classified {
    let (indent, indent_bytes) = measure_indent(text, origin);

    if is_blank(text) {
        return Classified {
            kind: TokenKind::Blank,
            content: String::new(),
            indent,
        };
    }

    if indent >= 4 {
        return Classified {
            kind: TokenKind::IndentedCode,
            content: strip_columns(text, origin, 4).text,
            indent,
        };
    }

    let rest = &text[indent_bytes..];
    let column = origin + indent;
    let (kind, content) = classify_unindented(rest, column, indent);
    Classified {
        kind,
        content,
        indent,
    }
}

fn classify_unindented(rest: &str, column: usize, indent: usize) -> (TokenKind, String) {
    if let Some(heading) = atx_heading(rest) {
        return heading;
    }

    if THEMATIC_BREAK.is_match(rest) {
        let trimmed = rest.trim_end_matches([' ', '\t']);
        let marker = trimmed.chars().next().unwrap_or('-');
        let compact = trimmed.chars().all(|c| c == marker);
        return (
            TokenKind::ThematicBreak { marker, compact },
            trimmed.to_string(),
        );
    }

    if SETEXT_UNDERLINE.is_match(rest) {
        let level = if rest.starts_with('=') { 1 } else { 2 };
        let trimmed = rest.trim_end_matches([' ', '\t']);
        return (TokenKind::SetextUnderline { level }, trimmed.to_string());
    }

    if let Some(captures) = BULLET_MARKER.captures(rest) {
        let marker = captures[1].chars().next().unwrap_or('-');
        return list_marker(rest, column, indent, 1, ListKind::Bullet(marker));
    }

    if let Some(captures) = ORDERED_MARKER.captures(rest) {
        let digits = &captures[1];
        let delimiter = captures[2].chars().next().unwrap_or('.');
        // At most nine digits, always fits
        let start = digits.parse().unwrap_or(0);
        return list_marker(
            rest,
            column,
            indent,
            digits.len() + 1,
            ListKind::Ordered { start, delimiter },
        );
    }

    if let Some(after) = rest.strip_prefix('>') {
        let content = strip_columns(after, column + 1, 1).text;
        return (TokenKind::BlockquoteMarker, content);
    }

    if let Some(captures) = BACKTICK_FENCE
        .captures(rest)
        .or_else(|| TILDE_FENCE.captures(rest))
    {
        let run = &captures[1];
        let fence = Fence {
            marker: run.chars().next().unwrap_or('`'),
            length: run.len(),
            info: captures[2].trim().to_string(),
        };
        return (TokenKind::CodeFence(fence), rest.to_string());
    }

    (TokenKind::Paragraph, rest.to_string())
}

fn atx_heading(rest: &str) -> Option<(TokenKind, String)> {
    let level = rest.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let after = &rest[level..];
    if !(after.is_empty() || after.starts_with([' ', '\t'])) {
        return None;
    }
    let content = ATX_CLOSING.replace(after, "");
    Some((
        TokenKind::AtxHeading { level: level as u8 },
        content.trim().to_string(),
    ))
}

/// Build a list marker token.
///
/// Content starts after the marker and one to four columns of spaces. With five or more
/// columns (or nothing after the marker) the content starts one column after the marker
/// and the extra whitespace stays part of the content.
fn list_marker(
    rest: &str,
    column: usize,
    indent: usize,
    marker_len: usize,
    kind: ListKind,
) -> (TokenKind, String) {
    let after = &rest[marker_len..];
    let after_column = column + marker_len;
    let (spaces, _) = measure_indent(after, after_column);

    let padding = if is_blank(after) || spaces >= 5 {
        1
    } else {
        spaces
    };
    let content = strip_columns(after, after_column, padding).text;
    let marker = ListMarker {
        kind,
        marker_len,
        width: indent + marker_len + padding,
    };
    (TokenKind::ListMarker(marker), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kind(text: &str) -> TokenKind {
        classify(text, 0).kind
    }

    fn content(text: &str) -> String {
        classify(text, 0).content
    }

    #[rstest]
    #[case("", TokenKind::Blank)]
    #[case("  \t ", TokenKind::Blank)]
    #[case("    code", TokenKind::IndentedCode)]
    #[case("\tcode", TokenKind::IndentedCode)]
    #[case("# Title", TokenKind::AtxHeading { level: 1 })]
    #[case("###### Six", TokenKind::AtxHeading { level: 6 })]
    #[case("#", TokenKind::AtxHeading { level: 1 })]
    #[case("####### Seven", TokenKind::Paragraph)]
    #[case("#hashtag", TokenKind::Paragraph)]
    #[case("***", TokenKind::ThematicBreak { marker: '*', compact: true })]
    #[case("- - -", TokenKind::ThematicBreak { marker: '-', compact: false })]
    #[case("___  ", TokenKind::ThematicBreak { marker: '_', compact: true })]
    #[case("===", TokenKind::SetextUnderline { level: 1 })]
    #[case("--", TokenKind::SetextUnderline { level: 2 })]
    #[case("> quote", TokenKind::BlockquoteMarker)]
    #[case(">", TokenKind::BlockquoteMarker)]
    #[case("plain text", TokenKind::Paragraph)]
    #[case("   indented three", TokenKind::Paragraph)]
    #[case("*emphasis*", TokenKind::Paragraph)]
    #[case("1234567890. ten digits", TokenKind::Paragraph)]
    fn test_classification(#[case] text: &str, #[case] expected: TokenKind) {
        assert_eq!(kind(text), expected);
    }

    #[rstest]
    #[case("# Hello #", "Hello")]
    #[case("## Hello ##   ", "Hello")]
    #[case("# Hello#", "Hello#")]
    #[case("# #", "")]
    #[case("#   spaced   ", "spaced")]
    #[case("### ###", "")]
    fn test_atx_content(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(content(text), expected);
    }

    #[test]
    fn test_bullet_marker() {
        let classified = classify("- item", 0);
        assert_eq!(
            classified.kind,
            TokenKind::ListMarker(ListMarker {
                kind: ListKind::Bullet('-'),
                marker_len: 1,
                width: 2
            })
        );
        assert_eq!(classified.content, "item");
    }

    #[test]
    fn test_ordered_marker() {
        let classified = classify("  12)   item", 0);
        assert_eq!(
            classified.kind,
            TokenKind::ListMarker(ListMarker {
                kind: ListKind::Ordered {
                    start: 12,
                    delimiter: ')'
                },
                marker_len: 3,
                width: 8
            })
        );
        assert_eq!(classified.content, "item");
    }

    #[test]
    fn test_list_marker_with_indented_content() {
        let classified = classify("-      code", 0);
        let marker = classified.kind;
        assert_eq!(
            marker,
            TokenKind::ListMarker(ListMarker {
                kind: ListKind::Bullet('-'),
                marker_len: 1,
                width: 2
            })
        );
        assert_eq!(classified.content, "     code");
    }

    #[test]
    fn test_blockquote_content() {
        assert_eq!(content("> quote"), "quote");
        assert_eq!(content(">quote"), "quote");
        assert_eq!(content(">  two"), " two");
    }

    #[test]
    fn test_fences() {
        assert_eq!(
            kind("```rust title"),
            TokenKind::CodeFence(Fence {
                marker: '`',
                length: 3,
                info: "rust title".to_string()
            })
        );
        assert_eq!(
            kind("~~~~ a`b"),
            TokenKind::CodeFence(Fence {
                marker: '~',
                length: 4,
                info: "a`b".to_string()
            })
        );
        assert_eq!(kind("``` a`b"), TokenKind::Paragraph);
        assert_eq!(kind("``"), TokenKind::Paragraph);
    }

    #[test]
    fn test_indented_code_content() {
        assert_eq!(content("      x"), "  x");
        assert_eq!(classify("      x", 0).indent, 6);
    }
}
