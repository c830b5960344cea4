//! Link syntax
//!
//! Scanners for the pieces of a link or image: the bracketed label, the inline
//! `(destination "title")` part and the second bracket of a full reference. They only
//! find boundaries and unescape; building nodes is left to the parser.

use super::entities::{is_escapable, unescape};
use std::collections::HashMap;

/// Index of the `]` matching each `[` of `text`, found in one pass.
///
/// Brackets nest; a backslash escapes the character after it. A `[` that is never
/// closed has no entry.
pub(super) fn match_brackets(text: &str) -> HashMap<usize, usize> {
    let bytes = text.as_bytes();
    let mut matches = HashMap::new();
    let mut open = Vec::new();
    let mut index = 0;

    while index < bytes.len() {
        match bytes[index] {
            b'\\' => index += 1,
            b'[' => open.push(index),
            b']' => {
                if let Some(start) = open.pop() {
                    matches.insert(start, index);
                }
            }
            _ => {}
        }
        index += 1;
    }
    matches
}

/// Index of the `]` closing a reference label at `open`, where brackets may not nest.
pub(super) fn scan_reference(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut index = open + 1;

    while index < bytes.len() {
        match bytes[index] {
            b'\\' => index += 1,
            b'[' => return None,
            b']' => return Some(index),
            _ => {}
        }
        index += 1;
    }
    None
}

/// Destination and title of an inline link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct InlineTarget {
    pub url: String,
    pub title: Option<String>,
    /// Index just past the closing `)`.
    pub end: usize,
}

/// Parse `( destination title? )` where `open` is the index of `(`.
pub(super) fn parse_inline_target(text: &str, open: usize) -> Option<InlineTarget> {
    let mut index = skip_whitespace(text, open + 1);

    if text[index..].starts_with(')') {
        return Some(InlineTarget {
            url: String::new(),
            title: None,
            end: index + 1,
        });
    }

    let (destination, after_destination) = scan_destination(text, index)?;
    index = skip_whitespace(text, after_destination);

    let mut title = None;
    if index > after_destination {
        if let Some((raw_title, after_title)) = scan_title(text, index) {
            title = Some(unescape(raw_title));
            index = skip_whitespace(text, after_title);
        }
    }

    if !text[index..].starts_with(')') {
        return None;
    }
    Some(InlineTarget {
        url: unescape(destination),
        title,
        end: index + 1,
    })
}

fn skip_whitespace(text: &str, from: usize) -> usize {
    let rest = &text[from..];
    from + (rest.len() - rest.trim_start().len())
}

/// Scan a destination, returning its raw text and the index after it.
fn scan_destination(text: &str, start: usize) -> Option<(&str, usize)> {
    let rest = &text[start..];

    if let Some(inner) = rest.strip_prefix('<') {
        let mut chars = inner.char_indices();
        while let Some((index, c)) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '>' => return Some((&inner[..index], start + 1 + index + 1)),
                '<' | '\n' => return None,
                _ => {}
            }
        }
        return None;
    }

    let mut depth = 0usize;
    let mut end = rest.len();
    let mut chars = rest.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        match c {
            '\\' => {
                if chars.peek().is_some_and(|&(_, next)| is_escapable(next)) {
                    chars.next();
                }
            }
            '(' => depth += 1,
            ')' if depth == 0 => {
                end = index;
                break;
            }
            ')' => depth -= 1,
            c if c.is_whitespace() || c.is_control() => {
                end = index;
                break;
            }
            _ => {}
        }
    }

    if depth != 0 || end == 0 {
        return None;
    }
    Some((&rest[..end], start + end))
}

/// Scan a `"…"`, `'…'` or `(…)` title, returning its raw inner text and the index after it.
fn scan_title(text: &str, start: usize) -> Option<(&str, usize)> {
    let rest = &text[start..];
    let close = match rest.chars().next()? {
        '"' => '"',
        '\'' => '\'',
        '(' => ')',
        _ => return None,
    };

    let inner = &rest[1..];
    let mut chars = inner.char_indices();
    while let Some((index, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '(' if close == ')' => return None,
            c if c == close => return Some((&inner[..index], start + 1 + index + 1)),
            _ => {}
        }
    }
    None
}
