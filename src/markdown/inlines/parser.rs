//! Inline scanner
//!
//!     A single left-to-right pass over a raw span. Plain characters accumulate in a
//!     pending text buffer; when a construct is recognized the buffer is flushed as a
//!     text node and the construct's node (or delimiter run) is pushed to the arena.
//!     Escapes and entity references are decoded straight into the buffer, so a text node
//!     may be shorter than the source range its position covers.
//!
//!     Link text and image descriptions are parsed by a nested scanner over a slice of
//!     the span, which keeps their positions exact and keeps emphasis from crossing the
//!     brackets.

use super::delimiters::{process_emphasis, Arena, DelimiterRun, Handle, Piece};
use super::entities::{decode_entity, is_escapable};
use super::links::{match_brackets, parse_inline_target, scan_reference};
use crate::markdown::ast::{Break, Image, Inline, InlineCode, Link, Position, RawSpan, Text};
use crate::markdown::parsing::{Definition, ReferenceMap};
use std::collections::HashMap;

/// Deepest nesting of link texts and image descriptions.
const MAX_BRACKET_DEPTH: usize = 32;

pub(super) struct InlineParser<'a> {
    span: &'a RawSpan,
    references: &'a ReferenceMap,
    links_allowed: bool,
    depth: usize,
    pos: usize,
    pending: String,
    pending_start: usize,
    arena: Arena,
    delimiters: Vec<Handle>,
    /// Matching `]` for each `[`, computed once per span.
    brackets: HashMap<usize, usize>,
}

impl<'a> InlineParser<'a> {
    pub fn new(span: &'a RawSpan, references: &'a ReferenceMap) -> Self {
        Self::nested(span, references, true, 0)
    }

    fn nested(
        span: &'a RawSpan,
        references: &'a ReferenceMap,
        links_allowed: bool,
        depth: usize,
    ) -> Self {
        Self {
            span,
            references,
            links_allowed,
            depth,
            pos: 0,
            pending: String::new(),
            pending_start: 0,
            arena: Arena::default(),
            delimiters: Vec::new(),
            brackets: match_brackets(span.text()),
        }
    }

    pub fn parse(mut self) -> Vec<Inline> {
        let text = self.span.text();

        while let Some(c) = text[self.pos..].chars().next() {
            match c {
                '\\' => self.backslash(),
                '`' => self.code_span(),
                '&' => self.entity(),
                '*' | '_' => self.delimiter_run(c),
                '[' => self.bracket(false),
                '!' if text[self.pos + 1..].starts_with('[') => self.bracket(true),
                '\n' => self.line_break(),
                _ => self.plain(),
            }
        }

        self.flush(self.pos);
        process_emphasis(&mut self.arena, &self.delimiters, self.span);
        normalize(self.arena.into_inlines(self.span))
    }

    fn text(&self) -> &'a str {
        self.span.text()
    }

    /// Emit the pending text, which ends at `end` in the span.
    fn flush(&mut self, end: usize) {
        if !self.pending.is_empty() {
            let value = std::mem::take(&mut self.pending);
            let position = self.span.position(self.pending_start, end);
            self.arena
                .push(Piece::Node(Inline::Text(Text { value, position })));
        }
    }

    /// Emit a node covering `start..end` and continue after it.
    fn push_node(&mut self, start: usize, end: usize, node: Inline) {
        self.flush(start);
        self.arena.push(Piece::Node(node));
        self.pos = end;
        self.pending_start = end;
    }

    fn plain(&mut self) {
        let rest = &self.text()[self.pos..];
        let len = rest
            .char_indices()
            .skip(1)
            .find(|&(_, c)| matches!(c, '\\' | '`' | '&' | '*' | '_' | '[' | '!' | '\n'))
            .map_or(rest.len(), |(index, _)| index);
        self.pending.push_str(&rest[..len]);
        self.pos += len;
    }

    fn literal(&mut self, len: usize) {
        let text = self.text();
        self.pending.push_str(&text[self.pos..self.pos + len]);
        self.pos += len;
    }

    fn backslash(&mut self) {
        let start = self.pos;
        match self.text()[start + 1..].chars().next() {
            Some('\n') => {
                let node = Inline::Break(Break {
                    position: self.span.position(start, start + 2),
                });
                self.push_node(start, start + 2, node);
                self.skip_leading_spaces();
            }
            Some(c) if is_escapable(c) => {
                self.pending.push(c);
                self.pos += 1 + c.len_utf8();
            }
            _ => self.literal(1),
        }
    }

    fn code_span(&mut self) {
        let text = self.text();
        let start = self.pos;
        let ticks = run_length(text, start, '`');
        let content_start = start + ticks;

        let mut search = content_start;
        let closer = loop {
            let Some(found) = text[search..].find('`') else {
                break None;
            };
            let at = search + found;
            let len = run_length(text, at, '`');
            if len == ticks {
                break Some(at);
            }
            search = at + len;
        };

        let Some(close) = closer else {
            self.literal(ticks);
            return;
        };

        let value = code_content(&text[content_start..close]);
        let end = close + ticks;
        let node = Inline::InlineCode(InlineCode {
            value,
            position: self.span.position(start, end),
        });
        self.push_node(start, end, node);
    }

    fn entity(&mut self) {
        match decode_entity(&self.text()[self.pos..]) {
            Some((decoded, len)) => {
                self.pending.push_str(&decoded);
                self.pos += len;
            }
            None => self.literal(1),
        }
    }

    fn delimiter_run(&mut self, ch: char) {
        let text = self.text();
        let start = self.pos;
        let len = run_length(text, start, ch);
        let end = start + len;

        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        let left = left_flanking(before, after);
        let right = left_flanking(after, before);
        let (can_open, can_close) = if ch == '_' {
            (
                left && !before.is_some_and(char::is_alphanumeric),
                right && !after.is_some_and(char::is_alphanumeric),
            )
        } else {
            (left, right)
        };

        self.flush(start);
        let handle = self.arena.push(Piece::Delimiters(DelimiterRun {
            ch,
            start,
            end,
            original: len,
            can_open,
            can_close,
            active: true,
        }));
        self.delimiters.push(handle);
        self.pos = end;
        self.pending_start = end;
    }

    fn line_break(&mut self) {
        let newline = self.pos;
        let trailing = self.text()[self.pending_start..newline].len()
            - self.text()[self.pending_start..newline]
                .trim_end_matches(' ')
                .len();
        let kept = self.pending.len().saturating_sub(trailing);
        self.pending.truncate(kept);

        if trailing >= 2 {
            let node = Inline::Break(Break {
                position: self.span.position(newline - trailing, newline + 1),
            });
            self.push_node(newline - trailing, newline + 1, node);
        } else {
            self.pending.push(' ');
            self.pos = newline + 1;
        }
        self.skip_leading_spaces();
    }

    fn skip_leading_spaces(&mut self) {
        let rest = &self.text()[self.pos..];
        let skipped = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        self.pos += skipped;
        if self.pending.is_empty() {
            self.pending_start = self.pos;
        }
    }

    /// `[` or `![` at the current position: a link or image if a target follows.
    fn bracket(&mut self, image: bool) {
        let start = self.pos;
        let open = if image { start + 1 } else { start };
        let prefix = open + 1 - start;

        if (!image && !self.links_allowed) || self.depth >= MAX_BRACKET_DEPTH {
            self.literal(prefix);
            return;
        }
        let Some(close) = self.brackets.get(&open).copied() else {
            self.literal(prefix);
            return;
        };
        let Some((url, title, end)) = self.target(open, close) else {
            self.literal(prefix);
            return;
        };

        let inner = self.span.slice(open + 1, close);
        let links_allowed = image && self.links_allowed;
        let children =
            InlineParser::nested(&inner, self.references, links_allowed, self.depth + 1).parse();
        let position = self.span.position(start, end);

        let node = if image {
            Inline::Image(Image {
                url,
                title,
                alt: crate::markdown::ast::plain_text(&children),
                position,
            })
        } else {
            Inline::Link(Link {
                url,
                title,
                children,
                position,
            })
        };
        self.push_node(start, end, node);
    }

    /// What follows the label closed at `close`: an inline target or a reference.
    fn target(&self, open: usize, close: usize) -> Option<(String, Option<String>, usize)> {
        let text = self.text();
        let label = &text[open + 1..close];
        let after = close + 1;

        if text[after..].starts_with('(') {
            let target = parse_inline_target(text, after)?;
            return Some((target.url, target.title, target.end));
        } else if text[after..].starts_with('[') {
            let reference_close = scan_reference(text, after)?;
            let key = match &text[after + 1..reference_close] {
                "" => label,
                key => key,
            };
            let definition = self.references.get(key)?;
            return Some(resolved(definition, reference_close + 1));
        }

        self.references
            .get(label)
            .map(|definition| resolved(definition, after))
    }
}

fn resolved(definition: &Definition, end: usize) -> (String, Option<String>, usize) {
    (definition.url.clone(), definition.title.clone(), end)
}

fn run_length(text: &str, start: usize, ch: char) -> usize {
    text[start..].len() - text[start..].trim_start_matches(ch).len()
}

/// Newlines become spaces; one space is stripped from each side when both sides have
/// one and the content is not all spaces.
fn code_content(raw: &str) -> String {
    let value = raw.replace('\n', " ");
    let stripped = value
        .strip_prefix(' ')
        .and_then(|inner| inner.strip_suffix(' '));
    match stripped {
        Some(inner) if !value.chars().all(|c| c == ' ') => inner.to_string(),
        _ => value,
    }
}

/// A run is left-flanking when it is not followed by whitespace, and is followed by
/// punctuation only if preceded by whitespace, punctuation or the start of the text.
/// Right-flanking is the same test with the sides swapped.
fn left_flanking(before: Option<char>, after: Option<char>) -> bool {
    let Some(next) = after else {
        return false;
    };
    if next.is_whitespace() {
        return false;
    }
    !is_punctuation(next) || before.map_or(true, |prev| prev.is_whitespace() || is_punctuation(prev))
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || !(c.is_alphanumeric() || c.is_whitespace() || c.is_control())
}

/// Drop empty text and merge adjacent text nodes, recursively.
fn normalize(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(inlines.len());

    for inline in inlines {
        let inline = match inline {
            Inline::Text(text) if text.value.is_empty() => continue,
            Inline::Emphasis(mut node) => {
                node.children = normalize(node.children);
                Inline::Emphasis(node)
            }
            Inline::Strong(mut node) => {
                node.children = normalize(node.children);
                Inline::Strong(node)
            }
            Inline::Link(mut node) => {
                node.children = normalize(node.children);
                Inline::Link(node)
            }
            other => other,
        };

        if let (Some(Inline::Text(previous)), Inline::Text(next)) = (out.last_mut(), &inline) {
            previous.value.push_str(&next.value);
            previous.position = match (previous.position, next.position) {
                (Some(first), Some(second)) => Some(Position::new(first.start, second.end)),
                _ => None,
            };
            continue;
        }
        out.push(inline);
    }
    out
}
