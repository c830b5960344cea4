//! Leaf blocks
//!
//! Builders for blocks that hold no other blocks: headings, thematic breaks, code and
//! the raw text of paragraphs. Each builder receives the token stream and the index of
//! the token that triggered it, and returns the block together with the index of the
//! first token it did not consume.

use crate::markdown::ast::{Block, Code, Heading, Paragraph, Phrasing, Position, RawSpan, ThematicBreak};
use crate::markdown::lexing::indentation::strip_columns;
use crate::markdown::lexing::SourceLine;
use crate::markdown::token::{Fence, Token, TokenKind};

/// Position from the start of `first` to the end of `last`.
pub(super) fn span(first: &Token, last: &Token) -> Position {
    Position::new(first.start, last.end)
}

pub(super) fn atx_heading(token: &Token, level: u8) -> Block {
    let after_hashes = token
        .raw
        .trim_start_matches([' ', '\t'])
        .trim_start_matches('#')
        .trim_start_matches([' ', '\t']);
    let skipped = token.raw.len() - after_hashes.len();

    let mut text = RawSpan::new();
    text.push_line(&token.content, token.start.advance(skipped));

    Block::Heading(Heading {
        depth: level,
        children: Phrasing::Unresolved(text),
        position: span(token, token),
    })
}

pub(super) fn thematic_break(token: &Token) -> Block {
    Block::ThematicBreak(ThematicBreak {
        position: span(token, token),
    })
}

/// Heading level a token gives the paragraph above it, if it is an underline.
///
/// A compact `---` is tokenized as a thematic break but underlines a paragraph.
pub(super) fn setext_level(token: &Token) -> Option<u8> {
    match token.kind {
        TokenKind::SetextUnderline { level } => Some(level),
        TokenKind::ThematicBreak {
            marker: '-',
            compact: true,
        } => Some(2),
        _ => None,
    }
}

/// End of the run of paragraph lines starting at `start`.
///
/// The first line is always part of the run. Later lines continue it when they are
/// paragraph text or indented code, which cannot interrupt a paragraph.
pub(super) fn paragraph_run(tokens: &[Token], start: usize) -> usize {
    let mut end = start + 1;
    while let Some(token) = tokens.get(end) {
        match token.kind {
            TokenKind::Paragraph | TokenKind::IndentedCode => end += 1,
            _ => break,
        }
    }
    end
}

/// Raw text of paragraph lines, leading whitespace removed.
pub(super) fn paragraph_text(tokens: &[Token]) -> RawSpan {
    let mut text = RawSpan::new();
    for token in tokens {
        let line = token.raw.trim_start_matches([' ', '\t']);
        let skipped = token.raw.len() - line.len();
        text.push_line(line, token.start.advance(skipped));
    }
    text.trim_end();
    text
}

pub(super) fn paragraph(tokens: &[Token]) -> Option<Block> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    Some(Block::Paragraph(Paragraph {
        children: Phrasing::Unresolved(paragraph_text(tokens)),
        position: span(first, last),
    }))
}

/// Paragraph holding container lines that are nested too deep to parse.
pub(super) fn flattened(lines: &[SourceLine]) -> Option<Block> {
    let first = lines.iter().position(|line| !line.text.trim().is_empty())?;
    let last = lines.iter().rposition(|line| !line.text.trim().is_empty())?;
    let lines = &lines[first..=last];

    let mut text = RawSpan::new();
    for line in lines {
        let trimmed = line.text.trim_start_matches([' ', '\t']);
        text.push_line(trimmed, line.start.advance(line.text.len() - trimmed.len()));
    }
    text.trim_end();

    let start = lines[0].start;
    let last = &lines[lines.len() - 1];
    Some(Block::Paragraph(Paragraph {
        children: Phrasing::Unresolved(text),
        position: Position::new(start, last.start.advance(last.text.len())),
    }))
}

pub(super) fn fenced_code(tokens: &[Token], start: usize, fence: &Fence) -> (Block, usize) {
    let opener = &tokens[start];
    let mut body = Vec::new();
    let mut last = opener;
    let mut next = start + 1;

    while let Some(token) = tokens.get(next) {
        next += 1;
        last = token;
        if closes(token, fence) {
            break;
        }
        body.push(strip_columns(&token.raw, token.origin, opener.indent).text);
    }

    let (lang, meta) = split_info(&fence.info);
    let code = Code {
        lang,
        meta,
        value: body.join("\n"),
        position: span(opener, last),
    };
    (Block::Code(code), next)
}

fn closes(token: &Token, opener: &Fence) -> bool {
    match token.fence() {
        Some(fence) => fence.marker == opener.marker && fence.length >= opener.length,
        None => false,
    }
}

/// First word of the info string and the rest.
fn split_info(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim();
    if info.is_empty() {
        return (None, None);
    }
    match info.split_once([' ', '\t']) {
        Some((lang, meta)) => {
            let meta = meta.trim();
            let meta = (!meta.is_empty()).then(|| meta.to_string());
            (Some(lang.to_string()), meta)
        }
        None => (Some(info.to_string()), None),
    }
}

pub(super) fn indented_code(tokens: &[Token], start: usize) -> (Block, usize) {
    let mut lines = vec![tokens[start].content.clone()];
    let mut last = start;
    let mut next = start + 1;

    loop {
        match tokens.get(next).map(|token| &token.kind) {
            Some(TokenKind::IndentedCode) => {
                lines.push(tokens[next].content.clone());
                last = next;
                next += 1;
            }
            Some(TokenKind::Blank)
                if matches!(
                    tokens.get(next + 1).map(|token| &token.kind),
                    Some(TokenKind::IndentedCode)
                ) =>
            {
                let blank = &tokens[next];
                lines.push(strip_columns(&blank.raw, blank.origin, 4).text);
                next += 1;
            }
            _ => break,
        }
    }

    let code = Code {
        lang: None,
        meta: None,
        value: lines.join("\n"),
        position: span(&tokens[start], &tokens[last]),
    };
    (Block::Code(code), last + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::lexing::tokenize;

    fn code(source: &str) -> (Code, usize) {
        let tokens = tokenize(source);
        let (block, next) = match &tokens[0].kind {
            TokenKind::CodeFence(fence) => fenced_code(&tokens, 0, fence),
            _ => indented_code(&tokens, 0),
        };
        match block {
            Block::Code(code) => (code, next),
            other => panic!("expected code, got {other:?}"),
        }
    }

    #[test]
    fn test_fenced_code() {
        let (code, next) = code("```js\ncode\n```\nafter");
        assert_eq!(code.lang.as_deref(), Some("js"));
        assert_eq!(code.meta, None);
        assert_eq!(code.value, "code");
        assert_eq!(next, 3);
    }

    #[test]
    fn test_fence_keeps_info_in_meta() {
        let (code, _) = code("~~~ rust  ignore title=x\n~~~");
        assert_eq!(code.lang.as_deref(), Some("rust"));
        assert_eq!(code.meta.as_deref(), Some("ignore title=x"));
        assert_eq!(code.value, "");
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let (code, next) = code("```\na\n\nb");
        assert_eq!(code.value, "a\n\nb");
        assert_eq!(next, 4);
        assert_eq!(code.position.end.line, 4);
    }

    #[test]
    fn test_fence_needs_same_marker_and_length() {
        let (code, _) = code("````\n```\n~~~~\n`````");
        assert_eq!(code.value, "```\n~~~~");
    }

    #[test]
    fn test_fence_body_loses_opener_indent() {
        let (code, _) = code("  ```\n    a\n b\n  ```");
        assert_eq!(code.value, "  a\nb");
    }

    #[test]
    fn test_indented_code_single_blank() {
        let (code, next) = code("    a\n\n    b\n\n\n    c");
        assert_eq!(code.value, "a\n\nb");
        assert_eq!(next, 3);
    }

    #[test]
    fn test_atx_heading_anchor() {
        let tokens = tokenize("  ## Title ##");
        let heading = atx_heading(&tokens[0], 2);
        match heading {
            Block::Heading(heading) => match heading.children {
                Phrasing::Unresolved(span) => {
                    assert_eq!(span.text(), "Title");
                    assert_eq!(span.point_at(0).map(|p| p.column), Some(6));
                }
                other => panic!("expected raw span, got {other:?}"),
            },
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn test_paragraph_text_keeps_inner_trailing_spaces() {
        let tokens = tokenize("  foo  \n   bar  ");
        let text = paragraph_text(&tokens);
        assert_eq!(text.text(), "foo  \nbar");
    }
}
