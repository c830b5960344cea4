//! Lexer
//!
//!     This module orchestrates the complete tokenization pipeline for Markdown.
//!
//!     Markdown block structure is line oriented, so the tokenizer works in two steps:
//!
//!         1. Line splitting using a logos lexer. See [base_tokenization]. Lines end at
//!            `\n`, `\r\n` or a bare `\r`, and every line remembers its ending so that the
//!            source can be rebuilt exactly.
//!         2. Line classification. See [line_classification]. Each line becomes one
//!            [Token] with its kind and attributes.
//!
//!     Indentation is measured with tab stops every four columns. See [indentation].
//!
//! Nested containers
//!
//!     Blockquotes and list items are parsed by tokenizing their contents again. The
//!     contents are not a string but a list of [SourceLine]s: each line keeps the source
//!     point of its first character and the expanded column at which it begins, so tokens
//!     of nested blocks report positions in the original document and tabs expand the
//!     same way they would in the full line.

pub mod base_tokenization;
pub mod indentation;
pub mod line_classification;

use crate::markdown::ast::Point;
use crate::markdown::token::{LineEnding, Token};

/// A line handed to the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub text: String,
    /// Source point of the first byte of `text`.
    pub start: Point,
    /// Expanded column at which `text` begins.
    pub origin: usize,
    pub ending: LineEnding,
}

impl SourceLine {
    /// The part of this line after `columns` columns of indentation.
    pub fn strip_columns(&self, columns: usize) -> SourceLine {
        let stripped = indentation::strip_columns(&self.text, self.origin, columns);
        SourceLine {
            text: stripped.text,
            start: self.start.advance(stripped.skipped),
            origin: stripped.origin,
            ending: self.ending,
        }
    }

    /// The part of this line after its first `bytes` bytes.
    pub fn skip_bytes(&self, bytes: usize, origin: usize) -> SourceLine {
        SourceLine {
            text: self.text.get(bytes..).unwrap_or_default().to_string(),
            start: self.start.advance(bytes),
            origin,
            ending: self.ending,
        }
    }
}

impl From<&Token> for SourceLine {
    fn from(token: &Token) -> Self {
        SourceLine {
            text: token.raw.clone(),
            start: token.start,
            origin: token.origin,
            ending: token.ending,
        }
    }
}

/// Tokenize source text into one token per line.
pub fn tokenize(source: &str) -> Vec<Token> {
    let tokens = tokenize_lines(&base_tokenization::split_lines(source));
    tracing::debug!(lines = tokens.len(), "tokenized source");
    tokens
}

/// Tokenize lines extracted from a container.
pub fn tokenize_lines(lines: &[SourceLine]) -> Vec<Token> {
    lines.iter().map(tokenize_line).collect()
}

fn tokenize_line(line: &SourceLine) -> Token {
    let classified = line_classification::classify(&line.text, line.origin);
    Token {
        kind: classified.kind,
        content: classified.content,
        indent: classified.indent,
        origin: line.origin,
        start: line.start,
        end: line.start.advance(line.text.len()),
        raw: line.text.clone(),
        ending: line.ending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::token::TokenKind;

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_round_trip() {
        let source = "# Title\r\n\n- item\r  code\n";
        let rebuilt: String = tokenize(source)
            .iter()
            .map(|token| format!("{}{}", token.raw, token.ending.as_str()))
            .collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_token_positions() {
        let tokens = tokenize("ab\ncde");
        assert_eq!(tokens[1].line(), 2);
        assert_eq!(tokens[1].offset(), 3);
        assert_eq!(tokens[1].end, Point::new(2, 4, 6));
    }

    #[test]
    fn test_nested_line_keeps_tab_stops() {
        // "-" then a tab: content starts at column 2, the tab ends at column 4.
        let line = SourceLine {
            text: "-\t\tcode".to_string(),
            start: Point::default(),
            origin: 0,
            ending: LineEnding::None,
        };
        let inner = line.skip_bytes(1, 1).strip_columns(1);
        assert_eq!(inner.origin, 2);
        assert_eq!(inner.text, "  \tcode");

        let token = &tokenize_lines(&[inner])[0];
        assert_eq!(token.kind, TokenKind::IndentedCode);
        assert_eq!(token.content, "  code");
    }
}
