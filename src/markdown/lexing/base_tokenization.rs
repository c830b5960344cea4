//! Line splitting
//!
//!     The logos lexer only knows about line text and the three line endings. Every byte
//!     of the input belongs to exactly one segment, so joining the lines back with their
//!     endings reproduces the input. A trailing line ending does not open an extra empty
//!     line.

use super::SourceLine;
use crate::markdown::ast::Point;
use crate::markdown::token::LineEnding;
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    #[regex(r"[^\r\n]+")]
    Text,

    #[token("\r\n")]
    CrLf,

    #[token("\n")]
    Lf,

    #[token("\r")]
    Cr,
}

/// Split source text into lines with their start points and endings.
pub fn split_lines(source: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    let mut lexer = Segment::lexer(source);
    let mut line_number = 1;
    let mut line_start = 0;
    let mut text_end = 0;

    while let Some(segment) = lexer.next() {
        let span = lexer.span();
        let ending = match segment {
            Ok(Segment::CrLf) => LineEnding::CrLf,
            Ok(Segment::Lf) => LineEnding::Lf,
            Ok(Segment::Cr) => LineEnding::Cr,
            // Text covers everything that is not a line ending.
            Ok(Segment::Text) | Err(_) => {
                text_end = span.end;
                continue;
            }
        };
        lines.push(SourceLine {
            text: source[line_start..text_end].to_string(),
            start: Point::new(line_number, 1, line_start),
            origin: 0,
            ending,
        });
        line_number += 1;
        line_start = span.end;
        text_end = span.end;
    }

    if line_start < source.len() {
        lines.push(SourceLine {
            text: source[line_start..].to_string(),
            start: Point::new(line_number, 1, line_start),
            origin: 0,
            ending: LineEnding::None,
        });
    }

    lines
}
