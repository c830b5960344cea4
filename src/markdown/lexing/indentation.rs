//! Tab-aware indentation
//!
//!     Indentation is measured in columns with tab stops every four columns. A tab does
//!     not have a fixed width: it advances to the next stop, so its width depends on the
//!     column it starts at. Nested container lines do not start at column 0 of the source
//!     line, which is why every helper takes the `origin` column of the text it looks at.
//!
//!     Removing indentation can cut a tab in half (a list item whose content starts at
//!     column 2 followed by a tab-indented line). The columns of the tab that remain are
//!     materialized as spaces so the rest of the line keeps its visual alignment.

pub const TAB_STOP: usize = 4;

/// Width of a tab starting at `column`.
pub fn tab_width(column: usize) -> usize {
    TAB_STOP - column % TAB_STOP
}

/// Measure the leading run of spaces and tabs.
///
/// Returns the width in columns and the number of bytes it spans.
pub fn measure_indent(text: &str, origin: usize) -> (usize, usize) {
    let mut column = origin;
    let mut bytes = 0;
    for byte in text.bytes() {
        match byte {
            b' ' => column += 1,
            b'\t' => column += tab_width(column),
            _ => break,
        }
        bytes += 1;
    }
    (column - origin, bytes)
}

/// Result of removing leading columns from a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped {
    pub text: String,
    /// Source bytes fully consumed, so the remaining text starts this far in.
    pub skipped: usize,
    /// Expanded column at which the remaining text begins.
    pub origin: usize,
}

/// Remove up to `columns` columns of leading whitespace from `text`.
///
/// Stops early at the first non-whitespace character.
pub fn strip_columns(text: &str, origin: usize, columns: usize) -> Stripped {
    let target = origin + columns;
    let mut column = origin;

    for (index, byte) in text.bytes().enumerate() {
        if column >= target {
            return Stripped {
                text: text[index..].to_string(),
                skipped: index,
                origin: column,
            };
        }
        match byte {
            b' ' => column += 1,
            b'\t' => {
                let width = tab_width(column);
                if column + width > target {
                    let remaining = column + width - target;
                    return Stripped {
                        text: format!("{}{}", " ".repeat(remaining), &text[index + 1..]),
                        skipped: index,
                        origin: target,
                    };
                }
                column += width;
            }
            _ => {
                return Stripped {
                    text: text[index..].to_string(),
                    skipped: index,
                    origin: column,
                }
            }
        }
    }

    Stripped {
        text: String::new(),
        skipped: text.len(),
        origin: column,
    }
}

/// Whether a line holds nothing but spaces and tabs.
pub fn is_blank(text: &str) -> bool {
    text.bytes().all(|byte| byte == b' ' || byte == b'\t')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("foo", 0, (0, 0))]
    #[case("   foo", 0, (3, 3))]
    #[case("\tfoo", 0, (4, 1))]
    #[case(" \tfoo", 0, (4, 2))]
    #[case("\tfoo", 2, (2, 1))]
    #[case("  \t\tfoo", 0, (8, 4))]
    fn test_measure_indent(#[case] text: &str, #[case] origin: usize, #[case] expected: (usize, usize)) {
        assert_eq!(measure_indent(text, origin), expected);
    }

    #[test]
    fn test_strip_columns_spaces() {
        let stripped = strip_columns("      code", 0, 4);
        assert_eq!(stripped.text, "  code");
        assert_eq!(stripped.skipped, 4);
        assert_eq!(stripped.origin, 4);
    }

    #[test]
    fn test_strip_columns_splits_tab() {
        let stripped = strip_columns("\tfoo", 0, 2);
        assert_eq!(stripped.text, "  foo");
        assert_eq!(stripped.skipped, 0);
        assert_eq!(stripped.origin, 2);
    }

    #[test]
    fn test_strip_columns_stops_at_content() {
        let stripped = strip_columns(" foo", 0, 4);
        assert_eq!(stripped.text, "foo");
        assert_eq!(stripped.origin, 1);
    }

    #[test]
    fn test_strip_columns_whole_tab() {
        let stripped = strip_columns("\t\tx", 0, 4);
        assert_eq!(stripped.text, "\tx");
        assert_eq!(stripped.skipped, 1);
    }

    #[test]
    fn test_strip_columns_blank_line() {
        let stripped = strip_columns("  ", 0, 4);
        assert_eq!(stripped.text, "");
        assert_eq!(stripped.skipped, 2);
    }
}
