//! Entity references and backslash escapes
//!
//!     Only a small fixed table of named entities is recognized. Numeric references
//!     decode to the code point they name; zero and values that are not Unicode scalar
//!     values decode to U+FFFD. Anything that does not parse stays literal text.

/// Maximum distance from `&` to the terminating `;`.
const MAX_ENTITY_LEN: usize = 32;

const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", "\u{a0}"),
    ("copy", "\u{a9}"),
    ("reg", "\u{ae}"),
];

/// Decode an entity reference at the start of `text`.
///
/// `text` must start with `&`. Returns the decoded text and the number of bytes the
/// reference spans, including `&` and `;`.
pub fn decode_entity(text: &str) -> Option<(String, usize)> {
    let body = text.strip_prefix('&')?;
    let window = body
        .char_indices()
        .take(MAX_ENTITY_LEN)
        .find(|&(_, c)| c == ';')
        .map(|(index, _)| index)?;
    let name = &body[..window];
    let consumed = window + 2;

    if let Some(numeric) = name.strip_prefix('#') {
        return decode_numeric(numeric).map(|c| (c.to_string(), consumed));
    }

    NAMED_ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|(_, value)| (value.to_string(), consumed))
}

fn decode_numeric(numeric: &str) -> Option<char> {
    let (digits, radix, max_len) = match numeric.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16, 6),
        None => (numeric, 10, 7),
    };
    if digits.is_empty() || digits.len() > max_len || !digits.chars().all(|c| c.is_digit(radix))
    {
        return None;
    }
    let value = u32::from_str_radix(digits, radix).ok()?;
    if value == 0 {
        return Some(char::REPLACEMENT_CHARACTER);
    }
    Some(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER))
}

/// Whether `\` followed by `c` is an escape.
pub fn is_escapable(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// Resolve backslash escapes and entity references in a link destination or title.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        match c {
            '\\' => {
                let next = rest[1..].chars().next();
                match next {
                    Some(escaped) if is_escapable(escaped) => {
                        out.push(escaped);
                        rest = &rest[1 + escaped.len_utf8()..];
                    }
                    _ => {
                        out.push('\\');
                        rest = &rest[1..];
                    }
                }
            }
            '&' => match decode_entity(rest) {
                Some((decoded, consumed)) => {
                    out.push_str(&decoded);
                    rest = &rest[consumed..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            },
            _ => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out
}
