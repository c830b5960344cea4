//! Link reference definitions
//!
//!     A definition is a paragraph of exactly one line of the form
//!     `[label]: destination "optional title"`. It registers the destination under the
//!     normalized label and produces no node. Labels compare case-insensitively with
//!     whitespace runs collapsed, and the first definition of a label wins.
//!
//!     One map is built per document. Nested container parses write into the same map,
//!     so a definition inside a blockquote or list item is visible everywhere.

use crate::markdown::inlines::entities::unescape;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

static DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"^\[((?:[^\[\]\\]|\\.)+)\]:[ \t]*"#,
        r#"(?:<((?:[^<>\\\n]|\\.)*)>|([^ \t<][^ \t]*))"#,
        r#"(?:[ \t]+(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)'|\(((?:[^()\\]|\\.)*)\)))?"#,
        r#"[ \t]*$"#,
    ))
    .unwrap()
});

/// Destination and title registered under a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Normalized label to definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReferenceMap {
    definitions: BTreeMap<String, Definition>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition unless the label is already defined.
    ///
    /// Returns whether the definition was stored.
    pub fn insert(&mut self, label: &str, definition: Definition) -> bool {
        let key = normalize_label(label);
        if key.is_empty() || self.definitions.contains_key(&key) {
            return false;
        }
        self.definitions.insert(key, definition);
        true
    }

    /// Look up a label in any casing or spacing.
    pub fn get(&self, label: &str) -> Option<&Definition> {
        self.definitions.get(&normalize_label(label))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Definition)> {
        self.definitions.iter()
    }
}

/// Lowercase, collapse whitespace runs to one space, trim.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Parse a single line as a definition.
pub fn parse_definition(line: &str) -> Option<(String, Definition)> {
    let captures = DEFINITION.captures(line)?;
    let label = captures.get(1)?.as_str();
    if label.trim().is_empty() {
        return None;
    }

    let destination = captures
        .get(2)
        .or_else(|| captures.get(3))
        .map(|m| m.as_str())
        .unwrap_or_default();
    let title = captures
        .get(4)
        .or_else(|| captures.get(5))
        .or_else(|| captures.get(6))
        .map(|m| unescape(m.as_str()));

    Some((
        label.to_string(),
        Definition {
            url: unescape(destination),
            title,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Foo \t Bar\nBaz "), "foo bar baz");
    }

    #[test]
    fn test_first_definition_wins() {
        let mut map = ReferenceMap::new();
        assert!(map.insert("Foo", Definition {
            url: "/first".to_string(),
            title: None,
        }));
        assert!(!map.insert("foo", Definition {
            url: "/second".to_string(),
            title: None,
        }));
        assert_eq!(map.get("FOO").map(|d| d.url.as_str()), Some("/first"));
        assert_eq!(map.len(), 1);
    }

    #[rstest]
    #[case("[foo]: /url", "foo", "/url", None)]
    #[case("[foo]: /url \"title\"", "foo", "/url", Some("title"))]
    #[case("[Foo Bar]:   <my url>  'single'", "Foo Bar", "my url", Some("single"))]
    #[case("[a]: /u (paren)", "a", "/u", Some("paren"))]
    #[case(r"[b]: /a\*b", "b", "/a*b", None)]
    #[case("[c]: <>", "c", "", None)]
    fn test_parse_definition(
        #[case] line: &str,
        #[case] label: &str,
        #[case] url: &str,
        #[case] title: Option<&str>,
    ) {
        let (parsed_label, definition) = parse_definition(line).unwrap();
        assert_eq!(parsed_label, label);
        assert_eq!(definition.url, url);
        assert_eq!(definition.title.as_deref(), title);
    }

    #[rstest]
    #[case("[foo]:")]
    #[case("[foo] /url")]
    #[case("[]: /url")]
    #[case("[ ]: /url")]
    #[case("[foo]: /url \"unterminated")]
    #[case("[foo]: /url trailing")]
    fn test_not_a_definition(#[case] line: &str) {
        assert!(parse_definition(line).is_none());
    }
}
