//! JSON output
//!
//! Trees serialize to mdast-shaped JSON: every node is an object with a camelCase
//! `type`, and parents hold their nodes under `children`. Token streams and block trees
//! with unresolved spans serialize the same way, for inspecting intermediate stages.

use super::registry::Formatter;
use crate::markdown::ast::Root;
use crate::markdown::error::Result;
use serde::Serialize;

/// Pretty-print any serializable value.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Formatter implementation for JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, root: &Root) -> Result<String> {
        to_json_string(root)
    }

    fn description(&self) -> &str {
        "mdast-shaped JSON"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::parse;
    use serde_json::json;

    #[test]
    fn test_tree_shape() {
        let root = parse("## Hi *there*");
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.serialize(&root).unwrap()).unwrap();

        assert_eq!(value["type"], "root");
        let heading = &value["children"][0];
        assert_eq!(heading["type"], "heading");
        assert_eq!(heading["depth"], 2);
        assert_eq!(heading["children"][0], json!({
            "type": "text",
            "value": "Hi ",
            "position": {
                "start": { "line": 1, "column": 4, "offset": 3 },
                "end": { "line": 1, "column": 7, "offset": 6 }
            }
        }));
        assert_eq!(heading["children"][1]["type"], "emphasis");
    }

    #[test]
    fn test_token_stream() {
        let tokens = crate::markdown::tokenize("- item");
        let value: serde_json::Value =
            serde_json::from_str(&to_json_string(&tokens).unwrap()).unwrap();
        assert_eq!(value[0]["kind"]["type"], "list-marker");
    }
}
