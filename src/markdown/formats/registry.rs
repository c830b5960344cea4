//! Format registry for tree serialization
//!
//! Each output format implements [Formatter] and is registered by name with a
//! [FormatRegistry].

use crate::markdown::ast::Root;
use crate::markdown::error::{Error, Result};
use std::collections::HashMap;

/// Serializes a parsed tree to a string.
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "treeviz", "json")
    fn name(&self) -> &str;

    fn serialize(&self, root: &Root) -> Result<String>;

    fn description(&self) -> &str {
        ""
    }
}

/// Registry of tree formatters
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any with the same name.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a tree using the named format
    pub fn serialize(&self, root: &Root, format: &str) -> Result<String> {
        let formatter = self.get(format).ok_or_else(|| Error::UnknownFormat {
            name: format.to_string(),
            available: self.list_formats(),
        })?;
        formatter.serialize(root)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with the built-in formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::JsonFormatter);
        registry.register(super::TreevizFormatter::default());
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize(&self, _root: &Root) -> Result<String> {
            Ok("test output".to_string())
        }
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        assert!(registry.has("test"));
        assert_eq!(registry.list_formats(), vec!["test"]);
        assert_eq!(registry.get("test").unwrap().description(), "");
    }

    #[test]
    fn test_registry_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);
        let output = registry.serialize(&Root::new(Vec::new()), "test").unwrap();
        assert_eq!(output, "test output");
    }

    #[test]
    fn test_registry_unknown_format() {
        let registry = FormatRegistry::with_defaults();
        let error = registry
            .serialize(&Root::new(Vec::new()), "html")
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "unknown format 'html' (available: json, treeviz)"
        );
    }
}
