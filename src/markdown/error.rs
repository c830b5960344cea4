//! Errors at the edges of the library
//!
//! Parsing itself cannot fail. Errors come from loading configuration, reading input
//! and producing output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown format '{name}' (available: {})", available.join(", "))]
    UnknownFormat { name: String, available: Vec<String> },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_format_message() {
        let error = Error::UnknownFormat {
            name: "yaml".to_string(),
            available: vec!["json".to_string(), "treeviz".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "unknown format 'yaml' (available: json, treeviz)"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.md");
        let error: Error = io.into();
        assert!(matches!(error, Error::Io(_)));
        assert_eq!(error.to_string(), "I/O error: missing.md");
    }
}
