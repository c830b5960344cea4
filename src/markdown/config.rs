//! Configuration loading
//!
//! `defaults/marktree.default.toml` is embedded into the library so that the documented
//! defaults and the runtime behavior stay in sync. Applications layer user files and
//! single-key overrides on top of it with [Loader] before deserializing into
//! [MarktreeConfig].

use crate::markdown::parsing::ParseOptions;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/marktree.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarktreeConfig {
    pub parser: ParseOptions,
    pub output: OutputConfig,
}

/// How the command-line tool prints trees.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub show_positions: bool,
}

/// Layers user configuration over the embedded defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. A missing file is an error at build time.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file that may be absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, such as a command-line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<MarktreeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load the embedded defaults only.
pub fn load_defaults() -> Result<MarktreeConfig, ConfigError> {
    Loader::new().build()
}
