//! Layered configuration for the converter.
//!
//! `defaults/tmgrammar.default.toml` is embedded into the binary so that docs
//! and runtime behavior stay in sync. Callers layer project files and command
//! line overrides on top via [`Loader`] before deserializing into
//! [`ConverterConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::format::OutputOptions;

const DEFAULT_TOML: &str = include_str!("../defaults/tmgrammar.default.toml");

/// Project-level config file picked up from the working directory.
pub const PROJECT_CONFIG: &str = "tmgrammar.toml";

/// Everything a conversion run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConverterConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub source_format: String,
    pub target_format: String,
    pub indent: usize,
    pub trailing_newline: bool,
    pub atomic_write: bool,
}

impl ConverterConfig {
    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            indent: self.indent,
            trailing_newline: self.trailing_newline,
        }
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            input_path: PathBuf::from("src/sht.tmLanguage.yaml"),
            output_path: PathBuf::from("syntaxes/sht.tmLanguage.json"),
            source_format: "yaml".to_string(),
            target_format: "json".to_string(),
            indent: 2,
            trailing_newline: true,
            atomic_write: true,
        }
    }
}

/// Helper for layering overrides over the built-in defaults.
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

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ConverterConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ConverterConfig, ConfigError> {
    Loader::new().build()
}
