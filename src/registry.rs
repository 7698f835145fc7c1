//! Format registry for format discovery and selection
//!
//! Formats are registered under their name and can be looked up by that
//! name or by the extension of a file path. `auto` as a name defers to the
//! path.

use crate::error::ConvertError;
use crate::format::Format;
use std::collections::HashMap;
use std::path::Path;

/// Name that selects a format from the file extension.
pub const AUTO: &str = "auto";

/// Registry of grammar formats
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, ConvertError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| ConvertError::UnknownFormat(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Iterate over registered formats, sorted by name
    pub fn formats(&self) -> Vec<&dyn Format> {
        let mut formats: Vec<&dyn Format> = self.formats.values().map(|f| f.as_ref()).collect();
        formats.sort_by(|a, b| a.name().cmp(b.name()));
        formats
    }

    /// Find the format claiming the extension of `path`
    ///
    /// Extensions compare case-insensitively. `grammar.tmLanguage.yaml`
    /// resolves through its last extension, `yaml`.
    pub fn for_path(&self, path: &Path) -> Result<&dyn Format, ConvertError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                ConvertError::UnknownFormat(format!(
                    "cannot infer a format for {} (no extension)",
                    path.display()
                ))
            })?;
        self.formats()
            .into_iter()
            .find(|f| f.extensions().iter().any(|e| e.eq_ignore_ascii_case(&ext)))
            .ok_or_else(|| {
                ConvertError::UnknownFormat(format!(
                    "no format handles .{} ({})",
                    ext,
                    path.display()
                ))
            })
    }

    /// Resolve a configured format name, falling back to the path when the
    /// name is `auto`
    pub fn resolve(&self, name: &str, path: &Path) -> Result<&dyn Format, ConvertError> {
        if name == AUTO {
            self.for_path(path)
        } else {
            self.get(name)
        }
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::YamlFormat);
        registry.register(crate::formats::JsonFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
