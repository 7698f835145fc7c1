//! Format trait definition
//!
//! This module defines the Format trait that every surface syntax implements.
//! A format turns text into a [`GrammarDocument`] and/or back into text.

use crate::document::GrammarDocument;
use crate::error::ConvertError;

/// Serialization knobs shared by all formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    /// Spaces per nesting level. Zero asks for the most compact form the format has.
    pub indent: usize,
    pub trailing_newline: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions {
            indent: 2,
            trailing_newline: true,
        }
    }
}

/// Trait for grammar formats
///
/// Implementors provide conversion between a string representation and the
/// grammar document tree. Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct PlistFormat;
///
/// impl Format for PlistFormat {
///     fn name(&self) -> &str {
///         "plist"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["tmLanguage", "plist"]
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str) -> Result<GrammarDocument, ConvertError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "yaml", "json")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions (without the dot) this format claims
    fn extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → GrammarDocument)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (GrammarDocument → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a GrammarDocument
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<GrammarDocument, ConvertError> {
        Err(ConvertError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a GrammarDocument into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(
        &self,
        _doc: &GrammarDocument,
        _options: &OutputOptions,
    ) -> Result<String, ConvertError> {
        Err(ConvertError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
