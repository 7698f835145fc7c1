//! # tmgrammar
//!
//! Converts TextMate grammars written in YAML (`*.tmLanguage.yaml`) into the JSON grammars
//! (`*.tmLanguage.json`) that editor extensions load.
//!
//! Architecture
//!
//!     - document: the grammar value tree every format parses into and serializes from
//!     - format / formats: the Format trait and its yaml and json implementations
//!     - registry: lookup of formats by name or file extension
//!     - convert: the read → parse → serialize → write pipeline
//!     - config: embedded defaults layered with project files and overrides
//!
//!     This is a pure lib: printing and process exit codes belong to the binary in
//!     `src/bin/tmgrammar.rs`.
//!
//! Usage
//!
//! ```ignore
//! let conversion = tmgrammar::convert("src/sht.tmLanguage.yaml", "syntaxes/sht.tmLanguage.json")?;
//! println!("{}", conversion);
//! ```

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod format;
pub mod formats;
pub mod logging;
pub mod registry;

pub use config::{ConverterConfig, Loader};
pub use convert::{convert, Conversion, Converter};
pub use document::GrammarDocument;
pub use error::{ConvertError, ErrorKind};
pub use format::{Format, OutputOptions};
pub use registry::FormatRegistry;
