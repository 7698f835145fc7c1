//! The conversion pipeline
//!
//!     read source text → parse with the source format → serialize with the target format → write
//!
//!     Each stage returns a [`ConvertError`] on failure and nothing is retried. Writing goes
//!     through a temporary file in the output directory that is renamed over the destination once
//!     complete, so a failed run leaves any previous output untouched. With `atomic_write`
//!     disabled the destination is truncated and written in place instead.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::ConverterConfig;
use crate::document::GrammarDocument;
use crate::error::{ConvertError, Result};
use crate::format::Format;
use crate::registry::FormatRegistry;

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source_format: String,
    pub target_format: String,
    pub bytes_written: usize,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Conversion successful. Data saved to {}",
            self.output.display()
        )
    }
}

/// Runs conversions according to a [`ConverterConfig`].
pub struct Converter {
    config: ConverterConfig,
    registry: FormatRegistry,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Self::with_registry(config, FormatRegistry::with_defaults())
    }

    pub fn with_registry(config: ConverterConfig, registry: FormatRegistry) -> Self {
        Converter { config, registry }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Convert the configured input path to the configured output path.
    pub fn run(&self) -> Result<Conversion> {
        self.convert(&self.config.input_path, &self.config.output_path)
    }

    /// Convert `input` into `output`, creating or replacing `output`.
    pub fn convert(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Conversion> {
        let input = input.as_ref();
        let output = output.as_ref();

        let (source, target) = self.formats_for(input, output)?;
        debug!(
            input = %input.display(),
            output = %output.display(),
            from = source.name(),
            to = target.name(),
            "converting grammar"
        );

        let text = read_source(input)?;
        let doc = source.parse(&text).map_err(|e| e.at_path(input))?;
        debug!(root = %doc.summary(), "parsed grammar document");

        let rendered = target.serialize(&doc, &self.config.output_options())?;
        if self.config.atomic_write {
            write_atomic(output, rendered.as_bytes())?;
        } else {
            write_in_place(output, rendered.as_bytes())?;
        }

        info!(
            output = %output.display(),
            bytes = rendered.len(),
            "wrote converted grammar"
        );
        Ok(Conversion {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            source_format: source.name().to_string(),
            target_format: target.name().to_string(),
            bytes_written: rendered.len(),
        })
    }

    /// Parse and re-serialize `source` without touching the filesystem.
    ///
    /// `auto` format names cannot be resolved here since there is no path;
    /// they fall back to yaml → json.
    pub fn transcode(&self, source: &str) -> Result<String> {
        let from = self.named_or(&self.config.source_format, "yaml")?;
        let to = self.named_or(&self.config.target_format, "json")?;
        let doc = self.parse_with(from, source)?;
        to.serialize(&doc, &self.config.output_options())
    }

    fn parse_with(&self, format: &dyn Format, source: &str) -> Result<GrammarDocument> {
        if !format.supports_parsing() {
            return Err(ConvertError::NotSupported(format!(
                "Format '{}' does not support parsing",
                format.name()
            )));
        }
        format.parse(source)
    }

    fn named_or(&self, name: &str, fallback: &str) -> Result<&dyn Format> {
        if name == crate::registry::AUTO {
            self.registry.get(fallback)
        } else {
            self.registry.get(name)
        }
    }

    fn formats_for(&self, input: &Path, output: &Path) -> Result<(&dyn Format, &dyn Format)> {
        let source = self.registry.resolve(&self.config.source_format, input)?;
        if !source.supports_parsing() {
            return Err(ConvertError::NotSupported(format!(
                "Format '{}' does not support parsing",
                source.name()
            )));
        }
        let target = self.registry.resolve(&self.config.target_format, output)?;
        if !target.supports_serialization() {
            return Err(ConvertError::NotSupported(format!(
                "Format '{}' does not support serialization",
                target.name()
            )));
        }
        Ok((source, target))
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

/// Convert `input` to `output` with the default settings (yaml → json, indent 2).
pub fn convert(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Conversion> {
    Converter::default().convert(input, output)
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConvertError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConvertError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn write_in_place(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_error = |source: io::Error| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = temp_file_for(dir, path).map_err(write_error)?;
    tmp.write_all(bytes).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

/// Temporary file whose mode matches what writing `dest` in place would
/// leave: the existing file's permissions, or the umask default for a new one.
fn temp_file_for(dir: &Path, dest: &Path) -> io::Result<NamedTempFile> {
    match fs::metadata(dest) {
        Ok(meta) => {
            let tmp = NamedTempFile::new_in(dir)?;
            tmp.as_file().set_permissions(meta.permissions())?;
            Ok(tmp)
        }
        Err(_) => fresh_temp_file(dir),
    }
}

#[cfg(unix)]
fn fresh_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    // The requested mode is masked by the process umask at creation.
    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn fresh_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}
