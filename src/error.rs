//! Error types for grammar conversion

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Everything that can go wrong between reading the source grammar and
/// writing the converted one.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {} as {format}: {message}", path.display())]
    Parse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("value cannot be represented in the target format: {0}")]
    Unrepresentable(String),

    #[error("failed to serialize as {format}: {message}")]
    Serialize { format: String, message: String },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown format: {0}")]
    UnknownFormat(String),

    #[error("operation not supported: {0}")]
    NotSupported(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Coarse classification of a [`ConvertError`], for callers that branch on
/// the failure rather than on its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Read,
    Parse,
    Unrepresentable,
    Serialize,
    Write,
    Format,
    Config,
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::NotFound { .. } => ErrorKind::NotFound,
            ConvertError::Read { .. } => ErrorKind::Read,
            ConvertError::Parse { .. } => ErrorKind::Parse,
            ConvertError::Unrepresentable(_) => ErrorKind::Unrepresentable,
            ConvertError::Serialize { .. } => ErrorKind::Serialize,
            ConvertError::Write { .. } => ErrorKind::Write,
            ConvertError::UnknownFormat(_) | ConvertError::NotSupported(_) => ErrorKind::Format,
            ConvertError::Config(_) => ErrorKind::Config,
        }
    }

    /// Attach the source path to a parse failure raised by a format that
    /// only sees the text.
    pub(crate) fn at_path(self, at: &std::path::Path) -> Self {
        match self {
            ConvertError::Parse {
                path,
                format,
                message,
            } if path.as_os_str().is_empty() => ConvertError::Parse {
                path: at.to_path_buf(),
                format,
                message,
            },
            other => other,
        }
    }
}
