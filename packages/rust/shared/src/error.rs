//! Error types for the example catalog generator.
//!
//! Library crates use [`CatalogError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all catalog operations.
///
/// Only infrastructural failures surface through this type. Example-level
/// anomalies (missing README, malformed metadata, ...) are recorded as
/// [`Diagnostic`](crate::Diagnostic)s and never abort a run.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Structured metadata could not be parsed.
    #[error("metadata error: {message}")]
    Metadata { message: String },

    /// Catalog serialization error.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// A generated pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(String),

    /// Data validation error (empty category list, bad layout, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a metadata error from any displayable message.
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
