//! Error types produced by the upload crate.
//!
//! Validation outcomes are *not* errors here: a rejected upload comes back as
//! an [`ErrorUpload`](crate::ErrorUpload) value. The types below cover the
//! environment around validation instead.
//!
//! | Error | Raised by | Meaning |
//! |-------|-----------|---------|
//! | [`ConfigError`] | [`ValidationOptions`](crate::ValidationOptions) | Options are inconsistent or unparsable |
//! | [`FixtureError`] | [`upload_from_file`](crate::upload_from_file) | The local filesystem could not produce a record |
use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or checking [`ValidationOptions`](crate::ValidationOptions).
///
/// These are start-up problems; surface them before handling traffic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("maxSize must be greater than zero")]
    ZeroMaxSize,

    #[error("allowedTypes contains an empty entry")]
    EmptyAllowedType,

    /// Extensions are compared without the leading dot, so `".jpg"` never matches.
    #[error("allowedExtensions entry {0:?} must not start with '.'")]
    DottedExtension(String),

    #[error("failed to parse validation options: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        ConfigError::Parse(value.to_string())
    }
}

/// Failures while building an upload record from a file on disk.
///
/// Each variant carries the source path the caller asked for.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FixtureError {
    #[error("{}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to detect MIME type of {}", .0.display())]
    MimeDetection(PathBuf),

    #[error("failed to create temporary copy of {}", .0.display())]
    TempFile(PathBuf),
}

impl FixtureError {
    /// Path of the source file the failure relates to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            FixtureError::FileNotFound(path)
            | FixtureError::MimeDetection(path)
            | FixtureError::TempFile(path) => path,
        }
    }
}
