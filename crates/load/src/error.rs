//! Loader Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use crate::DocumentKind;
use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::{Path, PathBuf};

/// A loader error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The file type can't be handled; nothing was read.
    #[display("unsupported input: {}; expected .epub, .pdf, .xhtml, .html, .htm or .txt", _0.display())]
    UnsupportedInput(#[error(not(source))] PathBuf),
    /// File does not exist
    #[display("file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Underlying I/O error
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// The file content doesn't carry the signature its extension promises.
    #[display("file content is not a valid {_0} container")]
    KindMismatch(#[error(not(source))] DocumentKind),
    /// The zip container could not be opened or one of its entries read.
    #[display("failed to read EPUB archive")]
    Archive,
    /// The PDF could not be parsed.
    #[display("failed to read PDF document")]
    Pdf,
    /// The archive opened fine but holds no content documents.
    #[display("no {extension} content files found under {prefix}")]
    EmptyArchive { prefix: String, extension: String },
}
impl ErrorKind {
    pub(crate) fn from_io(err: IoError, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io(err),
        }
    }

    /// Returns `true` if the input was rejected before anything was read.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::UnsupportedInput(_))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
