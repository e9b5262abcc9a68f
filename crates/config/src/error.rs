//! Configuration Error Types

use derive_more::{Display, Error};
use lectern_extract::error::{Error as ExtractError, ErrorKind as ExtractErrorKind};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An explicitly requested config file does not exist.
    #[display("config file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The config file extension is not one of the supported formats.
    #[display("unsupported config file format: {}; expected .toml, .yaml, .yml or .json", _0.display())]
    UnsupportedFormat(#[error(not(source))] PathBuf),
    /// A layer could not be parsed, or a value has the wrong type.
    #[display("invalid configuration")]
    Invalid,
    /// Values parsed fine but the extractor rejects them (bad selector,
    /// uncompilable heading list).
    #[display("invalid extraction settings: {_0}")]
    Extract(ExtractErrorKind),
}
impl ErrorKind {
    /// Convert an extraction error into a configuration error, keeping the
    /// extract crate's `Exn` frame as a child in the error tree.
    #[track_caller]
    pub fn extract(err: ExtractError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Extract(inner))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
