//! Application Error Types
//!
//! Every fatal error is reported with a classification (the [`ErrorKind`]), a
//! message and the full `exn` error tree underneath it.

use derive_more::{Display, Error};
use lectern_extract::error::{Error as ExtractError, ErrorKind as ExtractErrorKind};
use lectern_load::error::Error as LoadError;

/// An application error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file was rejected before anything was read.
    #[display("invalid input: {_0}")]
    InvalidInput(#[error(not(source))] String),
    /// The file could not be read or decoded as a document.
    #[display("read error: {_0}")]
    Read(#[error(not(source))] String),
    /// The document was read but no verse matched its structure.
    #[display("no verses found: the document structure may have changed or the selectors are wrong")]
    NoVerses,
    /// Configuration could not be loaded or compiled.
    #[display("configuration error")]
    Config,
    /// Export or display was requested before a document was opened.
    #[display("nothing loaded: open a document first")]
    NothingLoaded,
    /// The result could not be written out.
    #[display("failed to write output")]
    Output,
}
impl ErrorKind {
    /// Classifies a loader error, keeping its `Exn` frame as a child in the
    /// error tree.
    #[track_caller]
    pub fn load(err: LoadError) -> Error {
        let message = (*err).to_string();
        let kind = match err.is_input_error() {
            true => ErrorKind::InvalidInput(message),
            false => ErrorKind::Read(message),
        };
        err.raise(kind)
    }

    #[track_caller]
    pub fn extract(err: ExtractError) -> Error {
        let kind = match &*err {
            ExtractErrorKind::NoVersesFound => ErrorKind::NoVerses,
            other => ErrorKind::Read(other.to_string()),
        };
        err.raise(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_load::error::ErrorKind as LoadErrorKind;
    use std::path::PathBuf;

    #[test]
    fn loader_errors_are_classified() {
        let err = ErrorKind::load(LoadError::from(LoadErrorKind::UnsupportedInput(PathBuf::from("a.docx"))));
        assert!(matches!(&*err, ErrorKind::InvalidInput(message) if message.starts_with("unsupported input: a.docx")));
        let err = ErrorKind::load(LoadError::from(LoadErrorKind::Pdf));
        assert_eq!(*err, ErrorKind::Read("failed to read PDF document".to_string()));
    }

    #[test]
    fn empty_extraction_is_its_own_category() {
        let err = ErrorKind::extract(ExtractError::from(ExtractErrorKind::NoVersesFound));
        assert_eq!(*err, ErrorKind::NoVerses);
    }
}
