//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Per-field problems (a chapter anchor that isn't a number, a verse without
//! text) are never errors; they are counted in a [`Tally`](crate::models::Tally)
//! and extraction carries on.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// One of the operator-supplied CSS selectors does not parse.
    #[display("invalid {name} selector '{css}': {reason}")]
    InvalidSelector {
        /// Which of the five selectors was rejected.
        name: &'static str,
        /// The selector as supplied.
        css: String,
        /// Parser message.
        reason: String,
    },
    /// The book heading list could not be compiled into a pattern.
    #[display("invalid book heading list")]
    InvalidHeadings,
    /// The boilerplate token list could not be compiled into a pattern.
    #[display("invalid boilerplate token list")]
    InvalidBoilerplate,
    /// The lexical mode name is not one of `auto`, `inline` or `headings`.
    #[display("unknown lexical mode: {_0}")]
    UnknownMode(#[error(not(source))] String),
    /// Extraction finished without a single verse. The document structure has
    /// probably changed, or the selectors/headings don't match it.
    #[display("no verses found: the document structure may have changed or the selectors are wrong")]
    NoVersesFound,
    /// Verses could not be converted to or from JSON.
    #[display("failed to serialize verses")]
    Serialization,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The same input with the same configuration always produces the
        // same outcome.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        let kind = ErrorKind::InvalidSelector {
            name: "title",
            css: "h1[".to_string(),
            reason: "unexpected end".to_string(),
        };
        assert_eq!(kind.to_string(), "invalid title selector 'h1[': unexpected end");
        assert_eq!(ErrorKind::UnknownMode("fuzzy".to_string()).to_string(), "unknown lexical mode: fuzzy");
        assert!(ErrorKind::NoVersesFound.to_string().starts_with("no verses found"));
    }

    #[test]
    fn nothing_is_retryable() {
        assert!(!ErrorKind::NoVersesFound.is_retryable());
        assert!(!ErrorKind::InvalidHeadings.is_retryable());
    }
}
