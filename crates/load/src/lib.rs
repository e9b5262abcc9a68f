//! Document loading: turns a file on disk into an extraction [`Source`].
//!
//! Supported inputs, detected by extension ([`DocumentKind::from_path`]) and
//! cross-checked against magic bytes:
//!
//! - **EPUB** zip containers: content entries filtered by [`ArchiveFilter`],
//!   read as UTF-8 and ordered by natural name order
//! - **PDF** documents: the text layer of every page, flattened into one
//!   stream
//! - a single **XHTML/HTML** document, or an already flattened **text** file
//!
//! Reading the file is the only asynchronous step; decoding is synchronous
//! and available separately through [`from_bytes`].

mod epub;
pub mod error;
mod kind;
mod pdf;

use crate::error::{ErrorKind, Result};
pub use crate::epub::ArchiveFilter;
pub use crate::kind::DocumentKind;
use lectern_extract::{MarkupDocument, Source};
use std::path::Path;
use tracing::instrument;

/// Identity of the raw input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    /// BLAKE3 hash of the file content, hex-encoded.
    pub hash: String,
    pub length: u64,
}
impl Fingerprint {
    pub fn of(bytes: &[u8]) -> Self {
        Self {
            hash: blake3::hash(bytes).to_string(),
            length: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
        }
    }
}

/// A decoded input document, ready for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    /// File name, without directories.
    pub name: String,
    pub kind: DocumentKind,
    pub fingerprint: Fingerprint,
    pub source: Source,
}

/// Reads and decodes the file at `path`.
///
/// # Errors
///
/// Unsupported file types are rejected before anything is read
/// ([`ErrorKind::UnsupportedInput`]); everything else that goes wrong is a
/// read error for this file.
#[instrument(skip_all, fields(path = %path.as_ref().display(), kind, size))]
pub async fn load(path: impl AsRef<Path>, filter: &ArchiveFilter) -> Result<Loaded> {
    let path = path.as_ref();
    let kind = DocumentKind::from_path(path)?;
    let span = tracing::Span::current();
    span.record("kind", tracing::field::display(kind));

    let bytes = tokio::fs::read(path).await.map_err(|err| ErrorKind::from_io(err, path))?;
    span.record("size", bytes.len());
    let name = path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let loaded = from_bytes(name, kind, &bytes, filter)?;
    tracing::info!(source = %loaded.source, "document loaded");
    Ok(loaded)
}

/// Decodes an in-memory document of a known kind.
pub fn from_bytes(name: impl Into<String>, kind: DocumentKind, bytes: &[u8], filter: &ArchiveFilter) -> Result<Loaded> {
    let name = name.into();
    kind.check_magic_bytes(bytes)?;
    let source = match kind {
        DocumentKind::Epub => Source::Markup(epub::read(bytes, filter)?),
        DocumentKind::Pdf => Source::Text(pdf::read(bytes)?),
        DocumentKind::Markup => Source::Markup(vec![MarkupDocument::new(name.clone(), lossy(&name, bytes))]),
        DocumentKind::Text => Source::Text(lossy(&name, bytes)),
    };
    Ok(Loaded {
        name,
        kind,
        fingerprint: Fingerprint::of(bytes),
        source,
    })
}

fn lossy(name: &str, bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::warn!(name, "document is not valid UTF-8, invalid sequences replaced");
            String::from_utf8_lossy(bytes).into_owned()
        },
    }
}
