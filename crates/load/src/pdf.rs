use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use lopdf::Document;
use tracing::instrument;

/// Flattens the text layer of a PDF into one stream: each page's fragments
/// joined with single spaces, pages joined in page order.
///
/// A page whose text can't be extracted is skipped with a warning; the rest
/// of the document is still usable.
#[instrument(skip_all, fields(size = bytes.len(), pages))]
pub(crate) fn read(bytes: &[u8]) -> Result<String> {
    let document = Document::load_mem(bytes).or_raise(|| ErrorKind::Pdf)?;
    let pages = document.get_pages();
    tracing::Span::current().record("pages", pages.len());

    let mut stream: Vec<String> = Vec::with_capacity(pages.len());
    for number in pages.keys().copied() {
        match document.extract_text(&[number]) {
            Ok(text) => stream.push(fragments(&text)),
            Err(err) => tracing::warn!(page = number, error = %err, "could not extract page text, skipping"),
        }
    }
    Ok(stream.into_iter().filter(|page| !page.is_empty()).collect::<Vec<_>>().join(" "))
}

/// Joins one page's text fragments (one per line of extracted text) with
/// single spaces, in source order.
fn fragments(page: &str) -> String {
    page.lines().map(str::trim).filter(|fragment| !fragment.is_empty()).collect::<Vec<_>>().join(" ")
}
