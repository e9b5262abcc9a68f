mod aggregate;
mod consts;
pub mod error;
mod extract;
mod lexical;
pub mod models;
mod outline;

use tracing::instrument;

pub use crate::aggregate::{Aggregator, Extracted, Verses};
pub use crate::consts::{
    DEFAULT_BOOK_HEADINGS, DEFAULT_CHAPTER_LABEL, DEFAULT_CHAPTER_SELECTOR, DEFAULT_EXCLUDED_DOCUMENTS,
    DEFAULT_NUMBER_SELECTOR, DEFAULT_TEXT_SELECTOR, DEFAULT_TITLE_SELECTOR, DEFAULT_VERSE_SELECTOR,
};
use crate::error::Result;
pub use crate::extract::{Engine, Extractor, Position, SelectorSet, Selectors, Structural};
pub use crate::lexical::{Lexical, LexicalMode, LexicalOptions, normalize_heading};
pub use crate::models::{MarkupDocument, Skip, Source, Tally, Verse};
pub use crate::outline::{BookNode, Outline};

/// Easy, top-level entrypoint for extracting verses from XHTML documents with
/// the built-in selectors and exclusions.
///
/// Documents are processed in the order given; book and chapter carry over
/// from one document to the next.
///
/// ```rust
/// use lectern_extract::{MarkupDocument, extract_markup};
///
/// let html = r#"<header><h1>Judas</h1></header>
///     <p id="v1"><a class="verse-number">1</a><span class="verse-text">Judas, ein Knecht</span></p>
///     <p id="v2"><a class="verse-number">2</a><span class="verse-text">Gott gebe euch</span></p>"#;
/// let extracted = extract_markup(vec![MarkupDocument::new("bi12_65.xhtml", html)]).unwrap();
/// assert_eq!(extracted.verses.len(), 2);
/// assert_eq!(extracted.verses[1].reference(), ("Judas", 1, 2));
/// ```
#[instrument(skip_all, fields(documents = documents.len()))]
pub fn extract_markup(documents: Vec<MarkupDocument>) -> Result<Extracted> {
    Engine::with_defaults()?.run(&Source::Markup(documents))
}

/// Easy, top-level entrypoint for extracting verses from a flattened text
/// stream with the built-in book headings.
///
/// ```rust
/// use lectern_extract::extract_text;
///
/// let extracted = extract_text("DER PROPHET JONA 1 Es geschah 2 Mache dich auf").unwrap();
/// assert_eq!(extracted.verses[0].reference(), ("Jona", 1, 1));
/// assert_eq!(extracted.verses[1].text, "Mache dich auf");
/// ```
#[instrument(skip_all, fields(size = text.len()))]
pub fn extract_text(text: &str) -> Result<Extracted> {
    Engine::with_defaults()?.run(&Source::Text(text.to_string()))
}
