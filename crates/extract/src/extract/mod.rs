//! Extraction strategies and the engine that picks between them.

mod selectors;
mod structural;

pub use self::selectors::{SelectorSet, Selectors};
pub use self::structural::{Position, Structural};
use crate::aggregate::{Aggregator, Extracted};
use crate::error::Result;
use crate::lexical::{Lexical, LexicalOptions};
use crate::models::Source;
use tracing::instrument;

/// A verse extraction strategy over some kind of input.
///
/// Implementations push one sequence per unit of input (document, book) into
/// the aggregator, and record everything they skip in its tally.
pub trait Extractor {
    type Input: ?Sized;

    fn extract(&self, input: &Self::Input, aggregator: &mut Aggregator);
}

/// Runs the strategy matching the [`Source`] kind: structural for markup,
/// lexical for flattened text.
#[derive(Debug, Clone)]
pub struct Engine {
    structural: Structural,
    lexical: Lexical,
}
impl Engine {
    pub fn new(structural: Structural, lexical: Lexical) -> Self {
        Self { structural, lexical }
    }

    /// An engine with the built-in selectors, exclusions and book headings.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(Structural::default(), Lexical::new(&LexicalOptions::default())?))
    }

    /// Extracts every verse from the source.
    ///
    /// # Errors
    ///
    /// Returns [`NoVersesFound`](crate::error::ErrorKind::NoVersesFound) if
    /// the pass completes without a single verse.
    #[instrument(skip_all, fields(kind = %source, size = source.size(), verses, skipped))]
    pub fn run(&self, source: &Source) -> Result<Extracted> {
        let mut aggregator = Aggregator::new();
        match source {
            Source::Markup(documents) => self.structural.extract(documents, &mut aggregator),
            Source::Text(text) => self.lexical.extract(text, &mut aggregator),
        }
        let extracted = aggregator.finish()?;
        let span = tracing::Span::current();
        span.record("verses", extracted.verses.len());
        span.record("skipped", extracted.tally.skipped());
        Ok(extracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::MarkupDocument;

    #[test]
    fn markup_goes_through_the_structural_strategy() {
        let html = r#"<header><h1>Judas</h1></header>
            <p id="v1"><a class="verse-number">1</a><span class="verse-text">Judas, ein Knecht</span></p>"#;
        let engine = Engine::with_defaults().unwrap();
        let extracted = engine.run(&Source::Markup(vec![MarkupDocument::new("bi12_65.xhtml", html)])).unwrap();
        assert_eq!(extracted.verses[0].reference(), ("Judas", 1, 1));
    }

    #[test]
    fn text_goes_through_the_lexical_strategy() {
        let text = "BRIEF DES JUDAS 1 Judas, ein Knecht Jesu Christi 2 Gott gebe euch viel Barmherzigkeit";
        let engine = Engine::with_defaults().unwrap();
        let extracted = engine.run(&Source::Text(text.to_string())).unwrap();
        let references: Vec<_> = extracted.verses.iter().map(|v| v.reference()).collect();
        assert_eq!(references, [("Judas", 1, 1), ("Judas", 1, 2)]);
    }

    #[test]
    fn nothing_found_is_reported() {
        let engine = Engine::with_defaults().unwrap();
        let err = engine.run(&Source::Markup(vec![MarkupDocument::new("a.xhtml", "<p>Vorwort</p>")])).unwrap_err();
        assert_eq!(*err, ErrorKind::NoVersesFound);
        let err = engine.run(&Source::Text(String::new())).unwrap_err();
        assert_eq!(*err, ErrorKind::NoVersesFound);
    }
}
