//! Structural extraction: verses located by CSS queries in markup documents.

use super::{Extractor, Selectors};
use crate::aggregate::Aggregator;
use crate::consts;
use crate::models::{MarkupDocument, Skip, Tally, Verse, leading_integer};
use scraper::{ElementRef, Html};
use tracing::instrument;

/// Where the traversal currently is. Threaded from one document to the next,
/// because a book title or chapter anchor stays in effect until the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Position {
    pub book: String,
    pub chapter: u32,
}
impl Position {
    fn is_placed(&self) -> bool {
        !self.book.is_empty() && self.chapter > 0
    }
}

#[derive(Debug, Clone)]
pub struct Structural {
    selectors: Selectors,
    excluded: Vec<String>,
}
impl Default for Structural {
    fn default() -> Self {
        Self::new(Selectors::default(), consts::DEFAULT_EXCLUDED_DOCUMENTS)
    }
}
impl Structural {
    pub fn new<S: Into<String>>(selectors: Selectors, excluded: impl IntoIterator<Item = S>) -> Self {
        Self {
            selectors,
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if the document name contains any of the exclusion
    /// markers (case-sensitive).
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.iter().any(|marker| !marker.is_empty() && name.contains(marker.as_str()))
    }

    /// Processes one document: updates the position from its anchors, then
    /// collects its verses.
    #[instrument(level = "debug", skip_all, fields(document = %document.name, verses))]
    pub fn step(&self, position: Position, document: &MarkupDocument, tally: &mut Tally) -> (Position, Vec<Verse>) {
        if self.is_excluded(&document.name) {
            tally.record(Skip::ExcludedDocument);
            return (position, Vec::new());
        }
        let html = Html::parse_document(&document.content);
        let position = self.locate(position, &html, tally);
        let verses: Vec<Verse> = html
            .select(&self.selectors.verse)
            .filter_map(|container| self.verse(&position, container, tally))
            .collect();
        tracing::Span::current().record("verses", verses.len());
        (position, verses)
    }

    fn locate(&self, mut position: Position, html: &Html, tally: &mut Tally) -> Position {
        if let Some(title) = html.select(&self.selectors.title).next() {
            position.book = text_of(title).trim().to_string();
            position.chapter = 0;
        }
        if let Some(anchor) = html.select(&self.selectors.chapter).next() {
            match leading_integer(&text_of(anchor)) {
                Some(chapter) => position.chapter = chapter,
                None => tally.record(Skip::UnparsableChapter),
            }
        }
        // Single-chapter books (Obadja, Judas, ...) carry no chapter anchor.
        if !position.book.is_empty() && position.chapter == 0 {
            position.chapter = 1;
        }
        position
    }

    fn verse(&self, position: &Position, container: ElementRef<'_>, tally: &mut Tally) -> Option<Verse> {
        let Some(number) = container.select(&self.selectors.number).next() else {
            tally.record(Skip::MissingNumber);
            return None;
        };
        let text: String = container.select(&self.selectors.text).flat_map(|span| span.text()).collect();
        let text = text.trim();
        if text.is_empty() {
            tally.record(Skip::EmptyText);
            return None;
        }
        let Some(number) = leading_integer(&text_of(number)) else {
            tally.record(Skip::UnparsableVerse);
            return None;
        };
        if !position.is_placed() {
            tally.record(Skip::Orphaned);
            return None;
        }
        let verse = Verse::new(&position.book, position.chapter, number, text);
        if verse.is_none() {
            // Only a verse number of zero gets this far.
            tally.record(Skip::UnparsableVerse);
        }
        verse
    }
}
impl Extractor for Structural {
    type Input = [MarkupDocument];

    fn extract(&self, documents: &[MarkupDocument], aggregator: &mut Aggregator) {
        let mut position = Position::default();
        for document in documents {
            let (next, verses) = self.step(position, document, aggregator.tally_mut());
            position = next;
            aggregator.push(verses);
        }
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::SelectorSet;
    use rstest::rstest;

    fn chapter_document(book: Option<&str>, chapter: Option<&str>, verses: &[(&str, &str)]) -> String {
        let mut html = String::from("<html><body>");
        if let Some(book) = book {
            html.push_str(&format!("<header><h1>{book}</h1></header>"));
        }
        if let Some(chapter) = chapter {
            html.push_str(&format!("<h2><a id=\"chapter\">{chapter}</a></h2>"));
        }
        for (number, text) in verses {
            html.push_str(&format!(
                "<p id=\"v{number}\"><a class=\"verse-number\">{number}</a><span class=\"verse-text\">{text}</span></p>"
            ));
        }
        html.push_str("</body></html>");
        html
    }

    fn run(documents: &[MarkupDocument]) -> (Vec<Verse>, Tally) {
        let mut aggregator = Aggregator::new();
        Structural::default().extract(documents, &mut aggregator);
        aggregator.into_parts()
    }

    #[test]
    fn single_chapter_book_defaults_to_chapter_one() {
        let documents = [MarkupDocument::new(
            "OEBPS/bi12_65.xhtml",
            chapter_document(
                Some("Judas"),
                None,
                &[
                    ("1", "Judas, ein Knecht Jesu Christi"),
                    ("2", "Gott gebe euch viel Barmherzigkeit"),
                    ("3", "Ihr Lieben, nachdem ich willens war"),
                ],
            ),
        )];
        let (verses, _) = run(&documents);
        assert_eq!(verses.len(), 3);
        assert!(verses.iter().all(|v| v.book == "Judas" && v.chapter == 1));
        assert_eq!(verses.iter().map(|v| v.verse).collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn book_and_chapter_carry_over_between_documents() {
        let documents = [
            MarkupDocument::new("bi12_1.xhtml", chapter_document(Some("1. Mose"), Some("1"), &[("1", "Im Anfang")])),
            MarkupDocument::new("bi12_2.xhtml", chapter_document(None, Some("2"), &[("1", "So wurden vollendet")])),
            MarkupDocument::new("bi12_3.xhtml", chapter_document(None, None, &[("2", "Und so vollendete Gott")])),
        ];
        let (verses, _) = run(&documents);
        let references: Vec<_> = verses.iter().map(Verse::reference).collect();
        assert_eq!(references, [("1. Mose", 1, 1), ("1. Mose", 2, 1), ("1. Mose", 2, 2)]);
    }

    #[test]
    fn new_book_title_resets_the_chapter() {
        let documents = [
            MarkupDocument::new("a.xhtml", chapter_document(Some("Obadja"), None, &[("21", "Und es werden Retter")])),
            MarkupDocument::new("b.xhtml", chapter_document(Some("Jona"), Some("4"), &[("11", "Und mich sollte")])),
            MarkupDocument::new("c.xhtml", chapter_document(Some("Micha"), None, &[("1", "Dies ist das Wort")])),
        ];
        let (verses, _) = run(&documents);
        let references: Vec<_> = verses.iter().map(Verse::reference).collect();
        assert_eq!(references, [("Obadja", 1, 21), ("Jona", 4, 11), ("Micha", 1, 1)]);
    }

    #[test]
    fn unparsable_chapter_anchor_keeps_previous_chapter() {
        let documents = [
            MarkupDocument::new("a.xhtml", chapter_document(Some("Jona"), Some("3"), &[("1", "Und es geschah")])),
            MarkupDocument::new("b.xhtml", chapter_document(None, Some("IV"), &[("1", "Das aber verdross Jona")])),
        ];
        let (verses, tally) = run(&documents);
        assert_eq!(verses[1].reference(), ("Jona", 3, 1));
        assert_eq!(tally.unparsable_chapters, 1);
    }

    #[test]
    fn verse_with_empty_text_is_dropped() {
        let documents = [MarkupDocument::new(
            "a.xhtml",
            chapter_document(Some("Judas"), None, &[("1", "Judas, ein Knecht"), ("2", "   "), ("3", "Ihr Lieben")]),
        )];
        let (verses, tally) = run(&documents);
        assert_eq!(verses.iter().map(|v| v.verse).collect::<Vec<_>>(), [1, 3]);
        assert_eq!(tally.empty_texts, 1);
    }

    #[test]
    fn text_fragments_are_concatenated_in_order() {
        let html = r#"<header><h1> Römer </h1></header><a id="chapter">8</a>
            <p id="v28"><a class="verse-number">28</a>
                <span class="verse-text">Wir wissen aber, </span><em>dass</em>
                <span class="verse-text">denen, die Gott lieben,</span>
                <span class="verse-text">
                    alle Dinge zum Besten dienen</span>
            </p>"#;
        let (verses, _) = run(&[MarkupDocument::new("roemer.xhtml", html)]);
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].book, "Römer");
        // Only the ends are trimmed; whitespace inside the text is kept as written.
        assert_eq!(
            verses[0].text,
            "Wir wissen aber, denen, die Gott lieben,\n                    alle Dinge zum Besten dienen"
        );
    }

    #[rstest]
    #[case("OEBPS/toc.xhtml", true)]
    #[case("OEBPS/Title.xhtml", true)]
    #[case("OEBPS/Foreword.xhtml", true)]
    #[case("OEBPS/title.xhtml", false)]
    #[case("OEBPS/bi12_1.xhtml", false)]
    fn test_is_excluded(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(Structural::default().is_excluded(name), expected);
    }

    #[test]
    fn excluded_documents_contribute_nothing() {
        let verses = chapter_document(Some("Judas"), None, &[("1", "Judas, ein Knecht")]);
        let documents = [MarkupDocument::new("OEBPS/toc.xhtml", verses.clone())];
        let (found, tally) = run(&documents);
        assert!(found.is_empty());
        assert_eq!(tally.excluded_documents, 1);
    }

    #[test]
    fn verses_before_any_book_are_orphaned() {
        let documents = [MarkupDocument::new("a.xhtml", chapter_document(None, None, &[("1", "Lost")]))];
        let (verses, tally) = run(&documents);
        assert!(verses.is_empty());
        assert_eq!(tally.orphaned, 1);
    }

    #[test]
    fn missing_and_unparsable_verse_numbers_are_counted() {
        let html = r#"<header><h1>Judas</h1></header>
            <p id="v1"><span class="verse-text">no number</span></p>
            <p id="v2"><a class="verse-number">zwei</a><span class="verse-text">bad number</span></p>
            <p id="v3"><a class="verse-number">3</a><span class="verse-text">fine</span></p>"#;
        let (verses, tally) = run(&[MarkupDocument::new("a.xhtml", html)]);
        assert_eq!(verses.len(), 1);
        assert_eq!(tally.missing_numbers, 1);
        assert_eq!(tally.unparsable_verses, 1);
    }

    #[test]
    fn custom_selectors() {
        let set = SelectorSet {
            title: "div.book".into(),
            chapter: "span[data-chapter]".into(),
            verse: "div.v".into(),
            number: "sup".into(),
            text: "span.t".into(),
        };
        let structural = Structural::new(Selectors::compile(&set).unwrap(), Vec::<String>::new());
        let html = r#"<div class="book">Ruth</div><span data-chapter>2</span>
            <div class="v"><sup>1</sup><span class="t">Es war aber ein Mann</span></div>"#;
        let mut aggregator = Aggregator::new();
        structural.extract(&[MarkupDocument::new("toc.xhtml", html)], &mut aggregator);
        let (verses, _) = aggregator.into_parts();
        assert_eq!(verses[0].reference(), ("Ruth", 2, 1));
    }

    #[test]
    fn extraction_is_idempotent() {
        let documents = [
            MarkupDocument::new("a.xhtml", chapter_document(Some("Jona"), Some("1"), &[("1", "Es geschah"), ("2", "Mache dich auf")])),
            MarkupDocument::new("b.xhtml", chapter_document(None, Some("2"), &[("1", "Und Jona betete")])),
        ];
        assert_eq!(run(&documents), run(&documents));
    }
}
