//! Book → chapter → verse grouping for display.

use crate::consts::DEFAULT_CHAPTER_LABEL;
use crate::models::Verse;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Display, Write};

/// Verses of one book, by chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookNode<'a> {
    pub name: &'a str,
    /// Chapters ascending; verses within a chapter ascending by number, with
    /// duplicates kept in extraction order.
    pub chapters: BTreeMap<u32, Vec<&'a Verse>>,
}
impl BookNode<'_> {
    pub fn verse_count(&self) -> usize {
        self.chapters.values().map(Vec::len).sum()
    }
}

/// A borrowed, display-ready view over extracted verses.
///
/// Books are listed in the order they were first seen unless
/// [`sorted`](Self::sorted) is called.
///
/// ```rust
/// use lectern_extract::{Outline, Verse};
///
/// let verses = [
///     Verse::new("Jona", 2, 1, "Und Jona betete").unwrap(),
///     Verse::new("Jona", 1, 2, "Mache dich auf").unwrap(),
///     Verse::new("Jona", 1, 1, "Es geschah").unwrap(),
/// ];
/// let rendered = Outline::new(&verses).render("Kapitel");
/// assert_eq!(
///     rendered,
///     "Jona\n  Kapitel 1\n    **1** Es geschah\n    **2** Mache dich auf\n  Kapitel 2\n    **1** Und Jona betete\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline<'a> {
    books: Vec<BookNode<'a>>,
}
impl<'a> Outline<'a> {
    pub fn new(verses: &'a [Verse]) -> Self {
        let mut books: Vec<BookNode<'a>> = Vec::new();
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        for verse in verses {
            let position = *index.entry(verse.book.as_str()).or_insert_with(|| {
                books.push(BookNode {
                    name: verse.book.as_str(),
                    chapters: BTreeMap::new(),
                });
                books.len() - 1
            });
            books[position].chapters.entry(verse.chapter).or_default().push(verse);
        }
        for book in &mut books {
            for chapter in book.chapters.values_mut() {
                chapter.sort_by_key(|verse| verse.verse);
            }
        }
        Self { books }
    }

    /// Orders books by name instead of by first appearance.
    pub fn sorted(mut self) -> Self {
        self.books.sort_by(|a, b| a.name.cmp(b.name));
        self
    }

    pub fn books(&self) -> &[BookNode<'a>] {
        &self.books
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Renders the tree as indented text, one line per node, each verse as
    /// `**<verse>** <text>`.
    pub fn render(&self, chapter_label: &str) -> String {
        let mut out = String::new();
        // Writing into a String can't fail.
        let _ = self.write_to(&mut out, chapter_label);
        out
    }

    fn write_to(&self, out: &mut impl Write, chapter_label: &str) -> fmt::Result {
        for book in &self.books {
            writeln!(out, "{}", book.name)?;
            for (chapter, verses) in &book.chapters {
                writeln!(out, "  {chapter_label} {chapter}")?;
                for verse in verses {
                    writeln!(out, "    **{}** {}", verse.verse, verse.text)?;
                }
            }
        }
        Ok(())
    }
}
impl Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, DEFAULT_CHAPTER_LABEL)
    }
}
