use std::fmt::{Display, Formatter, Result as FmtResult};

/// A single extracted verse: the only entity this crate produces.
///
/// Constructed through [`Verse::new`], which refuses records that would break
/// the output invariants (empty book, chapter or verse zero, blank text).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Verse {
    /// Book name as it should be displayed (e.g. `"1. Mose"`, `"Judas"`)
    pub book: String,
    /// Chapter number, starting at 1
    pub chapter: u32,
    /// Verse number, starting at 1
    pub verse: u32,
    /// Verse text, trimmed
    pub text: String,
}
impl Verse {
    /// Returns `None` unless the book is non-empty, both numbers are positive
    /// and the text is non-blank. The book and text are trimmed.
    pub fn new(book: impl AsRef<str>, chapter: u32, verse: u32, text: impl AsRef<str>) -> Option<Self> {
        let book = book.as_ref().trim();
        let text = text.as_ref().trim();
        if book.is_empty() || chapter == 0 || verse == 0 || text.is_empty() {
            return None;
        }
        Some(Self {
            book: book.to_string(),
            chapter,
            verse,
            text: text.to_string(),
        })
    }

    /// The `(book, chapter, verse)` triple.
    pub fn reference(&self) -> (&str, u32, u32) {
        (&self.book, self.chapter, self.verse)
    }
}
impl Display for Verse {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}:{} {}", self.book, self.chapter, self.verse, self.text)
    }
}
