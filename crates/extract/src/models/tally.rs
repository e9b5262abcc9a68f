use derive_more::Display;
use std::ops::AddAssign;

/// Why an item was dropped during extraction.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Skip {
    /// The document name is on the exclusion list.
    #[display("excluded document")]
    ExcludedDocument,
    /// A chapter anchor was found but its text is not a number.
    #[display("unparsable chapter number")]
    UnparsableChapter,
    /// A verse number is present but not a number (or doesn't fit).
    #[display("unparsable verse number")]
    UnparsableVerse,
    /// A verse container without a verse-number element.
    #[display("missing verse number")]
    MissingNumber,
    /// A verse whose text is empty after trimming.
    #[display("empty verse text")]
    EmptyText,
    /// A verse seen before any book or chapter was known.
    #[display("verse outside of a book or chapter")]
    Orphaned,
}

/// Counts of everything extraction skipped over.
///
/// Skips are recoverable by definition; they never abort a pass, but they are
/// the first place to look when a document yields fewer verses than expected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub excluded_documents: usize,
    pub unparsable_chapters: usize,
    pub unparsable_verses: usize,
    pub missing_numbers: usize,
    pub empty_texts: usize,
    pub orphaned: usize,
}
impl Tally {
    pub fn record(&mut self, skip: Skip) {
        tracing::debug!(reason = %skip, "skipped during extraction");
        let counter = match skip {
            Skip::ExcludedDocument => &mut self.excluded_documents,
            Skip::UnparsableChapter => &mut self.unparsable_chapters,
            Skip::UnparsableVerse => &mut self.unparsable_verses,
            Skip::MissingNumber => &mut self.missing_numbers,
            Skip::EmptyText => &mut self.empty_texts,
            Skip::Orphaned => &mut self.orphaned,
        };
        *counter += 1;
    }

    /// Number of skipped anchors and verses. Excluded documents are expected,
    /// so they don't count.
    pub fn skipped(&self) -> usize {
        self.unparsable_chapters + self.unparsable_verses + self.missing_numbers + self.empty_texts + self.orphaned
    }
}
impl AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        self.excluded_documents += other.excluded_documents;
        self.unparsable_chapters += other.unparsable_chapters;
        self.unparsable_verses += other.unparsable_verses;
        self.missing_numbers += other.missing_numbers;
        self.empty_texts += other.empty_texts;
        self.orphaned += other.orphaned;
    }
}
