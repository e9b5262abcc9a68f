//! Verse aggregation and the extracted verse sequence.

use crate::error::{ErrorKind, Result};
use crate::models::{Tally, Verse};
use crate::outline::Outline;
#[cfg(feature = "serde")]
use exn::ResultExt;
use std::ops::Deref;

/// Collects per-document (or per-book) verse sequences into one.
///
/// Sequences are concatenated in the order they are pushed; extractors already
/// emit in reading order, so nothing is sorted, deduplicated or validated here.
#[derive(Debug, Default)]
pub struct Aggregator {
    verses: Vec<Verse>,
    segments: usize,
    tally: Tally,
}
impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl IntoIterator<Item = Verse>) {
        self.verses.extend(segment);
        self.segments += 1;
    }

    /// Skip counters shared by every extractor feeding this aggregator.
    pub fn tally_mut(&mut self) -> &mut Tally {
        &mut self.tally
    }

    /// Number of sequences pushed so far, including empty ones.
    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn into_parts(self) -> (Vec<Verse>, Tally) {
        (self.verses, self.tally)
    }

    /// Finishes aggregation. Producing no verses at all is an error: the
    /// document was read fine, but its structure doesn't match expectations.
    pub fn finish(self) -> Result<Extracted> {
        if self.verses.is_empty() {
            tracing::warn!(segments = self.segments, skipped = self.tally.skipped(), "extraction produced no verses");
            exn::bail!(ErrorKind::NoVersesFound);
        }
        Ok(Extracted {
            verses: Verses(self.verses),
            tally: self.tally,
        })
    }
}

/// Output of a successful extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub verses: Verses,
    pub tally: Tally,
}

/// Verses in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct Verses(Vec<Verse>);
impl Verses {
    pub fn new(verses: Vec<Verse>) -> Self {
        Self(verses)
    }

    /// Groups the verses by book and chapter for display.
    pub fn outline(&self) -> Outline<'_> {
        Outline::new(&self.0)
    }

    /// Serializes the verses verbatim as a JSON array, pretty-printed with
    /// two-space indentation.
    ///
    /// ```rust
    /// use lectern_extract::{Verse, Verses};
    ///
    /// let verses = Verses::new(vec![Verse::new("Judas", 1, 1, "Judas, ein Knecht").unwrap()]);
    /// let json = verses.to_json().unwrap();
    /// assert!(json.starts_with("[\n  {\n    \"book\": \"Judas\","));
    /// assert_eq!(Verses::from_json(&json).unwrap(), verses);
    /// ```
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.0).or_raise(|| ErrorKind::Serialization)
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).or_raise(|| ErrorKind::Serialization)
    }
}
impl Deref for Verses {
    type Target = [Verse];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl From<Vec<Verse>> for Verses {
    fn from(verses: Vec<Verse>) -> Self {
        Self(verses)
    }
}
impl IntoIterator for Verses {
    type Item = Verse;
    type IntoIter = std::vec::IntoIter<Verse>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
impl<'a> IntoIterator for &'a Verses {
    type Item = &'a Verse;
    type IntoIter = std::slice::Iter<'a, Verse>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
