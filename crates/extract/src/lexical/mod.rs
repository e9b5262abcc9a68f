//! Verse extraction from a flattened text stream, with no markup to go by.

mod books;
mod clean;
mod cursor;
mod inline;

pub use self::books::normalize_heading;
use crate::aggregate::Aggregator;
use crate::consts;
use crate::error::{Error, ErrorKind, Result};
use crate::extract::Extractor;
use derive_more::Display;
use exn::ResultExt;
use regex::Regex;
use std::str::FromStr;
use tracing::instrument;

/// How the text stream encodes verse boundaries.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum LexicalMode {
    /// Inline references when they carry most of the numbers in the text,
    /// book headings otherwise.
    #[default]
    #[display("auto")]
    Auto,
    /// Explicit `<book> <chapter>:<verse>` references.
    #[display("inline")]
    Inline,
    /// Book headings followed by bare chapter and verse numbers.
    #[display("headings")]
    Headings,
}
impl FromStr for LexicalMode {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "inline" => Ok(Self::Inline),
            "headings" => Ok(Self::Headings),
            _ => Err(Error::from(ErrorKind::UnknownMode(s.to_string()))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct LexicalOptions {
    pub mode: LexicalMode,
    /// Book headings exactly as typeset in the source (case and spacing
    /// matter). Their short uppercase forms are recognised as well, and their
    /// short names are the books inline references may name.
    pub headings: Vec<String>,
    /// Whole words removed from the stream before segmentation, such as
    /// footnote markers.
    pub boilerplate: Vec<String>,
}
impl Default for LexicalOptions {
    fn default() -> Self {
        Self {
            mode: LexicalMode::default(),
            headings: consts::DEFAULT_BOOK_HEADINGS.iter().map(ToString::to_string).collect(),
            boilerplate: Vec::new(),
        }
    }
}

/// The lexical strategy, with its heading, reference and boilerplate patterns
/// compiled.
#[derive(Debug, Clone)]
pub struct Lexical {
    mode: LexicalMode,
    headings: Option<Regex>,
    references: Option<Regex>,
    boilerplate: Option<Regex>,
}
impl Lexical {
    pub fn new(options: &LexicalOptions) -> Result<Self> {
        Ok(Self {
            mode: options.mode,
            headings: books::heading_pattern(&books::with_short_forms(&options.headings))?,
            references: inline::reference_pattern(&options.headings)?,
            boilerplate: boilerplate_pattern(&options.boilerplate)?,
        })
    }
}

fn boilerplate_pattern(tokens: &[String]) -> Result<Option<Regex>> {
    let tokens: Vec<String> = tokens.iter().filter(|t| !t.trim().is_empty()).map(|t| regex::escape(t.trim())).collect();
    if tokens.is_empty() {
        return Ok(None);
    }
    Regex::new(&format!(r"\b(?:{})\b", tokens.join("|"))).map(Some).or_raise(|| ErrorKind::InvalidBoilerplate)
}

impl Extractor for Lexical {
    type Input = str;

    #[instrument(skip_all, fields(size = text.len(), mode))]
    fn extract(&self, text: &str, aggregator: &mut Aggregator) {
        let cleaned = clean::clean(text, self.boilerplate.as_ref());
        let mode = match (self.mode, &self.references) {
            (LexicalMode::Auto, Some(references)) if inline::detect(references, &cleaned) => LexicalMode::Inline,
            (LexicalMode::Auto, _) => LexicalMode::Headings,
            (mode, _) => mode,
        };
        tracing::Span::current().record("mode", tracing::field::display(mode));

        if mode == LexicalMode::Inline {
            let Some(references) = &self.references else {
                tracing::warn!("no book headings configured, no inline reference can be matched");
                return;
            };
            let verses = inline::references(references, &cleaned, aggregator.tally_mut());
            aggregator.push(verses);
            return;
        }
        let Some(pattern) = &self.headings else {
            tracing::warn!("no book headings configured, nothing can be segmented");
            return;
        };
        for (heading, body) in books::segments(pattern, &cleaned) {
            let book = normalize_heading(heading);
            tracing::debug!(heading, book = %book, "book heading");
            let verses = cursor::walk(&book, body, aggregator.tally_mut());
            aggregator.push(verses);
        }
    }
}
