//! Book headings: finding them in the text stream and turning their decorated
//! forms into short book names.

use crate::consts;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use regex::{Captures, Regex, escape as regex_escape};
use std::sync::LazyLock;

type Rewrite = fn(&Captures<'_>) -> String;

static SUBSTITUTIONS: [(&LazyLock<Regex>, Rewrite); 7] = [
    (&consts::ORDINAL_BOOK_REGEX, ordinal_name),
    (&consts::ORDINAL_LETTER_REGEX, ordinal_name),
    (&consts::LETTER_REGEX, name),
    (&consts::GOSPEL_REGEX, name),
    (&consts::PROPHET_REGEX, name),
    (&consts::NAMED_BOOK_REGEX, name),
    (&consts::ARTICLE_REGEX, name),
];

fn ordinal_name(captures: &Captures<'_>) -> String {
    let ordinal = match &captures[1] {
        "ERSTE" | "ERSTER" => "1",
        "ZWEITE" | "ZWEITER" => "2",
        "DRITTE" | "DRITTER" => "3",
        "VIERTE" => "4",
        "FÜNFTE" => "5",
        other => other,
    };
    format!("{ordinal}. {}", &captures[2])
}

fn name(captures: &Captures<'_>) -> String {
    captures[1].to_string()
}

/// Canonical book name for a heading as typeset in the source: the first
/// matching substitution shortens it, then it is title-cased.
///
/// ```rust
/// use lectern_extract::normalize_heading;
///
/// assert_eq!(normalize_heading("DAS ERSTE BUCH MOSE"), "1. Mose");
/// assert_eq!(normalize_heading("ERSTER BRIEF AN DIE KORINTHER"), "1. Korinther");
/// assert_eq!(normalize_heading("1. MOSE"), "1. Mose");
/// ```
pub fn normalize_heading(heading: &str) -> String {
    let heading = heading.trim();
    let short = SUBSTITUTIONS
        .iter()
        .find_map(|(pattern, rewrite)| pattern.captures(heading).map(|captures| rewrite(&captures)))
        .unwrap_or_else(|| heading.to_string());
    title_case(&short)
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// The headings followed by their short uppercase forms (`DAS ERSTE BUCH
/// MOSE` also gives `1. MOSE`, `DER PROPHET JONA` gives `JONA`).
pub(crate) fn with_short_forms<S: AsRef<str>>(headings: &[S]) -> Vec<String> {
    let headings: Vec<&str> = headings.iter().map(AsRef::as_ref).filter(|h| !h.trim().is_empty()).collect();
    let short = headings.iter().map(|heading| normalize_heading(heading).to_uppercase());
    headings.iter().map(ToString::to_string).chain(short).collect()
}

/// Longest first, so that a name which is a prefix of another can't cut it
/// short in an alternation.
pub(crate) fn longest_first<S: AsRef<str>>(names: &[S]) -> Vec<&str> {
    let mut names: Vec<&str> = names.iter().map(AsRef::as_ref).filter(|n| !n.trim().is_empty()).collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    names.dedup();
    names
}

/// Compiles the heading list into one alternation. A heading only matches as
/// whole words.
pub(crate) fn heading_pattern<S: AsRef<str>>(headings: &[S]) -> Result<Option<Regex>> {
    let headings = longest_first(headings);
    if headings.is_empty() {
        return Ok(None);
    }
    let alternation = headings.iter().map(|heading| bounded(heading)).collect::<Vec<_>>().join("|");
    Regex::new(&format!("(?:{alternation})")).map(Some).or_raise(|| ErrorKind::InvalidHeadings)
}

fn bounded(heading: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut pattern = regex_escape(heading);
    if heading.starts_with(is_word) {
        pattern.insert_str(0, r"\b");
    }
    if heading.ends_with(is_word) {
        pattern.push_str(r"\b");
    }
    pattern
}

/// Splits the stream into `(heading, body)` pairs. Anything before the first
/// heading (title pages, prefaces) is dropped.
pub(crate) fn segments<'t>(pattern: &Regex, text: &'t str) -> Vec<(&'t str, &'t str)> {
    let matches: Vec<_> = pattern.find_iter(text).collect();
    matches
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            let end = matches.get(i + 1).map_or(text.len(), |next| next.start());
            (heading.as_str(), &text[heading.end()..end])
        })
        .collect()
}
