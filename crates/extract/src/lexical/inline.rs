use super::books::{longest_first, normalize_heading};
use crate::consts::DIGITS_REGEX;
use crate::error::{ErrorKind, Result};
use crate::models::{Skip, Tally, Verse};
use exn::ResultExt;
use regex::Regex;

/// Compiles the `<book> <chapter>:<verse>` pattern. Only the short names of
/// the configured headings count as books, in any letter case.
pub(crate) fn reference_pattern<S: AsRef<str>>(headings: &[S]) -> Result<Option<Regex>> {
    let names: Vec<String> = headings.iter().map(|heading| normalize_heading(heading.as_ref())).collect();
    let names = longest_first(&names);
    if names.is_empty() {
        return Ok(None);
    }
    let alternation = names.iter().map(|name| regex::escape(name).replace(' ', r"\s")).collect::<Vec<_>>().join("|");
    Regex::new(&format!(r"(?i)\b(?P<book>{alternation})\s+(?P<chapter>\d+):(?P<verse>\d+)\s*"))
        .map(Some)
        .or_raise(|| ErrorKind::InvalidHeadings)
}

/// Whether explicit references carry the structure of the text: most of its
/// numbers have to be part of one. A stray cross-reference doesn't qualify.
pub(crate) fn detect(pattern: &Regex, text: &str) -> bool {
    let total = DIGITS_REGEX.find_iter(text).count();
    let referenced: usize = pattern.find_iter(text).map(|found| DIGITS_REGEX.find_iter(found.as_str()).count()).sum();
    referenced * 2 > total
}

/// Reads verses from explicit references. Each verse's text runs from the end
/// of its reference to the start of the next one.
pub(crate) fn references(pattern: &Regex, text: &str, tally: &mut Tally) -> Vec<Verse> {
    let found: Vec<_> = pattern.captures_iter(text).collect();
    let mut verses = Vec::with_capacity(found.len());
    for (i, captures) in found.iter().enumerate() {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let end = found.get(i + 1).and_then(|next| next.get(0)).map_or(text.len(), |next| next.start());
        let body = text[whole.end()..end].trim();
        let Ok(chapter) = captures["chapter"].parse::<u32>() else {
            tally.record(Skip::UnparsableChapter);
            continue;
        };
        let Ok(number) = captures["verse"].parse::<u32>() else {
            tally.record(Skip::UnparsableVerse);
            continue;
        };
        let book = normalize_heading(&captures["book"]);
        match Verse::new(book, chapter, number, body) {
            Some(verse) => verses.push(verse),
            None if body.is_empty() => tally.record(Skip::EmptyText),
            None if chapter == 0 => tally.record(Skip::UnparsableChapter),
            None => tally.record(Skip::UnparsableVerse),
        }
    }
    verses
}
