mod source;
mod tally;
mod verse;

pub use self::source::{MarkupDocument, Source};
pub use self::tally::{Skip, Tally};
pub use self::verse::Verse;

/// Parses a number the way the markup usually carries it: leading ASCII digits
/// after trimming, with anything after them ignored (`"12a"` is 12, `"III"` and
/// `""` are not numbers).
pub(crate) fn leading_integer(s: &str) -> Option<u32> {
    let s = s.trim();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}
