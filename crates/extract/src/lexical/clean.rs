use crate::consts::{HYPHENATION_REGEX, LINE_BREAK_REGEX, WHITESPACE_REGEX};
use regex::Regex;

/// Normalizes a flattened page stream before segmentation:
///
/// 1. line breaks become single spaces,
/// 2. words split by a trailing hyphen are joined back together,
/// 3. whitespace runs collapse to one space,
/// 4. optional boilerplate tokens are removed (and whitespace collapsed again).
pub(crate) fn clean(text: &str, boilerplate: Option<&Regex>) -> String {
    let text = LINE_BREAK_REGEX.replace_all(text, " ");
    let text = HYPHENATION_REGEX.replace_all(&text, "${1}");
    let text = WHITESPACE_REGEX.replace_all(&text, " ");
    match boilerplate {
        Some(pattern) => {
            let stripped = pattern.replace_all(&text, " ");
            WHITESPACE_REGEX.replace_all(&stripped, " ").trim().to_string()
        },
        None => text.trim().to_string(),
    }
}
