use crate::consts::NUMBER_TOKEN_REGEX;
use crate::models::{Skip, Tally, Verse};

/// Chapter/verse state while walking the number tokens of one book.
///
/// Chapter boundaries are inferred from the ordering of the numbers alone, so
/// the rules are a heuristic tuned to how the text stream is typeset:
///
/// - the first number of a book is its chapter. When text follows it directly,
///   it is a drop-cap chapter numeral standing in for verse 1;
/// - a `1` after a verse greater than 1 starts the next chapter;
/// - a number greater than the last verse continues the chapter;
/// - anything else is a standalone chapter number and emits nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub chapter: u32,
    pub last_verse: u32,
}
impl Cursor {
    /// Consumes one number token. Returns the verse number the token's text
    /// belongs to, if it names a verse.
    pub fn advance(self, number: u32, has_text: bool) -> (Self, Option<u32>) {
        if self.chapter == 0 {
            return match has_text {
                true => (Self { chapter: number, last_verse: 1 }, Some(1)),
                false => (Self { chapter: number, last_verse: 0 }, None),
            };
        }
        if number == 1 && self.last_verse > 1 {
            return (Self { chapter: self.chapter.saturating_add(1), last_verse: 1 }, Some(1));
        }
        if number > self.last_verse {
            return (Self { chapter: self.chapter, last_verse: number }, Some(number));
        }
        (Self { chapter: number, last_verse: 0 }, None)
    }
}

/// Splits a book body on bare numbers and walks the `(number, text)` tokens.
/// Text before the first number is not part of any verse and is dropped;
/// `chapter:verse` cross-references stay in the verse text.
pub(crate) fn walk(book: &str, body: &str, tally: &mut Tally) -> Vec<Verse> {
    let numbers: Vec<_> = NUMBER_TOKEN_REGEX.find_iter(body).filter(|token| !token.as_str().contains(':')).collect();
    let mut cursor = Cursor::default();
    let mut verses = Vec::new();
    for (i, token) in numbers.iter().enumerate() {
        let end = numbers.get(i + 1).map_or(body.len(), |next| next.start());
        let text = body[token.end()..end].trim();
        let Ok(number) = token.as_str().parse::<u32>() else {
            tally.record(Skip::UnparsableVerse);
            continue;
        };
        let (next, verse) = cursor.advance(number, !text.is_empty());
        cursor = next;
        let Some(verse) = verse else {
            continue;
        };
        match Verse::new(book, cursor.chapter, verse, text) {
            Some(verse) => verses.push(verse),
            None if text.is_empty() => tally.record(Skip::EmptyText),
            None => tally.record(Skip::Orphaned),
        }
    }
    verses
}
