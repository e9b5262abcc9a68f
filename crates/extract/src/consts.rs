use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Structural defaults, matching the layout of the "bi12" EPUB family: book
// title in the header, chapter number in `<a id="chapter">`, one `<p id="vN">`
// per verse holding a number anchor and one or more text spans.
pub const DEFAULT_TITLE_SELECTOR: &str = "header h1";
pub const DEFAULT_CHAPTER_SELECTOR: &str = "a#chapter";
pub const DEFAULT_VERSE_SELECTOR: &str = "p[id^=\"v\"]";
pub const DEFAULT_NUMBER_SELECTOR: &str = "a.verse-number";
pub const DEFAULT_TEXT_SELECTOR: &str = "span.verse-text";

/// Document names containing any of these are not scripture content.
pub const DEFAULT_EXCLUDED_DOCUMENTS: [&str; 3] = ["toc", "Title", "Foreword"];

/// Book headings as they are typeset in the source text stream.
pub const DEFAULT_BOOK_HEADINGS: [&str; 66] = [
    "DAS ERSTE BUCH MOSE",
    "DAS ZWEITE BUCH MOSE",
    "DAS DRITTE BUCH MOSE",
    "DAS VIERTE BUCH MOSE",
    "DAS FÜNFTE BUCH MOSE",
    "DAS BUCH JOSUA",
    "DAS BUCH DER RICHTER",
    "DAS BUCH RUT",
    "DAS ERSTE BUCH SAMUEL",
    "DAS ZWEITE BUCH SAMUEL",
    "DAS ERSTE BUCH DER KÖNIGE",
    "DAS ZWEITE BUCH DER KÖNIGE",
    "DAS ERSTE BUCH DER CHRONIK",
    "DAS ZWEITE BUCH DER CHRONIK",
    "DAS BUCH ESRA",
    "DAS BUCH NEHEMIA",
    "DAS BUCH ESTER",
    "DAS BUCH HIOB",
    "DIE PSALMEN",
    "DIE SPRÜCHE SALOMOS",
    "DER PREDIGER SALOMO",
    "DAS HOHELIED SALOMOS",
    "DER PROPHET JESAJA",
    "DER PROPHET JEREMIA",
    "DIE KLAGELIEDER JEREMIAS",
    "DER PROPHET HESEKIEL",
    "DER PROPHET DANIEL",
    "DER PROPHET HOSEA",
    "DER PROPHET JOEL",
    "DER PROPHET AMOS",
    "DER PROPHET OBADJA",
    "DER PROPHET JONA",
    "DER PROPHET MICHA",
    "DER PROPHET NAHUM",
    "DER PROPHET HABAKUK",
    "DER PROPHET ZEFANJA",
    "DER PROPHET HAGGAI",
    "DER PROPHET SACHARJA",
    "DER PROPHET MALEACHI",
    "DAS EVANGELIUM NACH MATTHÄUS",
    "DAS EVANGELIUM NACH MARKUS",
    "DAS EVANGELIUM NACH LUKAS",
    "DAS EVANGELIUM NACH JOHANNES",
    "DIE APOSTELGESCHICHTE DES LUKAS",
    "BRIEF AN DIE RÖMER",
    "ERSTER BRIEF AN DIE KORINTHER",
    "ZWEITER BRIEF AN DIE KORINTHER",
    "BRIEF AN DIE GALATER",
    "BRIEF AN DIE EPHESER",
    "BRIEF AN DIE PHILIPPER",
    "BRIEF AN DIE KOLOSSER",
    "ERSTER BRIEF AN DIE THESSALONICHER",
    "ZWEITER BRIEF AN DIE THESSALONICHER",
    "ERSTER BRIEF AN TIMOTHEUS",
    "ZWEITER BRIEF AN TIMOTHEUS",
    "BRIEF AN TITUS",
    "BRIEF AN PHILEMON",
    "ERSTER BRIEF DES PETRUS",
    "ZWEITER BRIEF DES PETRUS",
    "ERSTER BRIEF DES JOHANNES",
    "ZWEITER BRIEF DES JOHANNES",
    "DRITTER BRIEF DES JOHANNES",
    "BRIEF AN DIE HEBRÄER",
    "BRIEF DES JAKOBUS",
    "BRIEF DES JUDAS",
    "DIE OFFENBARUNG DES JOHANNES",
];

// Text cleanup, applied in this order.
regex!(LINE_BREAK_REGEX, r"\r\n|\r|\n");
regex!(HYPHENATION_REGEX, r"(\S)-\s+");
regex!(WHITESPACE_REGEX, r"\s+");

regex!(DIGITS_REGEX, r"\d+");
// A bare number, or a `chapter:verse` cross-reference inside running text.
regex!(NUMBER_TOKEN_REGEX, r"\d+(?::\d+)*");

// Heading substitution table, tried top to bottom.
regex!(ORDINAL_BOOK_REGEX, r"^DAS (ERSTE|ZWEITE|DRITTE|VIERTE|FÜNFTE) BUCH (?:DER |DES )?(.+)$");
regex!(ORDINAL_LETTER_REGEX, r"^(ERSTER|ZWEITER|DRITTER) BRIEF (?:AN DIE |AN |DES )(.+)$");
regex!(LETTER_REGEX, r"^BRIEF (?:AN DIE |AN |DES )(.+)$");
regex!(GOSPEL_REGEX, r"^DAS EVANGELIUM NACH (.+)$");
regex!(PROPHET_REGEX, r"^DER PROPHET (.+)$");
regex!(NAMED_BOOK_REGEX, r"^DAS BUCH (?:DER |DES )?(.+)$");
regex!(ARTICLE_REGEX, r"^(?:DIE|DER|DAS) (.+?)(?: DES .+)?$");

/// Label in front of chapter numbers in the rendered outline.
pub const DEFAULT_CHAPTER_LABEL: &str = "Kapitel";
