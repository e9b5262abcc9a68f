use crate::consts;
use crate::error::{Error, ErrorKind, Result};
use scraper::Selector;

/// The five structural queries as free text, exactly as an operator supplies
/// them. Compile into [`Selectors`] before use.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct SelectorSet {
    /// Book title, e.g. `header h1`
    pub title: String,
    /// Chapter anchor, e.g. `a#chapter`
    pub chapter: String,
    /// Verse container, e.g. `p[id^="v"]`
    pub verse: String,
    /// Verse number, relative to the container
    pub number: String,
    /// Verse text fragments, relative to the container
    pub text: String,
}
impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            title: consts::DEFAULT_TITLE_SELECTOR.to_string(),
            chapter: consts::DEFAULT_CHAPTER_SELECTOR.to_string(),
            verse: consts::DEFAULT_VERSE_SELECTOR.to_string(),
            number: consts::DEFAULT_NUMBER_SELECTOR.to_string(),
            text: consts::DEFAULT_TEXT_SELECTOR.to_string(),
        }
    }
}

/// Compiled structural queries.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub(crate) title: Selector,
    pub(crate) chapter: Selector,
    pub(crate) verse: Selector,
    pub(crate) number: Selector,
    pub(crate) text: Selector,
}
impl Selectors {
    /// Compiles every selector, failing on the first one that doesn't parse.
    pub fn compile(set: &SelectorSet) -> Result<Self> {
        Ok(Self {
            title: compile("title", &set.title)?,
            chapter: compile("chapter", &set.chapter)?,
            verse: compile("verse", &set.verse)?,
            number: compile("number", &set.number)?,
            text: compile("text", &set.text)?,
        })
    }
}
impl TryFrom<&SelectorSet> for Selectors {
    type Error = Error;
    fn try_from(set: &SelectorSet) -> Result<Self> {
        Self::compile(set)
    }
}
impl Default for Selectors {
    fn default() -> Self {
        // The built-in selectors are known to parse.
        Self::compile(&SelectorSet::default()).unwrap()
    }
}

fn compile(name: &'static str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|err| {
        Error::from(ErrorKind::InvalidSelector {
            name,
            css: css.to_string(),
            reason: err.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_compile() {
        assert!(Selectors::compile(&SelectorSet::default()).is_ok());
    }

    #[rstest]
    #[case::title(SelectorSet { title: "h1[".into(), ..Default::default() }, "title")]
    #[case::chapter(SelectorSet { chapter: "".into(), ..Default::default() }, "chapter")]
    #[case::verse(SelectorSet { verse: "p[id^=]".into(), ..Default::default() }, "verse")]
    #[case::number(SelectorSet { number: "a..b".into(), ..Default::default() }, "number")]
    #[case::text(SelectorSet { text: ">>".into(), ..Default::default() }, "text")]
    fn reports_which_selector_failed(#[case] set: SelectorSet, #[case] expected: &str) {
        let err = Selectors::compile(&set).unwrap_err();
        match &*err {
            ErrorKind::InvalidSelector { name, .. } => assert_eq!(*name, expected),
            other => panic!("unexpected error kind: {other}"),
        }
    }
}
