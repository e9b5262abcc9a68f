use std::fmt::{Display, Formatter, Result as FmtResult};

/// One markup file out of a container, e.g. an XHTML entry of an EPUB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupDocument {
    /// Entry name inside the container. Only used for ordering and for the
    /// exclusion list, never for extraction.
    pub name: String,
    pub content: String,
}
impl MarkupDocument {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}
impl<N: Into<String>, C: Into<String>> From<(N, C)> for MarkupDocument {
    fn from((name, content): (N, C)) -> Self {
        Self::new(name, content)
    }
}

/// Input to the [`Engine`](crate::Engine), already decoded by a loader.
///
/// The variant decides which extraction strategy runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Ordered markup documents, extracted structurally.
    Markup(Vec<MarkupDocument>),
    /// One flattened text stream (all pages, in order), extracted lexically.
    Text(String),
}
impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Markup(_) => "markup",
            Source::Text(_) => "text",
        }
    }

    /// Rough input size, for logging.
    pub fn size(&self) -> usize {
        match self {
            Source::Markup(documents) => documents.iter().map(|d| d.content.len()).sum(),
            Source::Text(text) => text.len(),
        }
    }
}
impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
impl From<Vec<MarkupDocument>> for Source {
    fn from(documents: Vec<MarkupDocument>) -> Self {
        Source::Markup(documents)
    }
}
impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Text(text)
    }
}
