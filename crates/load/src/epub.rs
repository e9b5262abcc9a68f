use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use lectern_extract::MarkupDocument;
use std::cmp::Ordering;
use std::io::{Cursor, Read};
use tracing::instrument;
use zip::ZipArchive;

const DEFAULT_PREFIX: &str = "OEBPS/";
const DEFAULT_EXTENSION: &str = ".xhtml";

/// Which archive entries count as content documents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ArchiveFilter {
    /// Entry names must start with this, if set. An empty prefix is the same
    /// as none.
    pub prefix: Option<String>,
    /// Entry names must end with this (case-sensitive).
    pub extension: String,
}
impl Default for ArchiveFilter {
    fn default() -> Self {
        Self {
            prefix: Some(DEFAULT_PREFIX.to_string()),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}
impl ArchiveFilter {
    pub fn matches(&self, name: &str) -> bool {
        let prefixed = self.prefix.as_deref().is_none_or(|prefix| name.starts_with(prefix));
        prefixed && name.ends_with(&self.extension)
    }
}

/// Reads every content document from an in-memory EPUB, in natural name order
/// (`bi12_2.xhtml` before `bi12_10.xhtml`).
#[instrument(skip_all, fields(size = bytes.len(), entries, documents))]
pub(crate) fn read(bytes: &[u8], filter: &ArchiveFilter) -> Result<Vec<MarkupDocument>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).or_raise(|| ErrorKind::Archive)?;
    tracing::Span::current().record("entries", archive.len());

    let mut documents = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).or_raise(|| ErrorKind::Archive)?;
        if !entry.is_file() || !filter.matches(entry.name()) {
            continue;
        }
        let name = entry.name().to_string();
        let mut buffer = Vec::new();
        entry.read_to_end(&mut buffer).or_raise(|| ErrorKind::Archive)?;
        let content = String::from_utf8(buffer).unwrap_or_else(|err| {
            tracing::warn!(name = %name, "entry is not valid UTF-8, invalid sequences replaced");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        });
        documents.push(MarkupDocument::new(name, content));
    }

    if documents.is_empty() {
        exn::bail!(ErrorKind::EmptyArchive {
            prefix: filter.prefix.clone().filter(|p| !p.is_empty()).unwrap_or_else(|| "/".to_string()),
            extension: filter.extension.clone(),
        });
    }
    documents.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    tracing::Span::current().record("documents", documents.len());
    Ok(documents)
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> impl Iterator<Item = Chunk<'_>> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = rest.find(|c: char| c.is_ascii_digit() != digits).unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(if digits { Chunk::Digits(chunk) } else { Chunk::Text(chunk) })
    })
}

/// Orders names with embedded numbers by their numeric value.
pub(crate) fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);
    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Chunk::Digits(x)), Some(Chunk::Digits(y))) => {
                let (x, y) = (x.trim_start_matches('0'), y.trim_start_matches('0'));
                x.len().cmp(&y.len()).then_with(|| x.cmp(y))
            },
            (Some(Chunk::Text(x)), Some(Chunk::Text(y))) => x.to_lowercase().cmp(&y.to_lowercase()),
            (Some(Chunk::Digits(_)), Some(Chunk::Text(_))) => Ordering::Less,
            (Some(Chunk::Text(_)), Some(Chunk::Digits(_))) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn archive<C: AsRef<[u8]>>(entries: &[(&str, C)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_ref()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[rstest]
    #[case("bi12_2.xhtml", "bi12_10.xhtml", Ordering::Less)]
    #[case("bi12_10.xhtml", "bi12_9.xhtml", Ordering::Greater)]
    #[case("bi12_002.xhtml", "bi12_2.xhtml", Ordering::Less)]
    #[case("a.xhtml", "B.xhtml", Ordering::Less)]
    #[case("OEBPS/1.xhtml", "OEBPS/a.xhtml", Ordering::Less)]
    #[case("same", "same", Ordering::Equal)]
    #[case("bi12", "bi12_1", Ordering::Less)]
    fn test_natural_cmp(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(natural_cmp(a, b), expected);
    }

    #[rstest]
    #[case(ArchiveFilter::default(), "OEBPS/bi12_1.xhtml", true)]
    #[case(ArchiveFilter::default(), "OEBPS/style.css", false)]
    #[case(ArchiveFilter::default(), "bi12_1.xhtml", false)]
    #[case(ArchiveFilter::default(), "OEBPS/bi12_1.XHTML", false)]
    #[case(ArchiveFilter { prefix: None, extension: ".xhtml".to_string() }, "text/bi12_1.xhtml", true)]
    #[case(ArchiveFilter { prefix: Some(String::new()), extension: ".html".to_string() }, "ch1.html", true)]
    fn test_filter(#[case] filter: ArchiveFilter, #[case] name: &str, #[case] expected: bool) {
        assert_eq!(filter.matches(name), expected);
    }

    #[test]
    fn reads_matching_entries_in_natural_order() {
        let bytes = archive(&[
            ("mimetype", "application/epub+zip"),
            ("OEBPS/bi12_10.xhtml", "<p>ten</p>"),
            ("OEBPS/bi12_2.xhtml", "<p>two</p>"),
            ("OEBPS/styles.css", "p {}"),
            ("META-INF/container.xml", "<container/>"),
        ]);
        let documents = read(&bytes, &ArchiveFilter::default()).unwrap();
        let names: Vec<_> = documents.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["OEBPS/bi12_2.xhtml", "OEBPS/bi12_10.xhtml"]);
        assert_eq!(documents[0].content, "<p>two</p>");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let bytes = archive(&[("OEBPS/a.xhtml", b"<p>Gr\xfc\xdfe</p>")]);
        let documents = read(&bytes, &ArchiveFilter::default()).unwrap();
        assert_eq!(documents[0].content, "<p>Gr\u{fffd}\u{fffd}e</p>");
    }

    #[test]
    fn no_content_documents() {
        let bytes = archive(&[("OEBPS/styles.css", "p {}")]);
        let err = read(&bytes, &ArchiveFilter::default()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::EmptyArchive { prefix, .. } if prefix == "OEBPS/"));
    }

    #[test]
    fn not_a_zip() {
        let err = read(b"PK\x03\x04 but not really", &ArchiveFilter::default()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Archive));
    }
}
