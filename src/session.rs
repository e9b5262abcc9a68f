use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use lectern_extract::{Engine, Outline, Tally, Verses};
use lectern_load::{ArchiveFilter, DocumentKind, Fingerprint};
use std::path::Path;
use time::UtcDateTime;
use tracing::instrument;

/// The result of one successful open.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub name: String,
    pub kind: DocumentKind,
    pub fingerprint: Fingerprint,
    pub extracted_at: UtcDateTime,
    /// Verses in extraction order.
    pub verses: Verses,
    pub tally: Tally,
}

/// Holds the extraction engine and the most recent result.
///
/// Opening a document replaces the previous result only once the new one is
/// complete; a failed open leaves it untouched.
#[derive(Debug)]
pub struct Session {
    engine: Engine,
    filter: ArchiveFilter,
    latest: Option<Extraction>,
}
impl Session {
    pub fn new(engine: Engine, filter: ArchiveFilter) -> Self {
        Self {
            engine,
            filter,
            latest: None,
        }
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display(), verses, skipped))]
    pub async fn open(&mut self, path: impl AsRef<Path>) -> Result<&Extraction> {
        let loaded = lectern_load::load(path, &self.filter).await.map_err(ErrorKind::load)?;
        let extracted = self.engine.run(&loaded.source).map_err(ErrorKind::extract)?;
        let span = tracing::Span::current();
        span.record("verses", extracted.verses.len());
        span.record("skipped", extracted.tally.skipped());

        Ok(self.latest.insert(Extraction {
            name: loaded.name,
            kind: loaded.kind,
            fingerprint: loaded.fingerprint,
            extracted_at: UtcDateTime::now(),
            verses: extracted.verses,
            tally: extracted.tally,
        }))
    }

    pub fn latest(&self) -> Option<&Extraction> {
        self.latest.as_ref()
    }

    /// The latest verses as a pretty-printed JSON array.
    pub fn export(&self) -> Result<String> {
        let latest = self.latest.as_ref().ok_or_raise(|| ErrorKind::NothingLoaded)?;
        latest.verses.to_json().map_err(|err| err.raise(ErrorKind::Output))
    }

    /// The latest verses grouped by book and chapter.
    pub fn outline(&self) -> Result<Outline<'_>> {
        let latest = self.latest.as_ref().ok_or_raise(|| ErrorKind::NothingLoaded)?;
        Ok(latest.verses.outline())
    }
}
