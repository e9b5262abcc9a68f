//! Layered configuration.
//!
//! Layers, lowest to highest precedence:
//!
//! 1. built-in defaults,
//! 2. `config.toml`, `config.yaml` or `config.json` in the platform config
//!    directory (see [`config_dir`]),
//! 3. an explicitly given config file,
//! 4. environment variables prefixed `LECTERN_`, nested keys separated by
//!    `__` (`LECTERN_DISPLAY__CHAPTER_LABEL=Chapter`).
//!
//! Command-line overrides are applied on top by the binary.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use lectern_extract::{DEFAULT_CHAPTER_LABEL, DEFAULT_EXCLUDED_DOCUMENTS, Engine, Lexical, LexicalOptions, SelectorSet};
use lectern_extract::{Selectors, Structural};
use lectern_load::ArchiveFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

const ENV_PREFIX: &str = "LECTERN_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which EPUB entries are content documents.
    pub archive: ArchiveFilter,
    pub structural: StructuralConfig,
    pub lexical: LexicalOptions,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralConfig {
    pub selectors: SelectorSet,
    /// Documents whose name contains any of these are skipped.
    pub exclude: Vec<String>,
}
impl Default for StructuralConfig {
    fn default() -> Self {
        Self {
            selectors: SelectorSet::default(),
            exclude: DEFAULT_EXCLUDED_DOCUMENTS.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub chapter_label: String,
    /// List books alphabetically instead of in the order they were found.
    pub sort_books: bool,
}
impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            chapter_label: DEFAULT_CHAPTER_LABEL.to_string(),
            sort_books: false,
        }
    }
}

/// Platform config directory, e.g. `~/.config/lectern` on Linux.
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "lectern").map(|dirs| dirs.config_dir().to_path_buf())
}

impl Config {
    /// Loads every layer, with `explicit` as the config file given on the
    /// command line.
    #[instrument(skip_all, fields(explicit = ?explicit))]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(config_dir().as_deref(), explicit)?)
    }

    /// Builds the layered figment without extracting it.
    pub fn figment(user_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(dir) = user_dir {
            // Missing files are skipped by the providers.
            figment = figment
                .merge(Toml::file(dir.join("config.toml")))
                .merge(Yaml::file(dir.join("config.yaml")))
                .merge(Json::file(dir.join("config.json")));
        }
        if let Some(path) = explicit {
            if !path.is_file() {
                exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
            }
            let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase);
            figment = match extension.as_deref() {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
            };
            tracing::debug!(path = %path.display(), "merged explicit config file");
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        figment.extract().or_raise(|| ErrorKind::Invalid)
    }

    /// Compiles the extraction settings into an [`Engine`].
    pub fn engine(&self) -> Result<Engine> {
        let selectors = Selectors::compile(&self.structural.selectors).map_err(ErrorKind::extract)?;
        let structural = Structural::new(selectors, self.structural.exclude.iter().cloned());
        let lexical = Lexical::new(&self.lexical).map_err(ErrorKind::extract)?;
        Ok(Engine::new(structural, lexical))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use lectern_extract::LexicalMode;
    use rstest::rstest;
    use std::fs;

    #[test]
    fn defaults() {
        let config = Config::from_figment(Figment::from(Serialized::defaults(Config::default()))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.archive.prefix.as_deref(), Some("OEBPS/"));
        assert_eq!(config.structural.exclude, ["toc", "Title", "Foreword"]);
        assert_eq!(config.display.chapter_label, "Kapitel");
        assert!(config.engine().is_ok());
    }

    #[rstest]
    #[case("config.toml", "[structural.selectors]\ntitle = \"h2.book\"\n[display]\nsort_books = true\n")]
    #[case("config.yaml", "structural:\n  selectors:\n    title: h2.book\ndisplay:\n  sort_books: true\n")]
    #[case("config.json", r#"{"structural": {"selectors": {"title": "h2.book"}}, "display": {"sort_books": true}}"#)]
    fn user_config_dir(#[case] name: &str, #[case] content: &str) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(name), content).unwrap();
        let config = Config::from_figment(Config::figment(Some(dir.path()), None).unwrap()).unwrap();
        assert_eq!(config.structural.selectors.title, "h2.book");
        // Untouched keys keep their defaults.
        assert_eq!(config.structural.selectors.verse, SelectorSet::default().verse);
        assert!(config.display.sort_books);
    }

    #[test]
    fn explicit_file_overrides_user_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "[lexical]\nmode = \"inline\"\n").unwrap();
        let explicit = dir.path().join("override.yml");
        fs::write(&explicit, "lexical:\n  mode: headings\n  boilerplate: [Fußnote]\n").unwrap();
        let config = Config::from_figment(Config::figment(Some(dir.path()), Some(&explicit)).unwrap()).unwrap();
        assert_eq!(config.lexical.mode, LexicalMode::Headings);
        assert_eq!(config.lexical.boilerplate, ["Fußnote"]);
    }

    #[test]
    fn explicit_file_must_exist_and_be_supported() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::figment(None, Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
        let ini = dir.path().join("config.ini");
        fs::write(&ini, "mode=inline").unwrap();
        let err = Config::figment(None, Some(&ini)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnsupportedFormat(_)));
    }

    #[test]
    fn wrong_types_are_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("config.toml");
        fs::write(&explicit, "[lexical]\nmode = \"fuzzy\"\n").unwrap();
        let err = Config::from_figment(Config::figment(None, Some(&explicit)).unwrap()).unwrap_err();
        assert_eq!(*err, ErrorKind::Invalid);
    }

    #[test]
    fn environment_has_the_last_word() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[display]\nchapter_label = \"Capitulum\"\n")?;
            jail.set_env("LECTERN_DISPLAY__CHAPTER_LABEL", "Chapter");
            jail.set_env("LECTERN_ARCHIVE__PREFIX", "");
            let explicit = jail.directory().join("config.toml");
            let config = Config::from_figment(Config::figment(None, Some(&explicit)).unwrap()).unwrap();
            assert_eq!(config.display.chapter_label, "Chapter");
            assert_eq!(config.archive.prefix.as_deref(), Some(""));
            Ok(())
        });
    }

    #[test]
    fn invalid_selector_is_reported_when_building_the_engine() {
        let mut config = Config::default();
        config.structural.selectors.number = "a[".to_string();
        let err = config.engine().unwrap_err();
        let ErrorKind::Extract(lectern_extract::error::ErrorKind::InvalidSelector { name, .. }) = &*err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(*name, "number");
    }
}
