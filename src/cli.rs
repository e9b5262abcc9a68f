//! Command-line surface.

use clap::{ArgAction, Parser};
use lectern_config::Config;
use lectern_extract::LexicalMode;
use lectern_extract::error::Result as ExtractResult;
use std::path::PathBuf;

/// `--export` given without a path writes to stdout.
pub type Flag = Option<Option<PathBuf>>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Output {
    /// Print the book/chapter/verse outline
    Outline,
    /// JSON export to stdout
    Stdout,
    /// JSON export to a file
    File(PathBuf),
}
impl From<Flag> for Output {
    fn from(value: Flag) -> Self {
        match value {
            Some(Some(path)) if path.as_os_str().is_empty() || path.as_os_str() == "-" => Self::Stdout,
            Some(Some(path)) => Self::File(path),
            Some(None) => Self::Stdout,
            None => Self::Outline,
        }
    }
}

/// Extract scripture verses from EPUB and PDF documents.
#[derive(Debug, Parser)]
#[command(name = "lectern", version, about)]
pub struct Cli {
    /// Document to read (.epub, .pdf, .xhtml, .html, .htm or .txt)
    pub file: PathBuf,
    /// Config file (.toml, .yaml or .json), layered over the user config
    #[arg(long, env = "LECTERN_CONFIG_FILE")]
    pub config: Option<PathBuf>,
    /// More logging; repeat for more detail (RUST_LOG takes precedence)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    /// How flattened text encodes verses: auto, inline or headings
    #[arg(long)]
    pub mode: Option<String>,
    #[arg(long)]
    pub title_selector: Option<String>,
    #[arg(long)]
    pub chapter_selector: Option<String>,
    #[arg(long)]
    pub verse_selector: Option<String>,
    #[arg(long)]
    pub number_selector: Option<String>,
    #[arg(long)]
    pub text_selector: Option<String>,
    /// Skip documents whose name contains this; replaces the configured list
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,
    /// Archive path prefix of content documents; empty to read the whole archive
    #[arg(long)]
    pub prefix: Option<String>,
    /// Write the verses as JSON, to PATH or to stdout
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,
    /// List books alphabetically
    #[arg(long)]
    pub sort_books: bool,
}
impl Cli {
    pub fn output(&self) -> Output {
        Output::from(self.export.clone())
    }

    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) -> ExtractResult<()> {
        if let Some(mode) = &self.mode {
            config.lexical.mode = mode.parse::<LexicalMode>()?;
        }
        let selectors = &mut config.structural.selectors;
        let overrides = [
            (&mut selectors.title, &self.title_selector),
            (&mut selectors.chapter, &self.chapter_selector),
            (&mut selectors.verse, &self.verse_selector),
            (&mut selectors.number, &self.number_selector),
            (&mut selectors.text, &self.text_selector),
        ];
        for (slot, value) in overrides {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        }
        if !self.exclude.is_empty() {
            config.structural.exclude.clone_from(&self.exclude);
        }
        if let Some(prefix) = &self.prefix {
            config.archive.prefix = Some(prefix.clone());
        }
        if self.sort_books {
            config.display.sort_books = true;
        }
        Ok(())
    }
}
