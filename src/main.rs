mod cli;
mod error;
mod session;

use crate::cli::{Cli, Output};
use crate::error::{ErrorKind, Result};
use crate::session::Session;
use clap::Parser;
use exn::ResultExt;
use lectern_config::Config;
use std::process::ExitCode;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", *err);
            eprintln!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

/// `RUST_LOG` wins over `-v`.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    cli.apply(&mut config).or_raise(|| ErrorKind::Config)?;
    let engine = config.engine().or_raise(|| ErrorKind::Config)?;

    let mut session = Session::new(engine, config.archive.clone());
    let extraction = session.open(&cli.file).await?;
    tracing::info!(
        name = %extraction.name,
        kind = %extraction.kind,
        hash = %extraction.fingerprint.hash,
        extracted_at = %extraction.extracted_at,
        skipped = extraction.tally.skipped(),
        "{} verses found",
        extraction.verses.len(),
    );

    match cli.output() {
        Output::Outline => {
            let mut outline = session.outline()?;
            if config.display.sort_books {
                outline = outline.sorted();
            }
            write_stdout(&outline.render(&config.display.chapter_label)).await
        },
        Output::Stdout => write_stdout(&session.export()?).await,
        Output::File(path) => {
            let json = session.export()?;
            tokio::fs::write(&path, json).await.or_raise(|| ErrorKind::Output)?;
            tracing::info!(path = %path.display(), "verses exported");
            Ok(())
        },
    }
}

async fn write_stdout(content: &str) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(content.as_bytes()).await.or_raise(|| ErrorKind::Output)?;
    if !content.ends_with('\n') {
        stdout.write_all(b"\n").await.or_raise(|| ErrorKind::Output)?;
    }
    stdout.flush().await.or_raise(|| ErrorKind::Output)
}
