//! CLI entry point for manga-dl.

use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use manga_dl::download::CONNECT_TIMEOUT_SECS;
use manga_dl::{
    Catalog, CatalogConfig, ChapterRange, DownloadEngine, HttpClient, MangakakalotCatalog,
    Pipeline, select_entry,
};
use tracing::{debug, error, info, warn};

mod cli;
mod exit_handler;
mod output;
mod progress;
mod prompt;

use cli::Args;

/// Process exit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Every listed image was saved, or there was nothing to download.
    Success,
    /// Some images were saved and some failed.
    Partial,
    /// Fatal error, or every image failed.
    Failure,
}

impl ProcessExit {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Partial => 1,
            Self::Failure => 2,
        }
    }
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        ExitCode::from(exit.code())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    init_tracing(default_level);

    debug!(?args, "CLI arguments parsed");

    match run(args).await {
        Ok(exit) => exit.into(),
        Err(e) => {
            error!("{e:#}");
            ProcessExit::Failure.into()
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}

async fn run(args: Args) -> Result<ProcessExit> {
    info!("manga-dl starting");
    if args.multi {
        warn!("--multi is accepted for compatibility but has no effect");
    }

    let catalog = MangakakalotCatalog::new(&CatalogConfig {
        read_timeout_secs: args.catalog_timeout,
        ..CatalogConfig::with_base_url(args.base_url.as_str())
    })?;
    debug!(base_url = catalog.base_url(), "catalog configured");

    let candidates = catalog.search(&args.manga_name).await?;
    let entry = select_entry(candidates, |list| match args.pick {
        Some(index) => Ok(index),
        None => prompt::prompt_for_choice(list, io::stdin().lock(), io::stdout().lock()),
    })?;

    let range = ChapterRange::new(args.begin, args.end);
    debug!(?range, "chapter range");

    let client = HttpClient::with_timeouts(CONNECT_TIMEOUT_SECS, args.image_timeout)?;
    let engine = DownloadEngine::new(usize::from(args.concurrency))?;
    let mut pipeline = Pipeline::new(Arc::new(catalog), client, engine);
    if progress::should_show_progress(io::stderr().is_terminal(), args.quiet) {
        pipeline = pipeline.with_progress(Arc::new(progress::ChapterProgress::new()));
    }

    let summary = pipeline.run(&entry, range, &args.output_dir).await?;
    if !args.quiet {
        output::print_summary(&summary);
    }

    // A chapter that could not be listed counts as one failure.
    let failed = summary.failed() + usize::from(summary.stop.is_failure());
    Ok(exit_handler::determine_exit_outcome(summary.saved(), failed))
}
