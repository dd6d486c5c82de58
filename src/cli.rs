//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use manga_dl::ChapterNumber;
use manga_dl::catalog::{CATALOG_READ_TIMEOUT_SECS, DEFAULT_BASE_URL};
use manga_dl::download::{DEFAULT_CONCURRENCY, READ_TIMEOUT_SECS};

/// Easily download manga from your terminal.
///
/// Searches the catalog for MANGA_NAME, lets you pick among ambiguous
/// matches, and saves every chapter in range as
/// `<title>/chapter_<n>/image_<i>.jpg`.
///
/// Exit codes: 0 success, 1 some images failed, 2 nothing could be downloaded.
#[derive(Parser, Debug)]
#[command(name = "manga-dl")]
#[command(author, version, about)]
pub struct Args {
    /// Title to search for
    pub manga_name: String,

    /// Accepted for compatibility; currently has no effect
    #[arg(short, long)]
    pub multi: bool,

    /// First chapter to download, inclusive (default 0; negative disables the lower bound)
    #[arg(short, long, allow_negative_numbers = true)]
    pub begin: Option<ChapterNumber>,

    /// Last chapter to download, inclusive (ignored when below --begin)
    #[arg(short, long, allow_negative_numbers = true)]
    pub end: Option<ChapterNumber>,

    /// Candidate index to use when the search returns several matches (skips the prompt)
    #[arg(short, long)]
    pub pick: Option<usize>,

    /// Directory the `<title>/` folder is created in
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Maximum concurrent image downloads per chapter (1-100)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: u8,

    /// Catalog site root
    #[arg(long, env = "MANGA_DL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Timeout in seconds for catalog page requests (1-3600)
    #[arg(long, default_value_t = CATALOG_READ_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub catalog_timeout: u64,

    /// Timeout in seconds for each image download (1-3600)
    #[arg(long, default_value_t = READ_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub image_timeout: u64,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
