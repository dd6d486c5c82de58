//! HTTP download engine for chapter images.
//!
//! This module provides functionality for fetching a chapter's listed images
//! to `<title>/chapter_<n>/image_<i>.jpg` with bounded concurrency.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient)
//! - Configurable timeouts (30s connect, 5min read by default)
//! - Bounded fan-out per chapter (semaphore, default 10)
//! - Per-image outcomes so partial chapter failures are visible
//! - Path components sanitized against separators and `..`
//!
//! # Example
//!
//! ```no_run
//! use manga_dl::download::HttpClient;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let bytes = client
//!     .download_to_path("https://cdn.example.com/1.jpg", Path::new("image_0.jpg"))
//!     .await?;
//! println!("Downloaded {bytes} bytes");
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod engine;
mod error;
pub mod filename;

pub use client::HttpClient;
pub use constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_CONCURRENCY, MAX_CONCURRENCY, MIN_CONCURRENCY, READ_TIMEOUT_SECS,
};
pub use engine::{
    ChapterReport, DownloadEngine, DownloadStats, EngineError, ImageOutcome, NoProgress,
    ProgressSink, SavedImage,
};
pub use error::DownloadError;
