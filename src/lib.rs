//! manga-dl Core Library
//!
//! This library provides the core functionality for the manga-dl tool,
//! which finds a manga on a web catalog and downloads its chapter images
//! into `<title>/chapter_<n>/image_<i>.jpg` directories.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`catalog`] - Catalog search, candidate selection, chapter and image listing
//! - [`chapter`] - Chapter numbers and range filtering
//! - [`download`] - HTTP image download engine with bounded concurrency
//! - [`pipeline`] - End-to-end run: enumerate, list, download, stop on empty chapter

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod chapter;
pub mod download;
pub mod pipeline;
mod user_agent;

// Re-export commonly used types
pub use catalog::{
    Catalog, CatalogConfig, CatalogEntry, CatalogError, MangakakalotCatalog, select_entry,
};
pub use chapter::{ChapterNumber, ChapterParseError, ChapterRange};
pub use download::{
    ChapterReport, DEFAULT_CONCURRENCY, DownloadEngine, DownloadError, DownloadStats, EngineError,
    HttpClient, ImageOutcome, NoProgress, ProgressSink,
};
pub use pipeline::{Pipeline, PipelineError, RunSummary, StopReason};
