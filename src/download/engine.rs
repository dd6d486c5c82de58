//! Download engine for fetching one chapter's images concurrently.
//!
//! This module provides the `DownloadEngine` which fans a chapter's image
//! list out to Tokio tasks under a semaphore-based concurrency limit. Each
//! image is fetched once; a failed image is logged and recorded in the
//! returned [`ChapterReport`] without affecting the others.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use manga_dl::ChapterNumber;
//! use manga_dl::download::{DownloadEngine, HttpClient, NoProgress, ProgressSink};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = DownloadEngine::new(10)?;
//! let client = HttpClient::new()?;
//! let progress: Arc<dyn ProgressSink> = Arc::new(NoProgress);
//! let chapter: ChapterNumber = "1".parse()?;
//! let urls = vec!["https://cdn.example.com/1.jpg".to_string()];
//! let report = engine
//!     .download_chapter(&client, Path::new("."), "Title", chapter, &urls, &progress)
//!     .await?;
//! println!("Saved: {}, Failed: {}", report.saved(), report.failed());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use super::constants::{MAX_CONCURRENCY, MIN_CONCURRENCY};
use super::filename::{chapter_directory, image_file_name};
use super::{DownloadError, HttpClient};
use crate::chapter::ChapterNumber;

/// Error type for download engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// The chapter directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}

/// Counters for a whole run, shared across chapters and tasks.
#[derive(Debug, Default)]
pub struct DownloadStats {
    saved: AtomicUsize,
    failed: AtomicUsize,
}

impl DownloadStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of images written to disk.
    #[must_use]
    pub fn saved(&self) -> usize {
        self.saved.load(Ordering::SeqCst)
    }

    /// Returns the number of images that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// Returns the total number of images processed (saved + failed).
    #[must_use]
    pub fn total(&self) -> usize {
        self.saved() + self.failed()
    }

    /// Adds a chapter's counts to the totals.
    pub fn record(&self, report: &ChapterReport) {
        self.saved.fetch_add(report.saved(), Ordering::SeqCst);
        self.failed.fetch_add(report.failed(), Ordering::SeqCst);
    }
}

/// An image successfully written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    /// Path of the written file.
    pub path: PathBuf,
    /// Number of bytes written.
    pub bytes: u64,
}

/// Result of fetching the image at one listing index.
#[derive(Debug)]
pub struct ImageOutcome {
    /// Zero-based position in the chapter's image listing.
    pub index: usize,
    /// Source URL.
    pub url: String,
    /// Saved file, or the reason no file exists at this index.
    pub result: Result<SavedImage, DownloadError>,
}

impl ImageOutcome {
    /// Returns true if the image was written to disk.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-image results for one chapter, ordered by listing index.
#[derive(Debug)]
pub struct ChapterReport {
    /// The chapter downloaded.
    pub chapter: ChapterNumber,
    /// Directory the images were written to.
    pub directory: PathBuf,
    /// One outcome per listed image, in index order.
    pub images: Vec<ImageOutcome>,
}

impl ChapterReport {
    /// Number of images saved.
    #[must_use]
    pub fn saved(&self) -> usize {
        self.images.iter().filter(|image| image.is_saved()).count()
    }

    /// Number of images that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.images.len() - self.saved()
    }

    /// Outcomes that failed, in index order.
    pub fn failures(&self) -> impl Iterator<Item = &ImageOutcome> {
        self.images.iter().filter(|image| !image.is_saved())
    }
}

/// Observer for download progress, called from download tasks.
pub trait ProgressSink: Send + Sync {
    /// A chapter with `images` listed images is about to be downloaded.
    fn chapter_started(&self, _chapter: ChapterNumber, _images: usize) {}

    /// One image finished, successfully or not.
    fn image_finished(&self, _outcome: &ImageOutcome) {}

    /// Every image of the chapter has finished.
    fn chapter_finished(&self, _report: &ChapterReport) {}
}

/// Progress sink that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// Download engine for concurrent chapter image downloads.
///
/// # Concurrency Model
///
/// - Each image runs in its own Tokio task and owns its response and file
/// - A semaphore permit is acquired before starting each download
/// - Permits are released automatically when downloads complete (RAII)
/// - File names use the listing index, so completion order does not matter
#[derive(Debug)]
pub struct DownloadEngine {
    /// Semaphore for concurrency control.
    semaphore: Arc<Semaphore>,
    /// Configured concurrency limit.
    concurrency: usize,
}

impl DownloadEngine {
    /// Creates a new download engine with the specified concurrency limit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-100).
    ///
    /// # Example
    ///
    /// ```
    /// use manga_dl::download::DownloadEngine;
    ///
    /// let engine = DownloadEngine::new(10).unwrap();
    /// assert_eq!(engine.concurrency(), 10);
    /// ```
    #[instrument(level = "debug")]
    pub fn new(concurrency: usize) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }

        debug!(concurrency, "creating download engine");

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Downloads every image of a chapter into `<output_root>/<title>/chapter_<n>/`.
    ///
    /// The directory is created if absent. Image `i` is written to
    /// `image_<i>.jpg`. The method returns once every task has finished.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CreateDir`] if the chapter directory cannot be created.
    /// Returns [`EngineError::SemaphoreClosed`] if the semaphore is closed.
    ///
    /// Note: Individual image failures do NOT cause this method to error.
    /// They are recorded in the returned report.
    #[instrument(
        skip(self, client, chapter, image_urls, progress),
        fields(chapter = %chapter, images = image_urls.len())
    )]
    pub async fn download_chapter(
        &self,
        client: &HttpClient,
        output_root: &Path,
        title: &str,
        chapter: ChapterNumber,
        image_urls: &[String],
        progress: &Arc<dyn ProgressSink>,
    ) -> Result<ChapterReport, EngineError> {
        let directory = chapter_directory(output_root, title, chapter);
        ensure_directory(&directory).await?;

        progress.chapter_started(chapter, image_urls.len());

        let mut handles = Vec::with_capacity(image_urls.len());
        for (index, url) in image_urls.iter().enumerate() {
            // Acquire semaphore permit (blocks if at concurrency limit)
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| EngineError::SemaphoreClosed)?;

            let client = client.clone();
            let task_url = url.clone();
            let path = directory.join(image_file_name(index));
            let progress = Arc::clone(progress);

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let result = client
                    .download_to_path(&task_url, &path)
                    .await
                    .map(|bytes| SavedImage { path, bytes });
                if let Err(e) = &result {
                    warn!(index, url = %task_url, error = %e, "image download failed");
                }
                let outcome = ImageOutcome {
                    index,
                    url: task_url,
                    result,
                };
                progress.image_finished(&outcome);
                outcome
            });
            handles.push((index, url.clone(), handle));
        }

        debug!(task_count = handles.len(), "waiting for images to complete");

        let mut images = Vec::with_capacity(handles.len());
        for (index, url, handle) in handles {
            match handle.await {
                Ok(outcome) => images.push(outcome),
                Err(e) => {
                    warn!(index, url = %url, error = %e, "image task panicked");
                    images.push(ImageOutcome {
                        index,
                        result: Err(DownloadError::aborted(url.as_str())),
                        url,
                    });
                }
            }
        }

        let report = ChapterReport {
            chapter,
            directory,
            images,
        };
        info!(
            saved = report.saved(),
            failed = report.failed(),
            directory = %report.directory.display(),
            "chapter download complete"
        );
        progress.chapter_finished(&report);
        Ok(report)
    }
}

async fn ensure_directory(directory: &Path) -> Result<(), EngineError> {
    let exists = tokio::fs::try_exists(directory).await.unwrap_or(false);
    if exists {
        return Ok(());
    }
    tokio::fs::create_dir_all(directory)
        .await
        .map_err(|source| EngineError::CreateDir {
            path: directory.to_path_buf(),
            source,
        })?;
    info!(directory = %directory.display(), "directory has been created");
    Ok(())
}
