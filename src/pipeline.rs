//! End-to-end run for a selected manga.
//!
//! The pipeline enumerates chapters in range, then for each chapter lists
//! its images and downloads them. A chapter with no images, or whose page
//! cannot be listed, ends the run; chapters after it are never listed.
//! Chapters already downloaded stay in the returned summary.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::catalog::{Catalog, CatalogEntry, CatalogError};
use crate::chapter::{ChapterNumber, ChapterRange};
use crate::download::{
    ChapterReport, DownloadEngine, DownloadStats, EngineError, HttpClient, NoProgress,
    ProgressSink,
};

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Chapter enumeration or image listing failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The download engine could not process a chapter.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Why the chapter loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Every chapter in range was processed.
    Completed,
    /// The range contained no chapters.
    NoChapters,
    /// This chapter listed no images; later chapters were not attempted.
    NoImages {
        /// The empty chapter.
        chapter: ChapterNumber,
    },
    /// This chapter's image listing failed; later chapters were not attempted.
    ListingFailed {
        /// The chapter whose page could not be listed.
        chapter: ChapterNumber,
        /// Rendered catalog error.
        reason: String,
    },
}

impl StopReason {
    /// Returns true if the run ended because of an error.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ListingFailed { .. })
    }
}

/// Outcome of a run.
#[derive(Debug)]
pub struct RunSummary {
    /// The manga downloaded.
    pub entry: CatalogEntry,
    /// Directory holding the manga's chapter directories.
    pub directory: PathBuf,
    /// Chapters selected by the range, ascending.
    pub chapters: Vec<ChapterNumber>,
    /// One report per downloaded chapter, in processing order.
    pub reports: Vec<ChapterReport>,
    /// Why the loop ended.
    pub stop: StopReason,
    /// Image totals across all chapters.
    pub stats: DownloadStats,
}

impl RunSummary {
    /// Images written across the run.
    #[must_use]
    pub fn saved(&self) -> usize {
        self.stats.saved()
    }

    /// Images that failed across the run.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.stats.failed()
    }
}

/// Runs enumerate → list → download for one catalog entry.
pub struct Pipeline {
    catalog: Arc<dyn Catalog>,
    client: HttpClient,
    engine: DownloadEngine,
    progress: Arc<dyn ProgressSink>,
}

impl Pipeline {
    /// Creates a pipeline with no progress reporting.
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>, client: HttpClient, engine: DownloadEngine) -> Self {
        Self {
            catalog,
            client,
            engine,
            progress: Arc::new(NoProgress),
        }
    }

    /// Replaces the progress sink.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Downloads every chapter of `entry` inside `range` below `output_root`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Catalog`] if chapter enumeration fails and
    /// [`PipelineError::Engine`] if a chapter directory cannot be created.
    /// Image listing failures end the run with [`StopReason::ListingFailed`]
    /// and per-image failures are reported in the summary instead.
    #[instrument(skip(self, entry, output_root), fields(manga = %entry.title, id = %entry.id))]
    pub async fn run(
        &self,
        entry: &CatalogEntry,
        range: ChapterRange,
        output_root: &Path,
    ) -> Result<RunSummary, PipelineError> {
        let chapters = self.catalog.chapters(&entry.id, range).await?;
        let stats = DownloadStats::new();
        let mut reports = Vec::new();
        let mut stop = if chapters.is_empty() {
            StopReason::NoChapters
        } else {
            StopReason::Completed
        };

        for &chapter in &chapters {
            let images = match self.catalog.chapter_images(&entry.id, chapter).await {
                Ok(images) => images,
                Err(e) => {
                    warn!(%chapter, error = %e, "cannot list chapter images; stopping");
                    stop = StopReason::ListingFailed {
                        chapter,
                        reason: e.to_string(),
                    };
                    break;
                }
            };
            if images.is_empty() {
                warn!(%chapter, "chapter has no images; no further chapters available");
                stop = StopReason::NoImages { chapter };
                break;
            }

            let report = self
                .engine
                .download_chapter(
                    &self.client,
                    output_root,
                    &entry.title,
                    chapter,
                    &images,
                    &self.progress,
                )
                .await?;
            stats.record(&report);
            reports.push(report);
        }

        info!(
            chapters = reports.len(),
            saved = stats.saved(),
            failed = stats.failed(),
            "run complete"
        );

        Ok(RunSummary {
            entry: entry.clone(),
            directory: Self::manga_directory(output_root, entry),
            chapters,
            reports,
            stop,
            stats,
        })
    }

    /// Root directory a run writes `entry` into.
    #[must_use]
    pub fn manga_directory(output_root: &Path, entry: &CatalogEntry) -> PathBuf {
        output_root.join(crate::download::filename::sanitize_path_component(&entry.title))
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("catalog", &self.catalog.name())
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}
