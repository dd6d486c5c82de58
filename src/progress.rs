//! Per-chapter progress bar for download runs.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use manga_dl::{ChapterNumber, ChapterReport, ImageOutcome, ProgressSink};

const BAR_TEMPLATE: &str = "{prefix:>12} [{bar:30}] {pos}/{len} {msg}";

/// Returns true when a progress bar should be drawn.
pub(crate) fn should_show_progress(stderr_is_terminal: bool, quiet: bool) -> bool {
    stderr_is_terminal && !quiet
}

/// Draws one bar per chapter, advanced as each image finishes.
pub(crate) struct ChapterProgress {
    bar: Mutex<Option<ProgressBar>>,
    failed: AtomicUsize,
}

impl ChapterProgress {
    pub(crate) fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            failed: AtomicUsize::new(0),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }
}

impl ProgressSink for ChapterProgress {
    fn chapter_started(&self, chapter: ChapterNumber, images: usize) {
        let bar = ProgressBar::new(u64::try_from(images).unwrap_or(u64::MAX));
        bar.set_style(Self::style());
        bar.set_prefix(format!("chapter {chapter}"));
        self.failed.store(0, Ordering::SeqCst);
        if let Ok(mut current) = self.bar.lock() {
            if let Some(previous) = current.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn image_finished(&self, outcome: &ImageOutcome) {
        let failed = if outcome.is_saved() {
            self.failed.load(Ordering::SeqCst)
        } else {
            self.failed.fetch_add(1, Ordering::SeqCst) + 1
        };
        let Ok(current) = self.bar.lock() else {
            return;
        };
        if let Some(bar) = current.as_ref() {
            bar.inc(1);
            if failed > 0 {
                bar.set_message(format!("({failed} failed)"));
            }
        }
    }

    fn chapter_finished(&self, _report: &ChapterReport) {
        let bar = self.bar.lock().ok().and_then(|mut current| current.take());
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
    }
}
