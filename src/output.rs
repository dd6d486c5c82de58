//! CLI output formatting for run summaries.

use manga_dl::{RunSummary, StopReason};

/// Message when the range selected nothing.
pub(crate) const NO_CHAPTERS_MESSAGE: &str = "No chapters found in the requested range";

/// Builds the summary lines printed after a run.
pub(crate) fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = Vec::new();

    for report in &summary.reports {
        lines.push(format!(
            "chapter {}: {}/{} images saved to {}",
            report.chapter,
            report.saved(),
            report.images.len(),
            report.directory.display()
        ));
        for failure in report.failures() {
            if let Err(error) = &failure.result {
                lines.push(format!("  image {} failed: {error}", failure.index));
            }
        }
    }

    match &summary.stop {
        StopReason::Completed => {}
        StopReason::NoChapters => lines.push(NO_CHAPTERS_MESSAGE.to_string()),
        StopReason::NoImages { chapter } => lines.push(format!(
            "Chapter {chapter} lists no images; no further chapters downloaded"
        )),
        StopReason::ListingFailed { chapter, reason } => lines.push(format!(
            "Chapter {chapter} could not be listed ({reason}); no further chapters downloaded"
        )),
    }

    lines.push(format!(
        "{}: {} image(s) saved, {} failed in {}",
        summary.entry.title,
        summary.saved(),
        summary.failed(),
        summary.directory.display()
    ));
    lines
}

/// Prints the run summary to stdout.
pub(crate) fn print_summary(summary: &RunSummary) {
    for line in summary_lines(summary) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use manga_dl::download::SavedImage;
    use manga_dl::{
        CatalogEntry, ChapterNumber, ChapterReport, DownloadError, DownloadStats, ImageOutcome,
    };

    use super::*;

    fn chapter(value: &str) -> ChapterNumber {
        value.parse().unwrap()
    }

    fn report() -> ChapterReport {
        ChapterReport {
            chapter: chapter("1"),
            directory: PathBuf::from("out/Title/chapter_1"),
            images: vec![
                ImageOutcome {
                    index: 0,
                    url: "https://cdn.test/0.jpg".to_string(),
                    result: Ok(SavedImage {
                        path: PathBuf::from("out/Title/chapter_1/image_0.jpg"),
                        bytes: 10,
                    }),
                },
                ImageOutcome {
                    index: 1,
                    url: "https://cdn.test/1.jpg".to_string(),
                    result: Err(DownloadError::http_status("https://cdn.test/1.jpg", 404)),
                },
            ],
        }
    }

    fn summary(reports: Vec<ChapterReport>, stop: StopReason) -> RunSummary {
        let stats = DownloadStats::new();
        for report in &reports {
            stats.record(report);
        }
        RunSummary {
            entry: CatalogEntry::new("ab1", "Title"),
            directory: PathBuf::from("out/Title"),
            chapters: reports.iter().map(|r| r.chapter).collect(),
            reports,
            stop,
            stats,
        }
    }

    #[test]
    fn test_summary_lines_list_chapters_and_failures() {
        let lines = summary_lines(&summary(vec![report()], StopReason::Completed));
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("chapter 1: 1/2 images saved to "));
        assert!(lines[1].starts_with("  image 1 failed: "));
        assert!(lines[1].contains("404"));
        assert_eq!(
            lines[2],
            format!(
                "Title: 1 image(s) saved, 1 failed in {}",
                PathBuf::from("out/Title").display()
            )
        );
    }

    #[test]
    fn test_summary_lines_no_chapters() {
        let lines = summary_lines(&summary(Vec::new(), StopReason::NoChapters));
        assert_eq!(lines[0], NO_CHAPTERS_MESSAGE);
        assert!(lines[1].starts_with("Title: 0 image(s) saved, 0 failed in "));
    }

    #[test]
    fn test_summary_lines_listing_failure() {
        let lines = summary_lines(&summary(
            vec![report()],
            StopReason::ListingFailed {
                chapter: chapter("2"),
                reason: "responded with status: 404".to_string(),
            },
        ));
        assert!(lines.contains(
            &"Chapter 2 could not be listed (responded with status: 404); no further chapters downloaded"
                .to_string()
        ));
    }

    #[test]
    fn test_summary_lines_stopped_at_empty_chapter() {
        let lines = summary_lines(&summary(
            vec![report()],
            StopReason::NoImages {
                chapter: chapter("2"),
            },
        ));
        assert!(lines.contains(
            &"Chapter 2 lists no images; no further chapters downloaded".to_string()
        ));
    }
}
