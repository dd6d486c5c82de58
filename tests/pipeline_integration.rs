//! Integration tests for a whole run against a mock catalog site.

use std::sync::Arc;

use manga_dl::{
    CatalogConfig, CatalogEntry, ChapterRange, DownloadEngine, HttpClient, MangakakalotCatalog,
    Pipeline, StopReason,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MANGA_ID: &str = "ab951409";

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_image(server: &MockServer, image_path: &str) {
    Mock::given(method("GET"))
        .and(path(image_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg".to_vec()))
        .mount(server)
        .await;
}

/// Mounts a manga page listing `chapters`, each with the given number of images.
async fn mount_manga(server: &MockServer, chapters: &[(&str, usize)]) {
    let links: String = chapters
        .iter()
        .map(|(chapter, _)| {
            format!(r#"<a href="/chapter/manga-{MANGA_ID}/chapter-{chapter}">Chapter {chapter}</a>"#)
        })
        .collect();
    mount_page(
        server,
        &format!("/manga/manga-{MANGA_ID}"),
        format!(r#"<div class="chapter-list">{links}</div>"#),
    )
    .await;

    for (chapter, count) in chapters {
        let mut imgs = String::new();
        for i in 0..*count {
            let image_path = format!("/img/{chapter}/{i}.jpg");
            mount_image(server, &image_path).await;
            imgs.push_str(&format!(r#"<img data-src="{}{image_path}">"#, server.uri()));
        }
        mount_page(
            server,
            &format!("/chapter/manga-{MANGA_ID}/chapter-{chapter}"),
            format!(r#"<div id="vungdoc">{imgs}</div>"#),
        )
        .await;
    }
}

fn pipeline_for(server: &MockServer) -> Pipeline {
    let catalog = MangakakalotCatalog::new(&CatalogConfig::with_base_url(server.uri()))
        .expect("catalog should build");
    Pipeline::new(
        Arc::new(catalog),
        HttpClient::new().unwrap(),
        DownloadEngine::new(4).unwrap(),
    )
}

fn entry() -> CatalogEntry {
    CatalogEntry::new(MANGA_ID, "Berserk")
}

#[tokio::test]
async fn test_run_downloads_every_chapter_in_range() {
    let server = MockServer::start().await;
    mount_manga(&server, &[("3", 1), ("2", 2), ("1", 3)]).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let range = ChapterRange::parse(Some("2"), Some("3")).unwrap();
    let summary = pipeline_for(&server)
        .run(&entry(), range, temp_dir.path())
        .await
        .unwrap();

    assert_eq!(summary.stop, StopReason::Completed);
    assert_eq!(summary.saved(), 3);
    assert_eq!(summary.failed(), 0);

    let root = temp_dir.path().join("Berserk");
    assert!(!root.join("chapter_1").exists());
    assert!(root.join("chapter_2").join("image_0.jpg").exists());
    assert!(root.join("chapter_2").join("image_1.jpg").exists());
    assert!(root.join("chapter_3").join("image_0.jpg").exists());
}

#[tokio::test]
async fn test_run_stops_at_first_chapter_without_images() {
    let server = MockServer::start().await;
    mount_manga(&server, &[("1", 1), ("2", 0), ("3", 1)]).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let summary = pipeline_for(&server)
        .run(&entry(), ChapterRange::unbounded(), temp_dir.path())
        .await
        .unwrap();

    assert_eq!(
        summary.stop,
        StopReason::NoImages {
            chapter: "2".parse().unwrap()
        }
    );
    assert_eq!(summary.reports.len(), 1);
    let root = temp_dir.path().join("Berserk");
    assert!(root.join("chapter_1").join("image_0.jpg").exists());
    assert!(!root.join("chapter_2").exists());
    assert!(!root.join("chapter_3").exists());

    let requested_chapter_3 = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .any(|request| request.url.path().ends_with("/chapter-3"));
    assert!(!requested_chapter_3, "chapter 3 must never be listed");
}

#[tokio::test]
async fn test_run_upper_bound_below_lower_is_ignored() {
    let server = MockServer::start().await;
    mount_manga(&server, &[("4", 1), ("5", 1), ("6", 1)]).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let range = ChapterRange::parse(Some("5"), Some("2")).unwrap();
    let summary = pipeline_for(&server)
        .run(&entry(), range, temp_dir.path())
        .await
        .unwrap();

    let chapters: Vec<String> = summary.chapters.iter().map(ToString::to_string).collect();
    assert_eq!(chapters, ["5", "6"]);
    assert_eq!(summary.saved(), 2);
}

#[tokio::test]
async fn test_run_with_no_chapters_in_range() {
    let server = MockServer::start().await;
    mount_manga(&server, &[("1", 1)]).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let range = ChapterRange::parse(Some("50"), None).unwrap();
    let summary = pipeline_for(&server)
        .run(&entry(), range, temp_dir.path())
        .await
        .unwrap();

    assert_eq!(summary.stop, StopReason::NoChapters);
    assert_eq!(summary.saved(), 0);
    assert!(!temp_dir.path().join("Berserk").exists());
}

#[tokio::test]
async fn test_run_keeps_saved_chapters_when_listing_fails() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        &format!("/manga/manga-{MANGA_ID}"),
        format!(
            r#"<div class="chapter-list">
                 <a href="/chapter/manga-{MANGA_ID}/chapter-1">1</a>
                 <a href="/chapter/manga-{MANGA_ID}/chapter-2">2</a>
               </div>"#
        ),
    )
    .await;
    mount_image(&server, "/img/1/0.jpg").await;
    mount_page(
        &server,
        &format!("/chapter/manga-{MANGA_ID}/chapter-1"),
        format!(r#"<div id="vungdoc"><img data-src="{}/img/1/0.jpg"></div>"#, server.uri()),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("/chapter/manga-{MANGA_ID}/chapter-2")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let summary = pipeline_for(&server)
        .run(&entry(), ChapterRange::unbounded(), temp_dir.path())
        .await
        .expect("a listing failure must not discard the run");

    match &summary.stop {
        StopReason::ListingFailed { chapter, reason } => {
            assert_eq!(chapter.to_string(), "2");
            assert!(reason.contains("404"), "reason: {reason}");
        }
        other => panic!("unexpected stop reason: {other:?}"),
    }
    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.saved(), 1);
    assert!(
        temp_dir
            .path()
            .join("Berserk")
            .join("chapter_1")
            .join("image_0.jpg")
            .exists()
    );
}
