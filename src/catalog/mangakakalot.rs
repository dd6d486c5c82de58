//! Catalog implementation for mangakakalot-style sites.
//!
//! Endpoints, relative to the configured base URL:
//! - search: `/search/<query>`
//! - manga detail: `/manga/manga-<id>`
//! - chapter reader: `/chapter/manga-<id>/chapter-<chapter>`

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};
use url::Url;

use super::http_client::{build_catalog_http_client, fetch_page};
use super::parse::{parse_chapter_images, parse_chapter_list, parse_search_results};
use super::{Catalog, CatalogConfig, CatalogEntry, CatalogError};
use crate::chapter::{ChapterNumber, ChapterRange};

const CATALOG_NAME: &str = "mangakakalot";

/// Scraping catalog for mangakakalot and its mirrors.
pub struct MangakakalotCatalog {
    client: Client,
    base_url: String,
}

impl MangakakalotCatalog {
    /// Creates a catalog client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidInput`] if the base URL is not an
    /// absolute http(s) URL, or [`CatalogError::ClientBuild`] if client
    /// construction fails.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        let valid = Url::parse(&base_url)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host());
        if !valid {
            return Err(CatalogError::invalid_input(
                &format!("catalog base URL '{}' is not an absolute http(s) URL", config.base_url),
                "Pass a site root such as https://ww8.mangakakalot.tv",
            ));
        }

        Ok(Self {
            client: build_catalog_http_client(CATALOG_NAME, config)?,
            base_url,
        })
    }

    /// Returns the normalized base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search page URL for `query`.
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        format!("{}/search/{}", self.base_url, urlencoding::encode(query))
    }

    /// Manga detail page URL.
    #[must_use]
    pub fn manga_url(&self, manga_id: &str) -> String {
        format!("{}/manga/manga-{}", self.base_url, urlencoding::encode(manga_id))
    }

    /// Chapter reader page URL.
    #[must_use]
    pub fn chapter_url(&self, manga_id: &str, chapter: ChapterNumber) -> String {
        format!(
            "{}/chapter/manga-{}/chapter-{}",
            self.base_url,
            urlencoding::encode(manga_id),
            urlencoding::encode(&chapter.to_string())
        )
    }
}

impl std::fmt::Debug for MangakakalotCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MangakakalotCatalog")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn require_manga_id(manga_id: &str) -> Result<&str, CatalogError> {
    let manga_id = manga_id.trim();
    if manga_id.is_empty() {
        return Err(CatalogError::invalid_input(
            "cannot get chapters of invalid manga",
            "Resolve the manga through search before listing chapters",
        ));
    }
    Ok(manga_id)
}

#[async_trait]
impl Catalog for MangakakalotCatalog {
    fn name(&self) -> &'static str {
        CATALOG_NAME
    }

    #[instrument(skip(self), fields(catalog = CATALOG_NAME))]
    async fn search(&self, query: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::invalid_input(
                "please provide a valid manga name",
                "Pass the title to search for, e.g. `manga-dl \"one piece\"`",
            ));
        }

        let url = self.search_url(query);
        let html = fetch_page(&self.client, &url).await?;
        let entries = parse_search_results(&html);
        if entries.is_empty() {
            return Err(CatalogError::no_matches(query));
        }

        info!(matches = entries.len(), "search complete");
        Ok(entries)
    }

    #[instrument(skip(self), fields(catalog = CATALOG_NAME))]
    async fn chapters(
        &self,
        manga_id: &str,
        range: ChapterRange,
    ) -> Result<Vec<ChapterNumber>, CatalogError> {
        let manga_id = require_manga_id(manga_id)?;

        let url = self.manga_url(manga_id);
        let html = fetch_page(&self.client, &url).await?;
        let listed = parse_chapter_list(&html)
            .ok_or_else(|| CatalogError::markup(&url, "no chapter list found"))?;

        let chapters = range.select(listed);
        info!(count = chapters.len(), "found chapters");
        Ok(chapters)
    }

    #[instrument(skip(self, chapter), fields(catalog = CATALOG_NAME, chapter = %chapter))]
    async fn chapter_images(
        &self,
        manga_id: &str,
        chapter: ChapterNumber,
    ) -> Result<Vec<String>, CatalogError> {
        let manga_id = require_manga_id(manga_id)?;

        let url = self.chapter_url(manga_id, chapter);
        let page_url = Url::parse(&url).map_err(|_| {
            CatalogError::invalid_input(
                &format!("chapter URL '{url}' is not valid"),
                "Check the manga identifier",
            )
        })?;
        let html = fetch_page(&self.client, &url).await?;
        let images = parse_chapter_images(&html, &page_url)
            .ok_or_else(|| CatalogError::markup(&url, "no reader container found"))?;

        info!(count = images.len(), "chapter images listed");
        Ok(images)
    }
}
