//! Manga catalog access: search, selection, chapter and image listing.
//!
//! Resolution and selection are separate steps. [`Catalog::search`] returns
//! every candidate for a query; [`select_entry`] picks one through a caller
//! supplied chooser, which is only consulted when the choice is ambiguous.
//! Interactive prompting therefore lives entirely in the binary.
//!
//! # Architecture
//!
//! - [`Catalog`] - Async trait a catalog site implements
//! - [`MangakakalotCatalog`] - HTML-scraping implementation for the default site
//! - [`CatalogEntry`] - Search candidate (identifier + canonical title)
//! - [`CatalogConfig`] - Base URL and request timeouts
//!
//! # Example
//!
//! ```no_run
//! use manga_dl::catalog::{Catalog, CatalogConfig, MangakakalotCatalog, select_entry};
//! use manga_dl::ChapterRange;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = MangakakalotCatalog::new(&CatalogConfig::default())?;
//! let candidates = catalog.search("one piece").await?;
//! let entry = select_entry(candidates, |_| Ok(0))?;
//! let chapters = catalog.chapters(&entry.id, ChapterRange::unbounded()).await?;
//! println!("{} has {} chapters", entry.title, chapters.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod http_client;
mod mangakakalot;
pub mod parse;

pub use error::CatalogError;
pub use mangakakalot::MangakakalotCatalog;

use async_trait::async_trait;
use tracing::info;

use crate::chapter::{ChapterNumber, ChapterRange};

/// Default catalog site.
pub const DEFAULT_BASE_URL: &str = "https://ww8.mangakakalot.tv";

/// Default connect timeout for catalog pages.
pub const CATALOG_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default read timeout for catalog pages.
pub const CATALOG_READ_TIMEOUT_SECS: u64 = 30;

/// A manga found by search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Catalog identifier, taken from the trailing segment of the result link.
    pub id: String,
    /// Canonical title as shown by the catalog.
    pub title: String,
}

impl CatalogEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Catalog endpoint and timeout configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Site root, e.g. `https://ww8.mangakakalot.tv`.
    pub base_url: String,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub read_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: CATALOG_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: CATALOG_READ_TIMEOUT_SECS,
        }
    }
}

impl CatalogConfig {
    /// Default configuration pointed at another site root (mirrors, tests).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// A manga catalog that can be searched and read.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Short catalog name used in logs.
    fn name(&self) -> &'static str;

    /// Returns every candidate matching `query`, in catalog order.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidInput`] if `query` is blank
    /// - [`CatalogError::Request`] / [`CatalogError::HttpStatus`] if the request fails
    /// - [`CatalogError::NoMatches`] if nothing was found
    async fn search(&self, query: &str) -> Result<Vec<CatalogEntry>, CatalogError>;

    /// Returns the manga's chapters inside `range`, ascending and unique.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidInput`] if `manga_id` is blank
    /// - [`CatalogError::Request`] / [`CatalogError::HttpStatus`] if the request fails
    /// - [`CatalogError::Markup`] if the page has no chapter list
    async fn chapters(
        &self,
        manga_id: &str,
        range: ChapterRange,
    ) -> Result<Vec<ChapterNumber>, CatalogError>;

    /// Returns the chapter's image URLs in reading order (possibly empty).
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidInput`] if `manga_id` is blank
    /// - [`CatalogError::Request`] / [`CatalogError::HttpStatus`] if the request fails
    /// - [`CatalogError::Markup`] if the page has no reader container
    async fn chapter_images(
        &self,
        manga_id: &str,
        chapter: ChapterNumber,
    ) -> Result<Vec<String>, CatalogError>;
}

/// Picks one entry from search candidates.
///
/// A single candidate is returned without consulting `choose`. With several
/// candidates, `choose` receives the full list and returns an index.
///
/// # Errors
///
/// - [`CatalogError::InvalidSelection`] if the list is empty or the index is out of range
/// - any error returned by `choose`
pub fn select_entry<F>(candidates: Vec<CatalogEntry>, choose: F) -> Result<CatalogEntry, CatalogError>
where
    F: FnOnce(&[CatalogEntry]) -> Result<usize, CatalogError>,
{
    let count = candidates.len();
    let index = match count {
        0 => return Err(CatalogError::InvalidSelection { index: 0, count }),
        1 => 0,
        _ => {
            info!(count, "multiple matches were found");
            choose(&candidates)?
        }
    };

    let entry = candidates
        .into_iter()
        .nth(index)
        .ok_or(CatalogError::InvalidSelection { index, count })?;
    info!(title = %entry.title, id = %entry.id, "selected manga");
    Ok(entry)
}
