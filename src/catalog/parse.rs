//! HTML extraction for catalog pages.
//!
//! Functions here are synchronous and return owned data so the parsed
//! document never lives across an `.await`.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use super::CatalogEntry;
use crate::chapter::ChapterNumber;

/// Compiles a selector at static init; panics on invalid pattern.
fn compile_static_selector(pattern: &str) -> Selector {
    Selector::parse(pattern).unwrap_or_else(|e| panic!("invalid static selector '{pattern}': {e}"))
}

static STORY_ITEM: LazyLock<Selector> = LazyLock::new(|| compile_static_selector(".story_item"));
static STORY_NAME: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector("h3.story_name"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("a"));
static CHAPTER_LIST: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector(".chapter-list"));
static READER: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("#vungdoc"));
static IMAGE: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("img"));

/// Lazy-load attribute holding the real image source.
const LAZY_SRC_ATTR: &str = "data-src";

/// Returns the final `-`-delimited segment of a link, ignoring a trailing `/`.
#[must_use]
pub fn trailing_segment(href: &str) -> Option<&str> {
    href.trim()
        .trim_end_matches('/')
        .rsplit('-')
        .next()
        .filter(|segment| !segment.is_empty())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extracts search candidates in page order.
///
/// Each `.story_item` yields an entry whose title is the trimmed text of
/// its `h3.story_name` and whose id is the trailing segment of its first
/// link. Items missing either part are skipped.
#[must_use]
pub fn parse_search_results(html: &str) -> Vec<CatalogEntry> {
    let document = Html::parse_document(html);
    let mut entries = Vec::new();

    for item in document.select(&STORY_ITEM) {
        let Some(title) = item.select(&STORY_NAME).next().map(element_text) else {
            warn!("search result without a story name; skipping");
            continue;
        };
        let href = item
            .select(&ANCHOR)
            .next()
            .and_then(|link| link.value().attr("href"));
        let Some(id) = href.and_then(trailing_segment) else {
            warn!(title = %title, "search result without a usable link; skipping");
            continue;
        };
        entries.push(CatalogEntry::new(id, title));
    }

    entries
}

/// Extracts chapter numbers from the links of the first `.chapter-list`.
///
/// Returns `None` if the page has no chapter list. Links whose trailing
/// segment is not a number are skipped. The result is unsorted.
#[must_use]
pub fn parse_chapter_list(html: &str) -> Option<Vec<ChapterNumber>> {
    let document = Html::parse_document(html);
    let list = document.select(&CHAPTER_LIST).next()?;

    let chapters = list
        .select(&ANCHOR)
        .filter_map(|link| {
            let href = link.value().attr("href")?;
            match trailing_segment(href).map(str::parse::<ChapterNumber>) {
                Some(Ok(chapter)) => Some(chapter),
                _ => {
                    warn!(href, "chapter link without a chapter number; skipping");
                    None
                }
            }
        })
        .collect();
    Some(chapters)
}

/// Extracts image URLs, in order, from the `#vungdoc` reader container.
///
/// Sources are read from the `data-src` attribute and resolved against
/// `page_url`. Images without one are skipped. Returns `None` if the page
/// has no reader container.
#[must_use]
pub fn parse_chapter_images(html: &str, page_url: &Url) -> Option<Vec<String>> {
    let document = Html::parse_document(html);
    let reader = document.select(&READER).next()?;

    let images = reader
        .select(&IMAGE)
        .filter_map(|image| {
            let src = image
                .value()
                .attr(LAZY_SRC_ATTR)
                .map(str::trim)
                .filter(|src| !src.is_empty());
            let Some(src) = src else {
                debug!("image without {LAZY_SRC_ATTR}; skipping");
                return None;
            };
            match page_url.join(src) {
                Ok(url) => Some(url.to_string()),
                Err(e) => {
                    warn!(src, error = %e, "unresolvable image source; skipping");
                    None
                }
            }
        })
        .collect();
    Some(images)
}
