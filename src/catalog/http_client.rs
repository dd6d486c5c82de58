//! Shared HTTP client construction and page fetching for catalogs.
//!
//! Catalog requests use shorter timeouts than image downloads; pages are
//! small and a stalled search should fail quickly.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, instrument};

use super::{CatalogConfig, CatalogError};
use crate::user_agent;

/// Builds a catalog HTTP client from `config`.
///
/// # Errors
///
/// Returns [`CatalogError::ClientBuild`] when client construction fails.
pub fn build_catalog_http_client(
    catalog_name: &str,
    config: &CatalogConfig,
) -> Result<Client, CatalogError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.read_timeout_secs))
        .user_agent(user_agent::default_catalog_user_agent())
        .gzip(true)
        .build()
        .map_err(|source| CatalogError::ClientBuild {
            catalog: catalog_name.to_string(),
            source,
        })
}

/// Fetches `url` and returns the response body as text.
///
/// # Errors
///
/// Returns [`CatalogError::Request`] on transport failure and
/// [`CatalogError::HttpStatus`] on a non-success status.
#[instrument(skip(client))]
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, CatalogError> {
    let response = client
        .get(url)
        .header(ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await
        .map_err(|e| CatalogError::request(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::http_status(url, status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| CatalogError::request(url, e))?;
    debug!(bytes = body.len(), "page fetched");
    Ok(body)
}
