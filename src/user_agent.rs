//! User-Agent strings for catalog and image HTTP clients.

const PROJECT_UA_URL: &str = "https://github.com/fierce/manga-dl";

fn user_agent(purpose: &str) -> String {
    format!(
        "manga-dl/{} ({purpose}; +{PROJECT_UA_URL})",
        env!("CARGO_PKG_VERSION")
    )
}

/// User-Agent for image downloads.
#[must_use]
pub(crate) fn default_download_user_agent() -> String {
    user_agent("image-fetch")
}

/// User-Agent for catalog page requests.
#[must_use]
pub(crate) fn default_catalog_user_agent() -> String {
    user_agent("catalog-fetch")
}
