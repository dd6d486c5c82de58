//! Error types for catalog operations.
//!
//! This module defines structured errors for search, selection, chapter
//! enumeration and image listing, following the What/Why/Fix pattern used
//! across the project.

use thiserror::Error;

/// Errors that can occur while talking to a manga catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required input was empty or malformed
    #[error("invalid input: {reason}\n  Suggestion: {suggestion}")]
    InvalidInput {
        /// Why the input was rejected
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The catalog HTTP client could not be constructed
    #[error("failed to build HTTP client for catalog '{catalog}': {source}")]
    ClientBuild {
        /// Catalog name
        catalog: String,
        /// Underlying builder error
        #[source]
        source: reqwest::Error,
    },

    /// The request could not be completed (DNS, connection, timeout, body read)
    #[error("request to {url} failed: {source}")]
    Request {
        /// Requested URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The catalog answered with a non-success status
    #[error("request to {url} responded with status: {status}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The search returned no entries
    #[error(
        "no manga was found with the search term '{query}'\n  Suggestion: Try a shorter query or a different spelling"
    )]
    NoMatches {
        /// The search term
        query: String,
    },

    /// The chosen candidate index does not exist
    #[error("selection {index} is out of range: {count} candidate(s) available")]
    InvalidSelection {
        /// The chosen index
        index: usize,
        /// Number of candidates offered
        count: usize,
    },

    /// No choice could be obtained from the user
    #[error("selection aborted: {reason}")]
    SelectionAborted {
        /// Why no choice was made
        reason: String,
    },

    /// The page did not contain the expected elements
    #[error("unexpected page structure at {url}: {reason}")]
    Markup {
        /// Page URL
        url: String,
        /// What was missing
        reason: String,
    },
}

impl CatalogError {
    /// Creates an `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(reason: &str, suggestion: &str) -> Self {
        Self::InvalidInput {
            reason: reason.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    /// Creates a `Request` error.
    #[must_use]
    pub fn request(url: &str, source: reqwest::Error) -> Self {
        Self::Request {
            url: url.to_string(),
            source,
        }
    }

    /// Creates an `HttpStatus` error.
    #[must_use]
    pub fn http_status(url: &str, status: u16) -> Self {
        Self::HttpStatus {
            url: url.to_string(),
            status,
        }
    }

    /// Creates a `NoMatches` error.
    #[must_use]
    pub fn no_matches(query: &str) -> Self {
        Self::NoMatches {
            query: query.to_string(),
        }
    }

    /// Creates a `SelectionAborted` error.
    #[must_use]
    pub fn selection_aborted(reason: impl Into<String>) -> Self {
        Self::SelectionAborted {
            reason: reason.into(),
        }
    }

    /// Creates a `Markup` error.
    #[must_use]
    pub fn markup(url: &str, reason: &str) -> Self {
        Self::Markup {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let error = CatalogError::invalid_input(
            "please provide a valid manga name",
            "Pass a non-empty title",
        );
        let msg = error.to_string();
        assert!(msg.contains("please provide a valid manga name"));
        assert!(msg.contains("Suggestion: Pass a non-empty title"));
    }

    #[test]
    fn test_http_status_display() {
        let msg = CatalogError::http_status("https://catalog.test/search/x", 503).to_string();
        assert!(msg.contains("https://catalog.test/search/x"));
        assert!(msg.contains("503"));
    }

    #[test]
    fn test_no_matches_display() {
        let msg = CatalogError::no_matches("unknown title").to_string();
        assert!(msg.contains("'unknown title'"));
        assert!(msg.contains("Suggestion"));
    }

    #[test]
    fn test_invalid_selection_display() {
        let msg = CatalogError::InvalidSelection { index: 7, count: 3 }.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains("3 candidate(s)"));
    }

    #[test]
    fn test_markup_display() {
        let msg = CatalogError::markup("https://catalog.test/manga/manga-x", "missing chapter list")
            .to_string();
        assert!(msg.contains("unexpected page structure"));
        assert!(msg.contains("missing chapter list"));
    }
}
