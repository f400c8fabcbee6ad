//! Search source plugins with a trait-based architecture.
//!
//! This module defines the [`Source`] trait that all search sources implement.
//! New sources can be added by implementing the trait and registering them with
//! the [`SourceRegistry`]. Every source takes a free-text query plus a result
//! limit and returns normalized [`Record`]s; failures inside one source never
//! abort the overall query.

mod arxiv;
mod eric;
mod google_books;
mod google_scholar;
mod openlibrary;
mod pmc;
mod registry;
mod semantic;
mod wikibooks;

pub mod mock;

pub use arxiv::ArxivSource;
pub use eric::EricSource;
pub use google_books::GoogleBooksSource;
pub use google_scholar::GoogleScholarSource;
pub use mock::MockSource;
pub use openlibrary::OpenLibrarySource;
pub use pmc::PmcSource;
pub use registry::SourceRegistry;
pub use semantic::SemanticScholarSource;
pub use wikibooks::WikibooksSource;

use crate::models::Record;
use crate::utils::HttpClient;
use async_trait::async_trait;

/// The Source trait defines the interface for all search source plugins.
///
/// # Implementing a New Source
///
/// 1. Create a struct holding the shared [`HttpClient`]
/// 2. Implement `id`, `name`, and `search`
/// 3. Register it with the [`SourceRegistry`]
///
/// `search` returns the records it could parse; individual malformed entries
/// are skipped, while transport failures and non-success statuses surface as a
/// [`SourceError`] for the caller to degrade to an empty result.
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "arxiv", "eric")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Search for documents matching the query, returning at most `limit` records
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Record>, SourceError>;
}

/// Errors that can occur when querying a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (XML, JSON, HTML, etc.)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Non-success status from the source
    #[error("API error: {0}")]
    Api(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

/// GET a URL and return the body as text, mapping transport failures and
/// non-success statuses into [`SourceError`]. Shared by every adapter so the
/// status/timeout handling lives in one place.
pub(crate) async fn fetch_text(
    client: &HttpClient,
    url: &str,
    source: &str,
) -> Result<String, SourceError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SourceError::Network(format!("Failed to reach {}: {}", source, e)))?;

    if !response.status().is_success() {
        return Err(SourceError::Api(format!(
            "{} returned status: {}",
            source,
            response.status()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| SourceError::Network(format!("Failed to read {} response: {}", source, e)))
}

/// Truncate a summary to 200 characters, marking the cut with an ellipsis.
pub(crate) fn truncate_summary(text: &str) -> String {
    const MAX: usize = 200;
    if text.chars().count() > MAX {
        let mut out: String = text.chars().take(MAX).collect();
        out.push_str("...");
        out
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_summary_short_text_untouched() {
        assert_eq!(truncate_summary("short abstract"), "short abstract");
        assert_eq!(truncate_summary(""), "");
    }

    #[test]
    fn test_truncate_summary_long_text() {
        let long = "a".repeat(250);
        let out = truncate_summary(&long);
        assert_eq!(out.chars().count(), 203);
        assert!(out.ends_with("..."));
    }
}
