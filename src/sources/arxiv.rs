//! arXiv search source implementation.

use async_trait::async_trait;
use feed_rs::parser;

use crate::models::{Record, RecordBuilder};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

/// Base URL for the arXiv query API
const ARXIV_API_URL: &str = "https://export.arxiv.org/api/query";

/// arXiv search source.
///
/// Queries the Atom API and keeps only entries with a derivable PDF link.
#[derive(Debug, Clone)]
pub struct ArxivSource {
    client: HttpClient,
}

impl ArxivSource {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Parse an Atom feed payload into records, skipping entries without a
    /// usable PDF link.
    fn parse_feed(payload: &[u8]) -> Result<Vec<Record>, SourceError> {
        let feed = parser::parse(payload)
            .map_err(|e| SourceError::Parse(format!("Failed to parse Atom feed: {}", e)))?;

        Ok(feed
            .entries
            .iter()
            .filter_map(Self::parse_entry)
            .collect())
    }

    /// Parse a single feed entry; `None` drops the entry without failing the feed.
    fn parse_entry(entry: &feed_rs::model::Entry) -> Option<Record> {
        let title = entry.title.as_ref()?.content.trim().to_string();
        if title.is_empty() {
            return None;
        }

        let pdf_url = Self::pdf_link(entry)?;

        let authors = entry
            .authors
            .iter()
            .map(|a| a.name.clone())
            .collect::<Vec<_>>();

        let published = entry
            .published
            .map(|d| d.to_rfc3339())
            .unwrap_or_default();

        let summary = entry
            .summary
            .as_ref()
            .map(|s| s.content.trim().to_string())
            .unwrap_or_default();

        Some(
            RecordBuilder::new(title)
                .authors(authors)
                .published(published)
                .summary(summary)
                .url(pdf_url)
                .build(),
        )
    }

    /// Pick the PDF link from an entry's links: the one titled `pdf` or typed
    /// `application/pdf`. An `abs` page link is rewritten into its PDF form.
    fn pdf_link(entry: &feed_rs::model::Entry) -> Option<String> {
        let link = entry.links.iter().find(|l| {
            l.title.as_deref() == Some("pdf")
                || l.media_type.as_deref() == Some("application/pdf")
        })?;

        let href = link.href.clone();
        if href.contains("pdf") {
            Some(href)
        } else {
            Some(format!("{}.pdf", href.replace("abs", "pdf")))
        }
    }
}

#[async_trait]
impl Source for ArxivSource {
    fn id(&self) -> &str {
        "arxiv"
    }

    fn name(&self) -> &str {
        "arXiv"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Record>, SourceError> {
        let url = format!(
            "{}?search_query=all:{}&start=0&max_results={}",
            ARXIV_API_URL,
            urlencoding::encode(query),
            limit
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/atom+xml")
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to reach arXiv: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "arXiv returned status: {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read arXiv response: {}", e)))?;

        Self::parse_feed(bytes.as_ref())
    }
}
