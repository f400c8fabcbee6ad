//! Record model representing one discovered document from any source.

use serde::{Deserialize, Serialize};

/// A normalized search result from any source.
///
/// Every adapter maps its provider-specific payload into this shape so the
/// download phase can treat results uniformly. Fields a provider cannot supply
/// are left empty or `None`; no uniqueness is enforced across sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Document title
    pub title: String,

    /// Author names, in source order (may be empty)
    pub authors: Vec<String>,

    /// Free-form year or date fragment (may be empty or "Unknown")
    pub published: String,

    /// Short description, truncated by some adapters (may be empty)
    pub summary: String,

    /// Primary download link
    pub url: Option<String>,

    /// Direct PDF link, preferred over `url` when present
    pub pdf_url: Option<String>,

    /// Name of the source that produced this record (set by some adapters only)
    pub source: Option<String>,
}

impl Record {
    /// Create a new record with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: Vec::new(),
            published: String::new(),
            summary: String::new(),
            url: None,
            pdf_url: None,
            source: None,
        }
    }

    /// The link the download worker should fetch: `pdf_url` when set and
    /// non-empty, otherwise `url`.
    pub fn download_url(&self) -> Option<&str> {
        self.pdf_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.url.as_deref().filter(|u| !u.is_empty()))
    }

    /// Whether this record carries enough information to be downloaded
    pub fn is_downloadable(&self) -> bool {
        !self.title.is_empty() && self.download_url().is_some()
    }
}

/// Builder for constructing [`Record`] values
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Create a new builder with the required title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            record: Record::new(title),
        }
    }

    /// Set authors
    pub fn authors(mut self, authors: Vec<String>) -> Self {
        self.record.authors = authors;
        self
    }

    /// Set the publish date fragment
    pub fn published(mut self, published: impl Into<String>) -> Self {
        self.record.published = published.into();
        self
    }

    /// Set the summary
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.record.summary = summary.into();
        self
    }

    /// Set the primary download link
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.record.url = Some(url.into());
        self
    }

    /// Set the direct PDF link
    pub fn pdf_url(mut self, url: impl Into<String>) -> Self {
        self.record.pdf_url = Some(url.into());
        self
    }

    /// Set the source name
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.record.source = Some(source.into());
        self
    }

    /// Build the record
    pub fn build(self) -> Record {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = RecordBuilder::new("Graph Minors")
            .authors(vec!["N. Robertson".to_string(), "P. Seymour".to_string()])
            .published("1983")
            .summary("A series on graph minors.")
            .url("https://example.com/minors.pdf")
            .build();

        assert_eq!(record.title, "Graph Minors");
        assert_eq!(record.authors.len(), 2);
        assert_eq!(record.published, "1983");
        assert_eq!(record.download_url(), Some("https://example.com/minors.pdf"));
        assert!(record.is_downloadable());
    }

    #[test]
    fn test_pdf_url_preferred() {
        let record = RecordBuilder::new("Test")
            .url("https://example.com/page")
            .pdf_url("https://example.com/direct.pdf")
            .build();

        assert_eq!(record.download_url(), Some("https://example.com/direct.pdf"));
    }

    #[test]
    fn test_empty_pdf_url_falls_back() {
        let record = RecordBuilder::new("Test")
            .url("https://example.com/page")
            .pdf_url("")
            .build();

        assert_eq!(record.download_url(), Some("https://example.com/page"));
    }

    #[test]
    fn test_record_without_urls_not_downloadable() {
        let record = Record::new("No Links Here");
        assert_eq!(record.download_url(), None);
        assert!(!record.is_downloadable());
    }

    #[test]
    fn test_record_without_title_not_downloadable() {
        let record = RecordBuilder::new("").url("https://example.com/x.pdf").build();
        assert!(!record.is_downloadable());
    }
}
