//! OpenLibrary search source implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{Record, RecordBuilder};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

const OPENLIBRARY_SEARCH_URL: &str = "https://openlibrary.org/search.json";
const OPENLIBRARY_BASE_URL: &str = "https://openlibrary.org";

const SEARCH_FIELDS: &str =
    "key,title,author_name,first_publish_year,edition_count,ebook_count_i,number_of_pages_median,subject";

/// OpenLibrary search source.
///
/// The catalog has no direct file links; the summary is assembled from the
/// facts the search endpoint returns.
#[derive(Debug, Clone)]
pub struct OpenLibrarySource {
    client: HttpClient,
}

impl OpenLibrarySource {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    fn parse_response(data: OlSearchResponse) -> Vec<Record> {
        data.docs.into_iter().filter_map(Self::parse_doc).collect()
    }

    fn parse_doc(doc: OlDoc) -> Option<Record> {
        let title = doc.title.clone().filter(|t| !t.is_empty())?;
        let key = doc.key.clone().filter(|k| !k.is_empty())?;

        let published = doc
            .first_publish_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        Some(
            RecordBuilder::new(title)
                .authors(doc.author_name.clone())
                .published(published)
                .summary(Self::build_summary(&doc))
                .url(format!("{}{}", OPENLIBRARY_BASE_URL, key))
                .source("OpenLibrary")
                .build(),
        )
    }

    /// Concatenate the available catalog facts into a readable summary.
    fn build_summary(doc: &OlDoc) -> String {
        let mut parts = Vec::new();

        if let Some(editions) = doc.edition_count {
            parts.push(format!("{} editions", editions));
        }
        if let Some(ebooks) = doc.ebook_count_i {
            parts.push(format!("{} ebooks", ebooks));
        }
        if let Some(pages) = doc.number_of_pages_median {
            parts.push(format!("{} pages (median)", pages));
        }
        if !doc.subject.is_empty() {
            let subjects: Vec<&str> = doc.subject.iter().take(3).map(|s| s.as_str()).collect();
            parts.push(format!("Subjects: {}", subjects.join(", ")));
        }

        parts.join(". ")
    }
}

#[async_trait]
impl Source for OpenLibrarySource {
    fn id(&self) -> &str {
        "openlibrary"
    }

    fn name(&self) -> &str {
        "OpenLibrary"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Record>, SourceError> {
        let url = format!(
            "{}?q={}&fields={}&limit={}",
            OPENLIBRARY_SEARCH_URL,
            urlencoding::encode(query),
            SEARCH_FIELDS,
            limit
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to reach OpenLibrary: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "OpenLibrary returned status: {}",
                response.status()
            )));
        }

        let data: OlSearchResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse JSON: {}", e)))?;

        Ok(Self::parse_response(data))
    }
}

// ===== OpenLibrary API types =====

#[derive(Debug, Deserialize)]
struct OlSearchResponse {
    #[serde(default)]
    docs: Vec<OlDoc>,
}

#[derive(Debug, Deserialize)]
struct OlDoc {
    key: Option<String>,
    title: Option<String>,
    #[serde(default)]
    author_name: Vec<String>,
    first_publish_year: Option<i64>,
    edition_count: Option<i64>,
    ebook_count_i: Option<i64>,
    number_of_pages_median: Option<i64>,
    #[serde(default)]
    subject: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "numFound": 2,
        "docs": [
            {
                "key": "/works/OL123W",
                "title": "Introduction to Graph Theory",
                "author_name": ["Douglas West"],
                "first_publish_year": 1996,
                "edition_count": 12,
                "ebook_count_i": 3,
                "number_of_pages_median": 512,
                "subject": ["Graph theory", "Mathematics", "Combinatorics", "Networks"]
            },
            {
                "key": "/works/OL456W",
                "title": "Sparse Catalog Entry"
            }
        ]
    }"#;

    #[test]
    fn test_parse_response() {
        let data: OlSearchResponse = serde_json::from_str(RESPONSE).unwrap();
        let records = OpenLibrarySource::parse_response(data);

        assert_eq!(records.len(), 2);

        let full = &records[0];
        assert_eq!(full.title, "Introduction to Graph Theory");
        assert_eq!(full.authors, vec!["Douglas West"]);
        assert_eq!(full.published, "1996");
        assert_eq!(
            full.summary,
            "12 editions. 3 ebooks. 512 pages (median). Subjects: Graph theory, Mathematics, Combinatorics"
        );
        assert_eq!(
            full.url.as_deref(),
            Some("https://openlibrary.org/works/OL123W")
        );
        assert_eq!(full.source.as_deref(), Some("OpenLibrary"));

        let sparse = &records[1];
        assert_eq!(sparse.published, "Unknown");
        assert_eq!(sparse.summary, "");
        assert!(sparse.authors.is_empty());
    }

    #[test]
    fn test_doc_without_key_skipped() {
        let json = r#"{"docs": [{"title": "Keyless"}]}"#;
        let data: OlSearchResponse = serde_json::from_str(json).unwrap();
        assert!(OpenLibrarySource::parse_response(data).is_empty());
    }
}
