//! Google Books search source implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{Record, RecordBuilder};
use crate::sources::{truncate_summary, Source, SourceError};
use crate::utils::HttpClient;

const BOOKS_API_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Google Books search source.
///
/// Restricted to free ebooks; items without a PDF or EPUB download link are
/// skipped, with PDF preferred when both exist.
#[derive(Debug, Clone)]
pub struct GoogleBooksSource {
    client: HttpClient,
}

impl GoogleBooksSource {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    fn parse_response(data: VolumesResponse) -> Vec<Record> {
        data.items
            .into_iter()
            .filter_map(Self::parse_volume)
            .collect()
    }

    fn parse_volume(volume: Volume) -> Option<Record> {
        let info = volume.volume_info;
        let title = info.title.filter(|t| !t.is_empty())?;

        let access = volume.access_info.unwrap_or_default();
        let pdf_link = access.pdf.and_then(|f| f.download_link);
        let epub_link = access.epub.and_then(|f| f.download_link);
        let download_link = pdf_link.or(epub_link)?;

        // publishedDate can be "2003", "2003-05" or "2003-05-01"
        let published = info
            .published_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .unwrap_or_default()
            .to_string();

        let summary = info
            .description
            .map(|d| truncate_summary(&d))
            .unwrap_or_default();

        Some(
            RecordBuilder::new(title)
                .authors(info.authors)
                .published(published)
                .summary(summary)
                .url(download_link)
                .source("Google Books")
                .build(),
        )
    }
}

#[async_trait]
impl Source for GoogleBooksSource {
    fn id(&self) -> &str {
        "google_books"
    }

    fn name(&self) -> &str {
        "Google Books"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Record>, SourceError> {
        let url = format!(
            "{}?q={}&filter=free-ebooks&maxResults={}",
            BOOKS_API_URL,
            urlencoding::encode(query),
            limit
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to reach Google Books: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Google Books returned status: {}",
                response.status()
            )));
        }

        let data: VolumesResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse JSON: {}", e)))?;

        Ok(Self::parse_response(data))
    }
}

// ===== Google Books API types =====

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
    #[serde(rename = "accessInfo")]
    access_info: Option<AccessInfo>,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AccessInfo {
    pdf: Option<Format>,
    epub: Option<Format>,
}

#[derive(Debug, Deserialize)]
struct Format {
    #[serde(rename = "downloadLink")]
    download_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "items": [
            {
                "volumeInfo": {
                    "title": "Calculus Made Easy",
                    "authors": ["Silvanus Thompson"],
                    "publishedDate": "1910-05-01",
                    "description": "A classic introduction."
                },
                "accessInfo": {
                    "pdf": {"downloadLink": "https://books.example.com/calculus.pdf"},
                    "epub": {"downloadLink": "https://books.example.com/calculus.epub"}
                }
            },
            {
                "volumeInfo": {
                    "title": "Epub Only Book",
                    "authors": [],
                    "publishedDate": "2001"
                },
                "accessInfo": {
                    "epub": {"downloadLink": "https://books.example.com/only.epub"}
                }
            },
            {
                "volumeInfo": {
                    "title": "No Downloads",
                    "publishedDate": "1999"
                },
                "accessInfo": {
                    "pdf": {"acsTokenLink": "https://drm.example.com/token"}
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_response() {
        let data: VolumesResponse = serde_json::from_str(RESPONSE).unwrap();
        let records = GoogleBooksSource::parse_response(data);

        assert_eq!(records.len(), 2);

        // PDF preferred over EPUB
        assert_eq!(records[0].title, "Calculus Made Easy");
        assert_eq!(records[0].authors, vec!["Silvanus Thompson"]);
        assert_eq!(records[0].published, "1910");
        assert_eq!(records[0].summary, "A classic introduction.");
        assert_eq!(
            records[0].url.as_deref(),
            Some("https://books.example.com/calculus.pdf")
        );
        assert_eq!(records[0].source.as_deref(), Some("Google Books"));

        // EPUB used when no PDF link exists
        assert_eq!(records[1].title, "Epub Only Book");
        assert_eq!(records[1].published, "2001");
        assert_eq!(
            records[1].url.as_deref(),
            Some("https://books.example.com/only.epub")
        );
    }

    #[test]
    fn test_empty_items() {
        let data: VolumesResponse = serde_json::from_str(r#"{"kind": "books#volumes"}"#).unwrap();
        assert!(GoogleBooksSource::parse_response(data).is_empty());
    }
}
