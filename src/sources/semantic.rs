//! Semantic Scholar search source implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{Record, RecordBuilder};
use crate::sources::{truncate_summary, Source, SourceError};
use crate::utils::HttpClient;

const SEMANTIC_API_URL: &str = "https://api.semanticscholar.org/graph/v1/paper/search";

/// Semantic Scholar search source.
///
/// Uses the Graph API; only papers with an open-access PDF are returned.
#[derive(Debug, Clone)]
pub struct SemanticScholarSource {
    client: HttpClient,
}

impl SemanticScholarSource {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    fn parse_response(data: S2SearchResponse) -> Vec<Record> {
        data.data
            .into_iter()
            .filter_map(Self::parse_paper)
            .collect()
    }

    /// Skip papers without a title or without an open-access PDF.
    fn parse_paper(paper: S2Paper) -> Option<Record> {
        let title = paper.title.filter(|t| !t.is_empty())?;
        let pdf_url = paper
            .open_access_pdf
            .and_then(|p| p.url)
            .filter(|u| !u.is_empty())?;

        let authors = paper
            .authors
            .into_iter()
            .filter_map(|a| a.name)
            .collect::<Vec<_>>();

        let published = paper.year.map(|y| y.to_string()).unwrap_or_default();
        let summary = paper
            .r#abstract
            .map(|a| truncate_summary(&a))
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
}

#[async_trait]
impl Source for SemanticScholarSource {
    fn id(&self) -> &str {
        "semantic"
    }

    fn name(&self) -> &str {
        "Semantic Scholar"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Record>, SourceError> {
        let url = format!(
            "{}?query={}&limit={}&fields=title,authors,year,abstract,url,openAccessPdf",
            SEMANTIC_API_URL,
            urlencoding::encode(query),
            limit
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to reach Semantic Scholar: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Semantic Scholar returned status: {}",
                response.status()
            )));
        }

        let data: S2SearchResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse JSON: {}", e)))?;

        Ok(Self::parse_response(data))
    }
}

// ===== Semantic Scholar API types =====

#[derive(Debug, Deserialize)]
struct S2SearchResponse {
    #[serde(default)]
    data: Vec<S2Paper>,
}

#[derive(Debug, Deserialize)]
struct S2Paper {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<S2Author>,
    year: Option<i64>,
    r#abstract: Option<String>,
    #[serde(rename = "openAccessPdf")]
    open_access_pdf: Option<S2OpenAccessPdf>,
}

#[derive(Debug, Deserialize)]
struct S2Author {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S2OpenAccessPdf {
    url: Option<String>,
}
