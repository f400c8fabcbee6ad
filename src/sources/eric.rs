//! ERIC (Education Resources Information Center) search source implementation.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::models::{Record, RecordBuilder};
use crate::sources::{fetch_text, Source, SourceError};
use crate::utils::HttpClient;

const ERIC_SEARCH_URL: &str = "https://eric.ed.gov/";
const ERIC_FILES_URL: &str = "https://files.eric.ed.gov/fulltext";

/// ERIC search source.
///
/// Full-text PDFs live at a predictable URL per document id; a HEAD request
/// confirms availability before the link is attached to a record.
#[derive(Debug, Clone)]
pub struct EricSource {
    client: HttpClient,
    search_url: String,
    files_url: String,
}

/// Metadata parsed from one search result block, before the PDF check.
#[derive(Debug, PartialEq)]
struct EricEntry {
    title: String,
    id: String,
    authors: Vec<String>,
    year: String,
    description: String,
}

impl EricSource {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            search_url: ERIC_SEARCH_URL.to_string(),
            files_url: ERIC_FILES_URL.to_string(),
        }
    }

    /// Point the source at different endpoints (for testing)
    #[allow(dead_code)]
    pub fn with_urls(client: HttpClient, search_url: &str, files_url: &str) -> Self {
        Self {
            client,
            search_url: search_url.to_string(),
            files_url: files_url.to_string(),
        }
    }

    fn parse_results(html: &str, limit: usize) -> Vec<EricEntry> {
        let document = Html::parse_document(html);
        let block_selector = match Selector::parse("div.r_i") {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };

        document
            .select(&block_selector)
            .filter_map(|block| Self::parse_block(&block))
            .take(limit)
            .collect()
    }

    fn parse_block(block: &ElementRef) -> Option<EricEntry> {
        let title_selector = Selector::parse("div.r_t a").ok()?;
        let title_elem = block.select(&title_selector).next()?;

        let title = title_elem.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            return None;
        }

        let href = title_elem.value().attr("href")?;
        let id = Self::document_id(href)?;

        let meta_selector = Selector::parse("div.r_a").ok()?;
        let meta = block
            .select(&meta_selector)
            .next()
            .map(|m| m.text().collect::<String>())
            .unwrap_or_default();

        let year = regex::Regex::new(r"\b(\d{4})\b")
            .ok()?
            .captures(&meta)
            .map(|c| c[1].to_string())
            .unwrap_or_default();

        // Metadata line: "Last, First; Last, First - Venue, 2015"
        let authors = meta
            .splitn(2, '-')
            .next()
            .map(|names| {
                names
                    .split(';')
                    .map(|a| a.trim().to_string())
                    .filter(|a| !a.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let desc_selector = Selector::parse("div.r_d").ok()?;
        let description = block
            .select(&desc_selector)
            .next()
            .map(|d| {
                d.text()
                    .collect::<String>()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        Some(EricEntry {
            title,
            id,
            authors,
            year,
            description,
        })
    }

    /// Extract the EJ/ED document id from a record link's query string.
    fn document_id(href: &str) -> Option<String> {
        let re = regex::Regex::new(r"id=(E[JD]\d+)").ok()?;
        re.captures(href).map(|c| c[1].to_string())
    }

    /// HEAD the predictable full-text URL; only a success status earns a pdf_url.
    async fn confirm_pdf(&self, id: &str) -> Option<String> {
        let pdf_url = format!("{}/{}.pdf", self.files_url, id);
        match self.client.head(&pdf_url).send().await {
            Ok(response) if response.status().is_success() => Some(pdf_url),
            _ => None,
        }
    }
}

#[async_trait]
impl Source for EricSource {
    fn id(&self) -> &str {
        "eric"
    }

    fn name(&self) -> &str {
        "ERIC"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Record>, SourceError> {
        let url = format!("{}?q={}", self.search_url, urlencoding::encode(query));

        let html = fetch_text(&self.client, &url, "ERIC").await?;
        let entries = Self::parse_results(&html, limit);

        let mut records = Vec::new();
        for entry in entries {
            let record_url = format!("{}?id={}", self.search_url, entry.id);
            let mut builder = RecordBuilder::new(entry.title)
                .authors(entry.authors)
                .published(entry.year)
                .summary(entry.description)
                .url(record_url);

            if let Some(pdf_url) = self.confirm_pdf(&entry.id).await {
                builder = builder.pdf_url(pdf_url);
            }

            records.push(builder.build());
        }

        Ok(records)
    }
}
