//! Google Scholar search source implementation.
//!
//! Google Scholar has no official API; this scrapes the regular results page
//! and keeps only entries that expose a PDF link.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::models::{Record, RecordBuilder};
use crate::sources::{fetch_text, Source, SourceError};
use crate::utils::HttpClient;

const SCHOLAR_URL: &str = "https://scholar.google.com/scholar";

/// Google Scholar search source
#[derive(Debug, Clone)]
pub struct GoogleScholarSource {
    client: HttpClient,
}

impl GoogleScholarSource {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Parse a results page, dropping blocks without a PDF link.
    fn parse_results(html: &str, limit: usize) -> Vec<Record> {
        let document = Html::parse_document(html);
        let block_selector = match Selector::parse("div.gs_r") {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };

        document
            .select(&block_selector)
            .filter_map(|block| Self::parse_block(&block))
            .take(limit)
            .collect()
    }

    fn parse_block(block: &ElementRef) -> Option<Record> {
        let title_selector = Selector::parse("h3.gs_rt a").ok()?;
        let title = block
            .select(&title_selector)
            .next()?
            .text()
            .collect::<String>()
            .trim()
            .to_string();
        if title.is_empty() {
            return None;
        }

        let pdf_url = Self::pdf_link(block)?;

        // Metadata line: "A Author, B Author - Venue, 2004 - publisher.com"
        let meta_selector = Selector::parse("div.gs_a").ok()?;
        let meta = block
            .select(&meta_selector)
            .next()
            .map(|m| m.text().collect::<String>())
            .unwrap_or_default();

        let mut segments = meta.splitn(3, '-');
        let authors = segments
            .next()
            .map(|s| {
                s.split(',')
                    .map(|a| a.trim().to_string())
                    .filter(|a| !a.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let published = segments
            .next()
            .and_then(|s| {
                regex::Regex::new(r"\b(\d{4})\b")
                    .ok()?
                    .captures(s)
                    .map(|c| c[1].to_string())
            })
            .unwrap_or_default();

        let snippet_selector = Selector::parse("div.gs_rs").ok()?;
        let summary = block
            .select(&snippet_selector)
            .next()
            .map(|s| {
                s.text()
                    .collect::<String>()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
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

    /// First anchor whose text mentions "[PDF]" or whose href contains "pdf".
    fn pdf_link(block: &ElementRef) -> Option<String> {
        let anchor_selector = Selector::parse("a").ok()?;
        block.select(&anchor_selector).find_map(|a| {
            let href = a.value().attr("href")?;
            let text = a.text().collect::<String>();
            if text.contains("[PDF]") || href.to_lowercase().contains("pdf") {
                Some(href.to_string())
            } else {
                None
            }
        })
    }
}

#[async_trait]
impl Source for GoogleScholarSource {
    fn id(&self) -> &str {
        "google_scholar"
    }

    fn name(&self) -> &str {
        "Google Scholar"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Record>, SourceError> {
        let url = format!(
            "{}?hl=en&q={}&num={}",
            SCHOLAR_URL,
            urlencoding::encode(query),
            limit
        );

        let html = fetch_text(&self.client, &url, "Google Scholar").await?;

        Ok(Self::parse_results(&html, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_HTML: &str = r#"<html><body>
    <div class="gs_r">
      <div class="gs_ggs">
        <a href="https://files.example.edu/papers/flows.pdf"><span>[PDF]</span> example.edu</a>
      </div>
      <div class="gs_ri">
        <h3 class="gs_rt"><a href="https://example.edu/flows">Network Flows in Practice</a></h3>
        <div class="gs_a">J Ford, D Fulkerson - Journal of Algorithms, 1998 - elsevier.com</div>
        <div class="gs_rs">We study   maximum flows
        in large networks.</div>
      </div>
    </div>
    <div class="gs_r">
      <div class="gs_ri">
        <h3 class="gs_rt"><a href="https://example.org/paywalled">Paywalled Result</a></h3>
        <div class="gs_a">A Nobody - Some Venue, 2010 - springer.com</div>
        <div class="gs_rs">Not freely available.</div>
      </div>
    </div>
    </body></html>"#;

    #[test]
    fn test_parse_results_keeps_pdf_entries_only() {
        let records = GoogleScholarSource::parse_results(RESULTS_HTML, 10);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.title, "Network Flows in Practice");
        assert_eq!(record.authors, vec!["J Ford", "D Fulkerson"]);
        assert_eq!(record.published, "1998");
        assert_eq!(record.summary, "We study maximum flows in large networks.");
        assert_eq!(
            record.url.as_deref(),
            Some("https://files.example.edu/papers/flows.pdf")
        );
    }

    #[test]
    fn test_pdf_detected_from_href_without_marker_text() {
        let html = r#"<div class="gs_r">
          <h3 class="gs_rt"><a href="https://x.org/a">Title Here</a></h3>
          <div class="gs_a">A Author - Venue, 2005</div>
          <a href="https://x.org/download/PDF/123">full text</a>
        </div>"#;

        let records = GoogleScholarSource::parse_results(html, 10);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].url.as_deref(),
            Some("https://x.org/download/PDF/123")
        );
    }

    #[test]
    fn test_parse_results_respects_limit() {
        let html = RESULTS_HTML.replace("paywalled\">Paywalled Result", "x.pdf\">Second PDF");
        let records = GoogleScholarSource::parse_results(&html, 1);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_empty_page() {
        assert!(GoogleScholarSource::parse_results("<html></html>", 5).is_empty());
    }
}
