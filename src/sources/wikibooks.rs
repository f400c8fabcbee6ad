//! Wikibooks search source implementation.
//!
//! Needs one extra page fetch per candidate to collect contributors, the
//! last-modified date and a summary, so a query costs up to `limit + 1` HTTP
//! round-trips.

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::models::{Record, RecordBuilder};
use crate::sources::{fetch_text, Source, SourceError};
use crate::utils::HttpClient;

const WIKIBOOKS_BASE: &str = "https://en.wikibooks.org";

/// How many contributor names to keep from a book page.
const MAX_CONTRIBUTORS: usize = 3;

/// Wikibooks search source
#[derive(Debug, Clone)]
pub struct WikibooksSource {
    client: HttpClient,
}

/// Details scraped from one book page.
#[derive(Debug, Default, PartialEq)]
struct BookPage {
    contributors: Vec<String>,
    last_modified: String,
    summary: String,
}

impl WikibooksSource {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Parse the search results page into (title, page path) pairs.
    fn parse_search_results(html: &str) -> Vec<(String, String)> {
        let document = Html::parse_document(html);
        let heading_selector = match Selector::parse("div.mw-search-result-heading a") {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };

        document
            .select(&heading_selector)
            .filter_map(|a| {
                let href = a.value().attr("href")?.to_string();
                let title = a.text().collect::<String>().trim().to_string();
                if title.is_empty() {
                    return None;
                }
                Some((title, href))
            })
            .collect()
    }

    /// Parse a book page for contributors, last-modified date and summary.
    fn parse_book_page(html: &str) -> BookPage {
        let document = Html::parse_document(html);
        let mut page = BookPage::default();

        if let Ok(selector) = Selector::parse(r#"a[href*="User:"]"#) {
            for anchor in document.select(&selector) {
                let name = anchor.text().collect::<String>().trim().to_string();
                if !name.is_empty() && !page.contributors.contains(&name) {
                    page.contributors.push(name);
                }
                if page.contributors.len() >= MAX_CONTRIBUTORS {
                    break;
                }
            }
        }

        if let Ok(selector) = Selector::parse("li#footer-info-lastmod") {
            if let Some(footer) = document.select(&selector).next() {
                let text = footer.text().collect::<String>();
                if let Ok(re) = regex::Regex::new(r"(\d{1,2} \w+ \d{4})") {
                    if let Some(caps) = re.captures(&text) {
                        page.last_modified = caps[1].to_string();
                    }
                }
            }
        }

        if let Ok(selector) = Selector::parse("div.mw-parser-output > p") {
            page.summary = document
                .select(&selector)
                .map(|p| {
                    p.text()
                        .collect::<String>()
                        .split_whitespace()
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .find(|text| !text.is_empty())
                .unwrap_or_default();
        }

        page
    }

    /// Printable-view URL for a book page, used as the download link.
    fn print_url(page_url: &str) -> String {
        format!("{}?printable=yes", page_url)
    }
}

#[async_trait]
impl Source for WikibooksSource {
    fn id(&self) -> &str {
        "wikibooks"
    }

    fn name(&self) -> &str {
        "Wikibooks"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Record>, SourceError> {
        let search_url = format!(
            "{}/w/index.php?search={}&title=Special:Search&fulltext=1&ns0=1",
            WIKIBOOKS_BASE,
            urlencoding::encode(query)
        );

        let html = fetch_text(&self.client, &search_url, "Wikibooks").await?;
        let candidates = Self::parse_search_results(&html);

        let mut records = Vec::new();
        for (title, href) in candidates.into_iter().take(limit) {
            let page_url = format!("{}{}", WIKIBOOKS_BASE, href);

            // One extra fetch per candidate; a failing page skips only that book
            let page = match fetch_text(&self.client, &page_url, "Wikibooks page").await {
                Ok(body) => Self::parse_book_page(&body),
                Err(e) => {
                    tracing::debug!("Skipping Wikibooks page {}: {}", page_url, e);
                    continue;
                }
            };

            records.push(
                RecordBuilder::new(title)
                    .authors(page.contributors)
                    .published(page.last_modified)
                    .summary(page.summary)
                    .url(Self::print_url(&page_url))
                    .build(),
            );
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_HTML: &str = r#"<html><body>
    <ul class="mw-search-results">
      <li>
        <div class="mw-search-result-heading">
          <a href="/wiki/Linear_Algebra" title="Linear Algebra">Linear Algebra</a>
        </div>
      </li>
      <li>
        <div class="mw-search-result-heading">
          <a href="/wiki/Abstract_Algebra" title="Abstract Algebra">Abstract Algebra</a>
        </div>
      </li>
    </ul>
    </body></html>"#;

    const BOOK_HTML: &str = r#"<html><body>
    <div class="mw-parser-output">
      <p></p>
      <p>This wikibook introduces   vector spaces and linear maps.</p>
      <p>Second paragraph.</p>
    </div>
    <a href="/wiki/User:AlgebraFan">AlgebraFan</a>
    <a href="/wiki/User:MatrixMax">MatrixMax</a>
    <a href="/wiki/User:VectorVera">VectorVera</a>
    <a href="/wiki/User:FourthUser">FourthUser</a>
    <ul id="footer-info">
      <li id="footer-info-lastmod">This page was last edited on 12 March 2023, at 09:14.</li>
    </ul>
    </body></html>"#;

    #[test]
    fn test_parse_search_results() {
        let results = WikibooksSource::parse_search_results(SEARCH_HTML);

        assert_eq!(
            results,
            vec![
                ("Linear Algebra".to_string(), "/wiki/Linear_Algebra".to_string()),
                (
                    "Abstract Algebra".to_string(),
                    "/wiki/Abstract_Algebra".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_parse_book_page() {
        let page = WikibooksSource::parse_book_page(BOOK_HTML);

        // Only the first three contributors are kept
        assert_eq!(page.contributors, vec!["AlgebraFan", "MatrixMax", "VectorVera"]);
        assert_eq!(page.last_modified, "12 March 2023");
        assert_eq!(
            page.summary,
            "This wikibook introduces vector spaces and linear maps."
        );
    }

    #[test]
    fn test_parse_book_page_missing_pieces() {
        let page = WikibooksSource::parse_book_page("<html><body></body></html>");
        assert!(page.contributors.is_empty());
        assert!(page.last_modified.is_empty());
        assert!(page.summary.is_empty());
    }

    #[test]
    fn test_print_url() {
        assert_eq!(
            WikibooksSource::print_url("https://en.wikibooks.org/wiki/Linear_Algebra"),
            "https://en.wikibooks.org/wiki/Linear_Algebra?printable=yes"
        );
    }
}
