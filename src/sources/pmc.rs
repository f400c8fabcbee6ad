//! PubMed Central (PMC) search source implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{Record, RecordBuilder};
use crate::sources::{fetch_text, truncate_summary, Source, SourceError};
use crate::utils::HttpClient;

const PMC_EUTILS_BASE: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const PMC_ARTICLE_BASE: &str = "https://www.ncbi.nlm.nih.gov/pmc/articles";

/// PMC search source.
///
/// Two-step NCBI E-utilities protocol: an esearch call for IDs followed by one
/// batch efetch call for the article XML of every ID.
#[derive(Debug, Clone)]
pub struct PmcSource {
    client: HttpClient,
}

impl PmcSource {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Parse the batch efetch XML into records, skipping malformed articles.
    fn parse_articles(xml: &str, limit: usize) -> Vec<Record> {
        split_articles(xml)
            .into_iter()
            .filter_map(Self::parse_article)
            .take(limit)
            .collect()
    }

    fn parse_article(article: &str) -> Option<Record> {
        let title = element_text(article, "article-title")?;
        if title.is_empty() {
            return None;
        }

        let pmcid = pmc_article_id(article)?;
        let pdf_url = format!("{}/PMC{}/pdf", PMC_ARTICLE_BASE, pmcid);

        let authors = contrib_authors(article);

        // Year lives inside the first pub-date block
        let year = element_block(article, "pub-date")
            .and_then(|block| element_text(&block, "year"))
            .unwrap_or_default();

        let summary = element_text(article, "abstract")
            .map(|a| truncate_summary(&a))
            .unwrap_or_default();

        Some(
            RecordBuilder::new(title)
                .authors(authors)
                .published(year)
                .summary(summary)
                .url(pdf_url)
                .build(),
        )
    }
}

#[async_trait]
impl Source for PmcSource {
    fn id(&self) -> &str {
        "pmc"
    }

    fn name(&self) -> &str {
        "PubMed Central"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Record>, SourceError> {
        let search_url = format!(
            "{}/esearch.fcgi?db=pmc&term={}&retmax={}&retmode=json&sort=relevance",
            PMC_EUTILS_BASE,
            urlencoding::encode(query),
            limit
        );

        let response = self
            .client
            .get(&search_url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search PMC: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "PMC esearch returned status: {}",
                response.status()
            )));
        }

        let data: ESearchResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse JSON: {}", e)))?;

        let ids = data.esearchresult.idlist;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // One batch efetch for every ID
        let fetch_url = format!(
            "{}/efetch.fcgi?db=pmc&id={}&retmode=xml",
            PMC_EUTILS_BASE,
            ids.join(",")
        );

        let xml = fetch_text(&self.client, &fetch_url, "PMC efetch").await?;

        Ok(Self::parse_articles(&xml, limit))
    }
}

/// Slice the payload into top-level `<article>` blocks.
fn split_articles(xml: &str) -> Vec<&str> {
    let re = match regex::Regex::new(r"(?s)<article[\s>].*?</article>") {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };
    re.find_iter(xml).map(|m| m.as_str()).collect()
}

/// Text of the first `<tag>` element with inner markup stripped.
fn element_text(xml: &str, tag: &str) -> Option<String> {
    let block = element_block(xml, tag)?;
    let stripped = regex::Regex::new(r"<[^>]+>").ok()?.replace_all(&block, " ");
    let text = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    Some(text)
}

/// Raw inner content of the first `<tag>` element.
fn element_block(xml: &str, tag: &str) -> Option<String> {
    let re = regex::Regex::new(&format!(r"(?s)<{0}(?:\s[^>]*)?>(.*?)</{0}>", tag)).ok()?;
    re.captures(xml)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// The article's PMC identifier, without the PMC prefix.
fn pmc_article_id(xml: &str) -> Option<String> {
    let re = regex::Regex::new(
        r#"(?s)<article-id[^>]*pub-id-type\s*=\s*["']pmc["'][^>]*>\s*([^<]+?)\s*</article-id>"#,
    )
    .ok()?;
    re.captures(xml)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim_start_matches("PMC").to_string())
}

/// Author names from `<contrib contrib-type="author">` blocks, given name first.
fn contrib_authors(xml: &str) -> Vec<String> {
    let re = match regex::Regex::new(
        r#"(?s)<contrib[^>]*contrib-type\s*=\s*["']author["'][^>]*>(.*?)</contrib>"#,
    ) {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };

    re.captures_iter(xml)
        .filter_map(|caps| {
            let block = caps.get(1)?.as_str();
            let given = element_text(block, "given-names")?;
            let surname = element_text(block, "surname")?;
            if given.is_empty() || surname.is_empty() {
                return None;
            }
            Some(format!("{} {}", given, surname))
        })
        .collect()
}

// ===== E-utilities API types =====

#[derive(Debug, Deserialize)]
struct ESearchResponse {
    esearchresult: ESearchResult,
}

#[derive(Debug, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}
