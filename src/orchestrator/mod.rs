//! Search fan-out and bounded download orchestration.
//!
//! Sources are queried one after another in registry order; the accumulated
//! records then flow through a fixed-size pool of download workers. Results
//! arrive in completion order, not submission order.

use futures_util::{stream, StreamExt};
use std::path::PathBuf;

use crate::download::{Download, Downloader};
use crate::models::Record;
use crate::sources::SourceRegistry;

/// Number of concurrent download workers.
pub const DOWNLOAD_WORKERS: usize = 3;

/// A successfully downloaded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downloaded {
    /// The record's title, as discovered
    pub title: String,

    /// Where the file was written (or already existed)
    pub path: PathBuf,
}

/// Drives a whole query: sequential source searches followed by concurrent
/// downloads of every eligible record.
#[derive(Debug)]
pub struct Orchestrator<D = Downloader> {
    registry: SourceRegistry,
    downloader: D,
}

impl<D: Download> Orchestrator<D> {
    pub fn new(registry: SourceRegistry, downloader: D) -> Self {
        Self {
            registry,
            downloader,
        }
    }

    /// Query every source in registration order and accumulate all records.
    ///
    /// A failing source degrades to an empty contribution; it never aborts
    /// the remaining sources.
    pub async fn search_all(&self, query: &str, limit: usize) -> Vec<Record> {
        let mut all_records = Vec::new();

        for source in self.registry.all() {
            tracing::info!("Searching {}...", source.name());
            match source.search(query, limit).await {
                Ok(records) => {
                    if !records.is_empty() {
                        tracing::info!("Found {} results on {}:", records.len(), source.name());
                        for (i, record) in records.iter().enumerate() {
                            Self::log_record(i + 1, record);
                        }
                    }
                    all_records.extend(records);
                }
                Err(e) => {
                    tracing::error!("Error searching {}: {}", source.name(), e);
                }
            }
        }

        all_records
    }

    /// Search every source, then download each eligible record through a pool
    /// of [`DOWNLOAD_WORKERS`] concurrent workers. Returns the successes in
    /// completion order; failures are logged and dropped.
    pub async fn search_and_download(&self, query: &str, limit: usize) -> Vec<Downloaded> {
        let records = self.search_all(query, limit).await;

        if records.is_empty() {
            tracing::info!("No results found.");
            return Vec::new();
        }

        self.download_all(records).await
    }

    /// Fan the eligible records out over the bounded worker pool.
    pub async fn download_all(&self, records: Vec<Record>) -> Vec<Downloaded> {
        let tasks = records
            .into_iter()
            .filter(|r| r.is_downloadable())
            .filter_map(|r| {
                let url = r.download_url()?.to_string();
                Some((r.title, url))
            });

        let results: Vec<(String, Result<_, _>)> = stream::iter(tasks)
            .map(|(title, url)| async move {
                let result = self.downloader.download(&url, &title).await;
                (title, result)
            })
            .buffer_unordered(DOWNLOAD_WORKERS)
            .collect()
            .await;

        let mut downloaded = Vec::new();
        for (title, result) in results {
            match result {
                Ok(outcome) => downloaded.push(Downloaded {
                    title,
                    path: outcome.path,
                }),
                Err(e) => {
                    tracing::error!("Error downloading {}: {}", title, e);
                }
            }
        }

        downloaded
    }

    fn log_record(index: usize, record: &Record) {
        tracing::info!("{}. {}", index, record.title);
        if !record.authors.is_empty() {
            let shown: Vec<&str> = record.authors.iter().take(3).map(|a| a.as_str()).collect();
            tracing::info!("   Authors: {}", shown.join(", "));
        }
        if !record.published.is_empty() {
            tracing::info!("   Published: {}", record.published);
        }
        if !record.summary.is_empty() {
            tracing::info!("   Summary: {}", record.summary);
        }
    }
}
