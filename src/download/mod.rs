//! Streaming download worker.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::utils::{sanitize_filename, HttpClient};

/// Download capability the orchestrator fans work out over.
///
/// [`Downloader`] is the production implementation; tests substitute
/// instrumented ones.
#[async_trait]
pub trait Download: Send + Sync {
    /// Fetch `url` into a file named after `title`.
    async fn download(&self, url: &str, title: &str) -> Result<DownloadOutcome, DownloadError>;
}

/// Errors that can occur while downloading a document
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Filesystem error (directory creation, file write)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport error (timeout, connection failure, broken stream)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with something other than 200 OK
    #[error("Unexpected status: {0}")]
    Status(StatusCode),
}

/// Outcome of a successful download call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Where the file lives on disk
    pub path: PathBuf,

    /// True when the file already existed and nothing was fetched
    pub already_present: bool,
}

/// Downloads documents into a single output directory, one file per sanitized
/// title. A file that already exists is treated as a completed download; no
/// integrity check is performed and the content type is never validated.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: HttpClient,
    output_dir: PathBuf,
}

impl Downloader {
    /// Create a downloader, creating the output directory up front.
    /// Failure to create the directory is fatal.
    pub fn new(client: HttpClient, output_dir: impl Into<PathBuf>) -> Result<Self, DownloadError> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        tracing::info!("Output directory ready: {}", output_dir.display());

        Ok(Self { client, output_dir })
    }

    /// The directory downloads are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Fetch `url` into `<output_dir>/<sanitized title>.pdf`.
    ///
    /// Skips the fetch entirely when the target file already exists. Otherwise
    /// streams the body to disk chunk by chunk; anything but HTTP 200 is an
    /// error, and a partially written file is left in place on failure.
    pub async fn download(&self, url: &str, title: &str) -> Result<DownloadOutcome, DownloadError> {
        // Re-checked on every call, same as construction
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let mut filename = sanitize_filename(title);
        if !filename.ends_with(".pdf") {
            filename.push_str(".pdf");
        }
        let path = self.output_dir.join(&filename);

        if tokio::fs::try_exists(&path).await? {
            tracing::info!("File already exists: {}", filename);
            return Ok(DownloadOutcome {
                path,
                already_present: true,
            });
        }

        let response = self.client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(DownloadError::Status(response.status()));
        }

        let mut file = tokio::fs::File::create(&path).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        tracing::info!("Downloaded: {}", filename);
        Ok(DownloadOutcome {
            path,
            already_present: false,
        })
    }
}

#[async_trait]
impl Download for Downloader {
    async fn download(&self, url: &str, title: &str) -> Result<DownloadOutcome, DownloadError> {
        Downloader::download(self, url, title).await
    }
}
