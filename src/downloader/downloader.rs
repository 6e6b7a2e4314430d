//! Batch coordination and the document-to-tally pipeline.
//!
//! A [`Downloader`] runs a queue of tasks strictly one after the other, in
//! queue order, pausing between transfers to go easy on the remote server.
//! One failing task never stops the batch: every task ends up in the
//! [`BatchResult`]. Failed tasks are not retried.
//!
//! # Examples
//!
//! ```rust,no_run
//! use linkfetch::downloader::DownloaderBuilder;
//! use linkfetch::Extension;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("biology_pdfs"))
//!     .build();
//!
//! let result = downloader
//!     .download_from("Biology Resources.html", &Extension::new("pdf")?, None)
//!     .await?;
//! println!(
//!     "{} downloaded, {} skipped, {} failed",
//!     result.succeeded(),
//!     result.skipped(),
//!     result.failed()
//! );
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use super::engine::TransferEngine;
use crate::download::{plan, BatchResult, Download};
use crate::error::Result;
use crate::extract::Extension;
use crate::http::create_http_client;
use crate::source::DocumentSource;

use reqwest::{header::HeaderMap, Url};
use reqwest_middleware::ClientWithMiddleware;
use std::collections::HashSet;
use std::fmt;
use std::fmt::Debug;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info};

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use linkfetch::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
}

impl Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the directory where files will be downloaded.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the number of request-level retries.
    pub fn retries(&self) -> u32 {
        self.config.retries
    }

    /// Gets whether partial files are resumed.
    pub fn resumable(&self) -> bool {
        self.config.resumable
    }

    /// Gets whether complete files are downloaded again.
    pub fn overwrite(&self) -> bool {
        self.config.overwrite
    }

    /// Gets the pause between two transfers.
    pub fn delay(&self) -> Duration {
        self.config.delay
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Gets whether to use range requests for content length.
    pub fn use_range_for_content_length(&self) -> bool {
        self.config.use_range_for_content_length
    }

    /// Gets whether to show single file progress.
    pub fn single_file_progress(&self) -> bool {
        self.config.single_file_progress
    }

    /// Downloads every task of `downloads`, in order.
    ///
    /// A task whose file name (compared case-insensitively) was already
    /// claimed by an earlier task of the queue is not transferred and is
    /// recorded as failed. Queues built by [`plan`] never contain one.
    ///
    /// Fails only when the destination directory cannot be created or the
    /// HTTP client cannot be built; task failures are recorded in the result.
    pub async fn download(&self, downloads: &[Download]) -> Result<BatchResult> {
        let client = create_http_client(self.config.http_client_config())?;
        self.prepare_directory().await?;
        Ok(self.run(client, downloads).await)
    }

    /// Loads the document at `location` (an `http(s)` URL or a file path).
    ///
    /// `base_override` replaces the base URL of a local file.
    pub async fn load(&self, location: &str, base_override: Option<Url>) -> Result<DocumentSource> {
        let client = create_http_client(self.config.http_client_config())?;
        DocumentSource::load(&client, location, base_override).await
    }

    /// Downloads every file with `extension` linked from the document at
    /// `location`.
    ///
    /// An unreadable document aborts before anything is downloaded. A
    /// document without matching links gives an empty result.
    pub async fn download_from(
        &self,
        location: &str,
        extension: &Extension,
        base_override: Option<Url>,
    ) -> Result<BatchResult> {
        let client = create_http_client(self.config.http_client_config())?;
        let source = DocumentSource::load(&client, location, base_override).await?;
        self.download_links(client, &source.links(extension)).await
    }

    /// Downloads every file with `extension` linked from an already loaded
    /// document.
    pub async fn download_source(
        &self,
        source: &DocumentSource,
        extension: &Extension,
    ) -> Result<BatchResult> {
        let client = create_http_client(self.config.http_client_config())?;
        self.download_links(client, &source.links(extension)).await
    }

    async fn download_links(
        &self,
        client: ClientWithMiddleware,
        links: &[Url],
    ) -> Result<BatchResult> {
        self.prepare_directory().await?;
        if links.is_empty() {
            info!("No matching links found, nothing to download");
        }
        let downloads = plan(links);
        Ok(self.run(client, &downloads).await)
    }

    async fn prepare_directory(&self) -> Result<()> {
        debug!("Creating destination directory {:?}", self.config.directory);
        fs::create_dir_all(&self.config.directory).await?;
        Ok(())
    }

    /// Runs the queue. The client, and with it the connection pool, is
    /// dropped when the batch ends.
    async fn run(&self, client: ClientWithMiddleware, downloads: &[Download]) -> BatchResult {
        info!(
            "Downloading {} file(s) to {:?}",
            downloads.len(),
            self.config.directory
        );

        let engine = TransferEngine::new(client, &self.config, downloads.len());
        let mut result = BatchResult::new();
        let mut claimed = HashSet::new();

        for (index, download) in downloads.iter().enumerate() {
            debug!("[{}/{}] {}", index + 1, downloads.len(), download.url);
            let summary = if claimed.insert(download.filename.to_lowercase()) {
                engine.transfer(download).await
            } else {
                engine.reject(
                    download,
                    format!(
                        "{} is already the destination of an earlier task",
                        download.filename
                    ),
                )
            };

            if let Some(ref callback) = self.config.on_complete {
                callback(&summary);
            }
            result.push(summary);

            let is_last = index + 1 == downloads.len();
            if !is_last && !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }
        }

        engine.finish();

        info!(
            "Batch done: {} downloaded, {} skipped, {} failed",
            result.succeeded(),
            result.skipped(),
            result.failed()
        );
        result
    }
}
