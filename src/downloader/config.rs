//! Configuration structures and defaults for the downloader.
//!
//! [`DownloaderConfig`] is filled in through
//! [`DownloaderBuilder`](super::DownloaderBuilder); it also knows how to derive
//! the [`HttpClientConfig`] of the batch-scoped HTTP client.
//!
//! # Examples
//!
//! ```rust
//! use linkfetch::downloader::DownloadCallback;
//! use linkfetch::download::{Status, Summary};
//!
//! let callback: DownloadCallback = Box::new(|summary: &Summary| {
//!     match summary.status() {
//!         Status::Success => println!("✓ Downloaded: {}", summary.download().filename),
//!         Status::Fail(msg) => println!("✗ Failed: {} - {}", summary.download().filename, msg),
//!         _ => {}
//!     }
//! });
//! ```

use crate::download::{Download, Summary, TransferState};
use crate::http::HttpClientConfig;
use crate::StyleOptions;

use reqwest::header::HeaderMap;
use reqwest::Proxy;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Called once per task with its outcome.
pub type DownloadCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// Callback type for progress events: cumulative bytes on disk and, when
/// known, the expected total of the file being written.
pub type ProgressCallback = Box<dyn Fn(&Download, &TransferState) + Send + Sync>;

/// Every option of a [`Downloader`](super::Downloader).
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Destination of the planned files.
    pub directory: PathBuf,
    /// Number of request-level retries on transient network failures.
    pub retries: u32,
    /// Look of the progress bars.
    pub style_options: StyleOptions,
    /// Continue partial files with ranged requests.
    pub resumable: bool,
    /// Download again even when the file on disk is already complete.
    pub overwrite: bool,
    /// Headers added to every request.
    pub headers: Option<HeaderMap>,
    /// Proxy every request goes through.
    pub proxy: Option<Proxy>,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
    /// Probe sizes with `Range: bytes=0-0` rather than `HEAD`.
    pub use_range_for_content_length: bool,
    /// Hide the files bar when the queue holds a single file.
    pub single_file_progress: bool,
    /// Pause between two consecutive transfers.
    pub delay: Duration,
    /// Observer of the running transfer.
    pub on_progress: Option<Arc<ProgressCallback>>,
    /// Observer of finished tasks.
    pub on_complete: Option<Arc<DownloadCallback>>,
}

impl DownloaderConfig {
    /// Directory used when none is configured.
    pub const DEFAULT_DIRECTORY: &'static str = "downloads";
    /// Pause between transfers used when none is configured.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

    /// HTTP client settings derived from this configuration.
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            retries: self.retries,
            proxy: self.proxy.clone(),
            headers: self.headers.clone(),
            timeout: self.timeout,
        }
    }
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("directory", &self.directory)
            .field("retries", &self.retries)
            .field("style_options", &self.style_options)
            .field("resumable", &self.resumable)
            .field("overwrite", &self.overwrite)
            .field("headers", &self.headers)
            .field("proxy", &self.proxy.is_some())
            .field("timeout", &self.timeout)
            .field(
                "use_range_for_content_length",
                &self.use_range_for_content_length,
            )
            .field("single_file_progress", &self.single_file_progress)
            .field("delay", &self.delay)
            .field("on_progress", &self.on_progress.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(Self::DEFAULT_DIRECTORY),
            retries: 0,
            style_options: StyleOptions::default(),
            resumable: true,
            overwrite: false,
            headers: None,
            proxy: None,
            timeout: None,
            use_range_for_content_length: false,
            single_file_progress: false,
            delay: Self::DEFAULT_DELAY,
            on_progress: None,
            on_complete: None,
        }
    }
}
