//! Step-by-step configuration of a [`Downloader`](super::Downloader).
//!
//! # Examples
//!
//! ```rust
//! use linkfetch::downloader::DownloaderBuilder;
//! use linkfetch::download::Status;
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./biology_pdfs"))
//!     .delay(Duration::from_millis(250))
//!     .on_complete(|summary| {
//!         if let Status::Fail(msg) = summary.status() {
//!             eprintln!("{}: {}", summary.download().url, msg);
//!         }
//!     })
//!     .build();
//! assert!(downloader.resumable());
//! ```

use super::{config::DownloaderConfig, downloader::Downloader};
use crate::download::{Download, Summary, TransferState};
use crate::StyleOptions;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::Proxy;
use std::{path::PathBuf, sync::Arc, time::Duration};

/// Collects the options of a [`Downloader`], then builds it.
///
/// ```rust
/// # fn main() {
/// use linkfetch::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().retries(2).directory("downloads".into()).build();
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Starts from [`DownloaderConfig::default`].
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Starts from the defaults, without any progress bar.
    pub fn hidden() -> Self {
        let mut builder = DownloaderBuilder::default();
        builder.config.style_options = StyleOptions::hidden();
        builder
    }

    /// Directory the planned files are written to.
    ///
    /// It is created, with its parents, when a batch starts.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Set the number of request-level retries on transient failures.
    ///
    /// Failed tasks are never retried by the batch itself.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Continue partial files instead of downloading them again.
    pub fn resumable(mut self, resumable: bool) -> Self {
        self.config.resumable = resumable;
        self
    }

    /// Set whether to overwrite files that are already complete.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.config.overwrite = overwrite;
        self
    }

    /// Set the pause between two consecutive transfers.
    ///
    /// No pause follows the last transfer of a batch.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    /// Set a timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Route every request through `proxy`.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Look of the files bar and of the transfer bar.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Probe the size of a file on disk with `Range: bytes=0-0` instead of
    /// `HEAD`, for servers that answer `HEAD` badly.
    pub fn use_range_for_content_length(mut self, use_range: bool) -> Self {
        self.config.use_range_for_content_length = use_range;
        self
    }

    /// Hide the files bar when the queue holds one file.
    pub fn single_file_progress(mut self, single_file: bool) -> Self {
        self.config.single_file_progress = single_file;
        self
    }

    /// Set callback for progress of the running transfer.
    ///
    /// It receives the bytes on disk so far and, when the server announced it,
    /// the expected total. It is called once more with the final size.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linkfetch::downloader::DownloaderBuilder;
    ///
    /// let downloader = DownloaderBuilder::hidden()
    ///     .on_progress(|download, state| match state.fraction() {
    ///         Some(f) => println!("{} {:.0}%", download.filename, f * 100.0),
    ///         None => println!("{} {} bytes", download.filename, state.bytes_on_disk),
    ///     })
    ///     .build();
    /// ```
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Download, &TransferState) + Send + Sync + 'static,
    {
        self.config.on_progress = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Call `callback` when a task ends.
    ///
    /// It is called once per task, whatever the outcome.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    /// The headers set so far, or an empty map.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Merge `headers` into the headers set so far. Later values replace
    /// earlier ones.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Set a single header on every request.
    ///
    /// # Example
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use linkfetch::downloader::DownloaderBuilder;
    ///
    /// let builder = DownloaderBuilder::new()
    ///     .header(header::USER_AGENT, HeaderValue::from_static("curl/7.87"))
    ///     .build();
    /// ```
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Finish the configuration.
    pub fn build(self) -> Downloader {
        Downloader::new(self.config)
    }
}
