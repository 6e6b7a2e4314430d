//! linkfetch downloads every file of a given type linked from an HTML page.
//!
//! The page is read from disk or fetched over HTTP(S), its links are resolved
//! and filtered by extension, and the matching files are downloaded one after
//! the other into a directory. Partial files left by an interrupted run are
//! continued with ranged requests, and files that are already complete are
//! not downloaded again.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use linkfetch::{DownloaderBuilder, Error, Extension};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("chemistry_pse_files"))
//!     .build();
//! let result = downloader
//!     .download_from("Chemistry Resources.html", &Extension::new("pse")?, None)
//!     .await?;
//! println!("{} files downloaded", result.succeeded());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`source`] - loading the HTML document from a file or a URL
//! - [`extract`] - link extraction and the [`Extension`] token
//! - [`download`] - download tasks, queue planning, outcomes and the batch tally
//! - [`downloader`] - the resumable transfer engine, batch coordination and configuration
//! - [`error`] - centralized error handling with the `Error` enum
//! - [`http`] - HTTP client construction
//! - [`progress`] - progress bar styling and display
//! - [`utils`] - HTTP header parsing helpers

pub mod download;
pub mod downloader;
pub mod error;
pub mod extract;
pub mod http;
pub mod progress;
pub mod source;
pub mod utils;

pub use download::{plan, BatchResult, Download, Status, Summary, TransferState};
pub use downloader::{Downloader, DownloaderBuilder};
pub use error::{Error, Result};
pub use extract::{extract_links, Extension};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::{ProgressBarOpts, StyleOptions};
pub use source::{DocumentSource, Origin};
