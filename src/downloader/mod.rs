//! Downloader module containing the transfer engine, batch coordination,
//! builder pattern, and configuration.
//!
//! # Overview
//!
//! - `downloader` - [`Downloader`]: runs a queue of tasks and the whole
//!   document-to-tally pipeline
//! - `engine` - [`TransferEngine`]: one resumable transfer at a time
//! - `builder` - [`DownloaderBuilder`] for configuration
//! - `config` - configuration structures and callback types
//!
//! # Examples
//!
//! ```rust,no_run
//! use linkfetch::downloader::DownloaderBuilder;
//! use linkfetch::download::Download;
//! use std::convert::TryFrom;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new().build();
//! let downloads = vec![
//!     Download::try_from("https://example.com/file1.pdf")?,
//!     Download::try_from("https://example.com/file2.pdf")?,
//! ];
//! let result = downloader.download(&downloads).await?;
//! for (url, reason) in result.failures() {
//!     eprintln!("{}: {}", url, reason);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;
pub mod engine;

pub use builder::DownloaderBuilder;
pub use config::{DownloadCallback, DownloaderConfig, ProgressCallback};
pub use downloader::Downloader;
pub use engine::TransferEngine;
