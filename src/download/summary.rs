//! Download summary functionality.
//!
//! This module contains the [`Summary`] struct and [`Status`] enum describing
//! the outcome of one transfer, and the [`TransferState`] reported to progress
//! observers while a transfer runs.
//!
//! # Examples
//!
//! ```rust
//! use linkfetch::download::{Download, Status, Summary};
//! use reqwest::StatusCode;
//! use std::convert::TryFrom;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let download = Download::try_from("https://example.com/file.pdf")?;
//! let summary = Summary::new(download, Some(StatusCode::OK), 2048, false)
//!     .with_transferred(2048)
//!     .with_status(Status::Success);
//!
//! assert!(summary.is_success());
//! assert_eq!(summary.size(), 2048);
//! # Ok(())
//! # }
//! ```

use super::download::Download;
use reqwest::StatusCode;

/// Download status enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Download failed with error message
    Fail(String),
    /// Download not yet started
    NotStarted,
    /// Continuing a partial file from its on-disk size
    Resuming,
    /// Writing a file from its first byte
    Downloading,
    /// Download was skipped with reason
    Skipped(String),
    /// Download completed successfully
    Success,
}

impl Status {
    /// Returns `true` once the status can no longer change.
    pub fn is_final(&self) -> bool {
        matches!(self, Status::Fail(_) | Status::Skipped(_) | Status::Success)
    }
}

/// Live state of a transfer, handed to progress observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferState {
    /// Total size announced by the server, when known.
    pub bytes_expected: Option<u64>,
    /// Bytes currently in the destination file.
    pub bytes_on_disk: u64,
    /// Current status.
    pub status: Status,
}

impl TransferState {
    /// Completion ratio in `[0, 1]`, only when the total is known.
    pub fn fraction(&self) -> Option<f64> {
        match self.bytes_expected {
            Some(0) => Some(1.0),
            Some(total) => Some((self.bytes_on_disk as f64 / total as f64).min(1.0)),
            None => None,
        }
    }
}

/// Represents a [`Download`] summary.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Downloaded item.
    download: Download,
    /// HTTP status code of the transfer response, if one was received.
    statuscode: Option<StatusCode>,
    /// Size of the destination file in bytes.
    size: u64,
    /// Bytes received during this run.
    transferred: u64,
    /// Status.
    status: Status,
    /// Whether an existing partial file was continued.
    resumed: bool,
}

impl Summary {
    /// Create a new [`Download`] [`Summary`].
    pub fn new(
        download: Download,
        statuscode: Option<StatusCode>,
        size: u64,
        resumed: bool,
    ) -> Self {
        Self {
            download,
            statuscode,
            size,
            transferred: 0,
            status: Status::NotStarted,
            resumed,
        }
    }

    /// Attach a status to a [`Download`] [`Summary`].
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Record the number of bytes received during this run.
    pub fn with_transferred(self, transferred: u64) -> Self {
        Self {
            transferred,
            ..self
        }
    }

    /// Get the summary's HTTP status code.
    pub fn statuscode(&self) -> Option<StatusCode> {
        self.statuscode
    }

    /// Get the size of the destination file.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get the number of bytes received during this run.
    pub fn transferred(&self) -> u64 {
        self.transferred
    }

    /// Get a reference to the summary's download.
    pub fn download(&self) -> &Download {
        &self.download
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Whether the file was downloaded during this run.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Whether the file was already complete on disk.
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, Status::Skipped(_))
    }

    /// Whether the transfer failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.status, Status::Fail(_))
    }

    /// Mark the summary as failed with a message.
    pub fn fail(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Fail(format!("{}", msg)),
            ..self
        }
    }

    /// Mark the summary as skipped with a message.
    pub fn skip(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Skipped(format!("{}", msg)),
            ..self
        }
    }

    /// Get whether a partial file was continued.
    #[must_use]
    pub fn resumed(&self) -> bool {
        self.resumed
    }
}
