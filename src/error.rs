//! Error handling for linkfetch.
//!
//! Errors fall in two groups. Batch-level errors (the document could not be
//! loaded, the destination directory could not be created, the HTTP client
//! could not be built) are returned as `Err` before any transfer starts.
//! Task-level errors are produced inside the transfer engine and folded into
//! the task's [`Summary`](crate::download::Summary) as a failure detail, so
//! they never escape a batch.

use reqwest::StatusCode;
use std::io;
use thiserror::Error;

/// Errors that can happen when using linkfetch.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The HTML document could not be read or fetched.
    ///
    /// This is fatal to a whole batch: there is nothing to extract links from.
    #[error("Cannot load document \"{location}\": {reason}")]
    SourceUnavailable { location: String, reason: String },

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The requested file extension is empty once normalized.
    #[error("Invalid file extension: \"{0}\"")]
    InvalidExtension(String),

    /// The server answered with a status that is not accepted for a transfer.
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: StatusCode },

    /// The transfer ended before the announced total size was on disk.
    #[error("Incomplete transfer: expected {expected} bytes, got {received}")]
    IncompleteTransfer { expected: u64, received: u64 },

    /// I/O Error.
    #[error("I/O error: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Connection, timeout or DNS failure reported by the client middleware.
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
}

/// Result type alias for operations that can fail with a linkfetch error.
pub type Result<T> = std::result::Result<T, Error>;
