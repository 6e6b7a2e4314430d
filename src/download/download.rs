//! Core download task.
//!
//! A [`Download`] binds one source URL to the file name it is saved under.
//! The destination path is that name inside the downloader's directory.
//!
//! # Examples
//!
//! ```rust
//! use linkfetch::download::Download;
//! use std::convert::TryFrom;
//! use std::path::Path;
//!
//! let download = Download::try_from("https://example.com/papers/My%20Notes.pdf")?;
//! assert_eq!(download.filename, "My Notes.pdf");
//! assert_eq!(
//!     download.destination(Path::new("downloads")),
//!     Path::new("downloads").join("My Notes.pdf")
//! );
//! # Ok::<(), linkfetch::Error>(())
//! ```

use crate::error::Error;

use reqwest::Url;
use std::convert::TryFrom;
use std::path::{Path, PathBuf};

/// Represents a file to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// URL of the file to download.
    pub url: Url,
    /// File name used to save the file on disk.
    pub filename: String,
}

impl Download {
    /// Creates a new [`Download`].
    ///
    /// When using the [`Download::try_from`] method, the file name is
    /// automatically extracted from the URL.
    pub fn new(url: &Url, filename: &str) -> Self {
        Self {
            url: url.clone(),
            filename: String::from(filename),
        }
    }

    /// The path this download is written to inside `directory`.
    pub fn destination(&self, directory: &Path) -> PathBuf {
        directory.join(&self.filename)
    }
}

/// Derives a safe file name from the final path segment of `url`.
///
/// The segment is percent-decoded and path separators are replaced so the
/// name can never escape the destination directory.
pub(crate) fn filename_from_url(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.next_back()?;
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    let name: String = decoded
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    let name = name.trim().to_string();

    match name.as_str() {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}

impl TryFrom<&Url> for Download {
    type Error = crate::error::Error;

    fn try_from(value: &Url) -> Result<Self, Self::Error> {
        filename_from_url(value)
            .map(|filename| Download {
                url: value.clone(),
                filename,
            })
            .ok_or_else(|| {
                Error::InvalidUrl(format!("The url \"{}\" does not contain a filename", value))
            })
    }
}

impl TryFrom<&str> for Download {
    type Error = crate::error::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value)
            .map_err(|e| {
                Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
            })
            .and_then(|u| Download::try_from(&u))
    }
}
