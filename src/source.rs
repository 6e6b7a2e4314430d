//! The HTML document links are extracted from.
//!
//! A document is either read from a local file or fetched from a remote URL.
//! Either way it carries a base URL used to resolve relative references:
//! the `file://` URL of the local path, the final URL of the remote fetch,
//! or an explicit override supplied by the caller.

use crate::error::{Error, Result};
use crate::extract::{extract_links, Extension};

use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Where a document was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// A file on the local filesystem.
    Local(PathBuf),
    /// A remote page fetched over HTTP(S).
    Remote(Url),
    /// Text handed over directly by the caller.
    Inline,
}

/// A loaded HTML document and the URL its references are relative to.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    html: String,
    base_url: Url,
    origin: Origin,
}

impl DocumentSource {
    /// Wraps HTML text that is already in memory.
    pub fn from_html(html: impl Into<String>, base_url: Url) -> Self {
        Self {
            html: html.into(),
            base_url,
            origin: Origin::Inline,
        }
    }

    /// Reads a local HTML file.
    ///
    /// Without `base_override`, relative references resolve against the
    /// file's own `file://` URL, which only leaves absolute `http(s)` links
    /// usable. Pages saved from a website usually want the site URL instead.
    pub async fn read_file(path: &Path, base_override: Option<Url>) -> Result<Self> {
        let unavailable = |reason: String| Error::SourceUnavailable {
            location: path.display().to_string(),
            reason,
        };

        debug!("Reading document {:?}", path);
        let bytes = fs::read(path).await.map_err(|e| unavailable(e.to_string()))?;
        let html = String::from_utf8_lossy(&bytes).into_owned();

        let base_url = match base_override {
            Some(url) => url,
            None => {
                let absolute = fs::canonicalize(path)
                    .await
                    .map_err(|e| unavailable(e.to_string()))?;
                Url::from_file_path(&absolute)
                    .map_err(|_| unavailable("path cannot be expressed as a URL".into()))?
            }
        };

        Ok(Self {
            html,
            base_url,
            origin: Origin::Local(path.to_path_buf()),
        })
    }

    /// Fetches a remote HTML page with a single GET.
    ///
    /// The base URL is the final URL after redirects.
    pub async fn fetch(client: &ClientWithMiddleware, url: &Url) -> Result<Self> {
        let unavailable = |reason: String| Error::SourceUnavailable {
            location: url.to_string(),
            reason,
        };

        debug!("Fetching document {}", url);
        let res = client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        let res = res
            .error_for_status()
            .map_err(|e| unavailable(e.to_string()))?;
        let base_url = res.url().clone();
        let html = res.text().await.map_err(|e| unavailable(e.to_string()))?;

        Ok(Self {
            html,
            base_url,
            origin: Origin::Remote(url.clone()),
        })
    }

    /// Loads a document from `location`, an `http(s)` URL or a file path.
    ///
    /// `base_override` replaces the base URL of local files; remote pages
    /// always resolve against their own URL.
    pub async fn load(
        client: &ClientWithMiddleware,
        location: &str,
        base_override: Option<Url>,
    ) -> Result<Self> {
        match parse_remote(location) {
            Some(url) => Self::fetch(client, &url).await,
            None => Self::read_file(Path::new(location), base_override).await,
        }
    }

    /// The raw HTML text.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The URL relative references resolve against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Where the document came from.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Extracts the links of the given extension from this document.
    pub fn links(&self, extension: &Extension) -> Vec<Url> {
        extract_links(&self.html, &self.base_url, extension)
    }
}

/// Returns the URL if `location` is an `http(s)` URL.
fn parse_remote(location: &str) -> Option<Url> {
    Url::parse(location)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}
