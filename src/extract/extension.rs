//! The requested file extension.
//!
//! Any extension is accepted: the value is an opaque, case-normalized token
//! rather than an enumeration of known file types.

use crate::error::Error;

use reqwest::Url;
use std::fmt;
use std::str::FromStr;

/// A lower-cased file extension without its leading dot, e.g. `pdf`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extension(String);

impl Extension {
    /// Normalizes `raw` into an [`Extension`].
    ///
    /// Surrounding whitespace and a single leading dot are removed and the
    /// result is lower-cased, so `"pdf"`, `".PDF"` and `" Pdf "` are equal.
    ///
    /// ```rust
    /// use linkfetch::Extension;
    ///
    /// let ext = Extension::new(".PDF")?;
    /// assert_eq!(ext.as_str(), "pdf");
    /// # Ok::<(), linkfetch::Error>(())
    /// ```
    pub fn new(raw: &str) -> Result<Self, Error> {
        let trimmed = raw.trim();
        let token = trimmed.strip_prefix('.').unwrap_or(trimmed).to_lowercase();
        if token.is_empty() || token.starts_with('.') || token.contains('/') {
            return Err(Error::InvalidExtension(raw.to_string()));
        }
        Ok(Self(token))
    }

    /// The extension without its dot.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether a file name ends with this extension.
    ///
    /// The comparison is case-insensitive and requires a non-empty stem, so
    /// a bare `.pdf` is not a match.
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        match name.strip_suffix(self.0.as_str()) {
            Some(rest) => rest.len() > 1 && rest.ends_with('.'),
            None => false,
        }
    }

    /// Checks the final path segment of `url` against this extension.
    ///
    /// Query strings and fragments are not part of the path and never match.
    pub fn matches_url(&self, url: &Url) -> bool {
        url.path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(|segment| {
                let decoded = urlencoding::decode(segment)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| segment.to_string());
                self.matches_name(&decoded)
            })
            .unwrap_or(false)
    }
}

impl FromStr for Extension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Extension::new(s)
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
