//! Turns extracted links into download tasks.
//!
//! Tasks keep the order of their links, each URL is queued once, and no two
//! tasks share a file name. When two different URLs end in the same file name
//! the first one keeps it and later ones get a short hash of their full URL
//! appended to the stem (`report.pdf` becomes `report-1f2e3d4c.pdf`), so two
//! remote files are never merged into one destination.

use super::download::{filename_from_url, Download};

use reqwest::Url;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::warn;

/// Plans the download queue for `links`.
///
/// File names are compared case-insensitively so the queue is also safe on
/// case-insensitive filesystems.
///
/// ```rust
/// use linkfetch::download::plan;
/// use reqwest::Url;
///
/// let links = vec![
///     Url::parse("https://a.example.com/report.pdf")?,
///     Url::parse("https://b.example.com/report.pdf")?,
///     Url::parse("https://a.example.com/report.pdf")?,
/// ];
/// let tasks = plan(&links);
///
/// assert_eq!(tasks.len(), 2);
/// assert_eq!(tasks[0].filename, "report.pdf");
/// assert_ne!(tasks[1].filename, "report.pdf");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn plan(links: &[Url]) -> Vec<Download> {
    let mut seen_urls = HashSet::new();
    let mut taken_names = HashSet::new();
    let mut downloads = Vec::with_capacity(links.len());

    for url in links {
        if !seen_urls.insert(url.as_str()) {
            continue;
        }

        let wanted =
            filename_from_url(url).unwrap_or_else(|| format!("document-{}", url_digest(url)));
        let filename = if taken_names.contains(&wanted.to_lowercase()) {
            let renamed = disambiguate(&wanted, url, &taken_names);
            warn!(
                "{} collides with an earlier link named {:?}, saving it as {:?}",
                url, wanted, renamed
            );
            renamed
        } else {
            wanted
        };

        taken_names.insert(filename.to_lowercase());
        downloads.push(Download::new(url, &filename));
    }

    downloads
}

/// Builds a free variant of `name` derived from `url`.
fn disambiguate(name: &str, url: &Url, taken: &HashSet<String>) -> String {
    let (stem, ext) = split_extension(name);
    let tag = url_digest(url);

    let mut candidate = format!("{}-{}{}", stem, tag, ext);
    let mut counter = 2;
    while taken.contains(&candidate.to_lowercase()) {
        candidate = format!("{}-{}-{}{}", stem, tag, counter, ext);
        counter += 1;
    }
    candidate
}

/// Splits `name` into its stem and dotted extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// First eight hex digits of the SHA-256 of the full URL.
fn url_digest(url: &Url) -> String {
    Sha256::digest(url.as_str().as_bytes())
        .iter()
        .take(4)
        .map(|b| format!("{:02x}", b))
        .collect()
}
