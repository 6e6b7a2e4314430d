//! Link extraction from HTML documents.

use super::extension::Extension;

use reqwest::Url;
use scraper::{ElementRef, Html};
use std::collections::HashSet;
use tracing::debug;

/// Elements carrying a reference to another resource, with the attribute
/// holding that reference.
const REFERENCE_ATTRIBUTES: &[(&str, &str)] = &[
    ("a", "href"),
    ("area", "href"),
    ("link", "href"),
    ("embed", "src"),
    ("iframe", "src"),
    ("source", "src"),
    ("img", "src"),
    ("audio", "src"),
    ("video", "src"),
    ("track", "src"),
    ("object", "data"),
];

/// Extracts the absolute URLs of every resource with the requested
/// extension referenced by `html`.
///
/// References are resolved against the document's `<base href>` when it has
/// one, and against `base_url` otherwise. The result keeps document order and
/// holds each URL once. References that cannot be resolved, and URLs that are
/// not `http(s)` with a host, are skipped. Unparseable input yields an empty
/// list.
///
/// ```rust
/// use linkfetch::{extract_links, Extension};
/// use reqwest::Url;
///
/// let html = r#"<a href="a.pdf">A</a><a href="/b.PDF">B</a><a href="c.docx">C</a>"#;
/// let base = Url::parse("https://example.com/docs/index.html")?;
/// let links = extract_links(html, &base, &Extension::new("pdf")?);
///
/// assert_eq!(links.len(), 2);
/// assert_eq!(links[0].as_str(), "https://example.com/docs/a.pdf");
/// assert_eq!(links[1].as_str(), "https://example.com/b.PDF");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn extract_links(html: &str, base_url: &Url, extension: &Extension) -> Vec<Url> {
    let document = Html::parse_document(html);
    let base = document_base(&document, base_url);

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for reference in references(&document) {
        let Some(url) = resolve(&base, reference) else {
            continue;
        };
        if !extension.matches_url(&url) {
            continue;
        }
        if seen.insert(url.as_str().to_string()) {
            links.push(url);
        }
    }

    debug!(
        "Found {} .{} link(s) in document based at {}",
        links.len(),
        extension,
        base
    );
    links
}

/// Returns the URL relative references resolve against.
///
/// The first `<base href>` wins, itself resolved against `fallback`.
fn document_base(document: &Html, fallback: &Url) -> Url {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "base" && el.value().attr("href").is_some())
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| fallback.join(href.trim()).ok())
        .unwrap_or_else(|| fallback.clone())
}

/// Iterates over raw reference values in document order.
fn references(document: &Html) -> impl Iterator<Item = &str> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter_map(|el| {
            let name = el.value().name();
            REFERENCE_ATTRIBUTES
                .iter()
                .find(|(tag, _)| *tag == name)
                .and_then(|(_, attr)| el.value().attr(attr))
        })
}

/// Resolves a raw reference against `base`.
///
/// Empty and fragment-only references point back at the document itself and
/// are ignored. The fragment of a resolved URL is dropped since it never
/// reaches the server.
fn resolve(base: &Url, reference: &str) -> Option<Url> {
    let reference = reference.trim();
    if reference.is_empty() || reference.starts_with('#') {
        return None;
    }

    let mut url = match base.join(reference) {
        Ok(url) => url,
        Err(e) => {
            debug!("Skipping unresolvable reference {:?}: {}", reference, e);
            return None;
        }
    };

    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return None;
    }

    url.set_fragment(None);
    Some(url)
}
