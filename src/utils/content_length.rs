//! Content length extraction utilities.
//!
//! This module reads sizes from HTTP response headers, supporting both
//! `Content-Range` (ranged responses) and `Content-Length` (full responses).
//! Headers are parsed directly: the body size hint of a `HEAD` response is
//! always zero and cannot be trusted.

use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_RANGE};
use reqwest::Response;

/// A parsed `Content-Range` header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    /// First byte position and last byte position, inclusive. `None` for the
    /// unsatisfied form `bytes */total`.
    pub range: Option<(u64, u64)>,
    /// Complete length of the resource, when the server knows it.
    pub total: Option<u64>,
}

impl ContentRange {
    /// First byte position carried by the response, if any.
    pub fn start(&self) -> Option<u64> {
        self.range.map(|(start, _)| start)
    }
}

/// Parse a `Content-Range` header value.
///
/// Accepted forms are `bytes start-end/total`, `bytes start-end/*` and
/// `bytes */total`.
///
/// ```rust
/// use linkfetch::utils::parse_content_range;
///
/// let range = parse_content_range("bytes 200-1023/1024").unwrap();
/// assert_eq!(range.start(), Some(200));
/// assert_eq!(range.total, Some(1024));
/// ```
pub fn parse_content_range(value: &str) -> Option<ContentRange> {
    let rest = value.trim().strip_prefix("bytes")?.trim_start();
    let (range, total) = rest.split_once('/')?;

    let total = match total.trim() {
        "*" => None,
        t => Some(t.parse::<u64>().ok()?),
    };
    let range = match range.trim() {
        "*" => None,
        r => {
            let (start, end) = r.split_once('-')?;
            let start = start.trim().parse::<u64>().ok()?;
            let end = end.trim().parse::<u64>().ok()?;
            if end < start {
                return None;
            }
            Some((start, end))
        }
    };

    if range.is_none() && total.is_none() {
        return None;
    }
    Some(ContentRange { range, total })
}

/// Parse a `Content-Range` header value to extract the total size.
///
/// ```rust
/// use linkfetch::utils::parse_content_range_total;
///
/// let total = parse_content_range_total("bytes 0-1023/2048");
/// assert_eq!(total, Some(2048));
/// ```
pub fn parse_content_range_total(content_range: &str) -> Option<u64> {
    parse_content_range(content_range).and_then(|r| r.total)
}

/// Read the `Content-Length` header.
pub fn header_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Read and parse the `Content-Range` header.
pub fn header_content_range(headers: &HeaderMap) -> Option<ContentRange> {
    headers
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_range)
}

/// Total size of the remote resource as announced by `response`.
///
/// The total of a `Content-Range` header wins; otherwise `Content-Length` is
/// used, which is only the full size for non-ranged responses.
pub fn remote_total(response: &Response) -> Option<u64> {
    let headers = response.headers();
    match header_content_range(headers) {
        Some(range) => range.total,
        None => header_content_length(headers),
    }
}
