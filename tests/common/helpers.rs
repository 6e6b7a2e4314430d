#![allow(dead_code)]

use linkfetch::progress::StyleOptions;
use linkfetch::{Download, DownloaderBuilder, HttpClientConfig};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Url;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

// Common test constants
pub const TEST_URL: &str = "https://example.com/papers/report.pdf";
pub const TEST_USER_AGENT: &str = "linkfetch-test-agent";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

/// Asserts that a file holds exactly `expected`
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).expect("Failed to read file");
    assert_eq!(content.len(), expected.len(), "File size mismatch at path: {:?}", path);
    assert!(content == expected, "File content mismatch at path: {:?}", path);
}

// === Download Creation Helpers ===

/// Creates a download for `file_path` on the mock server
pub fn server_download(server: &MockServer, file_path: &str) -> Download {
    let url = format!("{}{}", server.uri(), file_path);
    Download::try_from(url.as_str()).expect("Failed to create download")
}

/// Base URL of the mock server, with a trailing slash
pub fn server_base(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).expect("Invalid server URL")
}

// === Downloader Builder Helpers ===

/// Creates a downloader builder without bars or delay, writing into `dir`
pub fn quiet_builder(dir: &Path) -> DownloaderBuilder {
    DownloaderBuilder::hidden()
        .directory(dir.to_path_buf())
        .delay(Duration::ZERO)
}

// === HTTP Configuration Helpers ===

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

/// Creates a test HTTP client configuration with custom retries
pub fn create_test_http_config_with_retries(retries: u32) -> HttpClientConfig {
    HttpClientConfig {
        retries,
        headers: Some(create_test_headers()),
        ..HttpClientConfig::default()
    }
}

// === Progress Bar Helpers ===

/// Creates hidden style options for testing
pub fn create_disabled_style_options() -> StyleOptions {
    StyleOptions::hidden()
}

// === Mock Server Helpers ===

/// Serves a static file like a plain web server would.
///
/// `HEAD` answers the size, `GET` the body. With `honor_ranges`, a
/// `Range: bytes=start-[end]` request gets a `206` slice, or a `416` when it
/// starts past the end; without it the full body is always returned.
pub struct FileResponder {
    content: Vec<u8>,
    honor_ranges: bool,
}

impl FileResponder {
    pub fn new(content: &[u8], honor_ranges: bool) -> Self {
        Self {
            content: content.to_vec(),
            honor_ranges,
        }
    }
}

impl Respond for FileResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let len = self.content.len();

        if request.method.as_str() == "HEAD" {
            return ResponseTemplate::new(200)
                .insert_header("content-length", len.to_string().as_str())
                .set_body_bytes(self.content.clone());
        }

        let range = request
            .headers
            .get("range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_range_header);

        match range {
            Some((start, _)) if self.honor_ranges && start >= len => {
                ResponseTemplate::new(416)
                    .insert_header("content-range", format!("bytes */{}", len).as_str())
            }
            Some((start, end)) if self.honor_ranges => {
                let end = end.map_or(len - 1, |end| end.min(len - 1));
                ResponseTemplate::new(206)
                    .insert_header(
                        "content-range",
                        format!("bytes {}-{}/{}", start, end, len).as_str(),
                    )
                    .set_body_bytes(self.content[start..=end].to_vec())
            }
            _ => ResponseTemplate::new(200).set_body_bytes(self.content.clone()),
        }
    }
}

/// Parses `bytes=start-` and `bytes=start-end`.
fn parse_range_header(value: &str) -> Option<(usize, Option<usize>)> {
    let (start, end) = value.strip_prefix("bytes=")?.split_once('-')?;
    let start = start.parse().ok()?;
    let end = match end {
        "" => None,
        end => Some(end.parse().ok()?),
    };
    Some((start, end))
}

/// Mounts a file at `file_path` that supports ranged requests
pub async fn mount_file(server: &MockServer, file_path: &str, content: &[u8]) {
    Mock::given(path(file_path))
        .respond_with(FileResponder::new(content, true))
        .mount(server)
        .await;
}

/// Mounts a file at `file_path` whose server ignores `Range`
pub async fn mount_file_without_ranges(server: &MockServer, file_path: &str, content: &[u8]) {
    Mock::given(path(file_path))
        .respond_with(FileResponder::new(content, false))
        .mount(server)
        .await;
}

/// Mounts an HTML page at `file_path`
pub async fn mount_page(server: &MockServer, file_path: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(file_path))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(html),
        )
        .mount(server)
        .await;
}

/// Number of requests received so far with the given method
pub async fn count_requests(server: &MockServer, http_method: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == http_method)
        .count()
}

/// `Range` headers of the `GET` requests received so far, in order
pub async fn received_ranges(server: &MockServer) -> Vec<Option<String>> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == "GET")
        .map(|r| {
            r.headers
                .get("range")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .collect()
}

/// A URL on a local port nothing listens on
pub fn closed_port_url(file_path: &str) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, file_path)
}

/// Answers one connection per entry of `responses`, in order, with the raw
/// status line and headers `head` followed by `body`, then closes it.
/// Returns the URL of `file_path`.
pub fn serve_raw(file_path: &str, responses: Vec<(String, Vec<u8>)>) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local address").port();

    std::thread::spawn(move || {
        for (head, body) in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => return,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let head = format!("{}\r\nConnection: close\r\n\r\n", head);
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body);
            let _ = stream.flush();
            let _ = stream.shutdown(std::net::Shutdown::Both);
        }
    });

    format!("http://127.0.0.1:{}{}", port, file_path)
}

/// Serves one `GET` that announces `declared_len` bytes but closes the
/// connection after sending `body`.
pub fn serve_truncated_once(file_path: &str, declared_len: usize, body: &[u8]) -> String {
    let head = format!("HTTP/1.1 200 OK\r\nContent-Length: {}", declared_len);
    serve_raw(file_path, vec![(head, body.to_vec())])
}
