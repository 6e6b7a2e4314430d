//! HTTP client setup and middleware configuration.
//!
//! One client is built per batch and dropped when the batch ends, so its
//! connection pool is shared by every transfer of that batch and no longer.
//!
//! # Features
//!
//! - **Tracing**: a span per request through `reqwest-tracing`
//! - **Retry Logic**: optional exponential backoff for transient failures
//! - **Proxy Support**: optional HTTP/HTTPS proxy
//! - **Default Headers**: a browser-like `User-Agent` unless overridden
//!
//! # Examples
//!
//! ```rust
//! use linkfetch::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderMap, USER_AGENT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(USER_AGENT, "MyDownloader/1.0".parse()?);
//!
//! let config = HttpClientConfig {
//!     headers: Some(headers),
//!     ..HttpClientConfig::default()
//! };
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use reqwest::{
    header::{HeaderMap, HeaderValue, USER_AGENT},
    Proxy,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// User agent sent when the caller does not provide one. Some file hosts
/// refuse clients that do not look like a browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Options of the batch-scoped client.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Retries of a request that failed transiently. Zero disables them.
    pub retries: u32,
    /// Proxy every request goes through.
    pub proxy: Option<Proxy>,
    /// Headers sent with every request, on top of the default `User-Agent`.
    pub headers: Option<HeaderMap>,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
}

/// Builds the client of one batch.
///
/// Requests are traced. Transient failures are retried with exponential
/// backoff only when `retries` is non-zero.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    if let Some(extra) = config.headers {
        headers.extend(extra);
    }

    let mut inner = reqwest::Client::builder().default_headers(headers);

    if let Some(proxy) = config.proxy {
        inner = inner.proxy(proxy);
    }

    if let Some(timeout) = config.timeout {
        inner = inner.timeout(timeout);
    }

    let client = inner.build()?;

    let mut builder = ClientBuilder::new(client).with(TracingMiddleware::default());

    if config.retries > 0 {
        let policy = ExponentialBackoff::builder().build_with_max_retries(config.retries);
        builder = builder.with(RetryTransientMiddleware::new_with_policy(policy));
    }

    Ok(builder.build())
}
