//! Tests for the downloader module functionality.
//!
//! This file contains tests for:
//! - Downloader getters and defaults
//! - DownloaderBuilder pattern
//! - Headers sent by the batch HTTP client

use linkfetch::downloader::{DownloaderBuilder, DownloaderConfig};
use linkfetch::http::DEFAULT_USER_AGENT;

use reqwest::header::{HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use std::path::PathBuf;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

#[test]
fn test_builder_defaults() {
    let downloader = DownloaderBuilder::new().build();

    assert_eq!(downloader.directory(), &PathBuf::from("downloads"));
    assert_eq!(downloader.retries(), 0);
    assert_eq!(downloader.delay(), Duration::from_millis(500));
    assert!(downloader.resumable());
    assert!(!downloader.overwrite());
    assert!(!downloader.use_range_for_content_length());
    assert!(!downloader.single_file_progress());
    assert!(downloader.headers().is_none());
}

#[test]
fn test_config_constants_match_defaults() {
    let config = DownloaderConfig::default();
    assert_eq!(
        config.directory,
        PathBuf::from(DownloaderConfig::DEFAULT_DIRECTORY)
    );
    assert_eq!(config.delay, DownloaderConfig::DEFAULT_DELAY);
}

#[test]
fn test_downloader_getters() {
    let temp_dir = create_temp_dir();
    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .retries(5)
        .resumable(false)
        .overwrite(true)
        .delay(Duration::from_secs(2))
        .use_range_for_content_length(true)
        .single_file_progress(true)
        .build();

    assert_eq!(downloader.directory(), temp_dir.path());
    assert_eq!(downloader.retries(), 5);
    assert!(!downloader.resumable());
    assert!(downloader.overwrite());
    assert_eq!(downloader.delay(), Duration::from_secs(2));
    assert!(downloader.use_range_for_content_length());
    assert!(downloader.single_file_progress());
}

#[test]
fn test_downloader_debug() {
    let downloader = DownloaderBuilder::new()
        .on_complete(|_| {})
        .build();
    let debug_str = format!("{:?}", downloader);

    assert!(debug_str.contains("Downloader"));
    assert!(debug_str.contains("config"));
    assert!(debug_str.contains("delay"));
}

#[test]
fn test_downloader_clone() {
    let downloader = DownloaderBuilder::new().retries(2).build();
    let cloned = downloader.clone();

    assert_eq!(downloader.retries(), cloned.retries());
    assert_eq!(downloader.delay(), cloned.delay());
    assert_eq!(downloader.resumable(), cloned.resumable());
}

#[test]
fn test_builder_headers_merge() {
    let downloader = DownloaderBuilder::new()
        .headers(create_test_headers())
        .header(ACCEPT_LANGUAGE, HeaderValue::from_static("en"))
        .build();

    let headers = downloader.headers().unwrap();
    assert_eq!(
        headers.get(USER_AGENT),
        Some(&HeaderValue::from_static(TEST_USER_AGENT))
    );
    assert_eq!(
        headers.get(ACCEPT_LANGUAGE),
        Some(&HeaderValue::from_static("en"))
    );
}

#[test]
fn test_builder_header_replaces_same_name() {
    let downloader = DownloaderBuilder::new()
        .header(USER_AGENT, HeaderValue::from_static("first"))
        .header(USER_AGENT, HeaderValue::from_static("second"))
        .build();

    let headers = downloader.headers().unwrap();
    assert_eq!(headers.get_all(USER_AGENT).iter().count(), 1);
    assert_eq!(
        headers.get(USER_AGENT),
        Some(&HeaderValue::from_static("second"))
    );
}

#[tokio::test]
async fn test_default_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua.pdf"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
        .mount(&server)
        .await;
    let temp_dir = create_temp_dir();

    let result = quiet_builder(temp_dir.path())
        .build()
        .download(&[server_download(&server, "/ua.pdf")])
        .await
        .unwrap();
    assert_eq!(result.succeeded(), 1);
}

#[tokio::test]
async fn test_custom_user_agent_replaces_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua.pdf"))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
        .mount(&server)
        .await;
    let temp_dir = create_temp_dir();

    let result = quiet_builder(temp_dir.path())
        .header(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT))
        .build()
        .download(&[server_download(&server, "/ua.pdf")])
        .await
        .unwrap();
    assert_eq!(result.succeeded(), 1);
}

#[tokio::test]
async fn test_timeout_fails_slow_task() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"slow".to_vec())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    mount_file(&server, "/fast.pdf", b"fast").await;
    let temp_dir = create_temp_dir();

    let downloads = vec![
        server_download(&server, "/slow.pdf"),
        server_download(&server, "/fast.pdf"),
    ];
    let result = quiet_builder(temp_dir.path())
        .timeout(Duration::from_millis(200))
        .build()
        .download(&downloads)
        .await
        .unwrap();

    assert!(result.summaries()[0].is_failed());
    assert!(result.summaries()[1].is_success());
}
