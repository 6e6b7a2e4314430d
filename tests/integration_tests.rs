//! Integration tests for the linkfetch crate.
//!
//! These tests run the whole pipeline: load a document, extract its links,
//! plan the queue and download it, against a local mock server.

use linkfetch::{DocumentSource, Error, Extension, Origin};
use reqwest::Url;

mod common;
use common::helpers::*;

const RESOURCES_PAGE: &str = r##"<!DOCTYPE html>
<html>
  <head><title>Biology Resources</title></head>
  <body>
    <h1>Worksheets</h1>
    <ul>
      <li><a href="files/a.pdf">Cells</a></li>
      <li><a href="/docs/b.PDF">Genetics</a></li>
      <li><a href="files/a.pdf">Cells (again)</a></li>
      <li><a href="c.docx">Syllabus</a></li>
      <li><a href="#top">Back to top</a></li>
    </ul>
  </body>
</html>"##;

fn pdf() -> Extension {
    Extension::new("pdf").unwrap()
}

async fn mount_resources(server: &wiremock::MockServer) -> (Vec<u8>, Vec<u8>) {
    let a = create_test_content(1_200);
    let b = create_test_content(3_400);
    mount_file(server, "/site/files/a.pdf", &a).await;
    mount_file(server, "/docs/b.PDF", &b).await;
    mount_file(server, "/site/c.docx", b"not wanted").await;
    (a, b)
}

#[tokio::test]
async fn test_local_document_with_base_override() {
    let server = wiremock::MockServer::start().await;
    let (a, b) = mount_resources(&server).await;
    let temp_dir = create_temp_dir();
    let page = create_temp_file(temp_dir.path(), "Biology Resources.html", RESOURCES_PAGE.as_bytes());
    let download_dir = temp_dir.path().join("biology_pdfs");

    let base = server_base(&server).join("site/").unwrap();
    let downloader = quiet_builder(&download_dir).build();
    let result = downloader
        .download_from(page.to_str().unwrap(), &pdf(), Some(base))
        .await
        .expect("pipeline should run");

    assert_eq!(result.len(), 2);
    assert_eq!(result.succeeded(), 2);
    let names: Vec<_> = result
        .summaries()
        .iter()
        .map(|s| s.download().filename.as_str())
        .collect();
    assert_eq!(names, vec!["a.pdf", "b.PDF"]);

    assert_file_content(&download_dir.join("a.pdf"), &a);
    assert_file_content(&download_dir.join("b.PDF"), &b);
    assert!(!download_dir.join("c.docx").exists());
}

#[tokio::test]
async fn test_remote_document_resolves_against_its_url() {
    let server = wiremock::MockServer::start().await;
    let (a, _) = mount_resources(&server).await;
    mount_page(&server, "/site/index.html", RESOURCES_PAGE).await;
    let temp_dir = create_temp_dir();

    let downloader = quiet_builder(temp_dir.path()).build();
    let location = format!("{}/site/index.html", server.uri());

    let source = downloader.load(&location, None).await.unwrap();
    assert!(matches!(source.origin(), Origin::Remote(_)));
    let links = source.links(&pdf());
    assert_eq!(
        links,
        vec![
            server_base(&server).join("site/files/a.pdf").unwrap(),
            server_base(&server).join("docs/b.PDF").unwrap(),
        ]
    );

    let result = downloader.download_source(&source, &pdf()).await.unwrap();
    assert_eq!(result.succeeded(), 2);
    assert_file_content(&temp_dir.path().join("a.pdf"), &a);
}

#[tokio::test]
async fn test_rerun_skips_everything() {
    let server = wiremock::MockServer::start().await;
    mount_resources(&server).await;
    mount_page(&server, "/site/index.html", RESOURCES_PAGE).await;
    let temp_dir = create_temp_dir();
    let downloader = quiet_builder(temp_dir.path()).build();
    let location = format!("{}/site/index.html", server.uri());

    let first = downloader.download_from(&location, &pdf(), None).await.unwrap();
    assert_eq!(first.succeeded(), 2);
    let gets = count_requests(&server, "GET").await;

    let second = downloader.download_from(&location, &pdf(), None).await.unwrap();
    assert_eq!(second.skipped(), 2);
    assert_eq!(second.bytes_transferred(), 0);
    // Only the page itself was fetched again.
    assert_eq!(count_requests(&server, "GET").await, gets + 1);
}

#[tokio::test]
async fn test_colliding_names_are_kept_apart() {
    let server = wiremock::MockServer::start().await;
    let first = b"first report".to_vec();
    let second = b"second report, different bytes".to_vec();
    mount_file(&server, "/2023/report.pdf", &first).await;
    mount_file(&server, "/2024/report.pdf", &second).await;
    let html = r#"<a href="/2023/report.pdf">2023</a> <a href="/2024/report.pdf">2024</a>"#;
    let temp_dir = create_temp_dir();

    let source = DocumentSource::from_html(html, server_base(&server));
    let downloader = quiet_builder(temp_dir.path()).build();
    let result = downloader.download_source(&source, &pdf()).await.unwrap();

    assert_eq!(result.succeeded(), 2);
    let renamed = &result.summaries()[1].download().filename;
    assert_ne!(renamed, "report.pdf");
    assert!(renamed.starts_with("report-"));
    assert!(renamed.ends_with(".pdf"));

    assert_file_content(&temp_dir.path().join("report.pdf"), &first);
    assert_file_content(&temp_dir.path().join(renamed), &second);
}

#[tokio::test]
async fn test_missing_document_aborts_before_any_work() {
    let temp_dir = create_temp_dir();
    let download_dir = temp_dir.path().join("never_created");
    let downloader = quiet_builder(&download_dir).build();

    let missing = temp_dir.path().join("Missing Resources.html");
    let result = downloader
        .download_from(missing.to_str().unwrap(), &pdf(), None)
        .await;

    match result {
        Err(Error::SourceUnavailable { location, .. }) => {
            assert!(location.ends_with("Missing Resources.html"))
        }
        other => panic!("expected SourceUnavailable, got {:?}", other),
    }
    assert!(!download_dir.exists());
}

#[tokio::test]
async fn test_unreachable_page_is_source_unavailable() {
    let server = wiremock::MockServer::start().await;
    let temp_dir = create_temp_dir();
    let downloader = quiet_builder(temp_dir.path()).build();

    let location = format!("{}/no/such/page.html", server.uri());
    let result = downloader.download_from(&location, &pdf(), None).await;
    assert!(matches!(result, Err(Error::SourceUnavailable { .. })));

    let result = downloader
        .download_from(&closed_port_url("/page.html"), &pdf(), None)
        .await;
    assert!(matches!(result, Err(Error::SourceUnavailable { .. })));
}

#[tokio::test]
async fn test_document_without_matches_is_empty_not_error() {
    let temp_dir = create_temp_dir();
    let page = create_temp_file(
        temp_dir.path(),
        "page.html",
        b"<p>Nothing to see <a href='slides.pptx'>here</a></p>",
    );
    let downloader = quiet_builder(&temp_dir.path().join("out")).build();

    let base = Url::parse("https://example.com/").unwrap();
    let result = downloader
        .download_from(page.to_str().unwrap(), &pdf(), Some(base))
        .await
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.failed(), 0);
}

#[tokio::test]
async fn test_every_task_failing_still_gives_a_tally() {
    let server = wiremock::MockServer::start().await;
    let html = r#"<a href="x.pdf">x</a><a href="y.pdf">y</a><a href="z.pdf">z</a>"#;
    let source = DocumentSource::from_html(html, server_base(&server));
    let temp_dir = create_temp_dir();

    let downloader = quiet_builder(temp_dir.path()).build();
    let result = downloader.download_source(&source, &pdf()).await.unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(result.failed(), 3);
    assert_eq!(result.failures().count(), 3);
}
