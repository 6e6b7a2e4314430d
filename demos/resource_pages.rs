//! Example downloading the worksheets of two saved resource pages.
//!
//! Save the pages next to this crate as `Biology Resources.html` and
//! `Chemistry Resources.html`, then run:
//!
//! ```text
//! cargo run --example resource_pages
//! ```

use color_eyre::Result;
use linkfetch::download::Status;
use linkfetch::{DownloaderBuilder, Extension};
use reqwest::Url;
use std::path::PathBuf;

const SITE: &str = "https://chemistrylearningresources.weebly.com/";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let site = Url::parse(SITE)?;

    let jobs = [
        ("Biology Resources.html", "pdf", "biology_pdfs"),
        ("Chemistry Resources.html", "pse", "chemistry_pse_files"),
    ];

    for (page, file_type, directory) in jobs {
        println!("== {} ({} files) ==", page, file_type);

        let downloader = DownloaderBuilder::new()
            .directory(PathBuf::from(directory))
            .on_complete(|summary| match summary.status() {
                Status::Success => println!("✓ {}", summary.download().filename),
                Status::Skipped(_) => println!("↷ {}", summary.download().filename),
                Status::Fail(msg) => println!("✗ {}: {}", summary.download().url, msg),
                _ => {}
            })
            .build();

        match downloader
            .download_from(page, &Extension::new(file_type)?, Some(site.clone()))
            .await
        {
            Ok(result) => println!(
                "{} downloaded, {} skipped, {} failed\n",
                result.succeeded(),
                result.skipped(),
                result.failed()
            ),
            Err(e) => println!("{}\n", e),
        }
    }

    Ok(())
}
