//! Command-line front end: download every file of a type linked from a page.

use clap::{ArgAction, ArgGroup, Parser};
use color_eyre::eyre::{eyre, Result, WrapErr};
use console::style;
use linkfetch::{BatchResult, DocumentSource, DownloaderBuilder, Extension};
use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "linkfetch", version, about = "Download files linked from an HTML page")]
#[command(group(ArgGroup::new("input").required(true).args(["file", "url"])))]
struct Cli {
    /// Path to a local HTML file
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// URL of the web page to scrape
    #[arg(long, value_name = "URL")]
    url: Option<Url>,

    /// File extension to download (e.g. pdf, pse, docx, xlsx)
    #[arg(long, value_name = "EXT", default_value = "pdf")]
    file_type: Extension,

    /// Directory to save files in
    #[arg(long, value_name = "DIR", default_value = "downloads")]
    download_dir: PathBuf,

    /// Download partial files again from the start instead of resuming them
    #[arg(long)]
    no_resume: bool,

    /// Download files again even when they are already complete
    #[arg(long)]
    overwrite: bool,

    /// Seconds to wait between two downloads
    #[arg(long, value_name = "SECONDS", default_value = "0.5", value_parser = parse_seconds)]
    delay: Duration,

    /// Retries per request on transient network errors
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS", value_parser = parse_seconds)]
    timeout: Option<Duration>,

    /// Base URL for the relative links of a local HTML file
    #[arg(long, value_name = "URL", requires = "file")]
    base_url: Option<Url>,

    /// User-Agent header to send
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Only list the matching links, download nothing
    #[arg(long)]
    list_only: bool,

    /// Hide progress bars
    #[arg(short, long)]
    quiet: bool,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_seconds(value: &str) -> std::result::Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("\"{}\" is not a number of seconds", value))?;
    Duration::try_from_secs_f64(seconds).map_err(|e| e.to_string())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "linkfetch=warn",
        1 => "linkfetch=info",
        _ => "linkfetch=debug,reqwest_tracing=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut builder = if cli.quiet {
        DownloaderBuilder::hidden()
    } else {
        DownloaderBuilder::new()
    };
    builder = builder
        .directory(cli.download_dir.clone())
        .resumable(!cli.no_resume)
        .overwrite(cli.overwrite)
        .delay(cli.delay)
        .retries(cli.retries);
    if let Some(timeout) = cli.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(ref ua) = cli.user_agent {
        let value = HeaderValue::from_str(ua).wrap_err("invalid --user-agent")?;
        builder = builder.header(USER_AGENT, value);
    }
    let downloader = builder.build();

    let location = match (&cli.file, &cli.url) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(url)) => url.to_string(),
        (None, None) => return Err(eyre!("either --file or --url is required")),
    };

    println!("Processing: {}", location);
    let source = downloader.load(&location, cli.base_url.clone()).await?;
    let links = source.links(&cli.file_type);
    let kind = cli.file_type.as_str().to_uppercase();

    if links.is_empty() {
        println!("No {} links found.", kind);
        return Ok(());
    }

    println!("Found {} {} links:", links.len(), kind);
    for (i, link) in links.iter().enumerate() {
        println!("  {}. {}", i + 1, link);
    }
    if cli.list_only {
        return Ok(());
    }

    println!(
        "\nFiles will be saved to: {}",
        std::path::absolute(&cli.download_dir)
            .unwrap_or_else(|_| cli.download_dir.clone())
            .display()
    );
    let result = download(&downloader, &source, &cli.file_type).await?;
    print_tally(&result);
    Ok(())
}

async fn download(
    downloader: &linkfetch::Downloader,
    source: &DocumentSource,
    extension: &Extension,
) -> Result<BatchResult> {
    downloader
        .download_source(source, extension)
        .await
        .wrap_err("download aborted")
}

fn print_tally(result: &BatchResult) {
    println!("\nDownload complete!");
    println!("{} Successful: {}", style("✓").green(), result.succeeded());
    println!("{} Skipped: {}", style("↷").cyan(), result.skipped());
    println!("{} Failed: {}", style("✗").red(), result.failed());
    for (url, reason) in result.failures() {
        println!("    {} {}", style(url).dim(), reason);
    }
}
