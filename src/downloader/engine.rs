//! The resumable transfer engine.
//!
//! One [`TransferEngine`] lives for the duration of a batch. It owns the HTTP
//! client and the progress display of that batch and runs one task at a time:
//!
//! 1. measure the destination file (never cached between tasks),
//! 2. skip the task when that file already has the remote's full size,
//! 3. continue a partial file with `Range: bytes=<size>-`, or download from
//!    byte 0 when resuming is disabled, impossible or ignored by the server,
//! 4. stream the body to disk chunk by chunk, reporting progress.
//!
//! Any error is caught at the task boundary and turned into a failed
//! [`Summary`]. A file is either appended to after a `206` whose range starts
//! at the on-disk size, or truncated before the first byte of a full
//! response, so it never mixes bytes of two responses.

use super::config::DownloaderConfig;
use crate::download::{Download, Status, Summary, TransferState};
use crate::error::{Error, Result};
use crate::progress::ProgressDisplay;
use crate::utils::content_length::{header_content_length, header_content_range, remote_total};

use futures::StreamExt;
use reqwest::{header::RANGE, Response, StatusCode};
use reqwest_middleware::ClientWithMiddleware;
use std::io::ErrorKind;
use std::path::Path;
use tokio::{fs, fs::OpenOptions, io::AsyncWriteExt};
use tracing::{debug, info, warn};

const ALREADY_COMPLETE: &str = "the file was already fully downloaded";

/// How the response body is written to the destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    /// Append after the given number of bytes already on disk.
    Append(u64),
    /// Start the file over from byte 0.
    Truncate,
}

/// What to do once the request phase is over.
enum Next {
    Skip(Summary),
    Stream(Response, WriteMode),
}

/// Executes download tasks for one batch.
pub struct TransferEngine<'a> {
    client: ClientWithMiddleware,
    config: &'a DownloaderConfig,
    progress: ProgressDisplay,
}

impl<'a> TransferEngine<'a> {
    /// Creates the engine of a batch of `total` tasks.
    pub fn new(client: ClientWithMiddleware, config: &'a DownloaderConfig, total: usize) -> Self {
        let progress = ProgressDisplay::new(
            config.style_options.clone(),
            total,
            config.single_file_progress,
        );
        Self {
            client,
            config,
            progress,
        }
    }

    /// Releases the batch resources, finishing the progress display.
    pub fn finish(self) {
        self.progress.finish();
    }

    /// Runs one task to completion. Never fails: errors become a failed
    /// [`Summary`].
    pub async fn transfer(&self, download: &Download) -> Summary {
        let output = download.destination(&self.config.directory);

        let summary = match self.try_transfer(download, &output).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Failed to download {}: {}", download.url, e);
                let statuscode = match &e {
                    Error::HttpStatus { status, .. } => Some(*status),
                    _ => None,
                };
                let size = on_disk_size(&output).await.unwrap_or(0);
                Summary::new(download.clone(), statuscode, size, false).fail(e)
            }
        };

        match summary.status() {
            Status::Success => info!("Downloaded {} ({} bytes)", download.filename, summary.size()),
            Status::Skipped(reason) => info!("Skipped {}: {}", download.filename, reason),
            _ => {}
        }

        self.progress.file_done();
        summary
    }

    /// Records `download` as failed without touching the network or the disk.
    pub fn reject(&self, download: &Download, reason: String) -> Summary {
        warn!("Not downloading {}: {}", download.url, reason);
        self.progress.file_done();
        Summary::new(download.clone(), None, 0, false).fail(reason)
    }

    async fn try_transfer(&self, download: &Download, output: &Path) -> Result<Summary> {
        let size_on_disk = on_disk_size(output).await?;

        let mut expected = None;
        if size_on_disk > 0 && !self.config.overwrite {
            debug!(
                "{:?} already holds {} bytes, probing remote size",
                output, size_on_disk
            );
            expected = self.probe_total(download).await?;
            if expected == Some(size_on_disk) {
                return Ok(
                    Summary::new(download.clone(), None, size_on_disk, false).skip(ALREADY_COMPLETE)
                );
            }
        }

        let resume_from = Some(size_on_disk).filter(|&size| {
            self.config.resumable
                && !self.config.overwrite
                && size > 0
                && expected.map_or(true, |total| size < total)
        });

        let next = match resume_from {
            Some(offset) => self.request_range(download, offset).await?,
            None => Next::Stream(self.request_full(download).await?, WriteMode::Truncate),
        };

        match next {
            Next::Skip(summary) => Ok(summary),
            Next::Stream(res, mode) => {
                let result = self.stream_to_file(download, output, res, mode, expected).await;
                if result.is_err() && !self.config.resumable {
                    // A partial file is useless when it can never be continued.
                    remove_partial(output).await;
                }
                result
            }
        }
    }

    /// Asks the server for the total size of the resource without reading it.
    ///
    /// A non-success answer means the size is unknown; a transport failure is
    /// an error.
    async fn probe_total(&self, download: &Download) -> Result<Option<u64>> {
        if self.config.use_range_for_content_length {
            let res = self
                .client
                .get(download.url.clone())
                .header(RANGE, "bytes=0-0")
                .send()
                .await?;
            let total = match res.status() {
                StatusCode::PARTIAL_CONTENT | StatusCode::OK => remote_total(&res),
                _ => None,
            };
            Ok(total)
        } else {
            let res = self.client.head(download.url.clone()).send().await?;
            if res.status().is_success() {
                Ok(header_content_length(res.headers()))
            } else {
                debug!("HEAD {} answered {}, size unknown", download.url, res.status());
                Ok(None)
            }
        }
    }

    /// Plain GET for the whole resource.
    async fn request_full(&self, download: &Download) -> Result<Response> {
        debug!("Fetching {}", download.url);
        let res = self.client.get(download.url.clone()).send().await?;
        let status = res.status();
        if !status.is_success() || status == StatusCode::PARTIAL_CONTENT {
            return Err(Error::HttpStatus {
                url: download.url.to_string(),
                status,
            });
        }
        Ok(res)
    }

    /// Ranged GET continuing a partial file of `offset` bytes.
    async fn request_range(&self, download: &Download, offset: u64) -> Result<Next> {
        debug!("Resuming {} from byte {}", download.url, offset);
        let res = self
            .client
            .get(download.url.clone())
            .header(RANGE, format!("bytes={}-", offset))
            .send()
            .await?;

        match res.status() {
            StatusCode::PARTIAL_CONTENT => {
                let start = header_content_range(res.headers()).and_then(|r| r.start());
                if start.map_or(true, |start| start == offset) {
                    return Ok(Next::Stream(res, WriteMode::Append(offset)));
                }
                warn!(
                    "{} answered a range starting at {:?} instead of {}, restarting",
                    download.url, start, offset
                );
            }
            StatusCode::OK => {
                warn!(
                    "{} does not support partial content, restarting from byte 0",
                    download.url
                );
                return Ok(Next::Stream(res, WriteMode::Truncate));
            }
            StatusCode::RANGE_NOT_SATISFIABLE => {
                let total = header_content_range(res.headers()).and_then(|r| r.total);
                if total == Some(offset) {
                    let summary = Summary::new(download.clone(), None, offset, false)
                        .skip(ALREADY_COMPLETE);
                    return Ok(Next::Skip(summary));
                }
                warn!(
                    "{} cannot serve bytes from {} (remote size {:?}), restarting",
                    download.url, offset, total
                );
            }
            status => {
                return Err(Error::HttpStatus {
                    url: download.url.to_string(),
                    status,
                });
            }
        }

        drop(res);
        Ok(Next::Stream(
            self.request_full(download).await?,
            WriteMode::Truncate,
        ))
    }

    /// Streams `res` into `output` and checks the final size.
    async fn stream_to_file(
        &self,
        download: &Download,
        output: &Path,
        res: Response,
        mode: WriteMode,
        probed: Option<u64>,
    ) -> Result<Summary> {
        let statuscode = res.status();
        let (start, phase) = match mode {
            WriteMode::Append(offset) => (offset, Status::Resuming),
            WriteMode::Truncate => (0, Status::Downloading),
        };
        let expected = match mode {
            WriteMode::Append(offset) => header_content_range(res.headers())
                .and_then(|r| r.total)
                .or_else(|| {
                    header_content_length(res.headers()).and_then(|len| offset.checked_add(len))
                }),
            WriteMode::Truncate => header_content_length(res.headers()),
        }
        .or(probed);

        if let Some(parent) = output.parent() {
            debug!("Creating destination directory {:?}", parent);
            fs::create_dir_all(parent).await?;
        }

        debug!("Opening destination file {:?} ({:?})", output, mode);
        let mut options = OpenOptions::new();
        match mode {
            WriteMode::Append(_) => options.create(true).append(true),
            WriteMode::Truncate => options.create(true).write(true).truncate(true),
        };
        let mut file = options.open(output).await?;

        let pb = self
            .progress
            .start_transfer(expected, start, &download.filename);
        let mut state = TransferState {
            bytes_expected: expected,
            bytes_on_disk: start,
            status: phase,
        };
        self.notify(download, &state);

        debug!("Retrieving chunks...");
        let mut stream = res.bytes_stream();
        let streamed: Result<()> = async {
            while let Some(item) = stream.next().await {
                let chunk = item?;
                file.write_all(&chunk).await?;

                let chunk_size = chunk.len() as u64;
                state.bytes_on_disk += chunk_size;
                pb.inc(chunk_size);
                self.notify(download, &state);
            }
            file.flush().await?;
            Ok::<(), Error>(())
        }
        .await;
        self.progress.end_transfer(pb);
        streamed?;

        let final_size = state.bytes_on_disk;
        if let Some(expected) = expected {
            if final_size != expected {
                return Err(Error::IncompleteTransfer {
                    expected,
                    received: final_size,
                });
            }
        }

        state.status = Status::Success;
        self.notify(download, &state);
        debug!("{} complete, final size {} bytes", download.filename, final_size);

        Ok(
            Summary::new(download.clone(), Some(statuscode), final_size, start > 0)
                .with_transferred(final_size - start)
                .with_status(Status::Success),
        )
    }

    fn notify(&self, download: &Download, state: &TransferState) {
        if let Some(ref callback) = self.config.on_progress {
            callback(download, state);
        }
    }
}

/// Size of the file at `path`, 0 when there is none.
async fn remove_partial(output: &Path) {
    match fs::remove_file(output).await {
        Ok(()) => debug!("Removed partial file {:?}", output),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove partial file {:?}: {}", output, e),
    }
}

async fn on_disk_size(path: &Path) -> Result<u64> {
    match fs::metadata(path).await {
        Ok(m) if m.is_file() => Ok(m.len()),
        Ok(_) => Err(Error::IOError {
            source: std::io::Error::new(
                ErrorKind::AlreadyExists,
                format!("{} exists and is not a regular file", path.display()),
            ),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_on_disk_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.pdf");

        assert_eq!(on_disk_size(&path).await.unwrap(), 0);

        std::fs::write(&path, b"12345").unwrap();
        assert_eq!(on_disk_size(&path).await.unwrap(), 5);

        assert!(on_disk_size(dir.path()).await.is_err());
    }
}
