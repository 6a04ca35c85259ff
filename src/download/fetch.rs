//! Streaming download of a single target.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::{Response, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::client::body_for_diagnostics;
use crate::api::Session;
use crate::error::{Error, Result};
use crate::fs::file_name_from_url;
use crate::output::create_download_bar;

/// Bytes written per write call.
pub const CHUNK_SIZE: usize = 1024;

/// A resolved URL plus the local file name decoded from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub file_name: String,
}

impl DownloadTarget {
    /// Resolve the local file name for `url`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let file_name = file_name_from_url(&url)?;
        Ok(Self { url, file_name })
    }

    pub fn destination(&self, dest_dir: &Path) -> PathBuf {
        dest_dir.join(&self.file_name)
    }
}

/// Result of one download attempt.
#[derive(Debug)]
pub enum FetchOutcome {
    Success { bytes_written: u64 },
    Failure { cause: Error },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }
}

/// Download `target` into `dest_dir` with one authenticated streaming GET.
///
/// Never panics or returns early with an error; every problem is folded
/// into [`FetchOutcome::Failure`] for the retry driver to inspect.
pub async fn fetch(
    session: &Session,
    target: &DownloadTarget,
    dest_dir: &Path,
    show_progress: bool,
) -> FetchOutcome {
    match stream_to_file(session, target, dest_dir, show_progress).await {
        Ok(bytes_written) => FetchOutcome::Success { bytes_written },
        Err(cause) => {
            tracing::debug!("Fetch of {} failed: {}", target.url, cause);
            FetchOutcome::Failure { cause }
        }
    }
}

async fn stream_to_file(
    session: &Session,
    target: &DownloadTarget,
    dest_dir: &Path,
    show_progress: bool,
) -> Result<u64> {
    let response = session.get(&target.url).await?;

    if response.status() != StatusCode::OK {
        return Err(Error::Download(body_for_diagnostics(response).await));
    }

    let total = response.content_length().unwrap_or(0);
    let progress = create_download_bar(total, &target.file_name, show_progress);

    match write_body(response, &target.destination(dest_dir), &progress).await {
        Ok(written) => {
            progress.finish_and_clear();
            Ok(written)
        }
        Err(e) => {
            progress.abandon();
            Err(e)
        }
    }
}

async fn write_body(response: Response, destination: &Path, progress: &ProgressBar) -> Result<u64> {
    // Truncates whatever an earlier failed attempt left behind.
    let mut file = File::create(destination).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        for piece in chunk.chunks(CHUNK_SIZE) {
            file.write_all(piece).await?;
            written += piece.len() as u64;
            progress.inc(piece.len() as u64);
        }
    }

    file.flush().await?;
    Ok(written)
}
