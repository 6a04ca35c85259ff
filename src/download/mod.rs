//! Download module for the archive downloader.
//!
//! This module provides:
//! - Link discovery on a listing page
//! - Streaming download of single targets
//! - The bounded retry driver
//! - Run statistics

pub mod fetch;
pub mod listing;
pub mod pipeline;
pub mod retry;
pub mod state;

#[cfg(test)]
pub(crate) mod test_server;

pub use fetch::{fetch, DownloadTarget, FetchOutcome, CHUNK_SIZE};
pub use listing::{discover, extract_links, Listing};
pub use pipeline::run_pipeline;
pub use retry::{download_all, download_with_retry, ArchiveRemote, Remote};
pub use state::RunStats;
