//! archive-tools - bulk archive.org downloads and subtitle fetching
//!
//! This library backs two independent command-line tools.
//!
//! # Features
//!
//! - Authenticated archive.org sessions with cookie handling
//! - Link discovery on an item's download listing, with suffix filtering
//! - Streaming downloads with progress bars
//! - A single retry per failed file, after a delay and a fresh login
//! - Recursive video scanning and subtitle lookup via OpenSubtitles
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use archive_tools::{run_pipeline, Config, Credentials};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("archive-tools.toml"))?;
//!     let credentials = Credentials::new("user@example.com", "secret");
//!     let stats = run_pipeline(
//!         &config.archive,
//!         &credentials,
//!         "some-item",
//!         Some("zip"),
//!         Path::new("."),
//!     )
//!     .await?;
//!     println!("{} file(s) downloaded", stats.downloaded);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod output;
pub mod subtitles;

// Re-exports for convenience
pub use api::{login, Credentials, Session};
pub use config::Config;
pub use download::{run_pipeline, DownloadTarget, FetchOutcome, RunStats};
pub use error::{Error, Result};
pub use subtitles::{fetch_subtitles, Language, SubtitleProvider};
