//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Bulk downloader for one archive.org item.
#[derive(Parser, Debug)]
#[command(
    name = "ia-downloader",
    version,
    about = "Download every file listed for an archive.org item",
    long_about = "Logs in to archive.org, reads the download listing of one item and fetches \
                  every linked file into the output directory.\n\n\
                  A failed download is retried once after a delay and a fresh login."
)]
pub struct DownloaderArgs {
    /// archive.org username.
    #[arg(long, env = "IA_USERNAME")]
    pub username: String,

    /// archive.org password.
    #[arg(long, env = "IA_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Item identifier whose download listing is parsed.
    #[arg(long = "page-id")]
    pub page_id: String,

    /// Only download links whose href ends with this suffix (e.g. "zip").
    #[arg(long)]
    pub ext: Option<String>,

    /// Directory downloaded files are written to.
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "archive-tools.toml")]
    pub config: PathBuf,

    /// Hide download progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl DownloaderArgs {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(dir) = &self.output_dir {
            config.archive.output_dir = Some(dir.clone());
        }

        if self.quiet {
            config.archive.show_progress = false;
        }
    }
}

/// Subtitle fetcher for a video library.
#[derive(Parser, Debug)]
#[command(
    name = "subtitle-fetcher",
    version,
    about = "Download subtitles for video files in a folder",
    long_about = "Recursively scans a folder for videos and downloads the best matching \
                  subtitle for every video that has none yet.\n\n\
                  Run without arguments to list supported language codes."
)]
pub struct SubtitleArgs {
    /// Path to the root folder containing video files.
    #[arg(long)]
    pub folder: PathBuf,

    /// Subtitle language code (e.g. 'en' for English).
    #[arg(long)]
    pub lang: String,

    /// OpenSubtitles API key.
    #[arg(long = "api-key", env = "OPENSUBTITLES_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "archive-tools.toml")]
    pub config: PathBuf,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl SubtitleArgs {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(key) = &self.api_key {
            config.subtitles.api_key = Some(key.clone());
        }
    }
}
