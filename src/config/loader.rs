//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub archive: ArchiveConfig,

    #[serde(default)]
    pub subtitles: SubtitleConfig,
}

/// Settings for the archive downloader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Base URL of the content host; login and download endpoints hang off it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout applied to every individual request.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Delay before the single retry of a failed download.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Directory downloaded files are written to (current directory if unset).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Whether to draw a progress bar per download.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            retry_delay_secs: default_retry_delay(),
            user_agent: default_user_agent(),
            output_dir: None,
            show_progress: true,
        }
    }
}

impl ArchiveConfig {
    pub fn login_url(&self) -> String {
        format!("{}/account/login", self.base_url.trim_end_matches('/'))
    }

    pub fn download_url(&self) -> String {
        format!("{}/download", self.base_url.trim_end_matches('/'))
    }

    /// Listing resource for one item identifier.
    pub fn listing_url(&self, page_id: &str) -> String {
        format!("{}/{}", self.download_url(), page_id)
    }

    /// Referer submitted with the login form.
    pub fn referer(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// Get the effective output directory.
    pub fn output_directory(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

/// Settings for the subtitle fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleConfig {
    /// OpenSubtitles REST API root.
    #[serde(default = "default_subtitle_api_url")]
    pub api_url: String,

    /// OpenSubtitles API key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// User agent registered with the subtitle service.
    #[serde(default = "default_subtitle_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Lower-case file name suffixes treated as videos.
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,

    /// File name suffixes that count as an existing subtitle sidecar.
    #[serde(default = "default_subtitle_extensions")]
    pub subtitle_extensions: Vec<String>,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            api_url: default_subtitle_api_url(),
            api_key: None,
            user_agent: default_subtitle_user_agent(),
            request_timeout_secs: default_request_timeout(),
            video_extensions: default_video_extensions(),
            subtitle_extensions: default_subtitle_extensions(),
        }
    }
}

impl SubtitleConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_base_url() -> String {
    "https://archive.org".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_retry_delay() -> u64 {
    120
}

fn default_user_agent() -> String {
    format!("archive-tools/{}", env!("CARGO_PKG_VERSION"))
}

fn default_true() -> bool {
    true
}

fn default_subtitle_api_url() -> String {
    "https://api.opensubtitles.com/api/v1".to_string()
}

fn default_subtitle_user_agent() -> String {
    format!("archive-tools v{}", env!("CARGO_PKG_VERSION"))
}

fn default_video_extensions() -> Vec<String> {
    [".mp4", ".mkv", ".avi", ".mov"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_subtitle_extensions() -> Vec<String> {
    [".srt", ".sub", ".ass", ".vtt"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    ///
    /// The boolean tells the caller whether a file was actually read.
    pub fn load_or_default(path: &Path) -> Result<(Self, bool)> {
        if path.exists() {
            Ok((Self::load(path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }
}
