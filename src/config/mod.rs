//! Configuration module for archive-tools.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{ArchiveConfig, Config, SubtitleConfig};
pub use validation::{
    validate_archive_config, validate_credentials, validate_downloader, validate_extension,
    validate_page_id, validate_subtitles,
};
