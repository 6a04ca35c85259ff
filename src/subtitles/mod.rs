//! Subtitle acquisition for a video library.
//!
//! This module provides:
//! - Recursive video discovery and sidecar detection
//! - The subtitle provider abstraction and an OpenSubtitles implementation
//! - The per-video fetch loop

pub mod hash;
pub mod language;
pub mod opensubtitles;
pub mod provider;
pub mod runner;
pub mod scan;

pub use language::{Language, SUPPORTED_LANGUAGES};
pub use opensubtitles::OpenSubtitles;
pub use provider::{best_track, SubtitleProvider, SubtitleTrack, VideoFile};
pub use runner::{fetch_subtitles, SubtitleStats};
pub use scan::{find_video_files, has_subtitle};
