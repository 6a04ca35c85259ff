//! Video discovery and subtitle sidecar detection.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Recursively collect video files under `root`, sorted by path.
///
/// A file is a video when its lower-cased name ends with one of
/// `extensions`. Unreadable entries are logged and skipped.
pub fn find_video_files(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let extensions: Vec<String> = extensions.iter().map(|e| e.to_lowercase()).collect();

    let mut videos: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy().to_lowercase();
            extensions.iter().any(|ext| name.ends_with(ext.as_str()))
        })
        .map(|entry| entry.into_path())
        .collect();

    videos.sort();
    videos
}

/// Whether a subtitle sidecar already sits next to `video`.
///
/// Any file in the same directory whose name starts with the video's base
/// name and ends with one of `subtitle_extensions` counts.
pub fn has_subtitle(video: &Path, subtitle_extensions: &[String]) -> Result<bool> {
    let dir = video.parent().unwrap_or_else(|| Path::new("."));
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    let base = video
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    for entry in std::fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if name.starts_with(&base)
            && subtitle_extensions
                .iter()
                .any(|ext| name.ends_with(ext.as_str()))
        {
            return Ok(true);
        }
    }

    Ok(false)
}
