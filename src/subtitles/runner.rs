//! Per-video subtitle acquisition loop.

use std::path::{Path, PathBuf};

use crate::config::SubtitleConfig;
use crate::error::Result;
use crate::output::{print_failure, print_progress, print_skip, print_success};
use crate::subtitles::language::Language;
use crate::subtitles::provider::{best_track, subtitle_path, SubtitleProvider, VideoFile};
use crate::subtitles::scan::has_subtitle;

/// Counters for one subtitle run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubtitleStats {
    pub videos: u64,
    /// Videos that already had a sidecar.
    pub skipped: u64,
    pub saved: u64,
    pub not_found: u64,
    pub errors: u64,
}

/// Fetch a subtitle for every video that does not already have one.
///
/// Failures are reported per video and never stop the loop.
pub async fn fetch_subtitles<P>(
    provider: &P,
    videos: &[PathBuf],
    language: &Language,
    config: &SubtitleConfig,
) -> SubtitleStats
where
    P: SubtitleProvider + ?Sized,
{
    let mut stats = SubtitleStats {
        videos: videos.len() as u64,
        ..SubtitleStats::default()
    };

    for video in videos {
        match has_subtitle(video, &config.subtitle_extensions) {
            Ok(true) => {
                print_skip(&format!(
                    "Skipping {}: Subtitle already exists.",
                    video.display()
                ));
                stats.skipped += 1;
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                print_failure(&format!("Error processing {}: {}", video.display(), e));
                stats.errors += 1;
                continue;
            }
        }

        let base_name = video
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        print_progress(&format!("Processing: {} ({})", base_name, video.display()));

        match fetch_one(provider, video, language).await {
            Ok(Some(saved)) => {
                tracing::debug!("Saved {}", saved.display());
                print_success(&format!(
                    "Subtitles downloaded and saved for: {}",
                    video.display()
                ));
                stats.saved += 1;
            }
            Ok(None) => {
                print_skip(&format!("No subtitles found for: {}", video.display()));
                stats.not_found += 1;
            }
            Err(e) => {
                tracing::warn!("Subtitle lookup for {} failed: {}", video.display(), e);
                print_failure(&format!("Error processing {}: {}", video.display(), e));
                stats.errors += 1;
            }
        }
    }

    stats
}

/// Look up, download and save the best track for one video.
async fn fetch_one<P>(provider: &P, path: &Path, language: &Language) -> Result<Option<PathBuf>>
where
    P: SubtitleProvider + ?Sized,
{
    let video = VideoFile::open(path).await?;
    let tracks = provider.search(&video, language).await?;

    let Some(track) = best_track(&tracks) else {
        return Ok(None);
    };

    let content = provider.download(track).await?;
    let destination = subtitle_path(path, language, track.format.as_deref());
    tokio::fs::write(&destination, content).await?;

    Ok(Some(destination))
}
