//! Subtitle lookup capability.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::subtitles::hash::movie_hash;
use crate::subtitles::language::Language;

/// A video file prepared for lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    pub path: PathBuf,
    /// Search terms derived from the file name.
    pub query: String,
    pub hash: Option<String>,
}

impl VideoFile {
    /// Read enough of the file to identify it.
    pub async fn open(path: &Path) -> Result<Self> {
        let hash = movie_hash(path).await?;
        Ok(Self {
            path: path.to_path_buf(),
            query: query_from_path(path),
            hash,
        })
    }
}

/// Turn `The.Movie_2019.1080p.mkv` into `The Movie 2019 1080p`.
pub fn query_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    stem.split(|c: char| c == '.' || c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One subtitle candidate returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleTrack {
    /// Provider specific identifier used to download the track.
    pub id: String,
    pub language: String,
    pub release: String,
    pub download_count: u64,
    /// The provider matched the track on the movie hash, not just the name.
    pub hash_match: bool,
    /// File extension of the subtitle, without the dot.
    pub format: Option<String>,
}

/// Given a video and a language, find and fetch subtitle tracks.
#[async_trait]
pub trait SubtitleProvider: Send + Sync {
    /// Zero or more candidate tracks for `video` in `language`.
    async fn search(&self, video: &VideoFile, language: &Language) -> Result<Vec<SubtitleTrack>>;

    /// Raw content of a track.
    async fn download(&self, track: &SubtitleTrack) -> Result<Vec<u8>>;
}

/// Pick the best track: hash matches first, then most downloaded, then earliest.
pub fn best_track(tracks: &[SubtitleTrack]) -> Option<&SubtitleTrack> {
    tracks
        .iter()
        .enumerate()
        .max_by_key(|(index, track)| (track.hash_match, track.download_count, Reverse(*index)))
        .map(|(_, track)| track)
}

/// Where a downloaded track is saved: `dir/base.<lang>.<format>`.
pub fn subtitle_path(video: &Path, language: &Language, format: Option<&str>) -> PathBuf {
    let stem = video
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = format.filter(|f| !f.is_empty()).unwrap_or("srt");
    video.with_file_name(format!("{}.{}.{}", stem, language.code(), ext))
}
