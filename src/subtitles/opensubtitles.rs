//! OpenSubtitles REST API provider.

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::{Deserialize, Serialize};

use crate::config::SubtitleConfig;
use crate::error::{Error, Result};
use crate::subtitles::language::Language;
use crate::subtitles::provider::{SubtitleProvider, SubtitleTrack, VideoFile};

/// Search response envelope.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    attributes: SubtitleAttributes,
}

#[derive(Debug, Deserialize)]
struct SubtitleAttributes {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    download_count: u64,
    #[serde(default)]
    release: Option<String>,
    #[serde(default)]
    moviehash_match: bool,
    #[serde(default)]
    files: Vec<SubtitleFile>,
}

#[derive(Debug, Deserialize)]
struct SubtitleFile {
    file_id: u64,
    #[serde(default)]
    file_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct DownloadRequest {
    file_id: u64,
}

#[derive(Debug, Deserialize)]
struct DownloadResponse {
    link: String,
}

/// Client for the OpenSubtitles v1 API.
pub struct OpenSubtitles {
    client: Client,
    api_url: String,
    api_key: String,
    subtitle_extensions: Vec<String>,
}

impl OpenSubtitles {
    pub fn new(config: &SubtitleConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::MissingConfig(
                    "subtitles.api_key (or --api-key / OPENSUBTITLES_API_KEY)".to_string(),
                )
            })?;

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key,
            subtitle_extensions: config
                .subtitle_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
        })
    }

    /// Subtitle format of a reported file name, if it carries a known
    /// subtitle extension. Release names like `Movie.2019.x264` yield `None`.
    fn subtitle_format(&self, file_name: &str) -> Option<String> {
        let (_, ext) = file_name.rsplit_once('.')?;
        let ext = ext.to_lowercase();
        self.subtitle_extensions.contains(&ext).then_some(ext)
    }

    async fn check(response: Response, what: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Subtitle(format!("{} failed: HTTP {} {}", what, status, body)))
    }
}

#[async_trait]
impl SubtitleProvider for OpenSubtitles {
    async fn search(&self, video: &VideoFile, language: &Language) -> Result<Vec<SubtitleTrack>> {
        let url = format!("{}/subtitles", self.api_url);
        let mut query = vec![
            ("languages", language.code().to_lowercase()),
            ("query", video.query.clone()),
        ];
        if let Some(hash) = &video.hash {
            query.push(("moviehash", hash.clone()));
        }

        tracing::debug!("GET {} {:?}", url, query);
        let response = self
            .client
            .get(&url)
            .header("Api-Key", &self.api_key)
            .header(header::ACCEPT, "application/json")
            .query(&query)
            .send()
            .await?;
        let response = Self::check(response, "Subtitle search").await?;

        let text = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&text)?;

        let tracks = parsed
            .data
            .into_iter()
            .flat_map(move |result| {
                let attrs = result.attributes;
                let track_language = attrs
                    .language
                    .clone()
                    .unwrap_or_else(|| language.code().to_string());
                let release = attrs.release.clone().unwrap_or_default();
                attrs.files.into_iter().map(move |file| SubtitleTrack {
                    id: file.file_id.to_string(),
                    language: track_language.clone(),
                    release: release.clone(),
                    download_count: attrs.download_count,
                    hash_match: attrs.moviehash_match,
                    format: file
                        .file_name
                        .as_deref()
                        .and_then(|name| self.subtitle_format(name)),
                })
            })
            .collect::<Vec<_>>();

        tracing::debug!("{} subtitle track(s) for {}", tracks.len(), video.path.display());
        Ok(tracks)
    }

    async fn download(&self, track: &SubtitleTrack) -> Result<Vec<u8>> {
        let file_id: u64 = track
            .id
            .parse()
            .map_err(|_| Error::Subtitle(format!("Invalid file id: {}", track.id)))?;

        let url = format!("{}/download", self.api_url);
        tracing::debug!("POST {} file_id={}", url, file_id);
        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .header(header::ACCEPT, "application/json")
            .json(&DownloadRequest { file_id })
            .send()
            .await?;
        let response = Self::check(response, "Download link request").await?;
        let link: DownloadResponse = response.json().await?;

        tracing::debug!("GET {}", link.link);
        let response = self.client.get(&link.link).send().await?;
        let response = Self::check(response, "Subtitle download").await?;

        Ok(response.bytes().await?.to_vec())
    }
}
