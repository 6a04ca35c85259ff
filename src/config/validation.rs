//! Configuration validation logic.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::loader::{ArchiveConfig, SubtitleConfig};
use crate::error::{Error, Result};
use crate::subtitles::Language;

/// One `/`-separated piece of an item identifier: letters, digits, dots,
/// dashes and underscores, starting with a letter or digit.
static PAGE_ID_SEGMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("page id pattern"));

/// Maximum item identifier length.
const MAX_PAGE_ID_LENGTH: usize = 100;

/// Validate everything the downloader needs before touching the network.
pub fn validate_downloader(
    archive: &ArchiveConfig,
    username: &str,
    password: &str,
    page_id: &str,
    ext: Option<&str>,
) -> Result<()> {
    validate_archive_config(archive)?;
    validate_credentials(username, password)?;
    validate_page_id(page_id)?;
    if let Some(ext) = ext {
        validate_extension(ext)?;
    }

    Ok(())
}

/// Validate the archive host settings.
pub fn validate_archive_config(archive: &ArchiveConfig) -> Result<()> {
    validate_base_url("archive.base_url", &archive.base_url)?;

    if archive.request_timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            field: "archive.request_timeout_secs".to_string(),
            message: "Timeout must be at least one second".to_string(),
        });
    }

    Ok(())
}

/// Validate the subtitle service settings and the requested language.
pub fn validate_subtitles(subtitles: &SubtitleConfig, lang: &str) -> Result<Language> {
    validate_base_url("subtitles.api_url", &subtitles.api_url)?;

    if subtitles.video_extensions.is_empty() {
        return Err(Error::ConfigValidation {
            field: "subtitles.video_extensions".to_string(),
            message: "At least one video extension is required".to_string(),
        });
    }

    Language::parse(lang)
}

fn validate_base_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| Error::ConfigValidation {
        field: field.to_string(),
        message: format!("'{}' is not a valid URL: {}", value, e),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("Unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(())
}

/// Validate the login credentials.
pub fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(Error::MissingConfig("username".to_string()));
    }

    if password.is_empty() {
        return Err(Error::MissingConfig("password".to_string()));
    }

    Ok(())
}

/// Validate the listing page identifier.
pub fn validate_page_id(page_id: &str) -> Result<()> {
    if page_id.is_empty() {
        return Err(Error::MissingConfig("page-id".to_string()));
    }

    if page_id.len() > MAX_PAGE_ID_LENGTH {
        return Err(Error::ConfigValidation {
            field: "page-id".to_string(),
            message: format!(
                "Page id is too long (maximum {} characters)",
                MAX_PAGE_ID_LENGTH
            ),
        });
    }

    // Nested listings like `item/subdir` are allowed; each segment is checked
    // on its own so empty, `.` and `..` segments never reach the URL.
    for segment in page_id.split('/') {
        if segment.is_empty() {
            return Err(Error::ConfigValidation {
                field: "page-id".to_string(),
                message: format!("Page id '{}' contains an empty path segment", page_id),
            });
        }

        if !PAGE_ID_SEGMENT_PATTERN.is_match(segment) {
            return Err(Error::ConfigValidation {
                field: "page-id".to_string(),
                message: format!(
                    "Page id '{}' contains invalid segment '{}'. Only alphanumeric, dots, hyphens, and underscores allowed.",
                    page_id, segment
                ),
            });
        }
    }

    Ok(())
}

/// Validate the suffix filter.
pub fn validate_extension(ext: &str) -> Result<()> {
    if ext.is_empty() {
        return Err(Error::ConfigValidation {
            field: "ext".to_string(),
            message: "Extension filter cannot be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_page_id() {
        assert!(validate_page_id("nasa_apollo-11").is_ok());
        assert!(validate_page_id("Item.2024").is_ok());
    }

    #[test]
    fn test_nested_page_id() {
        assert!(validate_page_id("some-item/subdir").is_ok());
        assert!(validate_page_id("item/disc_1/extras.v2").is_ok());
    }

    #[test]
    fn test_invalid_page_id() {
        assert!(validate_page_id("").is_err());
        assert!(validate_page_id("../etc").is_err());
        assert!(validate_page_id("with space").is_err());
        assert!(validate_page_id(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_invalid_nested_page_id() {
        for page_id in [
            "a//b", "/a", "a/", "a/../b", "a/./b", "a/..", "a?x", "a#frag", "a/b?x",
        ] {
            assert!(
                matches!(validate_page_id(page_id), Err(Error::ConfigValidation { .. })),
                "{page_id} should be rejected"
            );
        }
    }

    #[test]
    fn test_credentials() {
        assert!(validate_credentials("alice@example.com", "secret").is_ok());
        assert!(matches!(
            validate_credentials("  ", "secret"),
            Err(Error::MissingConfig(_))
        ));
        assert!(matches!(
            validate_credentials("alice", ""),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_extension() {
        assert!(validate_extension("zip").is_ok());
        assert!(validate_extension(".tar.gz").is_ok());
        assert!(validate_extension("").is_err());
    }

    #[test]
    fn test_archive_config() {
        let mut archive = ArchiveConfig::default();
        assert!(validate_archive_config(&archive).is_ok());

        archive.base_url = "ftp://archive.org".to_string();
        assert!(validate_archive_config(&archive).is_err());

        archive.base_url = "not a url".to_string();
        assert!(validate_archive_config(&archive).is_err());

        archive = ArchiveConfig::default();
        archive.request_timeout_secs = 0;
        assert!(validate_archive_config(&archive).is_err());
    }

    #[test]
    fn test_subtitles_language() {
        let subtitles = SubtitleConfig::default();
        assert_eq!(validate_subtitles(&subtitles, "en").unwrap().code(), "en");
        assert!(validate_subtitles(&subtitles, "xx").is_err());
    }

    #[test]
    fn test_validate_downloader() {
        let archive = ArchiveConfig::default();
        assert!(validate_downloader(&archive, "alice", "pw", "item", Some("zip")).is_ok());
        assert!(validate_downloader(&archive, "alice", "pw", "item", None).is_ok());
        assert!(validate_downloader(&archive, "alice", "pw", "item", Some("")).is_err());
    }
}
