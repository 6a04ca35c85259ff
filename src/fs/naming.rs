//! Local file name derivation.

use url::Url;

use crate::error::{Error, Result};

/// Derive the local file name for a download URL.
///
/// The final path segment is percent-decoded and then validated so the
/// result can never point outside the destination directory.
pub fn file_name_from_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    let decoded = urlencoding::decode(segment).map_err(|e| {
        Error::InvalidFilename(format!("'{}' is not valid UTF-8 once decoded: {}", segment, e))
    })?;

    sanitize_filename(&decoded)
}

/// Validate a filename, rejecting anything that could escape its directory.
pub fn sanitize_filename(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name == ".." || name == "." {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    // Reject empty or whitespace-only names
    if name.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(name.to_string())
}
