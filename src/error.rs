//! Error types for the archive-tools binaries.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Remote host errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Listing fetch failed: {0}")]
    Listing(String),

    #[error("Download failed: {0}")]
    Download(String),

    // Subtitle lookup errors
    #[error("Subtitle lookup failed: {0}")]
    Subtitle(String),

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for an error that terminated the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_)
            | Error::ConfigValidation { .. }
            | Error::MissingConfig(_)
            | Error::TomlParse(_) => exit_codes::CONFIG_ERROR,
            _ => exit_codes::ABORT,
        }
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// Login failure, listing failure, re-login failure, or any other abort.
    pub const ABORT: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
    /// Subtitle tool invoked without arguments.
    pub const USAGE: i32 = 1;
}
