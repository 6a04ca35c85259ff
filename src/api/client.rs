//! Authenticated HTTP session against the archive host.

use std::fmt;

use reqwest::{Client, Response};

use crate::config::ArchiveConfig;
use crate::error::{Error, Result};

/// Authenticated connection state bound to one username.
///
/// The cookie jar lives inside the wrapped client. A session is never mutated
/// after login; re-authentication produces a brand new value.
#[derive(Clone)]
pub struct Session {
    client: Client,
    username: String,
}

impl Session {
    pub(crate) fn new(client: Client, username: String) -> Self {
        Self { client, username }
    }

    /// Build a client with its own cookie store, user agent and request timeout.
    ///
    /// The timeout bounds connecting and every single read, not the whole
    /// transfer, so large files can stream for longer than it.
    pub(crate) fn build_client(config: &ArchiveConfig) -> Result<Client> {
        Client::builder()
            .cookie_store(true)
            .user_agent(&config.user_agent)
            .connect_timeout(config.request_timeout())
            .read_timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))
    }

    /// Username this session was established for.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Make an authenticated GET request.
    ///
    /// The status is not checked here; callers decide what a non-200 means.
    pub async fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        tracing::debug!("Response status: {}", response.status());
        Ok(response)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Read a response body for diagnostics, never failing.
pub(crate) async fn body_for_diagnostics(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, body)
    }
}
