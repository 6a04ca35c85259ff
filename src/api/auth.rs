//! Login against the archive host.

use std::fmt;

use reqwest::StatusCode;

use crate::api::client::{body_for_diagnostics, Session};
use crate::config::ArchiveConfig;
use crate::error::{Error, Result};

/// Username and password pair, supplied once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Establish a fresh authenticated session.
///
/// A GET on the login page primes the cookie jar, then the credentials are
/// posted as a form. Only a 200 on the post counts as success.
pub async fn login(config: &ArchiveConfig, credentials: &Credentials) -> Result<Session> {
    let client = Session::build_client(config)?;
    let login_url = config.login_url();

    tracing::debug!("Priming cookies from {}", login_url);
    let response = client
        .get(&login_url)
        .send()
        .await
        .map_err(|e| Error::Authentication(format!("Login page unreachable: {}", e)))?;

    if !response.status().is_success() {
        return Err(Error::Authentication(format!(
            "Login page returned {}",
            body_for_diagnostics(response).await
        )));
    }

    let referer = config.referer();
    let form = [
        ("username", credentials.username()),
        ("password", credentials.password()),
        ("referer", referer.as_str()),
        ("remember", "true"),
        ("login", "true"),
        ("submit_by_js", "true"),
    ];

    tracing::debug!("POST {} as {}", login_url, credentials.username());
    let response = client
        .post(&login_url)
        .form(&form)
        .send()
        .await
        .map_err(|e| Error::Authentication(format!("Login request failed: {}", e)))?;

    if response.status() != StatusCode::OK {
        let detail = body_for_diagnostics(response).await;
        tracing::error!("Login rejected: {}", detail);
        return Err(Error::Authentication(detail));
    }

    Ok(Session::new(client, credentials.username().to_string()))
}
