//! Link discovery on a listing page.

use std::sync::LazyLock;

use reqwest::StatusCode;
use scraper::{Html, Selector};

use crate::api::client::body_for_diagnostics;
use crate::api::Session;
use crate::error::{Error, Result};

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("anchor selector"));

/// Links discovered on one listing page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Resolved download URLs in document order, duplicates kept.
    pub links: Vec<String>,
    /// Raw hrefs that are not bare relative file names.
    pub unsupported: Vec<String>,
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }
}

/// Fetch the listing page and extract candidate download links.
pub async fn discover(session: &Session, listing_url: &str, ext: Option<&str>) -> Result<Listing> {
    let response = session
        .get(listing_url)
        .await
        .map_err(|e| Error::Listing(format!("{}: {}", listing_url, e)))?;

    if response.status() != StatusCode::OK {
        return Err(Error::Listing(format!(
            "{} returned {}",
            listing_url,
            body_for_diagnostics(response).await
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| Error::Listing(format!("Failed to read {}: {}", listing_url, e)))?;

    let listing = extract_links(&body, listing_url, ext);
    tracing::debug!(
        "Listing {}: {} link(s), {} unsupported href(s)",
        listing_url,
        listing.links.len(),
        listing.unsupported.len()
    );
    Ok(listing)
}

/// Extract anchor hrefs from an HTML document.
///
/// Each href is joined to `listing_url` with a `/`; no URL resolution takes
/// place. Anchors without an href are skipped silently. When `ext` is given
/// only hrefs ending with that literal, case-sensitive suffix are kept.
pub fn extract_links(html: &str, listing_url: &str, ext: Option<&str>) -> Listing {
    let document = Html::parse_document(html);
    let base = listing_url.trim_end_matches('/');
    let mut listing = Listing::default();

    for href in document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
    {
        if let Some(ext) = ext {
            if !href.ends_with(ext) {
                continue;
            }
        }

        if !is_bare_relative_href(href) {
            tracing::debug!("Skipping unsupported href: {}", href);
            listing.unsupported.push(href.to_string());
            continue;
        }

        listing.links.push(format!("{}/{}", base, href));
    }

    listing
}

/// Whether an href is a plain relative file path that can be appended to the listing URL.
///
/// Absolute URLs, scheme links (`mailto:`), root-relative paths, `.`/`..`
/// segments, and anything carrying a query or fragment are rejected.
pub fn is_bare_relative_href(href: &str) -> bool {
    if href.is_empty() || href.starts_with('/') || href.contains('?') || href.contains('#') {
        return false;
    }

    // A colon before the first slash is a scheme.
    let first_segment = href.split('/').next().unwrap_or("");
    if first_segment.contains(':') {
        return false;
    }

    !href
        .split('/')
        .any(|segment| segment == "." || segment == ".." || segment.is_empty())
}
