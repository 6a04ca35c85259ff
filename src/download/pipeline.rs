//! Login, discovery and download composed into one run.

use std::path::Path;

use crate::api::{login, Credentials};
use crate::config::ArchiveConfig;
use crate::download::listing::discover;
use crate::download::retry::download_all;
use crate::download::state::RunStats;
use crate::error::Result;
use crate::output::{print_failure, print_info, print_progress, print_success};

/// Run the whole downloader for one item.
///
/// Login and listing failures are returned as errors before any download
/// starts; per-target failures only show up in the returned stats.
pub async fn run_pipeline(
    config: &ArchiveConfig,
    credentials: &Credentials,
    page_id: &str,
    ext: Option<&str>,
    dest_dir: &Path,
) -> Result<RunStats> {
    print_progress("logging-in");
    let session = match login(config, credentials).await {
        Ok(session) => session,
        Err(e) => {
            print_failure("login failed");
            return Err(e);
        }
    };
    print_success(&format!("login success ({})", session.username()));

    print_progress("fetching download page");
    let listing_url = config.listing_url(page_id);
    let listing = discover(&session, &listing_url, ext).await?;

    if !listing.unsupported.is_empty() {
        tracing::info!(
            "Ignored {} link(s) that are not plain file names",
            listing.unsupported.len()
        );
    }
    if listing.is_empty() {
        print_info(&format!("No matching links found on {}", listing_url));
    }

    let stats = RunStats::new(listing.len(), listing.unsupported.len());
    download_all(
        config,
        credentials,
        session,
        &listing.links,
        dest_dir,
        stats,
    )
    .await
}
