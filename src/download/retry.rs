//! Per-target download driver with a single bounded retry.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::api::{login, Credentials, Session};
use crate::config::ArchiveConfig;
use crate::download::fetch::{fetch, DownloadTarget, FetchOutcome};
use crate::download::state::RunStats;
use crate::error::Result;
use crate::output::{print_failure, print_progress, print_success};

/// The remote operations the retry driver sequences.
#[async_trait]
pub trait Remote: Send + Sync {
    /// Run the full login flow and return a fresh session.
    async fn login(&self) -> Result<Session>;

    /// Make one download attempt for `target`.
    async fn fetch(&self, session: &Session, target: &DownloadTarget) -> FetchOutcome;
}

/// The archive host, writing into one destination directory.
pub struct ArchiveRemote<'a> {
    config: &'a ArchiveConfig,
    credentials: &'a Credentials,
    dest_dir: &'a Path,
}

impl<'a> ArchiveRemote<'a> {
    pub fn new(config: &'a ArchiveConfig, credentials: &'a Credentials, dest_dir: &'a Path) -> Self {
        Self {
            config,
            credentials,
            dest_dir,
        }
    }
}

#[async_trait]
impl Remote for ArchiveRemote<'_> {
    async fn login(&self) -> Result<Session> {
        login(self.config, self.credentials).await
    }

    async fn fetch(&self, session: &Session, target: &DownloadTarget) -> FetchOutcome {
        fetch(session, target, self.dest_dir, self.config.show_progress).await
    }
}

/// Download every link in order from the archive host.
pub async fn download_all(
    config: &ArchiveConfig,
    credentials: &Credentials,
    session: Session,
    links: &[String],
    dest_dir: &Path,
    stats: RunStats,
) -> Result<RunStats> {
    let remote = ArchiveRemote::new(config, credentials, dest_dir);
    download_with_retry(&remote, config.retry_delay(), session, links, stats).await
}

/// Download every link in order through `remote`.
///
/// A failed target gets exactly one more attempt: after `retry_delay` the
/// whole login flow is repeated and the fresh session replaces the old one.
/// A failed re-login aborts the run with an error; a second failed attempt
/// is reported and the driver moves on.
pub async fn download_with_retry<R: Remote + ?Sized>(
    remote: &R,
    retry_delay: Duration,
    mut session: Session,
    links: &[String],
    mut stats: RunStats,
) -> Result<RunStats> {
    for url in links {
        let target = match DownloadTarget::new(url.as_str()) {
            Ok(target) => target,
            Err(e) => {
                print_failure(&format!("skipping url: {}. {}", url, e));
                stats.record_failure();
                continue;
            }
        };

        print_progress(&format!("{} -> {}", target.url, target.file_name));

        let outcome = remote.fetch(&session, &target).await;
        let outcome = match outcome {
            FetchOutcome::Success { .. } => outcome,
            FetchOutcome::Failure { cause } => {
                tracing::warn!("First attempt for {} failed: {}", target.url, cause);
                print_failure(&format!(
                    "failed to download url: {}. retrying in {}secs",
                    target.url,
                    retry_delay.as_secs()
                ));
                stats.record_retry();
                sleep(retry_delay).await;

                session = relogin(remote).await?;
                stats.record_relogin();

                remote.fetch(&session, &target).await
            }
        };

        match outcome {
            FetchOutcome::Success { bytes_written } => {
                print_success(&format!(
                    "downloaded {} -> {}",
                    target.url, target.file_name
                ));
                stats.record_success(bytes_written);
            }
            FetchOutcome::Failure { cause } => {
                tracing::warn!("Giving up on {}: {}", target.url, cause);
                print_failure(&format!("failed to download url: {}.", target.url));
                stats.record_failure();
            }
        }
    }

    Ok(stats)
}

async fn relogin<R: Remote + ?Sized>(remote: &R) -> Result<Session> {
    print_progress("logging-in");
    match remote.login().await {
        Ok(session) => {
            print_success(&format!("login success ({})", session.username()));
            Ok(session)
        }
        Err(e) => {
            print_failure("login failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::test_server::{full_response, serve_raw, truncated_response};
    use crate::error::Error;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::time::Instant;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> ArchiveConfig {
        ArchiveConfig {
            base_url: server.uri(),
            retry_delay_secs: 0,
            show_progress: false,
            ..ArchiveConfig::default()
        }
    }

    fn credentials() -> Credentials {
        Credentials::new("alice", "pw")
    }

    async fn mount_login(server: &MockServer, post_status: u16, expected_posts: u64) {
        Mock::given(method("GET"))
            .and(path("/account/login"))
            .respond_with(ResponseTemplate::new(200))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/account/login"))
            .respond_with(ResponseTemplate::new(post_status))
            .expect(expected_posts)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_all_succeed_without_relogin() {
        let server = MockServer::start().await;
        mount_login(&server, 200, 1).await;
        for name in ["a.zip", "c.zip"] {
            Mock::given(method("GET"))
                .and(path(format!("/download/item/{name}")))
                .respond_with(ResponseTemplate::new(200).set_body_string(name))
                .expect(1)
                .mount(&server)
                .await;
        }

        let config = test_config(&server);
        let session = login(&config, &credentials()).await.unwrap();
        let links = vec![
            config.listing_url("item") + "/a.zip",
            config.listing_url("item") + "/c.zip",
        ];
        let dir = tempfile::tempdir().unwrap();

        let stats = download_all(
            &config,
            &credentials(),
            session,
            &links,
            dir.path(),
            RunStats::new(2, 0),
        )
        .await
        .unwrap();

        assert_eq!(stats.downloaded, 2);
        assert_eq!(stats.retried, 0);
        assert_eq!(stats.relogins, 0);
        assert_eq!(std::fs::read_to_string(dir.path().join("c.zip")).unwrap(), "c.zip");
    }

    #[tokio::test]
    async fn test_fail_then_succeed_relogins_once() {
        let server = MockServer::start().await;
        // Initial login plus exactly one re-login.
        mount_login(&server, 200, 2).await;
        Mock::given(method("GET"))
            .and(path("/download/item/a.zip"))
            .respond_with(ResponseTemplate::new(500).set_body_string("busy"))
            .up_to_n_times(1)
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/download/item/a.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_string("second attempt"))
            .with_priority(2)
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(&server);
        let session = login(&config, &credentials()).await.unwrap();
        let links = vec![config.listing_url("item") + "/a.zip"];
        let dir = tempfile::tempdir().unwrap();

        let stats = download_all(
            &config,
            &credentials(),
            session,
            &links,
            dir.path(),
            RunStats::new(1, 0),
        )
        .await
        .unwrap();

        assert_eq!(stats.retried, 1);
        assert_eq!(stats.relogins, 1);
        assert_eq!(stats.downloaded, 1);
        assert_eq!(stats.failed, 0);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("a.zip")).unwrap(),
            "second attempt"
        );
    }

    #[tokio::test]
    async fn test_fail_twice_moves_on_without_third_attempt() {
        let server = MockServer::start().await;
        mount_login(&server, 200, 2).await;
        Mock::given(method("GET"))
            .and(path("/download/item/a.zip"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/download/item/b.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_string("b"))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(&server);
        let session = login(&config, &credentials()).await.unwrap();
        let links = vec![
            config.listing_url("item") + "/a.zip",
            config.listing_url("item") + "/b.zip",
        ];
        let dir = tempfile::tempdir().unwrap();

        let stats = download_all(
            &config,
            &credentials(),
            session,
            &links,
            dir.path(),
            RunStats::new(2, 0),
        )
        .await
        .unwrap();

        assert_eq!(stats.failed, 1);
        assert_eq!(stats.downloaded, 1);
        assert_eq!(stats.retried, 1);
        assert!(!dir.path().join("a.zip").exists());
        assert!(dir.path().join("b.zip").exists());
    }

    #[tokio::test]
    async fn test_relogin_failure_aborts_run() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/account/login"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/account/login"))
            .respond_with(ResponseTemplate::new(200))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/account/login"))
            .respond_with(ResponseTemplate::new(403).set_body_string("locked"))
            .with_priority(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/download/item/a.zip"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/download/item/b.zip"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = test_config(&server);
        let session = login(&config, &credentials()).await.unwrap();
        let links = vec![
            config.listing_url("item") + "/a.zip",
            config.listing_url("item") + "/b.zip",
        ];
        let dir = tempfile::tempdir().unwrap();

        let result = download_all(
            &config,
            &credentials(),
            session,
            &links,
            dir.path(),
            RunStats::default(),
        )
        .await;

        assert!(matches!(result, Err(Error::Authentication(_))));
    }

    #[tokio::test]
    async fn test_invalid_file_name_is_skipped_without_retry() {
        let server = MockServer::start().await;
        mount_login(&server, 200, 1).await;

        let config = test_config(&server);
        let session = login(&config, &credentials()).await.unwrap();
        let links = vec![config.listing_url("item") + "/..%2Fescape"];
        let dir = tempfile::tempdir().unwrap();

        let stats = download_all(
            &config,
            &credentials(),
            session,
            &links,
            dir.path(),
            RunStats::new(1, 0),
        )
        .await
        .unwrap();

        assert_eq!(stats.failed, 1);
        assert_eq!(stats.retried, 0);
    }

    /// Answers every fetch from a script of outcomes, without any network.
    struct ScriptedRemote {
        outcomes: Mutex<VecDeque<bool>>,
        logins: AtomicUsize,
        fetches: AtomicUsize,
    }

    impl ScriptedRemote {
        fn new(outcomes: &[bool]) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.iter().copied().collect()),
                logins: AtomicUsize::new(0),
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Remote for ScriptedRemote {
        async fn login(&self) -> Result<Session> {
            self.logins.fetch_add(1, Ordering::SeqCst);
            Ok(Session::new(reqwest::Client::new(), "alice".to_string()))
        }

        async fn fetch(&self, _session: &Session, _target: &DownloadTarget) -> FetchOutcome {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.outcomes.lock().unwrap().pop_front().unwrap_or(false) {
                FetchOutcome::Success { bytes_written: 3 }
            } else {
                FetchOutcome::Failure {
                    cause: Error::Download("HTTP 500".to_string()),
                }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_waits_default_delay_once() {
        let remote = ScriptedRemote::new(&[false, true]);
        let session = remote.login().await.unwrap();
        let links = vec!["https://archive.org/download/item/a.zip".to_string()];
        let delay = ArchiveConfig::default().retry_delay();
        assert_eq!(delay, Duration::from_secs(120));

        let start = Instant::now();
        let stats = download_with_retry(&remote, delay, session, &links, RunStats::new(1, 0))
            .await
            .unwrap();

        assert_eq!(start.elapsed(), Duration::from_secs(120));
        assert_eq!(remote.logins.load(Ordering::SeqCst), 2);
        assert_eq!(remote.fetches.load(Ordering::SeqCst), 2);
        assert_eq!(stats.downloaded, 1);
        assert_eq!(stats.retried, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_delay_when_first_attempt_succeeds() {
        let remote = ScriptedRemote::new(&[true, true]);
        let session = remote.login().await.unwrap();
        let links = vec![
            "https://archive.org/download/item/a.zip".to_string(),
            "https://archive.org/download/item/b.zip".to_string(),
        ];

        let start = Instant::now();
        let stats = download_with_retry(
            &remote,
            ArchiveConfig::default().retry_delay(),
            session,
            &links,
            RunStats::new(2, 0),
        )
        .await
        .unwrap();

        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(remote.logins.load(Ordering::SeqCst), 1);
        assert_eq!(stats.downloaded, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_failed_target_waits_once() {
        let remote = ScriptedRemote::new(&[false, false, false, true]);
        let session = remote.login().await.unwrap();
        let links = vec![
            "https://archive.org/download/item/a.zip".to_string(),
            "https://archive.org/download/item/b.zip".to_string(),
        ];

        let start = Instant::now();
        let stats = download_with_retry(
            &remote,
            ArchiveConfig::default().retry_delay(),
            session,
            &links,
            RunStats::new(2, 0),
        )
        .await
        .unwrap();

        assert_eq!(start.elapsed(), Duration::from_secs(240));
        assert_eq!(remote.fetches.load(Ordering::SeqCst), 4);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.downloaded, 1);
        assert_eq!(stats.relogins, 2);
    }

    #[tokio::test]
    async fn test_dropped_transfer_is_retried_and_replaced() {
        let server = MockServer::start().await;
        mount_login(&server, 200, 2).await;
        let (base, hits) =
            serve_raw(vec![truncated_response(4_000, 10_000), full_response(b"complete")]).await;

        let config = test_config(&server);
        let session = login(&config, &credentials()).await.unwrap();
        let links = vec![format!("{base}/download/item/big.iso")];
        let dir = tempfile::tempdir().unwrap();

        let stats = download_all(
            &config,
            &credentials(),
            session,
            &links,
            dir.path(),
            RunStats::new(1, 0),
        )
        .await
        .unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(stats.retried, 1);
        assert_eq!(stats.relogins, 1);
        assert_eq!(stats.downloaded, 1);
        assert_eq!(stats.bytes_written, 8);
        assert_eq!(
            std::fs::read(dir.path().join("big.iso")).unwrap(),
            b"complete"
        );
    }
}
