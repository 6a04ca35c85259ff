//! Download run statistics.

/// Counters for one downloader run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Links returned by the listing page.
    pub discovered: u64,
    /// Hrefs skipped because they were not bare relative file names.
    pub unsupported: u64,
    pub downloaded: u64,
    /// Targets whose first attempt failed.
    pub retried: u64,
    /// Targets that failed for good.
    pub failed: u64,
    /// Re-authentications performed on the retry path.
    pub relogins: u64,
    pub bytes_written: u64,
}

impl RunStats {
    pub fn new(discovered: usize, unsupported: usize) -> Self {
        Self {
            discovered: discovered as u64,
            unsupported: unsupported as u64,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self, bytes: u64) {
        self.downloaded += 1;
        self.bytes_written += bytes;
    }

    pub fn record_retry(&mut self) {
        self.retried += 1;
    }

    pub fn record_relogin(&mut self) {
        self.relogins += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Targets that reached a final outcome.
    pub fn processed(&self) -> u64 {
        self.downloaded + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = RunStats::new(3, 1);
        stats.record_success(10);
        stats.record_retry();
        stats.record_relogin();
        stats.record_success(5);
        stats.record_failure();

        assert_eq!(stats.discovered, 3);
        assert_eq!(stats.unsupported, 1);
        assert_eq!(stats.downloaded, 2);
        assert_eq!(stats.bytes_written, 15);
        assert_eq!(stats.processed(), 3);
    }
}
