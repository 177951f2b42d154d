//! Sync configuration.

use std::time::Duration;

/// Default period between payment fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Warn once per this many create attempts for a single submission.
pub const ATTEMPT_WARN_EVERY: u64 = 100;

/// Configuration for the poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Period between fetch ticks.
    pub poll_interval: Duration,
    /// Drop fetched records that fail validation instead of merging them.
    pub validate_records: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            validate_records: true,
        }
    }
}

impl SyncConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_records = validate;
        self
    }
}
