//! Dashboard configuration.

use std::time::Duration;

use payboard_sync::SyncConfig;

use crate::error::{DashboardError, Result};

/// Environment variable overriding the payment endpoint.
pub const ENV_PAYMENT_URL: &str = "PAYBOARD_PAYMENT_URL";
/// Environment variable overriding the user endpoint.
pub const ENV_USER_URL: &str = "PAYBOARD_USER_URL";
/// Environment variable overriding the poll period, in milliseconds.
pub const ENV_POLL_INTERVAL_MS: &str = "PAYBOARD_POLL_INTERVAL_MS";

pub const DEFAULT_PAYMENT_URL: &str = "http://localhost:8080/api/payments";
pub const DEFAULT_USER_URL: &str = "http://localhost:8080/api/users";

/// Configuration for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Payment collection endpoint (GET and POST).
    pub payment_url: String,
    /// User collection endpoint (GET).
    pub user_url: String,
    /// Poller configuration.
    pub sync: SyncConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            payment_url: DEFAULT_PAYMENT_URL.to_string(),
            user_url: DEFAULT_USER_URL.to_string(),
            sync: SyncConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn with_payment_url(mut self, url: impl Into<String>) -> Self {
        self.payment_url = url.into();
        self
    }

    pub fn with_user_url(mut self, url: impl Into<String>) -> Self {
        self.user_url = url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.sync.poll_interval = interval;
        self
    }

    pub fn with_sync(mut self, sync: SyncConfig) -> Self {
        self.sync = sync;
        self
    }

    /// Defaults overridden by whichever `PAYBOARD_*` variables are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_PAYMENT_URL) {
            config.payment_url = url;
        }
        if let Some(url) = lookup(ENV_USER_URL) {
            config.user_url = url;
        }
        if let Some(raw) = lookup(ENV_POLL_INTERVAL_MS) {
            let millis: u64 = raw.trim().parse().map_err(|e| DashboardError::Config {
                key: ENV_POLL_INTERVAL_MS,
                reason: format!("{raw:?}: {e}"),
            })?;
            if millis == 0 {
                return Err(DashboardError::Config {
                    key: ENV_POLL_INTERVAL_MS,
                    reason: "must be greater than zero".into(),
                });
            }
            config.sync.poll_interval = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = DashboardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.sync.poll_interval, Duration::from_millis(500));
    }

    #[test]
    fn test_env_overrides() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (ENV_PAYMENT_URL, "http://pay.test/payments"),
            (ENV_POLL_INTERVAL_MS, "250"),
        ]))
        .unwrap();

        assert_eq!(config.payment_url, "http://pay.test/payments");
        assert_eq!(config.user_url, DEFAULT_USER_URL);
        assert_eq!(config.sync.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_bad_poll_interval() {
        let err = DashboardConfig::from_lookup(lookup(&[(ENV_POLL_INTERVAL_MS, "soon")])).unwrap_err();
        assert!(matches!(err, DashboardError::Config { key: ENV_POLL_INTERVAL_MS, .. }));

        let err = DashboardConfig::from_lookup(lookup(&[(ENV_POLL_INTERVAL_MS, "0")])).unwrap_err();
        assert!(matches!(err, DashboardError::Config { .. }));
    }
}
