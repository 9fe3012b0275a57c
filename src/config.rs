//! Queue configuration.
//!
//! Loaded from a TOML file, e.g. `~/.furrow/config.toml`. Every field has a
//! default, so a partial file — or no file at all, via `Config::default()` —
//! is valid:
//!
//! ```toml
//! [sync]
//! max-attempts = 5
//! initial-backoff-secs = 30
//! max-backoff-secs = 300
//! delivery-timeout-secs = 10
//!
//! [retention]
//! keep-synced-days = 14
//! max-entries = 1000
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

/// Queue configuration: delivery policy and retention policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub sync: SyncPolicy,
    pub retention: RetentionPolicy,
}

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config at {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Load config from a TOML file.
    /// Returns an error if the file is missing or invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The default config file path: `~/.furrow/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".furrow").join("config.toml"))
    }
}

/// How deliveries are attempted: retry budget, backoff, and deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SyncPolicy {
    /// Delivery attempts per action before it is parked as failed.
    pub max_attempts: u32,

    /// Backoff after the first failed attempt; doubles per attempt.
    pub initial_backoff_secs: i64,

    /// Ceiling on the backoff, however many attempts have failed.
    pub max_backoff_secs: i64,

    /// Deadline handed to the endpoint for each delivery.
    pub delivery_timeout_secs: u64,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_secs: 30,
            max_backoff_secs: 300,
            delivery_timeout_secs: 10,
        }
    }
}

impl SyncPolicy {
    /// Backoff before the next attempt after `attempts` failures:
    /// `initial * 2^(attempts - 1)`, capped at the ceiling.
    pub fn backoff_after(&self, attempts: u32) -> SignedDuration {
        let exp = attempts.saturating_sub(1).min(16);
        let secs = self
            .initial_backoff_secs
            .saturating_mul(1 << exp)
            .min(self.max_backoff_secs);
        SignedDuration::from_secs(secs)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_secs(self.delivery_timeout_secs)
    }
}

/// How long the queue keeps delivered actions around.
///
/// Pending and failed actions are never pruned — undelivered intent is
/// kept until it is delivered or explicitly abandoned by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RetentionPolicy {
    /// Synced actions older than this many days are pruned.
    pub keep_synced_days: i64,

    /// Hard cap on stored actions; oldest synced entries are dropped first.
    pub max_entries: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            keep_synced_days: 14,
            max_entries: 1000,
        }
    }
}

impl RetentionPolicy {
    /// The retention window as a duration.
    pub fn keep_synced(&self) -> SignedDuration {
        SignedDuration::from_hours(self.keep_synced_days.saturating_mul(24))
    }
}
