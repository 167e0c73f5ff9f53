//! Throttling of release checks between invocations.
//!
//! The outcome of the last successful release fetch is stored as JSON next to
//! the configuration file. While it is younger than `check_interval` and was
//! written by the same kubectl-switch version, startup checks skip the GitHub
//! API entirely: unauthenticated clients only get 60 requests per hour.

use crate::config::GlobalConfig;
use crate::constants::VERSION_CHECK_FILE_NAME;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Last release check, as persisted on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCheckCache {
    /// Tag of the latest release at check time.
    pub latest_version: String,
    /// Version of the binary that ran the check.
    pub current_version: String,
    /// When the check ran.
    pub checked_at: DateTime<Utc>,
}

impl VersionCheckCache {
    /// Record of a check made now.
    pub fn new(current_version: impl Into<String>, latest_version: impl Into<String>) -> Self {
        Self {
            latest_version: latest_version.into(),
            current_version: current_version.into(),
            checked_at: Utc::now(),
        }
    }

    /// Whether the check is younger than `interval_seconds`.
    ///
    /// A timestamp in the future (clock changes) is never valid.
    #[must_use]
    pub fn is_valid(&self, interval_seconds: u64) -> bool {
        let age = (Utc::now() - self.checked_at).num_seconds();
        u64::try_from(age).is_ok_and(|age| age < interval_seconds)
    }
}

/// Decides whether a release check is due and records the checks made.
#[derive(Debug, Clone)]
pub struct VersionChecker {
    cache_path: PathBuf,
    check_interval: u64,
}

impl VersionChecker {
    /// Checker persisting to `cache_path`. An interval of `0` makes every check due.
    pub fn new(cache_path: impl Into<PathBuf>, check_interval: u64) -> Self {
        Self {
            cache_path: cache_path.into(),
            check_interval,
        }
    }

    /// Cache file next to the configuration file.
    ///
    /// # Errors
    ///
    /// Fails when no home directory can be determined.
    pub fn default_cache_path() -> Result<PathBuf> {
        let config = GlobalConfig::default_path()?;
        let dir = config.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok(dir.join(VERSION_CHECK_FILE_NAME))
    }

    /// Where the last check is stored.
    #[must_use]
    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Whether `current_version` should ask for the latest release again.
    ///
    /// A missing or unreadable cache makes the check due.
    pub async fn is_due(&self, current_version: &str) -> bool {
        if self.check_interval == 0 {
            return true;
        }
        match self.load_cache().await {
            Ok(Some(cache)) => {
                let fresh = cache.current_version == current_version && cache.is_valid(self.check_interval);
                if fresh {
                    debug!("Release checked at {}, skipping", cache.checked_at);
                }
                !fresh
            }
            Ok(None) => true,
            Err(e) => {
                debug!("Ignoring version cache: {e:#}");
                true
            }
        }
    }

    /// Remember that `latest_version` was seen now.
    ///
    /// # Errors
    ///
    /// Fails when the cache file cannot be written.
    pub async fn record(&self, current_version: &str, latest_version: &str) -> Result<()> {
        self.save_cache(&VersionCheckCache::new(current_version, latest_version)).await
    }

    /// Read the last check, `None` if none was recorded.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or parsed.
    pub async fn load_cache(&self) -> Result<Option<VersionCheckCache>> {
        if !self.cache_path.exists() {
            debug!("No version cache found");
            return Ok(None);
        }

        let content = fs::read_to_string(&self.cache_path)
            .await
            .context("Failed to read version cache")?;
        let cache = serde_json::from_str(&content).context("Failed to parse version cache")?;
        Ok(Some(cache))
    }

    async fn save_cache(&self, cache: &VersionCheckCache) -> Result<()> {
        let content = serde_json::to_string_pretty(cache).context("Failed to serialize version cache")?;

        if let Some(parent) = self.cache_path.parent() {
            fs::create_dir_all(parent).await.context("Failed to create cache directory")?;
        }
        fs::write(&self.cache_path, content)
            .await
            .context("Failed to write version cache")?;

        debug!("Saved version check to {}", self.cache_path.display());
        Ok(())
    }
}
