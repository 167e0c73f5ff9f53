//! Global configuration for kubectl-switch.
//!
//! The configuration file is optional. Every field has a default, so an absent
//! file or an empty file behaves exactly like the built-in settings.
//!
//! # Configuration File Location
//!
//! - `$KUBECTL_SWITCH_CONFIG` when set
//! - otherwise `~/.kube/kubectl-switch.toml`
//!
//! # File Format
//!
//! ```toml
//! # Mirror for kubectl downloads
//! url_template = "https://mirror.example.com/v{version}/bin/{os}/{arch}/kubectl"
//!
//! # Version used when the cluster does not answer in time
//! default_version = "1.13.0"
//! version_timeout_ms = 1000
//!
//! [upgrade]
//! check_on_startup = false
//! check_interval = 86400
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use kubectl_switch::config::GlobalConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GlobalConfig::load().await?;
//! println!("Falling back to kubectl {}", config.default_version);
//! # Ok(())
//! # }
//! ```

use crate::constants::{
    CONFIG_FILE_NAME, CONFIG_PATH_ENV, DEFAULT_KUBECTL_URL_TEMPLATE, DEFAULT_KUBECTL_VERSION,
    DEFAULT_VERSION_TIMEOUT,
};
use crate::core::SwitchError;
use crate::upgrade::config::UpgradeConfig;
use crate::utils::platform::get_home_dir;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

/// User-wide kubectl-switch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Download URL template for kubectl (`{version}`, `{os}`, `{arch}`).
    #[serde(default = "default_url_template")]
    pub url_template: String,

    /// kubectl version used when the cluster version cannot be resolved.
    #[serde(default = "default_version")]
    pub default_version: String,

    /// Milliseconds to wait for the cluster version before falling back.
    #[serde(default = "default_version_timeout_ms")]
    pub version_timeout_ms: u64,

    /// Self-update settings.
    #[serde(default)]
    pub upgrade: UpgradeConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            default_version: default_version(),
            version_timeout_ms: default_version_timeout_ms(),
            upgrade: UpgradeConfig::default(),
        }
    }
}

fn default_url_template() -> String {
    DEFAULT_KUBECTL_URL_TEMPLATE.to_string()
}

fn default_version() -> String {
    DEFAULT_KUBECTL_VERSION.to_string()
}

fn default_version_timeout_ms() -> u64 {
    u64::try_from(DEFAULT_VERSION_TIMEOUT.as_millis()).unwrap_or(1000)
}

impl GlobalConfig {
    /// Load the configuration from the default location.
    ///
    /// # Errors
    ///
    /// Fails when the home directory cannot be resolved, or when the file exists
    /// but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self::load_from(&path).await?)
    }

    /// Load the configuration from `path`, returning defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// [`SwitchError::ConfigError`] when the file cannot be read or is not valid TOML.
    pub async fn load_from(path: &Path) -> Result<Self, SwitchError> {
        if !path.exists() {
            debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).await.map_err(|e| SwitchError::ConfigError {
            message: format!("failed to read {}: {e}", path.display()),
        })?;

        toml::from_str(&content).map_err(|e| SwitchError::ConfigError {
            message: format!("failed to parse {}: {e}", path.display()),
        })
    }

    /// Path of the configuration file: `$KUBECTL_SWITCH_CONFIG` or `~/.kube/kubectl-switch.toml`.
    ///
    /// # Errors
    ///
    /// Fails when the variable is unset and the home directory cannot be resolved.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        Ok(get_home_dir()?.join(".kube").join(CONFIG_FILE_NAME))
    }

    /// The version lookup timeout as a [`Duration`].
    #[must_use]
    pub const fn version_timeout(&self) -> Duration {
        Duration::from_millis(self.version_timeout_ms)
    }
}
