use crate::constants::{DEFAULT_CHECK_INTERVAL_SECS, DEFAULT_GITHUB_API, DEFAULT_REPO_NAME, DEFAULT_REPO_OWNER};
use serde::{Deserialize, Serialize};

/// Configuration settings for kubectl-switch self-update behavior.
///
/// Lives under the `[upgrade]` table of the global configuration file:
///
/// ```toml
/// [upgrade]
/// check_on_startup = false
/// check_interval = 86400
/// repo_owner = "tjamet"
/// repo_name = "kubectl-switch"
/// api_base = "https://api.github.com"
/// ```
///
/// Even with `check_on_startup` enabled the check stays best-effort: it only
/// prompts on an interactive terminal and never fails the kubectl invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeConfig {
    /// Whether to look for a newer kubectl-switch on every invocation.
    ///
    /// # Default: `false`
    ///
    /// Disabled by default so that each kubectl call does not pay for a GitHub
    /// round-trip. `--switch-upgrade` requests a single check regardless.
    #[serde(default)]
    pub check_on_startup: bool,

    /// Seconds between two startup checks.
    ///
    /// # Default: `86400` (one day)
    ///
    /// The time of the last check is cached next to the configuration file, so
    /// startup checks stay well under GitHub's 60 unauthenticated requests per
    /// hour. `0` checks on every invocation. `--switch-upgrade` always checks.
    #[serde(default = "default_check_interval")]
    pub check_interval: u64,

    /// GitHub owner of the release repository.
    #[serde(default = "default_repo_owner")]
    pub repo_owner: String,

    /// GitHub release repository name.
    #[serde(default = "default_repo_name")]
    pub repo_name: String,

    /// Base URL of the GitHub API, for enterprise installations and mirrors.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            check_on_startup: false,
            check_interval: default_check_interval(),
            repo_owner: default_repo_owner(),
            repo_name: default_repo_name(),
            api_base: default_api_base(),
        }
    }
}

const fn default_check_interval() -> u64 {
    DEFAULT_CHECK_INTERVAL_SECS
}

fn default_repo_owner() -> String {
    DEFAULT_REPO_OWNER.to_string()
}

fn default_repo_name() -> String {
    DEFAULT_REPO_NAME.to_string()
}

fn default_api_base() -> String {
    DEFAULT_GITHUB_API.to_string()
}
