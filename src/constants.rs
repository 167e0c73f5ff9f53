//! Global constants used throughout kubectl-switch.
//!
//! Defaults for every configurable value live here so the configuration
//! layer, the CLI and the tests agree on them.

use std::time::Duration;

/// Where kubectl binaries are downloaded from.
///
/// `{version}`, `{os}` and `{arch}` are substituted with the normalized version
/// and Go-style platform names.
pub const DEFAULT_KUBECTL_URL_TEMPLATE: &str =
    "https://storage.googleapis.com/kubernetes-release/release/v{version}/bin/{os}/{arch}/kubectl";

/// kubectl version used when the cluster cannot be asked in time.
pub const DEFAULT_KUBECTL_VERSION: &str = "1.13.0";

/// How long to wait for the cluster to report its version (1 second).
pub const DEFAULT_VERSION_TIMEOUT: Duration = Duration::from_secs(1);

/// GitHub owner of the kubectl-switch releases.
pub const DEFAULT_REPO_OWNER: &str = "tjamet";

/// GitHub repository of the kubectl-switch releases.
pub const DEFAULT_REPO_NAME: &str = "kubectl-switch";

/// Base URL of the GitHub REST API.
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";

/// Flag passed to a freshly downloaded wrapper to prove it runs.
pub const VALIDATION_FLAG: &str = "--help";

/// Suffix of the side-by-side file a self-update is downloaded to.
pub const UPDATE_TEMP_SUFFIX: &str = "-new";

/// Environment variable pointing at an alternate configuration file.
pub const CONFIG_PATH_ENV: &str = "KUBECTL_SWITCH_CONFIG";

/// Configuration file name inside `~/.kube`.
pub const CONFIG_FILE_NAME: &str = "kubectl-switch.toml";

/// File recording the last release check, next to the configuration file.
pub const VERSION_CHECK_FILE_NAME: &str = ".kubectl-switch-version-check.json";

/// Minimum delay between two startup release checks (one day).
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 86_400;
