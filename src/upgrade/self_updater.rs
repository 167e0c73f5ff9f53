use super::config::UpgradeConfig;
use super::installer::{HttpUpdater, Updater};
use super::prompt::{Prompter, TtyPrompter, is_affirmative, is_interactive};
use super::release::{GitHubReleases, Release, ReleaseSource};
use super::selector::select_asset;
use super::version_check::VersionChecker;
use crate::core::SwitchError;
use crate::http::ReqwestTransport;
use crate::utils::platform::Platform;
use crate::version::ParsedVersion;
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

/// How a self-update check ended. Only used for reporting; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The last check is recent enough; GitHub was not asked.
    RecentlyChecked,
    /// The latest release could not be fetched.
    ReleaseUnavailable,
    /// The running version or the release tag is not a version.
    InvalidVersion,
    /// The latest release is not newer than the running binary.
    UpToDate,
    /// A newer release exists but there is no terminal to ask on.
    NonInteractive {
        /// Tag of the newer release.
        version: String,
    },
    /// The operator answered anything but yes.
    Declined,
    /// The release has no build for this platform.
    NoMatchingAsset,
    /// Download, validation or replacement failed; the binary is unchanged.
    InstallFailed,
    /// The binary was replaced.
    Updated {
        /// Tag of the installed release.
        version: String,
    },
}

/// Checks GitHub for a newer kubectl-switch and replaces the running binary.
///
/// The check is a small state machine:
///
/// ```text
/// checked recently ──────────────────────────────────────────────▶ done
/// fetch release ─▶ compare versions ─▶ not newer ─────────────────▶ done
///                                   └▶ newer ─▶ not a terminal ───▶ done
///                                              └▶ prompt ─▶ no ───▶ done
///                                                         └▶ yes ─▶ select asset ─▶ install ─▶ done
/// ```
///
/// Every failure ends in `done` silently (logged at debug level only): a broken
/// update check must never get in the way of running kubectl.
///
/// # Examples
///
/// ```rust,no_run
/// use kubectl_switch::upgrade::{SelfUpdater, config::UpgradeConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let updater = SelfUpdater::from_config(&UpgradeConfig::default())?;
/// let outcome = updater.confirm_and_update(&std::env::current_exe()?).await;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SelfUpdater<R, P, U> {
    current_version: String,
    repo_owner: String,
    repo_name: String,
    platform: Platform,
    interactive: bool,
    releases: R,
    prompter: P,
    updater: U,
    checker: Option<VersionChecker>,
}

impl SelfUpdater<GitHubReleases, TtyPrompter, HttpUpdater<ReqwestTransport>> {
    /// Updater for the running binary, talking to GitHub and the terminal.
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP clients cannot be built.
    pub fn from_config(config: &UpgradeConfig) -> Result<Self> {
        Ok(Self::new(
            GitHubReleases::new(&config.api_base)?,
            TtyPrompter::stdio(),
            HttpUpdater::new(ReqwestTransport::new()?),
        )
        .repository(&config.repo_owner, &config.repo_name))
    }
}

impl<R: ReleaseSource, P: Prompter, U: Updater> SelfUpdater<R, P, U> {
    /// Assemble an updater from its collaborators.
    ///
    /// Defaults: the crate's own version, the compile-time platform, the
    /// default release repository, and interactivity detected from the terminal.
    pub fn new(releases: R, prompter: P, updater: U) -> Self {
        let defaults = UpgradeConfig::default();
        Self {
            current_version: env!("CARGO_PKG_VERSION").to_string(),
            repo_owner: defaults.repo_owner,
            repo_name: defaults.repo_name,
            platform: Platform::current(),
            interactive: is_interactive(),
            releases,
            prompter,
            updater,
            checker: None,
        }
    }

    /// Override the version the running binary reports.
    #[must_use]
    pub fn current_version(mut self, version: impl Into<String>) -> Self {
        self.current_version = version.into();
        self
    }

    /// Override the release repository.
    #[must_use]
    pub fn repository(mut self, owner: impl Into<String>, name: impl Into<String>) -> Self {
        self.repo_owner = owner.into();
        self.repo_name = name.into();
        self
    }

    /// Override the platform used to pick a release asset.
    #[must_use]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Override terminal detection.
    #[must_use]
    pub const fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Throttle checks with `checker` and record every successful fetch in it.
    #[must_use]
    pub fn version_checker(mut self, checker: VersionChecker) -> Self {
        self.checker = Some(checker);
        self
    }

    /// Fetch the latest release and return it if it is newer than the running binary.
    ///
    /// # Errors
    ///
    /// Fails when the release cannot be fetched or either version cannot be
    /// parsed. Parse failures are [`SwitchError::NotAVersion`].
    pub async fn check_for_update(&self) -> Result<Option<Release>> {
        debug!("Checking for updates from {}/{}", self.repo_owner, self.repo_name);
        let release = self.releases.latest_release(&self.repo_owner, &self.repo_name).await?;

        if let Some(checker) = &self.checker {
            if let Err(e) = checker.record(&self.current_version, &release.tag_name).await {
                debug!("Failed to record version check: {e:#}");
            }
        }

        let current = ParsedVersion::parse(&self.current_version)?;
        let latest = ParsedVersion::parse(&release.tag_name)?;

        if current.is_older_than(&latest) {
            info!("Update available: {} -> {}", self.current_version, release.tag_name);
            Ok(Some(release))
        } else {
            debug!("Already on latest version");
            Ok(None)
        }
    }

    /// Offer the latest release to the operator and install it over `path` if accepted.
    pub async fn confirm_and_update(&self, path: &Path) -> UpdateOutcome {
        if let Some(checker) = &self.checker {
            if !checker.is_due(&self.current_version).await {
                return UpdateOutcome::RecentlyChecked;
            }
        }

        let release = match self.check_for_update().await {
            Ok(Some(release)) => release,
            Ok(None) => return UpdateOutcome::UpToDate,
            Err(e) if matches!(e.downcast_ref::<SwitchError>(), Some(SwitchError::NotAVersion { .. })) => {
                debug!("Skipping update check: {e}");
                return UpdateOutcome::InvalidVersion;
            }
            Err(e) => {
                debug!("Update check failed: {e:#}");
                return UpdateOutcome::ReleaseUnavailable;
            }
        };

        if !self.interactive {
            debug!("Update {} available but not running on a terminal", release.tag_name);
            return UpdateOutcome::NonInteractive {
                version: release.tag_name,
            };
        }

        let question = format!(
            "A new version {} is available, would you like to download it? (y/N)",
            release.tag_name
        );
        if !is_affirmative(&self.prompter.prompt(&question).await) {
            return UpdateOutcome::Declined;
        }

        let Some(asset) = select_asset(&release.assets, &self.platform) else {
            debug!("Release {} has no asset for {}", release.tag_name, self.platform);
            return UpdateOutcome::NoMatchingAsset;
        };

        match self.updater.update(path, &asset.browser_download_url).await {
            Ok(()) => UpdateOutcome::Updated {
                version: release.tag_name,
            },
            Err(e) => {
                debug!("Update failed: {e:#}");
                UpdateOutcome::InstallFailed
            }
        }
    }
}
