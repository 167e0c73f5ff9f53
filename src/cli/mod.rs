//! Command-line interface for kubectl-switch.
//!
//! kubectl-switch has no subcommands of its own: every argument belongs to
//! kubectl and is forwarded unchanged. `--help` and `--version` therefore reach
//! kubectl too.
//!
//! # Wrapper Options
//!
//! - `--switch-upgrade` (or `KUBECTL_SWITCH_UPGRADE=1`) - check for a newer
//!   kubectl-switch release before running kubectl. Only recognised before the
//!   first kubectl argument and never forwarded.
//!
//! # Execution Flow
//!
//! ```text
//! load config ─▶ self-update (opt-in) ─▶ resolve server version ─▶ download if missing ─▶ exec
//! ```
//!
//! # Example
//!
//! ```bash
//! # Runs the kubectl matching the current context's API server
//! kubectl-switch get pods -n kube-system
//!
//! # Offers to update kubectl-switch first
//! kubectl-switch --switch-upgrade version
//! ```

use crate::cluster::{ClusterArgs, KubeconfigVersionSource, resolve_with_timeout};
use crate::config::GlobalConfig;
use crate::http::ReqwestTransport;
use crate::kubectl::{Kubectl, KubectlConfig};
use crate::upgrade::{SelfUpdater, UpdateOutcome, VersionChecker};
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::ffi::OsString;
use tracing::debug;

const UPGRADE_FLAG: &str = "--switch-upgrade";

/// Transparent kubectl wrapper.
#[derive(Parser, Debug)]
#[command(
    name = "kubectl-switch",
    about = "Runs the kubectl version matching your cluster",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Check for a newer kubectl-switch before running kubectl.
    #[arg(
        long = "switch-upgrade",
        env = "KUBECTL_SWITCH_UPGRADE",
        hide = true,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub switch_upgrade: bool,

    /// Arguments forwarded verbatim to kubectl.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub args: Vec<OsString>,
}

impl Cli {
    /// Parse the process arguments.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_args(std::env::args_os())
    }

    /// Parse `raw`, whose first item is the program name, exiting on error like [`Parser::parse_from`].
    ///
    /// clap swallows a bare `--` in first position; kubectl must still see it.
    #[must_use]
    pub fn from_args<I, T>(raw: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let raw: Vec<OsString> = raw.into_iter().map(Into::into).collect();
        let mut cli = Self::parse_from(&raw);

        let mut forwarded = raw.get(1..).unwrap_or_default();
        if forwarded.first().is_some_and(|arg| arg == UPGRADE_FLAG) {
            forwarded = &forwarded[1..];
        }
        if forwarded.first().is_some_and(|arg| arg == "--") && cli.args.len() < forwarded.len() {
            cli.args.insert(0, OsString::from("--"));
        }
        cli = cli.normalized();
        cli
    }

    /// A leading `--switch-upgrade` captured as a kubectl argument is taken back as the wrapper flag.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.args.first().is_some_and(|arg| arg == UPGRADE_FLAG) {
            self.args.remove(0);
            self.switch_upgrade = true;
        }
        self
    }

    /// Load the configuration and run kubectl, returning the exit code to use.
    ///
    /// # Errors
    ///
    /// Fails when the configuration is invalid, no home directory can be found,
    /// or the matching kubectl cannot be downloaded. kubectl's own failures are
    /// exit codes, not errors.
    pub async fn execute(self) -> Result<i32> {
        let config = GlobalConfig::load().await?;
        self.execute_with_config(config).await
    }

    /// Run kubectl with an already loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn execute_with_config(self, config: GlobalConfig) -> Result<i32> {
        if self.switch_upgrade || config.upgrade.check_on_startup {
            self_update(&config, self.switch_upgrade).await;
        }

        let kubectl_config = KubectlConfig::builder().url_template(&config.url_template).build()?;

        let source = KubeconfigVersionSource::new(ClusterArgs::scan(&self.args), kubectl_config.home());
        let version =
            resolve_with_timeout(source, config.version_timeout(), &config.default_version).await;
        debug!("Using kubectl {version}");

        let kubectl = Kubectl::new(kubectl_config, ReqwestTransport::new()?);
        if !kubectl.installed(&version) {
            kubectl
                .download(&version)
                .await
                .with_context(|| format!("Failed to download kubectl version {version}"))?;
        }

        Ok(kubectl.exec(&version, &self.args).await)
    }
}

/// Offer a newer kubectl-switch. Never fails: kubectl runs whatever happens here.
///
/// Startup checks are throttled by `check_interval`; a `requested` check always asks GitHub.
async fn self_update(config: &GlobalConfig, requested: bool) {
    let path = match std::env::current_exe() {
        Ok(path) => path,
        Err(e) => {
            debug!("Cannot locate the running binary: {e}");
            return;
        }
    };

    let mut updater = match SelfUpdater::from_config(&config.upgrade) {
        Ok(updater) => updater,
        Err(e) => {
            debug!("Self-update unavailable: {e:#}");
            return;
        }
    };

    let interval = if requested { 0 } else { config.upgrade.check_interval };
    match VersionChecker::default_cache_path() {
        Ok(cache_path) => updater = updater.version_checker(VersionChecker::new(cache_path, interval)),
        Err(e) => debug!("Version checks are not throttled: {e:#}"),
    }

    match updater.confirm_and_update(&path).await {
        UpdateOutcome::Updated {
            version,
        } => eprintln!("{} kubectl-switch {version}", "Updated to".green().bold()),
        outcome => debug!("Self-update finished: {outcome:?}"),
    }
}
