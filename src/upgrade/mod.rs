//! Self-update functionality for kubectl-switch.
//!
//! kubectl-switch can replace its own binary with the latest GitHub release.
//! The process is deliberately conservative:
//!
//! ```text
//! 1. Version Check
//!    ├── Skipped on startup while the last check is recent
//!    ├── Fetch the latest release
//!    └── Compare its tag with the running version
//!
//! 2. Confirmation
//!    ├── Skipped entirely when not on a terminal
//!    └── "y"/"yes" (any case) accepts, anything else declines
//!
//! 3. Binary Update
//!    ├── Pick the asset named *-{os}-{arch}
//!    ├── Download it next to the binary as <binary>-new
//!    ├── Run <binary>-new --help and require success
//!    └── Rename it over the binary
//! ```
//!
//! # Safety Mechanisms
//!
//! - The running binary is only touched by the final rename, which is atomic on
//!   the same filesystem: a concurrent launch sees the old or the new file.
//! - A candidate that does not run is never installed.
//! - Every error ends the check silently, so kubectl always runs.
//!
//! # Module Structure
//!
//! - [`self_updater`]: the check/prompt/install state machine
//! - [`release`]: release model and the GitHub release source
//! - [`selector`]: platform asset selection
//! - [`installer`]: validate-then-rename installation
//! - [`prompt`]: terminal confirmation
//! - [`version_check`]: persisted time of the last release check
//! - [`config`]: `[upgrade]` configuration table

/// Configuration structures for upgrade behavior.
pub mod config;
/// Download, validation and atomic replacement of the running binary.
pub mod installer;
/// Interactive yes/no confirmation.
pub mod prompt;
/// Release model and sources.
pub mod release;
/// Release asset selection by platform.
pub mod selector;
/// Core self-update implementation.
pub mod self_updater;
/// Throttling of release checks across invocations.
pub mod version_check;


pub use installer::{HttpUpdater, Updater};
pub use prompt::{Prompter, TtyPrompter};
pub use release::{GitHubReleases, Release, ReleaseAsset, ReleaseSource};
pub use selector::select_asset;
pub use self_updater::{SelfUpdater, UpdateOutcome};
pub use version_check::{VersionCheckCache, VersionChecker};
