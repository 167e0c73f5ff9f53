//! Configuration management for kubectl-switch.
//!
//! There is a single, optional, user-wide TOML file described in [`global`].
//! Everything else (home directory, platform) is resolved at startup and
//! passed explicitly into [`crate::kubectl::KubectlConfig`].

pub mod global;

pub use global::GlobalConfig;
