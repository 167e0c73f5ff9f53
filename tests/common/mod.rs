//! Common test utilities for kubectl-switch integration tests
//!
//! Every binary-level test runs against an isolated home directory: the kubectl
//! cache, the configuration file and the kubeconfig all live in a [`TempDir`].

// Not every helper is used by every test module
#![allow(dead_code)]

use assert_cmd::Command;
use kubectl_switch::utils::platform::Platform;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated home directory with a configuration file and a kubectl cache.
pub struct TestHome {
    pub temp: TempDir,
}

impl TestHome {
    /// Home with a short version timeout and no kubeconfig.
    pub fn new() -> Self {
        let home = Self {
            temp: TempDir::new().unwrap(),
        };
        home.write_config("version_timeout_ms = 300\n");
        home
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("kubectl-switch.toml")
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).unwrap();
    }

    /// Cache path of kubectl `version` for the current platform.
    pub fn kubectl_path(&self, version: &str) -> PathBuf {
        let platform = Platform::current();
        self.path()
            .join(".kube")
            .join("bin")
            .join(format!("kubectl-{}-{}-{}", platform.os, platform.arch, version))
    }

    /// Install a fake kubectl `version` running `body`.
    #[cfg(unix)]
    pub fn install_kubectl(&self, version: &str, body: &str) -> PathBuf {
        let path = self.kubectl_path(version);
        kubectl_switch::test_utils::write_script(&path, body);
        path
    }

    /// The wrapper binary, pointed at this home.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("kubectl-switch").unwrap();
        cmd.env("HOME", self.path())
            .env("KUBECTL_SWITCH_CONFIG", self.config_path())
            .env("KUBECONFIG", self.path().join("missing-kubeconfig"))
            .env_remove("KUBECTL_SWITCH_UPGRADE")
            .env_remove("RUST_LOG");
        cmd
    }
}
