//! Deterministic cache paths for kubectl binaries.
//!
//! There is no index: a binary is installed iff its path exists. The path is a
//! pure function of the home directory, the platform and the normalized version.

use super::Kubectl;
use crate::http::HttpTransport;
use crate::version::normalize;
use std::path::PathBuf;

impl<T: HttpTransport> Kubectl<T> {
    /// Path of the cached kubectl for `version`.
    ///
    /// `{home}/.kube/bin/kubectl-{os}-{arch}-{normalized version}`
    #[must_use]
    pub fn path(&self, version: &str) -> PathBuf {
        let platform = self.config.platform();
        self.config
            .bin_dir()
            .join(format!("kubectl-{}-{}-{}", platform.os, platform.arch, normalize(version)))
    }

    /// Whether something already exists at [`Kubectl::path`].
    ///
    /// The file's content is not checked; downloads only ever publish complete files.
    #[must_use]
    pub fn installed(&self, version: &str) -> bool {
        self.path(version).symlink_metadata().is_ok()
    }

    /// Download URL for `version`, rendered from the configured template.
    #[must_use]
    pub fn url(&self, version: &str) -> String {
        let platform = self.config.platform();
        self.config
            .url_template()
            .replace("{version}", &normalize(version))
            .replace("{os}", &platform.os)
            .replace("{arch}", &platform.arch)
    }
}
