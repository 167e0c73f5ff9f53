//! Immutable settings for locating and downloading kubectl binaries.

use crate::constants::DEFAULT_KUBECTL_URL_TEMPLATE;
use crate::utils::platform::{Platform, get_home_dir};
use anyhow::Result;
use std::path::PathBuf;

/// Where kubectl binaries live and where they are downloaded from.
///
/// Built once per invocation with [`KubectlConfig::builder`] and never mutated,
/// so two instances with different homes or templates can coexist (tests rely
/// on this).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KubectlConfig {
    home: PathBuf,
    url_template: String,
    platform: Platform,
}

impl KubectlConfig {
    /// Start building a configuration.
    #[must_use]
    pub fn builder() -> KubectlConfigBuilder {
        KubectlConfigBuilder::default()
    }

    /// Home directory the cache is rooted in.
    #[must_use]
    pub fn home(&self) -> &PathBuf {
        &self.home
    }

    /// Download URL template with `{version}`, `{os}` and `{arch}` placeholders.
    #[must_use]
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Target platform of the cached binaries.
    #[must_use]
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// `{home}/.kube/bin`
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.home.join(".kube").join("bin")
    }
}

/// Builder for [`KubectlConfig`].
#[derive(Debug, Default)]
pub struct KubectlConfigBuilder {
    home: Option<PathBuf>,
    url_template: Option<String>,
    platform: Option<Platform>,
}

impl KubectlConfigBuilder {
    /// Use `home` instead of resolving the user's home directory.
    #[must_use]
    pub fn home_dir(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Override the download URL template.
    #[must_use]
    pub fn url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = Some(template.into());
        self
    }

    /// Override the target platform.
    #[must_use]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Finish the configuration, resolving the home directory if none was given.
    ///
    /// # Errors
    ///
    /// Fails only when no home directory was supplied and none can be resolved.
    pub fn build(self) -> Result<KubectlConfig> {
        let home = match self.home {
            Some(home) => home,
            None => get_home_dir()?,
        };

        Ok(KubectlConfig {
            home,
            url_template: self
                .url_template
                .unwrap_or_else(|| DEFAULT_KUBECTL_URL_TEMPLATE.to_string()),
            platform: self.platform.unwrap_or_else(Platform::current),
        })
    }
}
