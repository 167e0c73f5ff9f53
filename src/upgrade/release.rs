use anyhow::{Context, Result};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// A downloadable file attached to a release, one per platform build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    /// File name, e.g. `kubectl-switch-linux-amd64`.
    pub name: String,
    /// Direct download URL.
    pub browser_download_url: String,
}

impl ReleaseAsset {
    /// Build an asset from its name and download URL.
    pub fn new(name: impl Into<String>, browser_download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            browser_download_url: browser_download_url.into(),
        }
    }
}

/// A published release: its tag doubles as the candidate version string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Tag name such as `v0.4.0`.
    pub tag_name: String,
    /// Platform builds attached to the release.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// Source of "latest release" information for a repository.
pub trait ReleaseSource: Send + Sync {
    /// Fetch the latest published release of `owner/repo`.
    fn latest_release(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = Result<Release>> + Send;
}

/// [`ReleaseSource`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubReleases {
    client: reqwest::Client,
    api_base: String,
}

impl GitHubReleases {
    /// Create a client for the API at `api_base` (usually `https://api.github.com`).
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn new(api_base: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("kubectl-switch/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build GitHub client")?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }
}

impl ReleaseSource for GitHubReleases {
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<Release> {
        let url = format!("{}/repos/{owner}/{repo}/releases/latest", self.api_base);
        debug!("Fetching latest release from {}", url);

        let release = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?
            .error_for_status()
            .with_context(|| format!("Failed to fetch latest release of {owner}/{repo}"))?
            .json::<Release>()
            .await
            .context("Failed to parse release")?;

        debug!("Latest release: {}", release.tag_name);
        Ok(release)
    }
}
