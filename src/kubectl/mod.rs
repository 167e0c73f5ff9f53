//! Provisioning and launching version-specific kubectl binaries.
//!
//! Every operation takes a raw version string (`v1.13.1`, `1.10.0+coreos`, ...)
//! and normalizes it first, so callers never deal with the canonical token.
//!
//! ```text
//! raw version ──normalize──▶ path ──installed?──▶ download ──▶ exec ──▶ exit code
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use kubectl_switch::http::ReqwestTransport;
//! use kubectl_switch::kubectl::{Kubectl, KubectlConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let kubectl = Kubectl::new(KubectlConfig::builder().build()?, ReqwestTransport::new()?);
//! if !kubectl.installed("v1.13.1") {
//!     kubectl.download("v1.13.1").await?;
//! }
//! std::process::exit(kubectl.exec("v1.13.1", ["get", "pods"]).await);
//! # }
//! ```

mod cache;
mod config;
mod download;
mod launcher;

pub use config::{KubectlConfig, KubectlConfigBuilder};
pub use launcher::exit_code;

use crate::http::HttpTransport;

/// Cache, downloader and launcher for kubectl binaries.
#[derive(Debug, Clone)]
pub struct Kubectl<T: HttpTransport> {
    config: KubectlConfig,
    transport: T,
}

impl<T: HttpTransport> Kubectl<T> {
    /// Create a kubectl manager using `transport` for downloads.
    pub const fn new(config: KubectlConfig, transport: T) -> Self {
        Self {
            config,
            transport,
        }
    }
}
