//! HTTP GET seam used by every download.
//!
//! kubectl downloads and self-update downloads go through [`HttpTransport`], so
//! tests can serve bodies and status codes without a network. [`ReqwestTransport`]
//! is the production implementation.

use crate::core::SwitchError;
use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use std::future::Future;
use std::time::Duration;

/// Status code plus streamed body of a GET request.
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, chunk by chunk.
    pub body: BoxStream<'static, std::io::Result<Bytes>>,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse").field("status", &self.status).finish_non_exhaustive()
    }
}

/// Anything that can perform a GET request.
pub trait HttpTransport: Send + Sync {
    /// Issue a GET request for `url`.
    ///
    /// Implementations return `Err` only for transport failures. Non-success
    /// statuses are returned as a normal [`HttpResponse`] for the caller to judge.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, SwitchError>> + Send;
}

/// [`HttpTransport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a sensible connect timeout and a user agent.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::DownloadFailed`] if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, SwitchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("kubectl-switch/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SwitchError::DownloadFailed {
                url: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
        })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, SwitchError> {
        let response = self.client.get(url).send().await.map_err(|e| SwitchError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let body = response.bytes_stream().map(|chunk| chunk.map_err(std::io::Error::other)).boxed();

        Ok(HttpResponse {
            status,
            body,
        })
    }
}
