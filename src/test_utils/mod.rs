//! Test utilities for kubectl-switch
//!
//! Helpers shared by unit tests and the integration suite:
//! - [`init_test_logging`] wires `tracing` output into the test harness
//! - [`FakeTransport`] serves a canned HTTP response and records requested URLs
//! - [`write_script`] creates executable `/bin/sh` stand-ins for kubectl

use crate::core::SwitchError;
use crate::http::{HttpResponse, HttpTransport};
use bytes::Bytes;
use futures::StreamExt;
use std::path::Path;
use std::sync::{Arc, Mutex, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. The provided level wins over `RUST_LOG`;
/// with neither, nothing is logged.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// In-memory [`HttpTransport`].
///
/// Every request gets the same configured response. Without one, requests fail
/// with [`SwitchError::DownloadFailed`] as if the host were unreachable. Clones
/// share state, so a test can keep a handle after moving the transport.
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    response: Arc<Mutex<Option<(u16, Vec<u8>)>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeTransport {
    /// Answer every request with `status` and `body`.
    #[must_use]
    pub fn respond(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        *self.response.lock().unwrap() = Some((status, body.into()));
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpTransport for FakeTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, SwitchError> {
        self.requests.lock().unwrap().push(url.to_string());

        let Some((status, body)) = self.response.lock().unwrap().clone() else {
            return Err(SwitchError::DownloadFailed {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            });
        };

        Ok(HttpResponse {
            status,
            body: futures::stream::once(async move { Ok(Bytes::from(body)) }).boxed(),
        })
    }
}

/// Write an executable `/bin/sh` script with `body` at `path`, creating parent directories.
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}
