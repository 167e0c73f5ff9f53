//! Discovering which kubectl version the target cluster wants.
//!
//! The version is asked from the API server selected by the forwarded kubectl
//! flags and the kubeconfig. The query is bounded by a timeout: a slow or
//! unreachable cluster yields the configured default version instead of
//! delaying kubectl.

mod args;
pub mod kubeconfig;
mod source;

pub use args::ClusterArgs;
pub use source::KubeconfigVersionSource;

use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Anything that can tell which server version to target.
pub trait VersionSource: Send + Sync {
    /// The raw server version, e.g. `v1.13.1`.
    fn resolve(&self) -> impl Future<Output = Result<String>> + Send;
}

/// Resolve the version from `source`, falling back to `default`.
///
/// The source runs in its own task. If it errors, panics, or has not answered
/// within `timeout`, `default` is returned and the task is left detached; its
/// late result is discarded.
pub async fn resolve_with_timeout<S>(source: S, timeout: Duration, default: &str) -> String
where
    S: VersionSource + 'static,
{
    let task = tokio::spawn(async move { source.resolve().await });

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(version))) => version,
        Ok(Ok(Err(e))) => {
            debug!("Falling back to kubectl {default}: {e:#}");
            default.to_string()
        }
        Ok(Err(e)) => {
            debug!("Version lookup task failed: {e}");
            default.to_string()
        }
        Err(_) => {
            debug!("Version lookup timed out after {timeout:?}, using {default}");
            default.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Fixed(&'static str);

    impl VersionSource for Fixed {
        async fn resolve(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl VersionSource for Failing {
        async fn resolve(&self) -> Result<String> {
            Err(anyhow!("connection refused"))
        }
    }

    struct Panicking;

    impl VersionSource for Panicking {
        async fn resolve(&self) -> Result<String> {
            panic!("broken source");
        }
    }

    struct Slow {
        finished: Arc<AtomicBool>,
    }

    impl VersionSource for Slow {
        async fn resolve(&self) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            self.finished.store(true, Ordering::SeqCst);
            Ok("v1.20.0".to_string())
        }
    }

    #[tokio::test]
    async fn test_source_answer_is_used() {
        let version = resolve_with_timeout(Fixed("v1.13.1"), Duration::from_secs(1), "1.13.0").await;
        assert_eq!(version, "v1.13.1");
    }

    #[tokio::test]
    async fn test_error_falls_back_to_default() {
        let version = resolve_with_timeout(Failing, Duration::from_secs(1), "1.13.0").await;
        assert_eq!(version, "1.13.0");
    }

    #[tokio::test]
    async fn test_panic_falls_back_to_default() {
        let version = resolve_with_timeout(Panicking, Duration::from_secs(1), "1.13.0").await;
        assert_eq!(version, "1.13.0");
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_default() {
        let finished = Arc::new(AtomicBool::new(false));
        let source = Slow {
            finished: Arc::clone(&finished),
        };

        let version = resolve_with_timeout(source, Duration::from_millis(50), "1.13.0").await;
        assert_eq!(version, "1.13.0");
        assert!(!finished.load(Ordering::SeqCst));
    }
}
