use crate::constants::{UPDATE_TEMP_SUFFIX, VALIDATION_FLAG};
use crate::core::SwitchError;
use crate::http::HttpTransport;
use anyhow::{Context, Result, bail};
use futures::StreamExt;
use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Replaces a binary with one downloaded from a URL.
pub trait Updater: Send + Sync {
    /// Install the file at `source` over `destination`.
    fn update(&self, destination: &Path, source: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Validate-then-rename installer for the running kubectl-switch binary.
///
/// The download lands next to the destination as `{destination}-new`. It is
/// made executable and must exit successfully when run with `--help` before it
/// is renamed over the destination. The rename is the only step that touches
/// the destination, so any earlier failure leaves it byte-for-byte unchanged.
/// The `-new` file is left behind on failure.
#[derive(Debug, Clone)]
pub struct HttpUpdater<T: HttpTransport> {
    transport: T,
}

impl<T: HttpTransport> HttpUpdater<T> {
    /// Create an updater downloading through `transport`.
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
        }
    }
}

/// `{destination}-new`
#[must_use]
pub fn staging_path(destination: &Path) -> PathBuf {
    let mut staged = OsString::from(destination.as_os_str());
    staged.push(UPDATE_TEMP_SUFFIX);
    PathBuf::from(staged)
}

impl<T: HttpTransport> Updater for HttpUpdater<T> {
    async fn update(&self, destination: &Path, source: &str) -> Result<()> {
        let mut response = self.transport.get(source).await?;
        if !response.is_success() {
            return Err(SwitchError::DownloadFailed {
                url: source.to_string(),
                reason: format!("HTTP {}", response.status),
            }
            .into());
        }

        let staged = staging_path(destination);
        debug!("Downloading {} to {}", source, staged.display());

        let mut file = fs::File::create(&staged)
            .await
            .with_context(|| format!("Failed to create {}", staged.display()))?;
        while let Some(chunk) = response.body.next().await {
            let chunk = chunk.map_err(|e| SwitchError::DownloadFailed {
                url: source.to_string(),
                reason: e.to_string(),
            })?;
            file.write_all(&chunk)
                .await
                .with_context(|| format!("Failed to write {}", staged.display()))?;
        }
        file.flush().await?;
        drop(file);

        make_executable(&staged).await?;
        validate(&staged).await?;

        fs::rename(&staged, destination).await.with_context(|| {
            format!("Failed to move {} over {}", staged.display(), destination.display())
        })?;

        info!("Installed {} at {}", source, destination.display());
        Ok(())
    }
}

#[cfg(unix)]
async fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path).await?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    fs::set_permissions(path, permissions)
        .await
        .with_context(|| format!("Failed to make {} executable", path.display()))
}

#[cfg(not(unix))]
async fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Run the candidate with `--help`; anything but a clean exit rejects it.
async fn validate(candidate: &Path) -> Result<()> {
    let status = tokio::process::Command::new(candidate)
        .arg(VALIDATION_FLAG)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .with_context(|| format!("Failed to run {}", candidate.display()))?;

    if !status.success() {
        bail!("{} {} exited with {}", candidate.display(), VALIDATION_FLAG, status);
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::test_utils::FakeTransport;
    use tempfile::TempDir;

    const VALID: &str = "#!/bin/sh\n[ \"x$1\" = \"x--help\" ]\n";
    const BROKEN: &str = "#!/bin/sh\nexit 1\n";

    #[test]
    fn test_staging_path() {
        assert_eq!(staging_path(Path::new("/usr/bin/kubectl")), PathBuf::from("/usr/bin/kubectl-new"));
    }

    #[tokio::test]
    async fn test_valid_download_is_installed() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("test-updated");
        let transport = FakeTransport::default().respond(200, VALID);
        let updater = HttpUpdater::new(transport.clone());

        updater.update(&destination, "http://releases.test/asset").await.unwrap();

        assert_eq!(std::fs::read_to_string(&destination).unwrap(), VALID);
        assert!(!staging_path(&destination).exists());
        assert_eq!(transport.requests(), vec!["http://releases.test/asset"]);
    }

    #[tokio::test]
    async fn test_failing_validation_leaves_destination_absent() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("test-not-updated");
        let updater = HttpUpdater::new(FakeTransport::default().respond(200, BROKEN));

        assert!(updater.update(&destination, "http://releases.test/asset").await.is_err());
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_failing_validation_keeps_previous_binary() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("test-not-updated");
        std::fs::write(&destination, b"previous release").unwrap();
        let updater = HttpUpdater::new(FakeTransport::default().respond(200, BROKEN));

        assert!(updater.update(&destination, "http://releases.test/asset").await.is_err());
        assert_eq!(std::fs::read(&destination).unwrap(), b"previous release");
    }

    #[tokio::test]
    async fn test_bad_status_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("kubectl-switch");
        std::fs::write(&destination, b"previous release").unwrap();
        let updater = HttpUpdater::new(FakeTransport::default().respond(500, VALID));

        assert!(updater.update(&destination, "http://releases.test/asset").await.is_err());
        assert_eq!(std::fs::read(&destination).unwrap(), b"previous release");
        assert!(!staging_path(&destination).exists());
    }
}
