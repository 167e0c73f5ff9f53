//! Fetching kubectl binaries into the cache.

use super::Kubectl;
use crate::core::SwitchError;
use crate::http::HttpTransport;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

impl<T: HttpTransport> Kubectl<T> {
    /// Download kubectl `version` into [`Kubectl::path`].
    ///
    /// The body is streamed into a temporary file next to the final path and
    /// renamed into place only once it is complete and executable, so a failed or
    /// interrupted download never makes [`Kubectl::installed`] return `true`.
    /// Two invocations racing on the same version both rename a complete file;
    /// whichever lands last wins.
    ///
    /// # Errors
    ///
    /// - [`SwitchError::DownloadFailed`] on transport errors and non-2xx statuses
    /// - [`SwitchError::FileSystemError`] if the cache directory or file cannot be written
    pub async fn download(&self, version: &str) -> Result<PathBuf, SwitchError> {
        let url = self.url(version);
        let destination = self.path(version);
        let bin_dir = self.config.bin_dir();

        create_bin_dir(&bin_dir).await?;

        eprintln!("Downloading kubectl from {url}");
        info!("Downloading kubectl {} from {}", version, url);

        let mut response = self.transport.get(&url).await?;
        if !response.is_success() {
            return Err(SwitchError::DownloadFailed {
                url,
                reason: format!("HTTP {}", response.status),
            });
        }

        let temp = tempfile::Builder::new()
            .prefix(".kubectl-")
            .tempfile_in(&bin_dir)
            .map_err(|e| SwitchError::file_system("create temporary file", &bin_dir, &e))?;
        let (file, temp_path) = temp.into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let mut written: u64 = 0;
        while let Some(chunk) = response.body.next().await {
            let chunk = chunk.map_err(|e| SwitchError::DownloadFailed {
                url: url.clone(),
                reason: e.to_string(),
            })?;
            file.write_all(&chunk)
                .await
                .map_err(|e| SwitchError::file_system("write kubectl", &temp_path, &e))?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(|e| SwitchError::file_system("flush kubectl", &temp_path, &e))?;
        drop(file);

        set_executable(&temp_path).await?;

        temp_path
            .persist(&destination)
            .map_err(|e| SwitchError::file_system("install kubectl", &destination, &e.error))?;

        debug!("Installed {} bytes at {}", written, destination.display());
        Ok(destination)
    }
}

async fn create_bin_dir(bin_dir: &Path) -> Result<(), SwitchError> {
    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o755);
    builder
        .create(bin_dir)
        .await
        .map_err(|e| SwitchError::file_system("create bin directory", bin_dir, &e))
}

#[cfg(unix)]
async fn set_executable(path: &Path) -> Result<(), SwitchError> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .map_err(|e| SwitchError::file_system("set execute permission", path, &e))
}

#[cfg(not(unix))]
async fn set_executable(_path: &Path) -> Result<(), SwitchError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::core::SwitchError;
    use crate::kubectl::{Kubectl, KubectlConfig};
    use crate::test_utils::FakeTransport;
    use crate::utils::platform::Platform;
    use tempfile::TempDir;

    fn kubectl(temp: &TempDir, transport: FakeTransport) -> Kubectl<FakeTransport> {
        let config = KubectlConfig::builder()
            .home_dir(temp.path())
            .url_template("http://mirror.test/v{version}/{os}/{arch}/kubectl")
            .platform(Platform::new("linux", "amd64"))
            .build()
            .unwrap();
        Kubectl::new(config, transport)
    }

    #[tokio::test]
    async fn test_not_found_leaves_nothing_installed() {
        let temp = TempDir::new().unwrap();
        let transport = FakeTransport::default().respond(404, "#!/bin/sh\nexit 1\n");
        let k = kubectl(&temp, transport);

        let err = k.download("v0.0.9.9").await.unwrap_err();
        assert!(matches!(err, SwitchError::DownloadFailed { ref reason, .. } if reason == "HTTP 404"));
        assert!(!k.installed("v0.0.9.9"));

        let leftovers = std::fs::read_dir(temp.path().join(".kube/bin")).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn test_transport_error_is_download_failed() {
        let temp = TempDir::new().unwrap();
        let k = kubectl(&temp, FakeTransport::default());

        let err = k.download("1.2.3").await.unwrap_err();
        assert!(matches!(err, SwitchError::DownloadFailed { .. }));
        assert!(!k.installed("1.2.3"));
    }

    #[tokio::test]
    async fn test_download_installs_requested_url() {
        let temp = TempDir::new().unwrap();
        let transport = FakeTransport::default().respond(200, "binary");
        let k = kubectl(&temp, transport.clone());

        assert!(!k.installed("0.0.0.1"));
        let path = k.download("v0.0.0.1").await.unwrap();

        assert!(k.installed("0.0.0.1"));
        assert_eq!(std::fs::read(&path).unwrap(), b"binary");
        assert_eq!(transport.requests(), vec!["http://mirror.test/v0.0.0.1/linux/amd64/kubectl"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_download_sets_execute_permission() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let k = kubectl(&temp, FakeTransport::default().respond(200, "#!/bin/sh\n"));

        let path = k.download("1.0.0").await.unwrap();
        let mode = std::fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[tokio::test]
    async fn test_download_creates_bin_dir() {
        let temp = TempDir::new().unwrap();
        let k = kubectl(&temp, FakeTransport::default().respond(200, "binary"));

        let path = k.download("1.0.0").await.unwrap();

        let bin_dir = temp.path().join(".kube").join("bin");
        assert!(bin_dir.is_dir());
        assert_eq!(path.parent(), Some(bin_dir.as_path()));
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&bin_dir).unwrap().permissions().mode();
            assert_eq!(mode & 0o700, 0o700);
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unwritable_cache_is_file_system_error() {
        let temp = TempDir::new().unwrap();
        // A regular file where the .kube directory should be
        std::fs::write(temp.path().join(".kube"), b"").unwrap();
        let k = kubectl(&temp, FakeTransport::default().respond(200, "binary"));

        let err = k.download("1.0.0").await.unwrap_err();
        assert!(matches!(err, SwitchError::FileSystemError { .. }));
    }
}
