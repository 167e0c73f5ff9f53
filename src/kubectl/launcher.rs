//! Running a cached kubectl as if it had been invoked directly.

use super::Kubectl;
use crate::core::SwitchError;
use crate::http::HttpTransport;
use std::ffi::OsStr;
use std::process::{ExitStatus, Stdio};
use tracing::debug;

impl<T: HttpTransport> Kubectl<T> {
    /// Run kubectl `version` with `args`, inheriting stdin, stdout and stderr.
    ///
    /// Blocks until the child exits. Interrupts reach kubectl through the
    /// terminal's process group; the wrapper ignores them so it can still report
    /// the child's status.
    ///
    /// # Errors
    ///
    /// [`SwitchError::LaunchFailed`] if the process cannot be started or waited on.
    /// A non-zero exit of kubectl is not an error.
    pub async fn run<I, S>(&self, version: &str, args: I) -> Result<ExitStatus, SwitchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let path = self.path(version);
        debug!("Launching {}", path.display());

        let launch_failed = |e: std::io::Error| SwitchError::LaunchFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let mut child = tokio::process::Command::new(&path)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(launch_failed)?;

        loop {
            tokio::select! {
                status = child.wait() => return status.map_err(launch_failed),
                _ = tokio::signal::ctrl_c() => debug!("Interrupt received, waiting for kubectl to exit"),
            }
        }
    }

    /// Run kubectl and turn the outcome into the wrapper's own exit code.
    ///
    /// - kubectl exited: its exit code
    /// - kubectl was killed by a signal: `128 + signal`
    /// - kubectl could not be started: the error is printed and `1` is returned
    pub async fn exec<I, S>(&self, version: &str, args: I) -> i32
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        match self.run(version, args).await {
            Ok(status) => exit_code(status),
            Err(e) => {
                eprintln!("{e}");
                1
            }
        }
    }
}

/// Map a child's [`ExitStatus`] to the code the wrapper exits with.
#[must_use]
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
