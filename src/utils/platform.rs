//! Platform naming and home directory resolution.
//!
//! kubectl release buckets and kubectl-switch release assets both use Go's
//! `GOOS`/`GOARCH` vocabulary (`darwin`, `amd64`, ...), so Rust's
//! [`std::env::consts`] names are translated before they reach a URL or a file name.

use anyhow::Result;
use std::fmt;
use std::path::PathBuf;

/// Operating system and architecture, spelled the way download URLs expect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    /// `linux`, `darwin`, `windows`, ...
    pub os: String,
    /// `amd64`, `arm64`, `386`, `arm`, ...
    pub arch: String,
}

impl Platform {
    /// Build a platform from explicit names.
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The platform this binary was compiled for.
    #[must_use]
    pub fn current() -> Self {
        Self::new(go_os(std::env::consts::OS), go_arch(std::env::consts::ARCH))
    }

    /// Suffix release assets for this platform end with, e.g. `-linux-amd64`.
    #[must_use]
    pub fn asset_suffix(&self) -> String {
        format!("-{}-{}", self.os, self.arch)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

fn go_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn go_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc64" => "ppc64le",
        other => other,
    }
}

/// Check if running on Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Resolve the user's home directory.
///
/// A non-empty `HOME` always wins, including on Windows, which is what kubectl
/// itself does. Otherwise the platform default from [`dirs::home_dir`] is used
/// (`%USERPROFILE%` on Windows).
///
/// # Errors
///
/// Returns an error if neither source yields a directory.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os("HOME").filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir().ok_or_else(|| {
        let platform_help = if is_windows() {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        anyhow::anyhow!("Could not determine home directory.\n\n{platform_help}")
    })
}
