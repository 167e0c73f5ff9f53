//! Extraction of a canonical dotted-numeric token from free-form version strings.
//!
//! Cluster versions come in many shapes (`v1.13.1`, `1.10.0+coreos`,
//! `v1.27.3-eks-a5565ad`). The cache and the download URL only ever see the
//! first numeric run, so `v1.10.0` and `1.10.0+coreos` share a cache entry.

use regex::Regex;
use std::sync::LazyLock;

static VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9.]+").expect("version token pattern is valid"));

/// Return the first maximal run of digits and dots in `version`.
///
/// The leftmost match wins, and at that position the greedy pattern consumes the
/// longest run. When the input holds no digit or dot at all, the result is empty.
///
/// # Examples
///
/// ```rust
/// use kubectl_switch::version::normalize;
///
/// assert_eq!(normalize("v1.10.0"), "1.10.0");
/// assert_eq!(normalize("1.10.0+coreos"), "1.10.0");
/// assert_eq!(normalize("garbage"), "");
/// ```
#[must_use]
pub fn normalize(version: &str) -> String {
    VERSION_TOKEN
        .find(version)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
