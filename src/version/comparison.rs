//! Version parsing and "is this release newer" checks for self-update.
//!
//! Release tags are compared component by component rather than with full
//! semantic-version rules: pre-release and build suffixes are discarded and only
//! the numeric components matter.
//!
//! # Examples
//!
//! ```rust
//! use kubectl_switch::version::ParsedVersion;
//!
//! # fn example() -> Result<(), kubectl_switch::core::SwitchError> {
//! let current = ParsedVersion::parse("v1.5")?;
//! let latest = ParsedVersion::parse("1.5.3")?;
//! assert!(current.is_older_than(&latest));
//! # Ok(())
//! # }
//! ```

use crate::core::SwitchError;
use std::fmt;

/// Ordered numeric components of a version string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedVersion(Vec<u64>);

impl ParsedVersion {
    /// Parse a version such as `v1.2.3` or `1.2.3.4-dev`.
    ///
    /// Everything from the first `-` on is dropped, then a single leading `v` is
    /// stripped and the remainder is split on `.`. Each component must be a
    /// non-negative integer (surrounding spaces are tolerated).
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::NotAVersion`] naming the first component that is not
    /// an integer. The empty string and words like `dev` always fail.
    pub fn parse(version: &str) -> Result<Self, SwitchError> {
        let core = version.split('-').next().unwrap_or_default();
        let core = core.strip_prefix('v').unwrap_or(core);

        core.split('.')
            .map(|component| {
                component.trim_matches(' ').parse::<u64>().map_err(|e| SwitchError::NotAVersion {
                    version: version.to_string(),
                    component: component.to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// The parsed components.
    #[must_use]
    pub fn components(&self) -> &[u64] {
        &self.0
    }

    /// Whether `newer` should be offered as an update over `self`.
    #[must_use]
    pub fn is_older_than(&self, newer: &Self) -> bool {
        is_newer(&self.0, &newer.0)
    }
}

impl From<Vec<u64>> for ParsedVersion {
    fn from(components: Vec<u64>) -> Self {
        Self(components)
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.0.iter().map(u64::to_string).collect::<Vec<_>>().join(".");
        f.write_str(&joined)
    }
}

/// Decide whether `new` is newer than `old`.
///
/// Components are walked over `new`, left to right:
/// - past the end of `old`, a non-zero extra component makes `new` newer;
/// - a greater component makes `new` newer;
/// - a smaller component only settles the answer ("not newer") at the last
///   index of `old`; earlier smaller components are skipped.
///
/// `is_newer(&[2], &[1, 9])` is therefore `false` while `is_newer(&[2, 0], &[1, 9])`
/// is `true`. Existing release tags depend on this ordering, so it is kept as is.
#[must_use]
pub fn is_newer(old: &[u64], new: &[u64]) -> bool {
    for (i, &component) in new.iter().enumerate() {
        match old.get(i) {
            None => {
                if component > 0 {
                    return true;
                }
            }
            Some(&previous) if component > previous => return true,
            Some(&previous) if component < previous && i + 1 == old.len() => return false,
            Some(_) => {}
        }
    }
    false
}
