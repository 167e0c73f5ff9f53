//! Version handling.
//!
//! Two independent concerns live here:
//!
//! - [`normalize`]: turns whatever the cluster reports (`v1.13.1`,
//!   `1.10.0+coreos`) into the dotted-numeric token used for kubectl cache paths
//!   and download URLs.
//! - [`ParsedVersion`] / [`is_newer`]: component-wise comparison of the wrapper's
//!   own version against the latest release tag during self-update.

pub mod comparison;
pub mod normalize;

pub use comparison::{ParsedVersion, is_newer};
pub use normalize::normalize;
