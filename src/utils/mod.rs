//! Cross-platform utilities.
//!
//! - [`platform`] - platform naming and home directory resolution

pub mod platform;
