//! Core types shared by every part of kubectl-switch.
//!
//! At the moment this is the error taxonomy: [`SwitchError`] for typed failures
//! and [`ErrorContext`] / [`user_friendly_error`] for rendering them on the CLI.

pub mod error;

pub use error::{ErrorContext, SwitchError, user_friendly_error};
