//! Integration test suite for kubectl-switch
//!
//! End-to-end tests of the wrapper binary plus HTTP-level tests of every
//! network client against a local mock server.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: exit codes, argument forwarding and fallback version of the binary
//! - **download**: kubectl download through the reqwest transport
//! - **releases**: GitHub latest-release client and startup check throttling
//! - **server_version**: cluster version discovery and end-to-end switching

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod download;
mod releases;
mod server_version;
