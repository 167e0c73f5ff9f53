//! kubectl-switch - run the kubectl that matches your cluster
//!
//! A transparent kubectl wrapper. Every invocation asks the target API server
//! for its version, makes sure a matching kubectl binary is cached locally
//! (downloading it on first use), then runs it with the original arguments and
//! exits with its exit code.
//!
//! # Architecture Overview
//!
//! ```text
//! kubectl-switch get pods
//!   │
//!   ├── cluster   ask {server}/version, bounded by a timeout ──▶ "v1.13.1"
//!   ├── version   normalize                                  ──▶ "1.13.1"
//!   ├── kubectl   ~/.kube/bin/kubectl-linux-amd64-1.13.1 cached?
//!   │               └── no: download from the URL template
//!   └── kubectl   exec with inherited stdio, forward the exit code
//! ```
//!
//! Self-update (opt-in) checks the latest GitHub release of kubectl-switch,
//! asks for confirmation on a terminal and replaces the running binary only
//! after the downloaded one has proven it runs.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line entry point
//! - [`cluster`] - Server version discovery with timeout and fallback
//! - [`config`] - Optional `~/.kube/kubectl-switch.toml`
//! - [`core`] - Error types and user-facing error formatting
//! - [`http`] - HTTP GET seam used by all downloads
//! - [`kubectl`] - Binary cache, download and launch
//! - [`upgrade`] - Self-update
//! - [`utils`] - Platform helpers
//! - [`version`] - Version normalization and comparison
//!
//! # Binary Cache Layout
//!
//! ```text
//! ~/.kube/bin/
//! ├── kubectl-darwin-amd64-1.10.0
//! ├── kubectl-linux-amd64-1.13.1
//! └── kubectl-windows-amd64-1.13.1
//! ```
//!
//! The cache is shared between concurrent invocations without locks. Each
//! download is written to a temporary file and renamed into place.

// Core functionality modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;

// Provisioning
pub mod cluster;
pub mod http;
pub mod kubectl;
pub mod version;

// Supporting modules
pub mod upgrade;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
