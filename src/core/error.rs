//! Error handling for kubectl-switch
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`SwitchError`]) for the failures callers branch on
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions for the CLI
//!
//! Provisioning failures (download, cache directory, launching kubectl) travel up to
//! `main` as [`anyhow::Error`] and are rendered with [`user_friendly_error`]. Self-update
//! failures never reach this layer: they are swallowed by the updater.
//!
//! # Examples
//!
//! ```rust,no_run
//! use kubectl_switch::core::{SwitchError, user_friendly_error};
//!
//! let error = SwitchError::DownloadFailed {
//!     url: "https://example.com/kubectl".to_string(),
//!     reason: "HTTP 404 Not Found".to_string(),
//! };
//! user_friendly_error(anyhow::Error::from(error)).display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Every failure kubectl-switch distinguishes.
///
/// Variants carry strings rather than source errors so the enum stays `Clone`,
/// which [`user_friendly_error`] relies on when it rebuilds a context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwitchError {
    /// A version string could not be split into numeric components.
    #[error("{version} is not a version: {component} is not parsable: {message}")]
    NotAVersion {
        /// The full input that was parsed.
        version: String,
        /// The dot-separated component that failed.
        component: String,
        /// Message of the underlying integer parse error.
        message: String,
    },

    /// The HTTP request failed or answered with a non-success status.
    #[error("Failed to download {url}: {reason}")]
    DownloadFailed {
        /// URL that was requested.
        url: String,
        /// Transport error or HTTP status.
        reason: String,
    },

    /// A cache directory or file could not be created or written.
    #[error("File system operation failed: {operation} on {path}: {reason}")]
    FileSystemError {
        /// What was being attempted.
        operation: String,
        /// Path involved.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },

    /// The cached executable could not be started at all.
    #[error("Failed to launch {path}: {reason}")]
    LaunchFailed {
        /// Executable path.
        path: String,
        /// Underlying spawn error message.
        reason: String,
    },

    /// The configuration file exists but cannot be used.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem.
        message: String,
    },
}

impl SwitchError {
    /// Build a [`SwitchError::FileSystemError`] from an I/O error.
    pub fn file_system(
        operation: impl Into<String>,
        path: &std::path::Path,
        source: &std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            operation: operation.into(),
            path: path.display().to_string(),
            reason: source.to_string(),
        }
    }
}

/// An error together with optional details and a suggested fix.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error.
    pub error: SwitchError,
    /// What the user can do about it.
    pub suggestion: Option<String>,
    /// Extra explanation of the failure.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error without any extra information.
    #[must_use]
    pub const fn new(error: SwitchError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colours.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for printing.
///
/// Known [`SwitchError`]s, possibly buried under `anyhow` context layers, get a
/// tailored suggestion. Plain I/O errors are mapped onto
/// [`SwitchError::FileSystemError`]. Anything else is reported verbatim as a
/// configuration error, which is the only remaining source of failures in `main`.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(switch_error) = error.chain().find_map(|e| e.downcast_ref::<SwitchError>()) {
        return create_error_context(switch_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        let context = ErrorContext::new(SwitchError::FileSystemError {
            operation: "file access".to_string(),
            path: "unknown".to_string(),
            reason: io_error.to_string(),
        });
        return match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => context
                .with_suggestion("Check the ownership of ~/.kube/bin or run with a HOME you can write to"),
            _ => context,
        };
    }

    ErrorContext::new(SwitchError::ConfigError {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: SwitchError) -> ErrorContext {
    match &error {
        SwitchError::NotAVersion { .. } => ErrorContext::new(error)
            .with_details("Versions are dot-separated non-negative integers, optionally prefixed with 'v'"),
        SwitchError::DownloadFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Check your network connection and the url_template in your kubectl-switch configuration")
            .with_details("No file was written to the kubectl cache"),
        SwitchError::FileSystemError { .. } => ErrorContext::new(error)
            .with_suggestion("Make sure ~/.kube/bin exists and is writable"),
        SwitchError::LaunchFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Remove the cached kubectl binary so it is downloaded again"),
        SwitchError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Fix or remove the file pointed to by KUBECTL_SWITCH_CONFIG (default ~/.kube/kubectl-switch.toml)"),
    }
}
