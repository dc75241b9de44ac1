//! Error handling for specq
//!
//! This module provides the error types and user-facing error reporting for
//! specq. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling inside the query pipeline
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`SpecqError`] - Enumerated failure modes of a spec query
//! - [`ErrorContext`] - Wrapper that adds details and a suggestion for display
//!
//! Every failure is fatal to the query. Nothing in specq retries or reports a
//! partial result; the first error aborts and is rendered through
//! [`user_friendly_error`](crate::core::user_friendly_error).
//!
//! # Examples
//!
//! ```rust,no_run
//! use specq::core::{ErrorContext, SpecqError};
//!
//! let context = ErrorContext::new(SpecqError::DistTagUnavailable)
//!     .with_suggestion("Set dist_tag in the specq config file")
//!     .with_details("The distribution tag is injected as the %{dist} macro");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for spec queries
///
/// # Error Categories
///
/// ## Request building
/// - [`PathResolution`](SpecqError::PathResolution) - spec path cannot be made absolute
///
/// ## Context resolution
/// - [`UnsupportedArchitecture`](SpecqError::UnsupportedArchitecture) - no RPM arch for the host
/// - [`DistTagUnavailable`](SpecqError::DistTagUnavailable) - distribution tag not configured
/// - [`ConfigNotFound`](SpecqError::ConfigNotFound) / [`ConfigParse`](SpecqError::ConfigParse)
///
/// ## Evaluation
/// - [`RpmspecNotFound`](SpecqError::RpmspecNotFound) - `rpmspec` is not installed
/// - [`EvaluationFailed`](SpecqError::EvaluationFailed) - `rpmspec` rejected the spec
///
/// ## Reporting
/// - [`Reporting`](SpecqError::Reporting) - the result could not be serialized or written
#[derive(Error, Debug)]
pub enum SpecqError {
    /// The spec path could not be normalized to an absolute path.
    #[error("Cannot resolve spec path '{path}': {reason}")]
    PathResolution {
        /// The path as given by the caller
        path: String,
        /// Why normalization failed
        reason: String,
    },

    /// The host (or configured) architecture has no RPM equivalent.
    #[error("Unsupported architecture: {arch}")]
    UnsupportedArchitecture {
        /// The architecture name that could not be mapped
        arch: String,
    },

    /// No distribution tag is configured for the build environment.
    #[error("Distribution tag is not configured")]
    DistTagUnavailable,

    /// `rpmspec` could not be located.
    #[error("rpmspec is not installed or not found in PATH")]
    RpmspecNotFound,

    /// `rpmspec` ran but failed to evaluate the spec.
    ///
    /// `stderr` is the tool's own output, kept verbatim.
    #[error("rpmspec failed to evaluate {spec}: {stderr}")]
    EvaluationFailed {
        /// The spec file that was evaluated
        spec: String,
        /// Error output from `rpmspec`
        stderr: String,
    },

    /// The query result could not be serialized or written.
    #[error("Failed to report query result: {reason}")]
    Reporting {
        /// Serializer or writer error
        reason: String,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The missing path
        path: String,
    },

    /// The configuration file is not valid TOML for [`BuildEnv`](crate::config::BuildEnv).
    #[error("Invalid configuration file {path}")]
    ConfigParse {
        /// The offending file
        path: String,
        /// Parser message
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for SpecqError {
    fn clone(&self) -> Self {
        match self {
            Self::PathResolution {
                path,
                reason,
            } => Self::PathResolution {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::UnsupportedArchitecture {
                arch,
            } => Self::UnsupportedArchitecture {
                arch: arch.clone(),
            },
            Self::DistTagUnavailable => Self::DistTagUnavailable,
            Self::RpmspecNotFound => Self::RpmspecNotFound,
            Self::EvaluationFailed {
                spec,
                stderr,
            } => Self::EvaluationFailed {
                spec: spec.clone(),
                stderr: stderr.clone(),
            },
            Self::Reporting {
                reason,
            } => Self::Reporting {
                reason: reason.clone(),
            },
            Self::ConfigNotFound {
                path,
            } => Self::ConfigNotFound {
                path: path.clone(),
            },
            Self::ConfigParse {
                path,
                reason,
            } => Self::ConfigParse {
                path: path.clone(),
                reason: reason.clone(),
            },
            // io::Error is not Clone; keep kind and message
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error wrapper carrying details and a suggestion for CLI display
///
/// ```rust,no_run
/// use specq::core::{ErrorContext, SpecqError};
///
/// let context = ErrorContext::new(SpecqError::RpmspecNotFound)
///     .with_suggestion("Install rpm-build (dnf install rpm-build)");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: SpecqError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: SpecqError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    ///
    /// Suggestions are displayed in green in the terminal.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    ///
    /// Details are displayed in yellow in the terminal.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
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
