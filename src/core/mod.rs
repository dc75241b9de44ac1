//! Core types for specq
//!
//! Holds the error taxonomy shared by every stage of a spec query and the
//! helpers that turn those errors into user-facing messages.
//!
//! - [`SpecqError`] - Enumerated failure modes
//! - [`ErrorContext`] - Error plus details and a suggestion, rendered with colors
//! - [`user_friendly_error`] - Convert any `anyhow::Error` into an [`ErrorContext`]

pub mod error;
mod error_formatting;

pub use error::{ErrorContext, SpecqError};
pub use error_formatting::{create_error_context, user_friendly_error};
