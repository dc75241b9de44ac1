//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`platform`] - Executable lookup and user path expansion

pub mod platform;

pub use platform::{command_exists, resolve_path};
