//! Error formatting utilities for specq
//!
//! Converts errors coming out of the query pipeline into clear, actionable
//! messages for users.

use super::*;

/// Convert any error into a user-friendly format with contextual suggestions
///
/// Walks the error chain looking for a [`SpecqError`] (errors are often wrapped
/// in `anyhow` context on the way up) and falls back to a generic context that
/// keeps the full chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let mut current_error: &dyn std::error::Error = error.as_ref();
    loop {
        if let Some(specq_error) = current_error.downcast_ref::<SpecqError>() {
            return create_error_context(specq_error);
        }

        match current_error.source() {
            Some(source) => current_error = source,
            None => break,
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return ErrorContext::new(SpecqError::Other {
            message: io_error.to_string(),
        })
        .with_suggestion("Check that the path exists and you have the necessary permissions");
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(SpecqError::Other {
        message,
    })
}

/// Create a user-friendly error context from a [`SpecqError`]
pub fn create_error_context(error: &SpecqError) -> ErrorContext {
    match error {
        SpecqError::PathResolution {
            path,
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Pass an existing spec file with --spec")
            .with_details(format!(
                "The spec path '{path}' must be made absolute before rpmspec runs in its directory"
            )),
        SpecqError::UnsupportedArchitecture {
            arch,
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Set build_arch in the config file or {} to x86_64 or aarch64",
                crate::constants::BUILD_ARCH_ENV
            ))
            .with_details(format!("No RPM architecture is known for '{arch}'")),
        SpecqError::DistTagUnavailable => ErrorContext::new(SpecqError::DistTagUnavailable)
            .with_suggestion(format!(
                "Set dist_tag in the specq config file or export {}",
                crate::constants::DIST_TAG_ENV
            ))
            .with_details("The distribution tag is passed to rpmspec as the %{dist} macro"),
        SpecqError::RpmspecNotFound => ErrorContext::new(SpecqError::RpmspecNotFound)
            .with_suggestion("Install rpmspec (part of rpm-build, e.g. 'dnf install rpm-build')")
            .with_details(format!(
                "specq evaluates spec files with rpmspec; point {} at a custom binary if needed",
                crate::constants::RPMSPEC_PATH_ENV
            )),
        SpecqError::EvaluationFailed {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Fix the spec file or run rpmspec -P on it to see the expansion"),
        SpecqError::ConfigNotFound {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check the --config path or unset SPECQ_CONFIG to use the default"),
        SpecqError::ConfigParse {
            reason,
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check the TOML syntax of the config file")
            .with_details(reason.clone()),
        SpecqError::Reporting {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check that stdout is writable (e.g. the pipe is not closed)"),
        SpecqError::IoError(_) | SpecqError::Other { .. } => ErrorContext::new(error.clone()),
    }
}
