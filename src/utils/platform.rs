//! Platform helpers for locating executables and expanding user paths.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Checks whether a command is available on PATH.
///
/// ```rust,no_run
/// use specq::utils::platform::command_exists;
///
/// if !command_exists("rpmspec") {
///     eprintln!("rpmspec is not installed");
/// }
/// ```
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Expands `~` and `$VAR` / `${VAR}` in a user-supplied path.
///
/// Paths from config files and environment variables go through here so that
/// `rpmspec_path = "~/bin/rpmspec"` behaves the way it would in a shell.
///
/// # Errors
///
/// Fails if the path references an undefined environment variable.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand path '{raw}'"))?;
    Ok(PathBuf::from(expanded.into_owned()))
}
