//! Global constants used throughout the specq codebase.
//!
//! This module contains the query template, macro names, and environment
//! variable names that are shared between the request builder, the `rpmspec`
//! runner, and the configuration layer. Defining them centrally keeps the
//! query protocol in one place.

/// Output template passed to `rpmspec --qf`.
///
/// `rpmspec` expands this once per declared package, so a spec with
/// sub-packages yields one `Name=` line per package and a `Version=` line for
/// each of them.
pub const QUERY_TEMPLATE: &str = "Name=%{name}\nVersion=%{version}\n";

/// Output key carrying a package name.
pub const NAME_KEY: &str = "Name";

/// Output key carrying the spec version.
pub const VERSION_KEY: &str = "Version";

/// Macro holding the distribution tag (e.g. `.azl3`).
pub const DIST_TAG_DEFINE: &str = "dist";

/// Macro toggling `%check` sections.
pub const WITH_CHECK_DEFINE: &str = "with_check";

/// Macro holding the distribution release version.
pub const DISTRO_RELEASE_VERSION_DEFINE: &str = "distro_release_version";

/// Macro holding the distribution build number.
pub const DISTRO_BUILD_NUMBER_DEFINE: &str = "distro_build_number";

/// Macro pointing `rpmspec` at the directory holding the spec's sources.
pub const SOURCE_DIR_DEFINE: &str = "_sourcedir";

/// Name of the spec evaluation program.
pub const RPMSPEC_PROGRAM: &str = "rpmspec";

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "SPECQ_CONFIG";

/// Environment variable overriding the distribution tag.
pub const DIST_TAG_ENV: &str = "SPECQ_DIST_TAG";

/// Environment variable pinning the build architecture.
pub const BUILD_ARCH_ENV: &str = "SPECQ_BUILD_ARCH";

/// Environment variable pointing at an alternate `rpmspec` executable.
pub const RPMSPEC_PATH_ENV: &str = "SPECQ_RPMSPEC";
