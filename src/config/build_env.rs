//! Build environment configuration for specq.
//!
//! The build environment describes the distribution a spec is evaluated for:
//! its distribution tag, optional release metadata, a pinned architecture and
//! the `rpmspec` executable to use. It is read from a TOML file and then
//! overridden from environment variables.
//!
//! # File Format
//!
//! ```toml
//! dist_tag = ".azl3"
//! distro_release_version = "3.0"
//! distro_build_number = "20241018"
//!
//! # Optional
//! build_arch = "x86_64"
//! rpmspec_path = "~/bin/rpmspec"
//! evaluation_timeout_secs = 120
//!
//! [defines]
//! with_ptest = "1"
//! ```
//!
//! # Location
//!
//! 1. `--config <PATH>` (also read from `SPECQ_CONFIG`)
//! 2. `<config_dir>/specq/config.toml` (`~/.config/specq/config.toml` on Linux)
//!
//! A missing default file yields an empty configuration. A missing file that
//! was asked for explicitly is an error.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::constants::{
    BUILD_ARCH_ENV, DIST_TAG_ENV, DISTRO_BUILD_NUMBER_DEFINE, DISTRO_RELEASE_VERSION_DEFINE,
    RPMSPEC_PATH_ENV, RPMSPEC_PROGRAM,
};
use crate::core::SpecqError;
use crate::rpm::arch;
use crate::utils::platform::resolve_path;

/// Distribution settings used to evaluate spec files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildEnv {
    /// Distribution tag passed as `%{dist}` (e.g. `.azl3`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_tag: Option<String>,

    /// Distribution release version, passed as `%{distro_release_version}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distro_release_version: Option<String>,

    /// Distribution build number, passed as `%{distro_build_number}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distro_build_number: Option<String>,

    /// Pinned RPM build architecture. Host detection is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_arch: Option<String>,

    /// Alternate `rpmspec` executable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpmspec_path: Option<PathBuf>,

    /// Kill `rpmspec` after this many seconds. No limit when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation_timeout_secs: Option<u64>,

    /// Additional macros passed to every evaluation.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub defines: BTreeMap<String, String>,
}

impl BuildEnv {
    /// Default configuration file location: `<config_dir>/specq/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine configuration directory"))?;
        Ok(config_dir.join("specq").join("config.toml"))
    }

    /// Load the build environment and apply environment variable overrides.
    ///
    /// `explicit` is the path given on the command line (or through
    /// `SPECQ_CONFIG`); it must exist. Without it the default location is
    /// tried and silently skipped when absent.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        let env = match explicit {
            Some(path) => {
                let path = resolve_path(path)?;
                if !path.exists() {
                    return Err(SpecqError::ConfigNotFound {
                        path: path.display().to_string(),
                    }
                    .into());
                }
                Self::load_from(&path).await?
            }
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path).await?
                } else {
                    tracing::debug!("No config file at {}, using defaults", path.display());
                    Self::default()
                }
            }
        };

        Ok(env.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Load the build environment from a specific TOML file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;

        let env: Self = toml::from_str(&content).map_err(|e| SpecqError::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!("Loaded build environment from {}", path.display());
        Ok(env)
    }

    /// Apply `SPECQ_DIST_TAG`, `SPECQ_BUILD_ARCH` and `SPECQ_RPMSPEC`.
    ///
    /// `lookup` resolves an environment variable name; blank values are
    /// ignored.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(tag) = var(DIST_TAG_ENV) {
            self.dist_tag = Some(tag);
        }
        if let Some(arch) = var(BUILD_ARCH_ENV) {
            self.build_arch = Some(arch);
        }
        if let Some(path) = var(RPMSPEC_PATH_ENV) {
            self.rpmspec_path = Some(PathBuf::from(path));
        }
        self
    }

    /// The active distribution tag.
    pub fn dist_tag(&self) -> Result<&str, SpecqError> {
        match self.dist_tag.as_deref() {
            Some(tag) if !tag.trim().is_empty() => Ok(tag),
            _ => Err(SpecqError::DistTagUnavailable),
        }
    }

    /// The RPM build architecture: the pinned one if set, else the host's.
    pub fn build_arch(&self) -> Result<String, SpecqError> {
        match self.build_arch.as_deref() {
            Some(pinned) => arch::rpm_arch(pinned),
            None => arch::host_rpm_arch(),
        }
    }

    /// The `rpmspec` executable to run, with `~` and variables expanded.
    ///
    /// Relative paths such as `./bin/rpmspec` are pinned to the current
    /// directory, since `rpmspec` is started from the spec's directory. Bare
    /// names are left alone and looked up on PATH.
    pub fn rpmspec_program(&self) -> Result<PathBuf> {
        let Some(path) = self.rpmspec_path.as_deref() else {
            return Ok(PathBuf::from(RPMSPEC_PROGRAM));
        };

        let program = resolve_path(path)?;
        if program.components().count() <= 1 {
            return Ok(program);
        }

        std::path::absolute(&program).map_err(|e| {
            SpecqError::Other {
                message: format!("Cannot resolve rpmspec path '{}': {e}", program.display()),
            }
            .into()
        })
    }

    /// Configured evaluation timeout.
    pub fn evaluation_timeout(&self) -> Option<Duration> {
        self.evaluation_timeout_secs.map(Duration::from_secs)
    }

    /// Macros contributed by the build environment itself.
    ///
    /// Release metadata is folded in on top of the `[defines]` table.
    pub fn extra_defines(&self) -> BTreeMap<String, String> {
        let mut defines = self.defines.clone();
        if let Some(version) = &self.distro_release_version {
            defines.insert(DISTRO_RELEASE_VERSION_DEFINE.to_string(), version.clone());
        }
        if let Some(build) = &self.distro_build_number {
            defines.insert(DISTRO_BUILD_NUMBER_DEFINE.to_string(), build.clone());
        }
        defines
    }
}
