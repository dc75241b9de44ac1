//! Query request building.
//!
//! Turns "what are this spec's packages and version under this architecture
//! and distribution" into a fully specified [`SpecQueryInvocation`]. Nothing
//! here runs `rpmspec` or reads the filesystem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::BuildEnv;
use crate::constants::QUERY_TEMPLATE;
use crate::core::SpecqError;
use crate::rpm::default_distro_defines;

/// How a spec should be evaluated. Built once per query and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationContext {
    /// Normalized RPM architecture tag (`x86_64`, `aarch64`)
    pub architecture: String,
    /// Distribution release tag (e.g. `.azl3`)
    pub dist_tag: String,
    /// Whether `%check` should be enabled during evaluation
    pub run_checks: bool,
}

impl EvaluationContext {
    /// Create a context from already-resolved values.
    pub fn new(architecture: impl Into<String>, dist_tag: impl Into<String>, run_checks: bool) -> Self {
        Self {
            architecture: architecture.into(),
            dist_tag: dist_tag.into(),
            run_checks,
        }
    }

    /// Resolve architecture, then distribution tag, from the build environment.
    pub fn from_build_env(env: &BuildEnv, run_checks: bool) -> Result<Self, SpecqError> {
        let architecture = env.build_arch()?;
        let dist_tag = env.dist_tag()?.to_string();
        Ok(Self {
            architecture,
            dist_tag,
            run_checks,
        })
    }

    /// Macros derived from this context.
    pub fn defines(&self) -> BTreeMap<String, String> {
        default_distro_defines(self.run_checks, &self.dist_tag)
    }
}

/// Everything the evaluator needs to answer one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecQueryInvocation {
    /// Absolute path of the spec file
    pub spec_path: PathBuf,
    /// Directory containing the spec; `rpmspec` runs here
    pub spec_dir: PathBuf,
    /// Output template passed to `--qf`
    pub query_format: &'static str,
    /// RPM `--target` architecture
    pub build_arch: String,
    /// Macros passed with `-D`
    pub defines: BTreeMap<String, String>,
}

impl SpecQueryInvocation {
    /// Build the invocation for `spec_path` under `ctx`.
    ///
    /// `extra_defines` come from the build environment; context-derived
    /// macros take precedence over them.
    ///
    /// # Errors
    ///
    /// [`SpecqError::PathResolution`] if the path cannot be made absolute.
    ///
    /// ```
    /// use specq::spec::{EvaluationContext, SpecQueryInvocation};
    /// use std::collections::BTreeMap;
    /// use std::path::Path;
    ///
    /// let ctx = EvaluationContext::new("x86_64", ".azl3", false);
    /// let inv = SpecQueryInvocation::build(Path::new("/specs/zlib/zlib.spec"), &ctx, &BTreeMap::new())
    ///     .unwrap();
    /// assert_eq!(inv.spec_dir, Path::new("/specs/zlib"));
    /// assert_eq!(inv.defines["dist"], ".azl3");
    /// ```
    pub fn build(
        spec_path: &Path,
        ctx: &EvaluationContext,
        extra_defines: &BTreeMap<String, String>,
    ) -> Result<Self, SpecqError> {
        let (spec_path, spec_dir) = resolve_spec_path(spec_path)?;

        let mut defines = extra_defines.clone();
        defines.extend(ctx.defines());

        Ok(Self {
            spec_path,
            spec_dir,
            query_format: QUERY_TEMPLATE,
            build_arch: ctx.architecture.clone(),
            defines,
        })
    }
}

/// Make `path` absolute and return it with its containing directory.
///
/// `rpmspec` is started inside the spec's directory, so a relative path has
/// to be pinned against the current directory first. Normalization is lexical
/// and does not require the file to exist.
pub fn resolve_spec_path(path: &Path) -> Result<(PathBuf, PathBuf), SpecqError> {
    let path_error = |reason: String| SpecqError::PathResolution {
        path: path.display().to_string(),
        reason,
    };

    let absolute = std::path::absolute(path).map_err(|e| path_error(e.to_string()))?;
    let dir = absolute
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| path_error("path has no parent directory".to_string()))?;

    Ok((absolute, dir))
}
