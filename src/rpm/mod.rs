//! `rpmspec` integration.
//!
//! specq never interprets spec syntax itself. Every question about a spec is
//! answered by running `rpmspec --query` with a custom output template and
//! reading back its stdout. This module owns that process boundary:
//!
//! - [`arch`] - host architecture to RPM `--target` mapping
//! - [`command_builder`] - fluent builder around the `rpmspec` process
//! - [`SpecEvaluator`] - the seam the query flow talks to
//! - [`RpmspecEvaluator`] - the process-backed evaluator
//! - [`default_distro_defines`] - macros every evaluation receives

pub mod arch;
pub mod command_builder;

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DIST_TAG_DEFINE, RPMSPEC_PROGRAM, WITH_CHECK_DEFINE};
use crate::spec::SpecQueryInvocation;
use command_builder::RpmCommand;

/// Something that can evaluate a spec query and return its raw output lines.
///
/// Errors are returned unchanged to the caller; the query flow does not
/// inspect or wrap them.
pub trait SpecEvaluator {
    /// Evaluate `invocation` and return stdout, one entry per line.
    fn evaluate(
        &self,
        invocation: &SpecQueryInvocation,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

/// Evaluates queries by running `rpmspec`.
#[derive(Debug, Clone)]
pub struct RpmspecEvaluator {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl Default for RpmspecEvaluator {
    fn default() -> Self {
        Self {
            program: PathBuf::from(RPMSPEC_PROGRAM),
            timeout: None,
        }
    }
}

impl RpmspecEvaluator {
    /// Evaluator running `program` with an optional timeout.
    pub fn new(program: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// The `rpmspec` command this evaluator would run for `invocation`.
    ///
    /// Runs under the C locale so diagnostics on stderr are not translated.
    pub fn command(&self, invocation: &SpecQueryInvocation) -> RpmCommand {
        RpmCommand::query(&invocation.spec_path, &invocation.spec_dir)
            .program(&self.program)
            .env("LC_ALL", "C")
            .with_timeout(self.timeout)
            .query_format(invocation.query_format)
            .target(&invocation.build_arch)
            .defines(&invocation.defines)
            .spec(&invocation.spec_path)
    }
}

impl SpecEvaluator for RpmspecEvaluator {
    async fn evaluate(&self, invocation: &SpecQueryInvocation) -> Result<Vec<String>> {
        let output = self.command(invocation).execute().await?;
        Ok(output.lines())
    }
}

/// Macros passed to every spec evaluation.
///
/// `dist` carries the distribution tag and `with_check` enables or disables
/// `%check`-only dependencies and conditionals.
///
/// ```
/// use specq::rpm::default_distro_defines;
///
/// let defines = default_distro_defines(false, ".azl3");
/// assert_eq!(defines["dist"], ".azl3");
/// assert_eq!(defines["with_check"], "0");
/// ```
pub fn default_distro_defines(run_checks: bool, dist_tag: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (DIST_TAG_DEFINE.to_string(), dist_tag.to_string()),
        (WITH_CHECK_DEFINE.to_string(), if run_checks { "1" } else { "0" }.to_string()),
    ])
}
