//! Spec queries: request building, evaluation, and result decoding.
//!
//! A query runs in three steps:
//!
//! 1. [`SpecQueryInvocation::build`] pins the spec path and assembles the
//!    query template and macros for an [`EvaluationContext`]
//! 2. a [`SpecEvaluator`] runs the query (normally `rpmspec`)
//! 3. [`SpecQueryResult::decode`] turns the output lines into a typed result
//!
//! Each query is independent; nothing is cached or shared between calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use specq::rpm::RpmspecEvaluator;
//! use specq::spec::{query_spec, EvaluationContext};
//! use std::collections::BTreeMap;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let ctx = EvaluationContext::new("x86_64", ".azl3", false);
//! let result = query_spec(
//!     Path::new("SPECS/zlib/zlib.spec"),
//!     &ctx,
//!     &BTreeMap::new(),
//!     &RpmspecEvaluator::default(),
//! )
//! .await?;
//! println!("{} {:?}", result.version, result.package_names);
//! # Ok(())
//! # }
//! ```

mod request;
mod result;

pub use request::{resolve_spec_path, EvaluationContext, SpecQueryInvocation};
pub use result::SpecQueryResult;

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

use crate::rpm::SpecEvaluator;

/// Query the package names and version declared by `spec_path`.
///
/// Fails before evaluation if the path cannot be resolved. Evaluator errors
/// are returned as-is.
pub async fn query_spec<E: SpecEvaluator>(
    spec_path: &Path,
    ctx: &EvaluationContext,
    extra_defines: &BTreeMap<String, String>,
    evaluator: &E,
) -> Result<SpecQueryResult> {
    let invocation = SpecQueryInvocation::build(spec_path, ctx, extra_defines)?;

    tracing::debug!(
        target: "specq::spec",
        "Evaluating {} for {} with dist tag '{}'",
        invocation.spec_path.display(),
        invocation.build_arch,
        ctx.dist_tag
    );

    let lines = evaluator.evaluate(&invocation).await?;
    let result = SpecQueryResult::decode(&lines);

    tracing::debug!(
        target: "specq::spec",
        "Decoded {} package(s), version '{}'",
        result.package_names.len(),
        result.version
    );

    Ok(result)
}
