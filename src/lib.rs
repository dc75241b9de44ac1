//! specq - RPM spec file query tool
//!
//! specq answers one question about an RPM spec file: which binary packages
//! does it produce, and at what version, when evaluated for a given
//! distribution and architecture. It never parses spec syntax itself; the
//! spec is evaluated by `rpmspec` with a fixed query template and the output
//! is decoded into a [`spec::SpecQueryResult`].
//!
//! # Core Modules
//!
//! - [`spec`] - Query request building, the query flow, and result decoding
//! - [`rpm`] - The `rpmspec` process boundary and architecture mapping
//! - [`config`] - Build environment (distribution tag, defines, tool path)
//! - [`report`] - JSON, YAML, and text output
//! - [`cli`] - Command-line interface
//! - [`core`] - Error types and user-facing error formatting
//!
//! ## Supporting Modules
//!
//! - [`constants`] - Macro names, query template, environment variable names
//! - [`utils`] - Executable lookup and path expansion
//!
//! # Build Environment (`~/.config/specq/config.toml`)
//!
//! ```toml
//! dist_tag = ".azl3"
//! distro_release_version = "3.0"
//! distro_build_number = "20241018"
//!
//! [defines]
//! with_ptest = "1"
//! ```
//!
//! `SPECQ_DIST_TAG`, `SPECQ_BUILD_ARCH`, and `SPECQ_RPMSPEC` override the file.
//!
//! # Command-Line Usage
//!
//! ```bash
//! # JSON report (default)
//! specq query spec --spec SPECS/zlib/zlib.spec
//! {
//!   "version": "1.3.1",
//!   "packages": [
//!     "zlib",
//!     "zlib-devel"
//!   ]
//! }
//!
//! # Human-readable output with debug logs on stderr
//! specq --verbose --format text query spec -s SPECS/zlib/zlib.spec
//! ```
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use specq::config::BuildEnv;
//! use specq::rpm::RpmspecEvaluator;
//! use specq::spec::{query_spec, EvaluationContext};
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let env = BuildEnv::load(None).await?;
//! let ctx = EvaluationContext::from_build_env(&env, false)?;
//! let evaluator = RpmspecEvaluator::new(env.rpmspec_program()?, env.evaluation_timeout());
//!
//! let result = query_spec(Path::new("zlib.spec"), &ctx, &env.extra_defines(), &evaluator).await?;
//! for package in &result.package_names {
//!     println!("{package}-{}", result.version);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod report;
pub mod rpm;
pub mod spec;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
