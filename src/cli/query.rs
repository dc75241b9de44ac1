//! `specq query` subcommands.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::CliConfig;
use crate::config::BuildEnv;
use crate::report::report_result;
use crate::rpm::RpmspecEvaluator;
use crate::spec::{self, EvaluationContext, resolve_spec_path};

/// Query information from build inputs.
#[derive(Args)]
pub struct QueryCommand {
    #[command(subcommand)]
    command: QuerySubcommand,
}

#[derive(Subcommand)]
enum QuerySubcommand {
    /// Report the package names and version a spec file declares
    Spec(SpecCommand),
}

impl QueryCommand {
    /// Run the selected query.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        match self.command {
            QuerySubcommand::Spec(cmd) => cmd.execute(config).await,
        }
    }
}

/// Evaluate one spec file and report what it produces.
///
/// ```bash
/// specq query spec --spec SPECS/zlib/zlib.spec
/// specq --format text query spec -s ./curl.spec
/// ```
#[derive(Args)]
pub struct SpecCommand {
    /// Path to the spec file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub spec: PathBuf,
}

impl SpecCommand {
    /// Query the spec and write the report to stdout.
    ///
    /// The spec path is checked before anything else, then the build
    /// environment is loaded and the architecture and distribution tag are
    /// resolved. Nothing is written to stdout unless every step succeeds.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        tracing::info!("Querying spec: {}", self.spec.display());

        // Checked up front so a bad path is reported before config errors.
        resolve_spec_path(&self.spec)?;

        let env = BuildEnv::load(config.config_path.as_deref()).await?;
        let ctx = EvaluationContext::from_build_env(&env, false)?;
        let evaluator = RpmspecEvaluator::new(env.rpmspec_program()?, env.evaluation_timeout());

        let result = spec::query_spec(&self.spec, &ctx, &env.extra_defines(), &evaluator).await?;

        let mut stdout = std::io::stdout().lock();
        report_result(&mut stdout, &result, config.format)?;
        Ok(())
    }
}
