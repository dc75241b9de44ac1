//! Command-line interface for specq.
//!
//! The command tree is a plain clap derive hierarchy, built once when
//! [`Cli::parse`](clap::Parser::parse) runs and dispatched from
//! [`Cli::execute`]:
//!
//! ```text
//! specq [--verbose | --quiet] [--config <PATH>] [--format <FORMAT>]
//! └── query
//!     └── spec --spec <PATH>
//! ```
//!
//! Global flags are turned into a [`CliConfig`] before dispatch. The config
//! carries everything a subcommand needs from the outer layer (log level,
//! config file location, report format), so subcommands never read the parsed
//! [`Cli`] directly.
//!
//! # Output
//!
//! Reports go to stdout. Logs and errors go to stderr, so
//! `specq query spec --spec foo.spec | jq .version` is safe even with
//! `--verbose`.

pub mod query;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::constants::CONFIG_PATH_ENV;
use crate::report::ReportFormat;

/// Settings derived from the global command-line flags.
///
/// Built by [`Cli::build_config`] and handed to subcommands, which lets tests
/// construct one directly instead of going through argument parsing.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: Option<String>,

    /// Explicit build environment file. `None` means the default location.
    pub config_path: Option<PathBuf>,

    /// How query results are written to stdout.
    pub format: ReportFormat,
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Use a specific build environment file.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Set the report format.
    #[must_use]
    pub const fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// The log filter to install: `RUST_LOG` if set, else [`Self::log_level`],
    /// else `warn`.
    pub fn env_filter(&self) -> EnvFilter {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("warn"))
        }
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
    }
}

/// Query RPM spec files for the packages and version they declare.
#[derive(Parser)]
#[command(
    name = "specq",
    about = "Query RPM spec files for package names and version",
    version,
    long_about = "specq evaluates RPM spec files with rpmspec for a target distribution \
                  and reports the packages they produce and their version."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr.
    ///
    /// Equivalent to `RUST_LOG=debug`. An explicit `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the build environment file.
    ///
    /// Defaults to `~/.config/specq/config.toml`. Unlike the default location,
    /// a path given here must exist.
    ///
    /// ```bash
    /// specq --config ./azl3.toml query spec --spec SPECS/zlib/zlib.spec
    /// SPECQ_CONFIG=./azl3.toml specq query spec --spec SPECS/zlib/zlib.spec
    /// ```
    #[arg(short, long, global = true, env = CONFIG_PATH_ENV, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = ReportFormat::Json)]
    format: ReportFormat,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Query spec files
    Query(query::QueryCommand),
}

impl Cli {
    /// Configure logging from the global flags and run the selected command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    ///
    /// `--verbose` maps to `debug`, `--quiet` to `error`. Without either the
    /// level is left unset and [`CliConfig::env_filter`] falls back to `warn`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
            format: self.format,
        }
    }

    /// Run the selected command with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Query(cmd) => cmd.execute(&config).await,
        }
    }
}
