//! Type-safe `rpmspec` command builder
//!
//! This module provides a fluent API for building and executing `rpmspec`
//! invocations with consistent logging and error mapping.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::constants::{RPMSPEC_PROGRAM, SOURCE_DIR_DEFINE};
use crate::core::SpecqError;
use crate::utils::platform::command_exists;

/// Builder for constructing and executing `rpmspec` commands.
///
/// # Examples
///
/// ```rust,no_run
/// use specq::rpm::command_builder::RpmCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// let output = RpmCommand::new()
///     .arg("-q")
///     .query_format("%{name}\n")
///     .define("dist", ".azl3")
///     .arg("/src/foo/foo.spec")
///     .current_dir("/src/foo")
///     .execute()
///     .await?;
///
/// for line in output.lines() {
///     println!("{line}");
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Default Configuration
///
/// - **Program**: `rpmspec` from PATH
/// - **Timeout**: none
/// - **Working directory**: current process directory
/// - **Environment**: inherited from the parent process
#[derive(Debug, Clone)]
pub struct RpmCommand {
    /// Executable to run (`rpmspec` unless overridden)
    program: PathBuf,

    /// Command arguments, in order
    args: Vec<OsString>,

    /// Working directory for command execution
    current_dir: Option<PathBuf>,

    /// Environment variables to set for the process
    env_vars: Vec<(String, String)>,

    /// Maximum duration to wait for completion (None = wait forever)
    timeout_duration: Option<Duration>,

    /// Spec file being evaluated, used in error messages and logs
    spec: Option<PathBuf>,
}

impl Default for RpmCommand {
    fn default() -> Self {
        Self {
            program: PathBuf::from(RPMSPEC_PROGRAM),
            args: Vec::new(),
            current_dir: None,
            env_vars: Vec::new(),
            timeout_duration: None,
            spec: None,
        }
    }
}

impl RpmCommand {
    /// Creates a new builder running `rpmspec` from PATH.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a different executable (absolute path or bare name).
    pub fn program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Sets the working directory for the process.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds a single argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds `--qf <format>`.
    pub fn query_format(self, format: &str) -> Self {
        self.args(["--qf", format])
    }

    /// Adds `--target <arch>`.
    pub fn target(self, arch: &str) -> Self {
        self.args(["--target", arch])
    }

    /// Adds `-D '<name> <value>'`.
    pub fn define(self, name: &str, value: &str) -> Self {
        self.args(["-D".to_string(), format!("{name} {value}")])
    }

    /// Adds a `-D` for every entry, in key order.
    pub fn defines(self, defines: &BTreeMap<String, String>) -> Self {
        defines.iter().fold(self, |cmd, (name, value)| cmd.define(name, value))
    }

    /// Appends the spec path as the final argument and remembers it for errors.
    pub fn spec(mut self, spec: impl AsRef<Path>) -> Self {
        let spec = spec.as_ref().to_path_buf();
        self.args.push(spec.clone().into_os_string());
        self.spec = Some(spec);
        self
    }

    /// Adds an environment variable for the process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    /// Set a timeout for the command (None for no timeout)
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    fn display_args(&self) -> String {
        self.args.iter().map(|a| a.to_string_lossy()).collect::<Vec<_>>().join(" ")
    }

    fn spec_label(&self) -> String {
        self.spec.as_ref().map_or_else(|| "<none>".to_string(), |s| s.display().to_string())
    }

    /// Execute the command and return its output.
    ///
    /// # Errors
    ///
    /// - [`SpecqError::RpmspecNotFound`] if the program cannot be located
    /// - [`SpecqError::EvaluationFailed`] on a non-zero exit or timeout; `stderr`
    ///   carries the tool's output unchanged
    pub async fn execute(self) -> Result<RpmCommandOutput> {
        let start = std::time::Instant::now();
        let program = self.program.display().to_string();

        // Bare names are looked up on PATH; explicit paths are left to spawn.
        if self.program.components().count() == 1 && !command_exists(&program) {
            return Err(SpecqError::RpmspecNotFound.into());
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.env_vars {
            tracing::trace!(target: "specq::rpm", "Setting env var: {}={}", key, value);
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        tracing::debug!(
            target: "specq::rpm",
            "Executing command: {} {}{}",
            program,
            self.display_args(),
            self.current_dir
                .as_ref()
                .map(|d| format!(" (in {})", d.display()))
                .unwrap_or_default()
        );

        let output_future = cmd.output();
        let output = if let Some(duration) = self.timeout_duration {
            match timeout(duration, output_future).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        target: "specq::rpm",
                        "Command timed out after {} seconds: {} {}",
                        duration.as_secs(),
                        program,
                        self.display_args()
                    );
                    return Err(SpecqError::EvaluationFailed {
                        spec: self.spec_label(),
                        stderr: format!("{program} timed out after {} seconds", duration.as_secs()),
                    }
                    .into());
                }
            }
        } else {
            output_future.await
        };

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SpecqError::RpmspecNotFound.into());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to execute {program}"));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(
                target: "specq::rpm",
                "Command failed with exit code: {:?}",
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "specq::rpm", "Error: {}", stderr);
            }

            return Err(SpecqError::EvaluationFailed {
                spec: self.spec_label(),
                stderr: if stderr.is_empty() {
                    format!("{program} exited with status {}", output.status)
                } else {
                    stderr
                },
            }
            .into());
        }

        if !stdout.is_empty() {
            tracing::trace!(target: "specq::rpm", "{}", stdout.trim_end());
        }
        if !stderr.is_empty() {
            // rpmspec prints macro warnings on stderr even when it succeeds
            tracing::debug!(target: "specq::rpm", "{}", stderr.trim_end());
        }

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::info!(
                target: "specq::rpm::perf",
                "{} on {} took {:.2}s",
                program,
                self.spec_label(),
                elapsed.as_secs_f64()
            );
        } else {
            tracing::debug!(
                target: "specq::rpm::perf",
                "{} on {} took {}ms",
                program,
                self.spec_label(),
                elapsed.as_millis()
            );
        }

        Ok(RpmCommandOutput {
            stdout,
            stderr,
        })
    }
}

/// Output from an `rpmspec` command
#[derive(Debug, Clone)]
pub struct RpmCommandOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error output
    pub stderr: String,
}

impl RpmCommandOutput {
    /// Stdout split into lines, without line terminators.
    pub fn lines(&self) -> Vec<String> {
        self.stdout.lines().map(str::to_string).collect()
    }
}

// Convenience builders

impl RpmCommand {
    /// A `--query` command for `spec` evaluated in `source_dir`.
    ///
    /// Sets `_sourcedir` so `Source:` and `%include` lookups resolve next to the
    /// spec, and runs from that same directory.
    pub fn query(spec: impl AsRef<Path>, source_dir: impl AsRef<Path>) -> Self {
        let source_dir = source_dir.as_ref();
        Self::new()
            .arg("-q")
            .define(SOURCE_DIR_DEFINE, &source_dir.display().to_string())
            .current_dir(source_dir)
            .with_spec_hint(spec)
    }

    fn with_spec_hint(mut self, spec: impl AsRef<Path>) -> Self {
        self.spec = Some(spec.as_ref().to_path_buf());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &RpmCommand) -> Vec<String> {
        cmd.args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_command_builder_basic() {
        let cmd = RpmCommand::new().arg("-q").arg("--srpm");
        assert_eq!(args_of(&cmd), vec!["-q", "--srpm"]);
        assert_eq!(cmd.program, PathBuf::from("rpmspec"));
    }

    #[test]
    fn test_defines_are_sorted() {
        let defines = BTreeMap::from([
            ("with_check".to_string(), "0".to_string()),
            ("dist".to_string(), ".azl3".to_string()),
        ]);
        let cmd = RpmCommand::new().defines(&defines);
        assert_eq!(args_of(&cmd), vec!["-D", "dist .azl3", "-D", "with_check 0"]);
    }

    #[test]
    fn test_query_builder() {
        let cmd = RpmCommand::query("/src/foo/foo.spec", "/src/foo")
            .query_format("%{name}\n")
            .target("x86_64")
            .spec("/src/foo/foo.spec");

        assert_eq!(
            args_of(&cmd),
            vec![
                "-q",
                "-D",
                "_sourcedir /src/foo",
                "--qf",
                "%{name}\n",
                "--target",
                "x86_64",
                "/src/foo/foo.spec"
            ]
        );
        assert_eq!(cmd.current_dir, Some(PathBuf::from("/src/foo")));
        assert_eq!(cmd.spec_label(), "/src/foo/foo.spec");
    }

    #[test]
    fn test_output_lines() {
        let output = RpmCommandOutput {
            stdout: "Name=foo\r\nVersion=1.0\nName=foo-devel\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(output.lines(), vec!["Name=foo", "Version=1.0", "Name=foo-devel"]);
    }

    #[tokio::test]
    async fn test_missing_program() {
        let err = RpmCommand::new()
            .program("specq-definitely-not-installed")
            .arg("-q")
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<SpecqError>(), Some(SpecqError::RpmspecNotFound)));
    }

    #[tokio::test]
    async fn test_missing_program_by_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = RpmCommand::new()
            .program(temp.path().join("rpmspec"))
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<SpecqError>(), Some(SpecqError::RpmspecNotFound)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_surfaces_stderr() {
        let err = RpmCommand::new()
            .program("sh")
            .args(["-c", "echo 'error: bad spec' >&2; exit 1"])
            .spec("/tmp/x.spec")
            .execute()
            .await
            .unwrap_err();

        match err.downcast_ref::<SpecqError>() {
            Some(SpecqError::EvaluationFailed {
                spec,
                stderr,
            }) => {
                assert_eq!(stderr, "error: bad spec\n");
                assert_eq!(spec, "/tmp/x.spec");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_env_vars_reach_process() {
        let output = RpmCommand::new()
            .program("sh")
            .args(["-c", "printf '%s' \"$LC_ALL\""])
            .env("LC_ALL", "C")
            .execute()
            .await
            .unwrap();
        assert_eq!(output.stdout, "C");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout() {
        let err = RpmCommand::new()
            .program("sh")
            .args(["-c", "sleep 5"])
            .with_timeout(Some(Duration::from_millis(100)))
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SpecqError>(),
            Some(SpecqError::EvaluationFailed { .. })
        ));
    }
}
