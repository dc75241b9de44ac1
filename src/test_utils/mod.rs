//! Test utilities for specq
//!
//! Helpers shared by unit tests and the integration tests under `tests/`
//! (enabled there through the `test-utils` feature):
//!
//! - [`init_test_logging`] - one-time tracing setup using the test writer
//! - [`capture_logs`] - collect log output from a closure for assertions
//! - [`FakeRpmspec`] - a shell script standing in for `rpmspec` that replays
//!   canned output and records how it was called (unix only)
//! - [`write_build_env`] - writes a build environment TOML file
//!
//! # Example
//!
//! ```rust,ignore
//! use specq::test_utils::FakeRpmspec;
//!
//! let temp = tempfile::TempDir::new().unwrap();
//! let fake = FakeRpmspec::new(temp.path())
//!     .stdout("Name=foo\nVersion=1.0\n")
//!     .install()
//!     .unwrap();
//!
//! // point SPECQ_RPMSPEC at fake.program() and run the query
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. With `level` the filter is fixed to
/// that level; otherwise `RUST_LOG` is used, and without either nothing is
/// logged.
///
/// ```bash
/// RUST_LOG=specq=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Run `f` with a thread-local subscriber and return what it logged at
/// `level` or above, without ANSI colors.
///
/// ```rust,ignore
/// let logs = capture_logs(Level::WARN, || {
///     SpecQueryResult::decode(["Version=1.0", "Version=2.0"]);
/// });
/// assert!(logs.contains("Conflicting versions"));
/// ```
pub fn capture_logs(level: Level, f: impl FnOnce()) -> String {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(true)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    buffer.contents()
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut inner) = self.0.lock() {
            inner.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Write a build environment file to `dir/config.toml` and return its path.
pub fn write_build_env(dir: &Path, contents: &str) -> std::io::Result<PathBuf> {
    let path = dir.join("config.toml");
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// A stand-in `rpmspec` executable.
///
/// The script prints the configured stdout and stderr, exits with the
/// configured status, and records its arguments and working directory next to
/// itself so tests can assert on the exact invocation.
#[derive(Debug, Clone)]
pub struct FakeRpmspec {
    dir: PathBuf,
    stdout: String,
    stderr: String,
    exit_code: i32,
}

impl FakeRpmspec {
    /// A fake living in `dir` that succeeds with no output.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    /// Text written to stdout.
    #[must_use]
    pub fn stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    /// Text written to stderr.
    #[must_use]
    pub fn stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// Exit status.
    #[must_use]
    pub const fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Path of the executable script.
    pub fn program(&self) -> PathBuf {
        self.dir.join("rpmspec")
    }

    fn file(&self, suffix: &str) -> PathBuf {
        self.dir.join(format!("rpmspec.{suffix}"))
    }

    /// Write the script and its canned output.
    #[cfg(unix)]
    pub fn install(self) -> std::io::Result<Self> {
        use std::os::unix::fs::PermissionsExt;

        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.file("stdout"), &self.stdout)?;
        std::fs::write(self.file("stderr"), &self.stderr)?;

        let script = format!(
            "#!/bin/sh\n\
             for arg in \"$@\"; do printf '%s\\0' \"$arg\"; done > '{args}'\n\
             pwd > '{cwd}'\n\
             cat '{stdout}'\n\
             cat '{stderr}' >&2\n\
             exit {code}\n",
            args = self.file("args").display(),
            cwd = self.file("cwd").display(),
            stdout = self.file("stdout").display(),
            stderr = self.file("stderr").display(),
            code = self.exit_code,
        );
        std::fs::write(self.program(), script)?;
        std::fs::set_permissions(self.program(), std::fs::Permissions::from_mode(0o755))?;
        Ok(self)
    }

    /// Arguments from the last run, or `None` if the script never ran.
    pub fn recorded_args(&self) -> Option<Vec<String>> {
        let raw = std::fs::read(self.file("args")).ok()?;
        let raw = String::from_utf8_lossy(&raw);
        Some(raw.split_terminator('\0').map(str::to_string).collect())
    }

    /// Working directory of the last run.
    pub fn recorded_cwd(&self) -> Option<PathBuf> {
        let raw = std::fs::read_to_string(self.file("cwd")).ok()?;
        Some(PathBuf::from(raw.trim_end_matches('\n')))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_fake_rpmspec_records_invocation() {
        let temp = tempfile::TempDir::new().unwrap();
        let fake = FakeRpmspec::new(temp.path()).stdout("Name=foo\n").install().unwrap();
        assert!(fake.recorded_args().is_none());

        let output = std::process::Command::new(fake.program())
            .args(["-D", "dist .azl3", "multi\nline"])
            .current_dir(temp.path())
            .output()
            .unwrap();

        assert!(output.status.success());
        assert_eq!(output.stdout, b"Name=foo\n");
        assert_eq!(fake.recorded_args().unwrap(), vec!["-D", "dist .azl3", "multi\nline"]);
        assert_eq!(
            fake.recorded_cwd().unwrap().canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_fake_rpmspec_failure() {
        let temp = tempfile::TempDir::new().unwrap();
        let fake = FakeRpmspec::new(temp.path())
            .stderr("error: line 3: Unknown tag\n")
            .exit_code(1)
            .install()
            .unwrap();

        let output = std::process::Command::new(fake.program()).output().unwrap();
        assert_eq!(output.status.code(), Some(1));
        assert_eq!(output.stderr, b"error: line 3: Unknown tag\n");
    }
}
