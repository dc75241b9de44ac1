//! Shared setup for specq integration tests.
//!
//! Every test gets its own temporary directory holding a spec tree, a fake
//! `rpmspec`, and (optionally) a build environment file. The `specq` binary
//! is run with `HOME` and `XDG_CONFIG_HOME` pointed into that directory and
//! all `SPECQ_*` variables cleared, so the developer's own configuration never
//! leaks into a test.

#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use specq::test_utils::{FakeRpmspec, write_build_env};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SPECQ_VARS: &[&str] = &["SPECQ_CONFIG", "SPECQ_DIST_TAG", "SPECQ_BUILD_ARCH", "SPECQ_RPMSPEC"];

/// A throwaway spec checkout with a fake `rpmspec`.
pub struct TestProject {
    temp: TempDir,
    pub fake: FakeRpmspec,
    pub spec: PathBuf,
    config: Option<PathBuf>,
}

impl TestProject {
    /// Project whose fake `rpmspec` prints `stdout` and succeeds.
    pub fn new(stdout: &str) -> Result<Self> {
        Self::with_fake(|fake| fake.stdout(stdout))
    }

    /// Project with a customised fake `rpmspec`.
    pub fn with_fake(configure: impl FnOnce(FakeRpmspec) -> FakeRpmspec) -> Result<Self> {
        let temp = TempDir::new()?;

        let spec_dir = temp.path().join("SPECS").join("example");
        fs::create_dir_all(&spec_dir)?;
        let spec = spec_dir.join("example.spec");
        fs::write(&spec, "Name: example\nVersion: 1.0.0\nRelease: 1%{?dist}\n")?;

        let fake = configure(FakeRpmspec::new(temp.path().join("bin"))).install()?;

        Ok(Self {
            temp,
            fake,
            spec,
            config: None,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write a build environment using the fake `rpmspec` plus `extra` TOML.
    pub fn write_config(&mut self, extra: &str) -> Result<PathBuf> {
        let contents = format!(
            "rpmspec_path = \"{}\"\n{extra}",
            self.fake.program().display()
        );
        let path = write_build_env(self.temp.path(), &contents)?;
        self.config = Some(path.clone());
        Ok(path)
    }

    /// The `specq` binary with an isolated environment.
    ///
    /// Uses the config written by [`Self::write_config`] through
    /// `SPECQ_CONFIG`, if there is one.
    pub fn specq_command(&self) -> Command {
        let mut cmd = Command::cargo_bin("specq").unwrap();
        for var in SPECQ_VARS {
            cmd.env_remove(var);
        }
        cmd.env_remove("RUST_LOG")
            .env("HOME", self.temp.path())
            .env("XDG_CONFIG_HOME", self.temp.path().join(".config"))
            .env("NO_COLOR", "1")
            .current_dir(self.temp.path());
        if let Some(config) = &self.config {
            cmd.env("SPECQ_CONFIG", config);
        }
        cmd
    }

    /// `specq query spec --spec <spec>` with an isolated environment.
    pub fn query_command(&self) -> Command {
        let mut cmd = self.specq_command();
        cmd.args(["query", "spec", "--spec"]).arg(&self.spec);
        cmd
    }
}
