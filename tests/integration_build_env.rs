//! Build environment resolution as seen from the command line: config file
//! location, environment variable overrides, and config errors.

#![cfg(unix)]

mod common;

use common::TestProject;
use predicates::prelude::*;
use std::fs;

const OUTPUT: &str = "Name=zlib\nVersion=1.3.1\n";

#[test]
fn test_env_overrides_config_file() {
    let mut project = TestProject::new(OUTPUT).unwrap();
    project.write_config("dist_tag = \".azl3\"\nbuild_arch = \"x86_64\"\n").unwrap();

    project
        .query_command()
        .env("SPECQ_DIST_TAG", ".fc40")
        .env("SPECQ_BUILD_ARCH", "arm64")
        .assert()
        .success();

    let args = project.fake.recorded_args().unwrap();
    assert!(args.windows(2).any(|w| w[0] == "-D" && w[1] == "dist .fc40"), "args: {args:?}");
    assert!(args.windows(2).any(|w| w[0] == "--target" && w[1] == "aarch64"), "args: {args:?}");
}

#[cfg(target_os = "linux")]
#[test]
fn test_default_config_location() {
    let project = TestProject::new(OUTPUT).unwrap();

    let config_dir = project.path().join(".config").join("specq");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        format!(
            "dist_tag = \".azl3\"\nbuild_arch = \"x86_64\"\nrpmspec_path = \"{}\"\n",
            project.fake.program().display()
        ),
    )
    .unwrap();

    project
        .query_command()
        .assert()
        .success()
        .stdout(predicate::str::contains("\"zlib\""));
}

#[test]
fn test_no_config_file_uses_environment() {
    let project = TestProject::new(OUTPUT).unwrap();

    project
        .query_command()
        .env("SPECQ_DIST_TAG", ".azl3")
        .env("SPECQ_BUILD_ARCH", "x86_64")
        .env("SPECQ_RPMSPEC", project.fake.program())
        .assert()
        .success()
        .stdout(predicate::str::contains("1.3.1"));
}

#[test]
fn test_relative_rpmspec_path_uses_caller_directory() {
    let project = TestProject::new(OUTPUT).unwrap();

    // cwd is the project root; rpmspec itself runs from SPECS/example
    project
        .query_command()
        .env("SPECQ_DIST_TAG", ".azl3")
        .env("SPECQ_BUILD_ARCH", "x86_64")
        .env("SPECQ_RPMSPEC", "./bin/rpmspec")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"zlib\""));

    assert!(project.fake.recorded_args().is_some());
}

#[test]
fn test_explicit_config_must_exist() {
    let project = TestProject::new(OUTPUT).unwrap();
    let missing = project.path().join("missing.toml");

    project
        .query_command()
        .arg("--config")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_invalid_config_file() {
    let mut project = TestProject::new(OUTPUT).unwrap();
    project.write_config("dist_tag = [oops\n").unwrap();

    project
        .query_command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration file"));

    assert!(project.fake.recorded_args().is_none());
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let mut project = TestProject::new(OUTPUT).unwrap();
    project.write_config("dist_tag = \".azl3\"\nbuild_arch = \"x86_64\"\n").unwrap();

    let assert = project.query_command().arg("--verbose").assert().success();
    let output = assert.get_output();

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["version"], "1.3.1");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Querying spec"));
}
