//! CLI surface specs
//!
//! Help, version, and configuration failure modes.

use assert_cmd::Command;
use predicates::prelude::*;

fn gp() -> Command {
    Command::cargo_bin("gp").unwrap()
}

#[test]
fn help_lists_both_subcommands() {
    gp().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("verify"))
        .stdout(predicate::str::contains("cleanup"));
}

#[test]
fn version_prints_successfully() {
    gp().arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gp"));
}

#[test]
fn no_subcommand_is_a_usage_error() {
    gp().assert().failure();
}

#[test]
fn missing_config_file_fails_naming_the_path() {
    gp().args(["verify", "--config", "/nonexistent/gp.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/gp.toml"));
}

#[test]
fn invalid_config_file_fails_with_a_parse_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gp.toml");
    std::fs::write(&path, "this is not [ valid toml").unwrap();

    gp().arg("verify")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn cleanup_shares_the_config_surface() {
    gp().args(["cleanup", "--config", "/nonexistent/gp.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/gp.toml"));
}
