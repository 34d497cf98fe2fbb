//! CLI end-to-end tests
//!
//! Tests for the reelroom command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the reelroom binary
#[allow(deprecated)]
fn reelroom_cmd() -> Command {
    Command::cargo_bin("reelroom").unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = reelroom_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = reelroom_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reelroom"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = reelroom_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!("reelroom ", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_cli_validate_defaults() {
    let mut cmd = reelroom_cmd();
    cmd.arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("using defaults"))
        .stdout(predicate::str::contains("0.0.0.0:5000"))
        .stdout(predicate::str::contains("mkv"));
}

#[test]
fn test_cli_validate_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reelroom.json");
    fs::write(
        &path,
        r#"{
            "server": { "port": 8090 },
            "library": { "root": "/srv/media", "extensions": ["MP4", ".mkv"], "max_depth": 3 },
            "stream": { "chunk_size": 65536 }
        }"#,
    )
    .unwrap();

    let mut cmd = reelroom_cmd();
    cmd.arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("0.0.0.0:8090"))
        .stdout(predicate::str::contains("Library root: /srv/media"))
        .stdout(predicate::str::contains("Extensions: mkv, mp4"))
        .stdout(predicate::str::contains("Max depth: 3"))
        .stdout(predicate::str::contains("Chunk size: 65536 bytes"));
}

#[test]
fn test_cli_validate_rejects_invalid_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let mut cmd = reelroom_cmd();
    cmd.arg("validate").arg(&path).assert().failure();
}

#[test]
fn test_cli_validate_warns_on_empty_extensions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reelroom.json");
    fs::write(&path, r#"{ "library": { "extensions": [] } }"#).unwrap();

    let mut cmd = reelroom_cmd();
    cmd.arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("⚠"));
}

#[test]
fn test_cli_start_rejects_missing_root() {
    let dir = tempdir().unwrap();
    let mut cmd = reelroom_cmd();
    cmd.args(["start", "--host", "127.0.0.1", "--port", "0", "--root"])
        .arg(dir.path().join("missing"))
        .assert()
        .failure();
}
