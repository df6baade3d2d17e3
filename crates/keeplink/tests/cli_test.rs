//! End-to-end CLI tests that exercise the binary without a device.

use assert_cmd::Command;
use predicates::prelude::*;

fn keeplink() -> Command {
    let mut cmd = Command::cargo_bin("keeplink").expect("binary builds");
    // Isolate from the developer's environment and config file.
    cmd.env_remove("KEEPLINK_HOST")
        .env_remove("KEEPLINK_USERNAME")
        .env_remove("KEEPLINK_PASSWORD")
        .env_remove("KEEPLINK_CONFIG")
        .env_remove("KEEPLINK_OUTPUT");
    cmd
}

#[test]
fn no_arguments_shows_help() {
    keeplink()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_mentions_core_commands() {
    keeplink()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("ports"))
        .stdout(predicate::str::contains("poe"))
        .stdout(predicate::str::contains("reboot"));
}

#[test]
fn version_flag_works() {
    keeplink()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("keeplink"));
}

#[test]
fn completions_generate_without_a_device() {
    keeplink()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keeplink"));
}

#[test]
fn status_without_host_is_a_usage_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let empty = dir.path().join("config.toml");
    std::fs::write(&empty, "").expect("write config");

    keeplink()
        .args(["--config", empty.to_str().expect("utf-8 path"), "status"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("host"));
}

#[test]
fn reboot_requires_confirmation() {
    keeplink()
        .args(["-H", "192.0.2.1", "--password", "admin", "reboot"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("confirmation"));
}

#[test]
fn invalid_speed_label_is_rejected() {
    keeplink()
        .args([
            "-H",
            "192.0.2.1",
            "--password",
            "admin",
            "port",
            "speed",
            "1",
            "warp",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("speed"));
}
