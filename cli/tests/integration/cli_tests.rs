//! CLI surface tests: argument parsing, env defaults, and exit codes.
//!
//! No test here reaches the network — they exercise the paths that fail
//! before any request is issued.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn linkctl() -> Command {
    let mut cmd = Command::cargo_bin("linkctl").expect("binary");
    cmd.env_remove("RANCHER_API_URL")
        .env_remove("RANCHER_API_KEY")
        .env_remove("RANCHER_API_SECRET")
        .env_remove("RANCHER_PROJECT_ID")
        .env_remove("RANCHER_LB_ID")
        .env_remove("NO_COLOR");
    cmd
}

#[test]
fn help_lists_the_commands() {
    linkctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add-link"))
        .stdout(predicate::str::contains("remove-link"))
        .stdout(predicate::str::contains("create-stack"))
        .stdout(predicate::str::contains("get-port"));
}

#[test]
fn no_arguments_shows_help_and_fails() {
    linkctl().assert().failure().code(2);
}

#[test]
fn missing_credentials_exit_with_code_2() {
    linkctl()
        .args(["get-svc-id", "--host", "api.staging.example.com"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("RANCHER_API_URL"));
}

#[test]
fn malformed_locator_fails_before_any_request() {
    linkctl()
        .args([
            "--api-url",
            "http://127.0.0.1:9",
            "--access-key",
            "k",
            "--secret-key",
            "s",
            "get-svc-id",
            "--host",
            "plainhostname",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid service locator"));
}

#[test]
fn add_link_requires_its_ports() {
    linkctl()
        .args(["add-link", "--host", "api.staging.example.com"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--external-port"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    linkctl().arg("frobnicate").assert().failure().code(2);
}

#[test]
fn credentials_come_from_the_environment() {
    // Still fails (nothing listens on the port), but past the missing-URL
    // check: the error is now a transport failure, not a usage error.
    linkctl()
        .env("RANCHER_API_URL", "http://127.0.0.1:9")
        .env("RANCHER_API_KEY", "k")
        .env("RANCHER_API_SECRET", "s")
        .args(["get-svc-id", "--host", "api.staging.example.com"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("RANCHER_API_URL").not());
}
