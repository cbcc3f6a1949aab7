//! Smoke tests for the CLI surface -- argument parsing and help output
//! only; network-touching commands are covered in the library crates.

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_the_command_tree() {
    Command::cargo_bin("trimly")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("book"))
        .stdout(predicate::str::contains("admin"))
        .stdout(predicate::str::contains("slots"));
}

#[test]
fn admin_help_lists_operator_commands() {
    Command::cargo_bin("trimly")
        .unwrap()
        .args(["admin", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("dayoffs"))
        .stdout(predicate::str::contains("availability"));
}

#[test]
fn slots_requires_a_date() {
    Command::cargo_bin("trimly")
        .unwrap()
        .arg("slots")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--date"));
}

#[test]
fn config_path_prints_a_path() {
    Command::cargo_bin("trimly")
        .unwrap()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
