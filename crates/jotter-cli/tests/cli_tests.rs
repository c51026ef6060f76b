//! End-to-end tests for the `jot` binary

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn jot() -> Command {
    let mut cmd = Command::cargo_bin("jot").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_new_saves_valid_note() {
    jot()
        .args(["new", "--title", "Buy milk", "--content", "2% organic", "--tag", "Shopping"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved note Buy milk (Shopping)"));
}

#[test]
fn test_new_rejects_short_fields() {
    jot()
        .args(["new", "--title", "Hi", "--content", "abc"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Must be at least 3 characters"))
        .stdout(predicate::str::contains("Must be at least 5 characters"))
        .stderr(predicate::str::contains("note is invalid"));
}

#[test]
fn test_new_rejects_unknown_tag() {
    jot()
        .args(["new", "--title", "Buy milk", "--content", "2% organic", "--tag", "Urgent"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "tag must be one of the following values: Todo, Work, Personal, Meeting, Shopping",
        ));
}

#[test]
fn test_new_with_store_failure_shows_banner() {
    jot()
        .args(["new", "--title", "Buy milk", "--content", "2% organic", "--fail"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed to save note. Try again."))
        .stdout(predicate::str::contains("[Save]"));
}

#[test]
fn test_new_json_output() {
    let output = jot()
        .args(["new", "--title", "Buy milk", "--content", "2% organic", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["phase"], "closed");
    assert_eq!(report["note"]["title"], "Buy milk");
    assert_eq!(report["note"]["tag"], "Todo");
}

#[test]
fn test_config_file_changes_minimums() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[validation]\ntitle_min_len = 10").unwrap();

    jot()
        .arg("--config")
        .arg(file.path())
        .args(["new", "--title", "Buy milk", "--content", "2% organic"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Must be at least 10 characters"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    jot()
        .args(["--config", "/nonexistent/jot.toml", "new", "--title", "Buy milk"])
        .assert()
        .failure();
}

#[test]
fn test_form_session_over_stdin() {
    jot()
        .arg("form")
        .write_stdin("title Buy milk\ncontent 2% organic\ntag Work\nsubmit\nnotes milk\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved note Buy milk (Work)"))
        .stdout(predicate::str::contains("1 note(s) (refetched)"))
        .stdout(predicate::str::contains("[Work] Buy milk - 2% organic"));
}
