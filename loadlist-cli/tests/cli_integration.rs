//! Integration tests for the loadlist binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command with an isolated config location and an instant fetch
fn loadlist(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("loadlist").unwrap();
    cmd.env("LOADLIST_CONFIG", temp_dir.path().join("absent.toml"))
        .env_remove("LOADLIST_LOG_FORMAT")
        .env_remove("LOADLIST_LOG_LEVEL")
        .env_remove("RUST_LOG")
        .arg("--delay")
        .arg("0ms");
    cmd
}

#[test]
fn test_no_steps_loads_canonical_items() {
    let temp_dir = TempDir::new().unwrap();

    loadlist(&temp_dir)
        .assert()
        .success()
        .stdout("[loaded] 5 items\n  Foo\n  Bar\n  Baz\n  Bing\n  Bang\n");
}

#[test]
fn test_move_and_delete_after_wait() {
    let temp_dir = TempDir::new().unwrap();

    loadlist(&temp_dir)
        .args(["load", "wait", "move:0:3"])
        .assert()
        .success()
        .stdout("[loaded] 5 items\n  Bar\n  Baz\n  Foo\n  Bing\n  Bang\n");

    loadlist(&temp_dir)
        .args(["load", "wait", "delete:0,2,4"])
        .assert()
        .success()
        .stdout("[loaded] 2 items\n  Bar\n  Bing\n");
}

#[test]
fn test_gesture_before_settle_is_dropped() {
    let temp_dir = TempDir::new().unwrap();

    loadlist(&temp_dir)
        .args(["load", "delete:0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[loaded] 5 items"))
        .stdout(predicate::str::contains("Foo"));
}

#[test]
fn test_failure_is_reported_as_state() {
    let temp_dir = TempDir::new().unwrap();

    loadlist(&temp_dir)
        .args(["--fail", "repository unavailable", "load"])
        .assert()
        .success()
        .stdout("[failed] repository unavailable\n");
}

#[test]
fn test_json_output() {
    let temp_dir = TempDir::new().unwrap();

    let output = loadlist(&temp_dir)
        .args(["--format", "json", "load"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["items"]["phase"], "loaded");
    assert_eq!(json["items"]["data"].as_array().unwrap().len(), 5);
    assert_eq!(json["latest_load"], 1);
}

#[test]
fn test_watch_prints_every_commit() {
    let temp_dir = TempDir::new().unwrap();

    loadlist(&temp_dir)
        .args(["--watch", "delete:0", "load"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 row_delete -> not_requested"))
        .stdout(predicate::str::contains("#2 repository_load -> loading"))
        .stdout(predicate::str::contains(
            "#3 repository_loading_complete -> loaded",
        ));
}

#[test]
fn test_invalid_step_exits_with_code_3() {
    let temp_dir = TempDir::new().unwrap();

    loadlist(&temp_dir)
        .args(["load", "shuffle"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Unknown step 'shuffle'"));
}

#[test]
fn test_out_of_range_gesture_keeps_list() {
    let temp_dir = TempDir::new().unwrap();

    loadlist(&temp_dir)
        .args(["load", "wait", "delete:7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[loaded] 5 items"))
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_config_file_sets_failure() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[fetch]\ndelay = \"10ms\"\nfail_with = \"from config\"\n",
    )
    .unwrap();

    Command::cargo_bin("loadlist")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .arg("load")
        .assert()
        .success()
        .stdout("[failed] from config\n");
}

#[test]
fn test_invalid_config_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[store]\nevent_capacity = 0\n").unwrap();

    Command::cargo_bin("loadlist")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("event_capacity"));
}
