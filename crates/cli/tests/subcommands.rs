use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[allow(deprecated)]
fn engage() -> Command {
    let mut cmd = Command::cargo_bin("engage").expect("binary");
    cmd.env_remove("ENGAGE_CONFIG");
    cmd
}

#[test]
fn score_prints_label_and_feedback() {
    let temp = tempdir().unwrap();
    engage()
        .current_dir(temp.path())
        .args(["score", "Terrible service, rude staff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-5 (Very Negative)"))
        .stdout(predicate::str::contains(
            "This review expresses significant concerns",
        ));
}

#[test]
fn score_reads_stdin() {
    let temp = tempdir().unwrap();
    engage()
        .current_dir(temp.path())
        .arg("score")
        .write_stdin("good coffee")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 (Very Positive)"));
}

#[test]
fn score_reads_file_and_explains() {
    let temp = tempdir().unwrap();
    let review = temp.path().join("review.txt");
    fs::write(&review, "Amazing pastries").unwrap();
    engage()
        .current_dir(temp.path())
        .args(["score", "--explain", "--file"])
        .arg(&review)
        .assert()
        .success()
        .stdout(predicate::str::contains("boost: amazing"));
}

#[test]
fn score_json_is_a_command_response() {
    let temp = tempdir().unwrap();
    let output = engage()
        .current_dir(temp.path())
        .args(["score", "--json", ""])
        .output()
        .unwrap();
    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["data"]["score"], 0.0);
    assert_eq!(body["data"]["label"], "neutral");
}

#[test]
fn authorize_allows_public_read() {
    engage()
        .args(["authorize", "--operation", "list_events"])
        .assert()
        .success()
        .stdout(predicate::str::contains("allowed: list_events"));
}

#[test]
fn authorize_denies_anonymous_mutation() {
    engage()
        .args(["authorize", "--operation", "create_post"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "You must be logged in to perform this action",
        ));
}

#[test]
fn authorize_owner_check() {
    engage()
        .args([
            "authorize",
            "--operation",
            "update_deal",
            "--actor-id",
            "o-1",
            "--role",
            "business_owner",
            "--owner",
            "o-1",
        ])
        .assert()
        .success();

    engage()
        .args([
            "authorize",
            "--operation",
            "update_deal",
            "--actor-id",
            "o-2",
            "--role",
            "business_owner",
            "--owner",
            "o-1",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not_owner"));
}

#[test]
fn authorize_rejects_unknown_role() {
    engage()
        .args([
            "authorize",
            "--operation",
            "create_post",
            "--actor-id",
            "u-1",
            "--role",
            "mayor",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown role: mayor"));
}

#[test]
fn authorize_requires_role_with_actor_id() {
    engage()
        .args(["authorize", "--operation", "create_post", "--actor-id", "u-1"])
        .assert()
        .failure();
}

#[test]
fn operations_lists_catalog() {
    engage()
        .arg("operations")
        .assert()
        .success()
        .stdout(predicate::str::contains("create_review"))
        .stdout(predicate::str::contains("no_self_review"));
}

#[test]
fn invalid_config_file_fails_fast() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("bad.toml");
    fs::write(&config, "[sentiment]\nscale = -1.0\n").unwrap();
    engage()
        .arg("--config")
        .arg(&config)
        .args(["score", "fine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid sentiment configuration"));
}

#[test]
fn missing_explicit_config_fails() {
    let temp = tempdir().unwrap();
    engage()
        .arg("--config")
        .arg(temp.path().join("absent.toml"))
        .args(["score", "fine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}
