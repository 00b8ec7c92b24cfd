//! Command-line behaviour that needs no authority.

use assert_cmd::Command;
use predicates::prelude::*;

fn freeland(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("freeland").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("FREELAND_AUTHORITY")
        .env("RUST_LOG", "off")
        .arg("--config")
        .arg(dir.path().join("config.toml"));
    cmd
}

#[test]
fn enroll_writes_identity_record() {
    let dir = tempfile::tempdir().unwrap();

    freeland(&dir)
        .args(["enroll", "--uname", "bob", "--uuid", "uuid-123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bob"));

    let record = std::fs::read_to_string(dir.path().join(".freeland.conf")).unwrap();
    assert_eq!(record, "bob\nuuid-123\n");
}

#[test]
fn enroll_needs_both_fields() {
    let dir = tempfile::tempdir().unwrap();

    freeland(&dir)
        .args(["enroll", "--uname", "bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--uuid"));

    assert!(!dir.path().join(".freeland.conf").exists());
}

#[test]
fn check_without_identity_fails_before_network() {
    let dir = tempfile::tempdir().unwrap();

    freeland(&dir)
        // Unroutable documentation address: any dial would hang, not fail fast.
        .args(["--authority", "192.0.2.1", "check"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .failure()
        .stderr(predicate::str::contains("freeland enroll"));

    assert!(!dir.path().join(".config.json").exists());
}

#[test]
fn config_set_then_show() {
    let dir = tempfile::tempdir().unwrap();

    freeland(&dir)
        .args(["config", "set", "authority_host", "auth.example"])
        .assert()
        .success();

    freeland(&dir)
        .args(["-o", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"authority_host\": \"auth.example\""));
}

#[test]
fn config_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();

    freeland(&dir)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn config_path_reports_override() {
    let dir = tempfile::tempdir().unwrap();

    freeland(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
