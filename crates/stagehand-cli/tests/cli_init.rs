use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn stagehand_cmd() -> Command {
    Command::cargo_bin("stagehand").unwrap()
}

#[test]
fn init_scaffolds_project_files() {
    let tmp = TempDir::new().unwrap();

    stagehand_cmd()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized stagehand project"));

    assert!(tmp.path().join("Publish.toml").is_file());
    assert!(tmp.path().join(".stagehand.env").is_file());
    assert!(tmp.path().join("HEADER").is_file());

    let manifest = fs::read_to_string(tmp.path().join("Publish.toml")).unwrap();
    assert!(manifest.contains("name = \"my-sdk\""));
    assert!(manifest.contains("id = \"Apache-2.0\""));
    assert!(manifest.contains("[[developers]]"));
    assert!(manifest.contains("${env:SIGNING_KEY}"));

    let env = fs::read_to_string(tmp.path().join(".stagehand.env")).unwrap();
    assert!(env.contains("repositoryUsername"));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Publish.toml"), "existing").unwrap();

    stagehand_cmd()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // Untouched without --force.
    assert_eq!(
        fs::read_to_string(tmp.path().join("Publish.toml")).unwrap(),
        "existing"
    );

    stagehand_cmd()
        .current_dir(tmp.path())
        .args(["init", "--force"])
        .assert()
        .success();

    let manifest = fs::read_to_string(tmp.path().join("Publish.toml")).unwrap();
    assert!(manifest.contains("[project]"));
}
