#![allow(deprecated)] // cargo_bin is deprecated but still functional

use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn ghup() -> Command {
    let mut cmd = Command::cargo_bin("ghup").unwrap();
    // Keep the environment from supplying a repository.
    cmd.env_remove("GHUP_REPOSITORY");
    cmd
}

#[test]
fn missing_repository_exits_one_with_message() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("shot.png");
    fs::write(&file, b"png").unwrap();

    ghup()
        .arg(&file)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("missing required argument: repository"));
}

#[test]
fn missing_file_exits_one_with_message() {
    ghup()
        .arg("--repo")
        .arg("owner/repo")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("missing required argument: file"));
}

#[test]
fn dry_run_reports_without_uploading() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("shot.png");
    fs::write(&file, b"0123456789").unwrap();

    ghup()
        .arg(&file)
        .arg("--repo")
        .arg("owner/repo")
        .arg("--dry")
        .assert()
        .success()
        .stdout(contains("Dry run: shot.png (10 B) would be uploaded to owner/repo"))
        .stdout(contains("dry-run://owner/repo/shot.png"));
}

#[test]
fn dry_run_markdown_embed() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("shot.png");
    fs::write(&file, b"png").unwrap();

    ghup()
        .arg(&file)
        .arg("-r")
        .arg("owner/repo")
        .arg("--dry")
        .arg("--markdown")
        .arg("--alt")
        .arg("A screenshot")
        .assert()
        .success()
        .stdout(contains("![A screenshot](dry-run://owner/repo/shot.png)"));
}

#[test]
fn unsupported_extension_exits_one() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("tool.exe");
    fs::write(&file, b"MZ").unwrap();

    ghup()
        .arg(&file)
        .arg("--repo")
        .arg("owner/repo")
        .arg("--dry")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unsupported file extension"));
}

#[test]
fn nonexistent_file_exits_one() {
    ghup()
        .arg("/does/not/exist.png")
        .arg("--repo")
        .arg("owner/repo")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("file not found"));
}

#[test]
fn invalid_repository_reference_exits_one() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("shot.png");
    fs::write(&file, b"png").unwrap();

    ghup()
        .arg(&file)
        .arg("--repo")
        .arg("a/b/c")
        .arg("--dry")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("invalid repository reference"));
}

#[test]
fn version_flag_exits_zero() {
    ghup().arg("--version").assert().success();
}

#[test]
fn help_flag_exits_zero() {
    ghup()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--repo"))
        .stdout(contains("--dry"));
}
