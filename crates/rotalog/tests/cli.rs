//! End-to-end tests for the rotalog binary

use assert_cmd::cargo::CommandCargoExt;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Stdio;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn rotalog(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rotalog").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn files_with_suffix(dir: &Path, suffix: &str) -> Vec<std::path::PathBuf> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.is_file() && p.to_string_lossy().ends_with(suffix))
        .collect();
    files.sort();
    files
}

#[test]
fn test_demo_rotates_and_archives() {
    let dir = TempDir::new().unwrap();

    rotalog(dir.path())
        .args([
            "demo",
            "--records",
            "7",
            "--pause-every",
            "0",
            "--max-lines",
            "3",
            "--prefix",
            "sample",
            "--dir",
            "logs",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged 7 records"));

    let logs = dir.path().join("logs");
    let archived = files_with_suffix(&logs.join("archive"), ".log.gz");
    assert_eq!(archived.len(), 2);

    let active = files_with_suffix(&logs, ".log");
    assert_eq!(active.len(), 1);
    assert_eq!(fs::read_to_string(&active[0]).unwrap(), "6 Sample Name 6\n");
}

#[test]
fn test_pipe_then_list_and_cat() {
    let dir = TempDir::new().unwrap();

    rotalog(dir.path())
        .args(["pipe", "--max-lines", "2", "--dir", "logs", "--format", "json"])
        .write_stdin("alpha\nbeta\ngamma\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged 3 lines"));

    rotalog(dir.path())
        .args(["list", "--dir", "logs", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"archived\"").and(predicate::str::contains("\"active\"")));

    let archived = files_with_suffix(&dir.path().join("logs").join("archive"), ".gz");
    assert_eq!(archived.len(), 1);

    rotalog(dir.path())
        .arg("cat")
        .arg(&archived[0])
        .assert()
        .success()
        .stdout("\"alpha\"\n\"beta\"\n");
}

#[test]
fn test_config_file_in_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("rotalog.toml"),
        "log_dir = \"from-config\"\nprefix = \"cfg\"\nmax_lines = 50\n",
    )
    .unwrap();

    rotalog(dir.path())
        .args(["demo", "--records", "3", "--pause-every", "0"])
        .assert()
        .success();

    let active = files_with_suffix(&dir.path().join("from-config"), ".log");
    assert_eq!(active.len(), 1);
    let name = active[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("cfg_"));
}

#[test]
fn test_unsupported_format_rejected() {
    let dir = TempDir::new().unwrap();

    rotalog(dir.path())
        .args(["demo", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported log format: xml"));
}

#[test]
fn test_invalid_config_value_fails() {
    let dir = TempDir::new().unwrap();

    rotalog(dir.path())
        .args(["demo", "--records", "1", "--max-lines", "0", "--dir", "logs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_lines must be greater than zero"));
}

#[test]
fn test_cat_missing_archive() {
    let dir = TempDir::new().unwrap();

    rotalog(dir.path())
        .args(["cat", "missing.log.gz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read archive"));
}

#[test]
fn test_pipe_reports_interval_failure_while_idle() {
    let dir = TempDir::new().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir_all(&logs).unwrap();
    // A file where the archive directory should be makes every archive fail
    fs::write(logs.join("archive"), b"").unwrap();

    let mut child = std::process::Command::cargo_bin("rotalog")
        .unwrap()
        .current_dir(dir.path())
        .args(["pipe", "--dir", "logs", "--interval-secs", "1"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // Keep stdin open and silent past the first interval
    let stdin = child.stdin.take().unwrap();
    thread::sleep(Duration::from_millis(1600));
    drop(stdin);

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("interval rotation failed at"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_pipe_accepts_invalid_utf8() {
    let dir = TempDir::new().unwrap();

    rotalog(dir.path())
        .args(["pipe", "--dir", "logs", "--prefix", "raw"])
        .write_stdin(&b"ok\n\xff\xfe\nend"[..])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged 3 lines"));

    let active = files_with_suffix(&dir.path().join("logs"), ".log");
    assert_eq!(active.len(), 1);
    assert_eq!(
        fs::read_to_string(&active[0]).unwrap(),
        "ok\n\u{FFFD}\u{FFFD}\nend\n"
    );
}
