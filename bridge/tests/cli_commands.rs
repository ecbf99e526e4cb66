//! CLI tests for the bridge binary.
//!
//! Spawns the binary against a throwaway home and checks exit codes and
//! output for paths that never reach the real Exercism CLI.

use std::fs;
use std::process::Command;

use exercism_bridge::exit_codes;

fn bridge(home: &std::path::Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_exercism-bridge"));
    command.arg("--home").arg(home).env_remove("RUST_LOG");
    command
}

#[test]
fn download_rejects_foreign_command_silently() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = bridge(temp.path())
        .args(["download", "xyz download foo"])
        .output()
        .expect("run download");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(output.stdout.is_empty());
    assert!(!temp.path().join("settings.json").exists());
}

#[test]
fn submit_outside_exercise_is_a_no_op() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("plain");
    fs::create_dir_all(&root).expect("root");

    let output = bridge(&temp.path().join("home"))
        .arg("submit")
        .arg("--root")
        .arg(&root)
        .output()
        .expect("run submit");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_config_fails_with_context() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("config.toml"), "[cli]\nprogram = \"\"\n").expect("config");

    let output = bridge(temp.path())
        .args(["download", "exercism download --exercise=bob"])
        .output()
        .expect("run download");

    assert_eq!(output.status.code(), Some(exit_codes::FAILED));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config"), "stderr: {stderr}");
}

#[test]
fn corrupt_settings_fail_before_any_command_runs() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("settings.json"), "{not json").expect("settings");

    let output = bridge(temp.path())
        .args(["download", "xyz"])
        .output()
        .expect("run download");

    assert_eq!(output.status.code(), Some(exit_codes::FAILED));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parse settings"), "stderr: {stderr}");
}
