//! CLI integration tests

use std::process::Command;

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "eco-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("EMR cost optimizer"),
        "Should show app description"
    );
    assert!(stdout.contains("analyze"), "Should show analyze command");
    assert!(stdout.contains("clusters"), "Should show clusters command");
    assert!(stdout.contains("history"), "Should show history command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = Command::new("cargo")
        .args(["run", "-p", "eco-cli", "--", "--version"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("eco"), "Should show binary name");
}

/// Test analyze subcommand help
#[test]
fn test_analyze_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "eco-cli", "--", "analyze", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Analyze help should succeed");
    assert!(stdout.contains("--cluster"), "Should show cluster option");
    assert!(
        stdout.contains("--no-record"),
        "Should show no-record option"
    );
}

/// Test history subcommand help
#[test]
fn test_history_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "eco-cli", "--", "history", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "History help should succeed");
    assert!(stdout.contains("--limit"), "Should show limit option");
}

/// Test global options
#[test]
fn test_global_options() {
    let output = Command::new("cargo")
        .args(["run", "-p", "eco-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("table"), "Should show table format");
    assert!(stdout.contains("json"), "Should show json format");
    assert!(stdout.contains("--data-dir"), "Should show data-dir option");
    assert!(stdout.contains("ECO_DATA_DIR"), "Should show env var");
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = Command::new("cargo")
        .args(["run", "-p", "eco-cli", "--", "invalid-command"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid"),
        "Should show error message"
    );
}

/// Test analyze against a missing snapshot directory
#[test]
fn test_analyze_missing_snapshot() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = Command::new("cargo")
        .args([
            "run",
            "-p",
            "eco-cli",
            "--",
            "--data-dir",
            dir.path().to_str().unwrap(),
            "analyze",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(
        !output.status.success(),
        "Analyze without clusters.json should fail"
    );
}
