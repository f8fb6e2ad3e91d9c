//! CLI integration tests

use std::process::{Command, Output};

fn opsc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_opsc"))
        .args(args)
        .env_remove("OPSC_API_URL")
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = opsc(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("Ops Copilot"), "Should show app name");
    for command in [
        "chat", "alerts", "configs", "analyze", "config", "fix", "tools", "generate",
    ] {
        assert!(stdout.contains(command), "Should show {} command", command);
    }
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = opsc(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("opsc"), "Should show binary name");
}

/// Test alerts subcommand help
#[test]
fn test_alerts_help() {
    let output = opsc(&["alerts", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Alerts help should succeed");
    assert!(stdout.contains("--severity"), "Should show severity option");
    assert!(stdout.contains("--status"), "Should show status option");
}

/// Test fix subcommand help
#[test]
fn test_fix_help() {
    let output = opsc(&["fix", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Fix help should succeed");
    assert!(stdout.contains("<ISSUE_TYPE>"), "Should show issue argument");
    assert!(stdout.contains("<RESOURCE_TYPE>"), "Should show resource argument");
}

/// Test generate subcommand help
#[test]
fn test_generate_help() {
    let output = opsc(&["generate", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Generate help should succeed");
    assert!(stdout.contains("--data-dir"), "Should show data-dir option");
    assert!(stdout.contains("--count"), "Should show count option");
}

/// Test that generate writes a complete data directory
#[test]
fn test_generate_writes_fixtures() {
    let dir = tempfile::TempDir::new().unwrap();
    let data_dir = dir.path().join("data");

    let output = opsc(&[
        "generate",
        "--data-dir",
        data_dir.to_str().unwrap(),
        "--count",
        "4",
    ]);

    assert!(output.status.success(), "Generate should succeed");
    assert!(data_dir.join("logs.json").exists());
    assert!(data_dir.join("configs.json").exists());
    assert!(data_dir.join("templates").join("vm_resize.bicep").exists());
    assert!(data_dir.join("templates").join("sql_scale.sh").exists());

    let logs: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(data_dir.join("logs.json")).unwrap())
            .unwrap();
    assert_eq!(logs.as_array().unwrap().len(), 4);
}

/// Test format option
#[test]
fn test_format_option() {
    let output = opsc(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("table"), "Should show table format");
    assert!(stdout.contains("json"), "Should show json format");
}

/// Test api-url option
#[test]
fn test_api_url_option() {
    let output = opsc(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--api-url"), "Should show api-url option");
    assert!(stdout.contains("OPSC_API_URL"), "Should show env var");
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = opsc(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid"),
        "Should show error message"
    );
}

/// Test missing required argument error handling
#[test]
fn test_missing_argument() {
    let output = opsc(&["analyze"]);

    assert!(!output.status.success(), "Missing argument should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("required") || stderr.contains("error"),
        "Should show error about missing argument"
    );
}

/// Test that an unreachable server is reported as an error
#[test]
fn test_unreachable_server() {
    let output = opsc(&["--api-url", "http://127.0.0.1:9", "tools"]);

    assert!(!output.status.success(), "Unreachable server should fail");
}
