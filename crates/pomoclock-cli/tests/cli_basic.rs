//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn cli() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["run", "-q", "-p", "pomoclock-cli", "--"])
        .env("POMOCLOCK_ENV", "dev");
    cmd
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = cli()
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run the built binary directly with `home` as the home directory.
fn run_in_home(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_pomoclock"))
        .args(args)
        .env("HOME", home)
        .env("POMOCLOCK_ENV", "dev")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI binary");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Run the interactive clock with `input` piped to stdin.
fn run_interactive(input: &str) -> (String, i32) {
    let mut child = cli()
        .args(["run", "--silent"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait for CLI");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

#[test]
fn test_format_pads_minutes_and_seconds() {
    let (stdout, _, code) = run_cli(&["format", "65"]);
    assert_eq!(code, 0, "format failed");
    assert_eq!(stdout.trim(), "01:05");

    let (stdout, _, _) = run_cli(&["format", "3599"]);
    assert_eq!(stdout.trim(), "59:59");
}

#[test]
fn test_format_rejects_negative_input() {
    let (_, _, code) = run_cli(&["format", "-5"]);
    assert_ne!(code, 0);
}

#[test]
fn test_status_prints_default_snapshot() {
    let (stdout, _, code) = run_cli(&["status"]);
    assert_eq!(code, 0, "status failed");
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("status is JSON");
    assert_eq!(json["phase"], "Session");
    assert_eq!(json["remainingSeconds"], 1500);
    assert_eq!(json["running"], false);
    assert_eq!(json["sessionLength"], 25);
    assert_eq!(json["breakLength"], 5);
}

#[test]
fn test_config_get_known_key() {
    let (stdout, _, code) = run_cli(&["config", "get", "clock.tick_interval_ms"]);
    assert_eq!(code, 0, "config get failed");
    assert!(stdout.trim().parse::<u64>().is_ok());
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "clock.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_interactive_length_edits() {
    let (stdout, code) = run_interactive("s+\nb-\nq\n");
    assert_eq!(code, 0, "run failed");
    assert!(stdout.contains("Session 25:00 [paused] session=25 break=5"));
    assert!(stdout.contains("Session 26:00 [paused] session=26 break=5"));
    assert!(stdout.contains("Session 04:00 [paused] session=26 break=4"));
}

#[test]
fn test_interactive_reset_after_edits() {
    let (stdout, code) = run_interactive("s-\ns-\nr\n");
    assert_eq!(code, 0, "run failed");
    assert!(stdout.contains("Session 23:00 [paused] session=23 break=5"));
    let last = stdout.lines().last().unwrap_or_default();
    assert_eq!(last, "Session 25:00 [paused] session=25 break=5");
}

#[test]
fn test_read_only_commands_do_not_write_config() {
    let home = tempfile::tempdir().unwrap();
    let config_file = home.path().join(".config/pomoclock-dev/config.toml");

    for args in [&["format", "5"][..], &["status"][..], &["completions", "bash"][..]] {
        let (_, _, code) = run_in_home(home.path(), args);
        assert_eq!(code, 0, "{args:?} failed");
    }
    assert!(!config_file.exists());
}

#[test]
fn test_invalid_config_warns_and_falls_back() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join(".config/pomoclock-dev");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[clock\n").unwrap();

    let (stdout, stderr, code) = run_in_home(home.path(), &["format", "600"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "10:00");
    assert!(stderr.contains("ignoring invalid config"), "stderr: {stderr}");
}
