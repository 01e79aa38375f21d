//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data
//! directory and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "deepflow-cli", "--"])
        .args(args)
        .env("DEEPFLOW_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_task_add_list_toggle_delete() {
    let (stdout, _, code) = run_cli(&["task", "add", "E2E roundtrip task", "--tag", "dev"]);
    assert_eq!(code, 0, "Task add failed");
    assert!(stdout.contains("Task added:"));

    let (stdout, _, code) = run_cli(&["task", "list"]);
    assert_eq!(code, 0, "Task list failed");
    let tasks: serde_json::Value = serde_json::from_str(&stdout).expect("task list JSON");
    let id = tasks
        .as_array()
        .and_then(|arr| arr.iter().find(|t| t["title"] == "E2E roundtrip task"))
        .and_then(|t| t["id"].as_str())
        .expect("created task present")
        .to_string();

    let (stdout, _, code) = run_cli(&["task", "toggle", &id]);
    assert_eq!(code, 0, "Task toggle failed");
    let toggled: serde_json::Value = serde_json::from_str(&stdout).expect("toggle JSON");
    assert_eq!(toggled["completed"], true);

    let (stdout, _, code) = run_cli(&["task", "delete", &id]);
    assert_eq!(code, 0, "Task delete failed");
    assert!(stdout.contains("Task deleted:"));
}

#[test]
fn test_task_add_rejects_empty_title() {
    let (_, stderr, code) = run_cli(&["task", "add", "   "]);
    assert_ne!(code, 0, "Empty title unexpectedly accepted");
    assert!(stderr.contains("title"));
}

#[test]
fn test_task_toggle_unknown_id_fails() {
    let (_, stderr, code) = run_cli(&["task", "toggle", "task-0-missing"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Task not found"));
}

#[test]
fn test_stats_today() {
    let (stdout, _, code) = run_cli(&["stats", "today"]);
    assert_eq!(code, 0, "Stats today failed");
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("stats JSON");
    assert!(report["focus_sessions"].is_number());
    assert!(report["focus_minutes"].is_number());
}

#[test]
fn test_stats_week_has_seven_bins() {
    let (stdout, _, code) = run_cli(&["stats", "week"]);
    assert_eq!(code, 0, "Stats week failed");
    let histogram: serde_json::Value = serde_json::from_str(&stdout).expect("histogram JSON");
    assert_eq!(histogram["bins"].as_array().map(|b| b.len()), Some(7));
    assert!(histogram["peak"].as_u64().unwrap_or(0) >= 1);
}

#[test]
fn test_stats_streak_prints_number() {
    let (stdout, _, code) = run_cli(&["stats", "streak"]);
    assert_eq!(code, 0, "Stats streak failed");
    assert!(stdout.trim().parse::<u32>().is_ok());
}

#[test]
fn test_stats_goal() {
    let (stdout, _, code) = run_cli(&["stats", "goal"]);
    assert_eq!(code, 0, "Stats goal failed");
    let goal: serde_json::Value = serde_json::from_str(&stdout).expect("goal JSON");
    assert!(goal["goal"].as_u64().unwrap_or(0) >= 1);
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "durations.focus_min"]);
    assert_eq!(code, 0, "Config get failed");
    assert!(stdout.trim().parse::<u32>().is_ok());
}

#[test]
fn test_config_set_and_reset() {
    let (stdout, _, code) = run_cli(&["config", "set", "goal.daily_sessions", "6"]);
    assert_eq!(code, 0, "Config set failed");
    assert!(stdout.contains("ok"));

    let (stdout, _, code) = run_cli(&["config", "get", "goal.daily_sessions"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "6");

    let (_, _, code) = run_cli(&["config", "reset"]);
    assert_eq!(code, 0, "Config reset failed");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "durations.bogus"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    let config: serde_json::Value = serde_json::from_str(&stdout).expect("config JSON");
    assert!(config["durations"]["focus_min"].is_number());
}
