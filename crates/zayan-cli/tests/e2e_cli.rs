//! E2E CLI tests covering:
//! - Read-only views of the seeded dashboard (`zhq board/agents/projects/feed`)
//! - The credential check (`zhq login`) with env, stdin and config overrides
//! - Config error reporting and shell completions
//!
//! Each test runs `zhq` as a subprocess with its config directory pointed
//! at an empty temp dir, so the user's own config is never read.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// SHA-256 of "hunter2".
const HUNTER2_SHA256: &str = "f52fbd32b2b3b86ff88ef6c490628285f482af15ddcb29541f94bcf526a3f6c7";

/// Build a Command targeting the zhq binary, isolated from user config.
fn zhq_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("zhq"));
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd.env("HOME", config_home);
    cmd.env("ZAYAN_LOG", "error");
    cmd.env_remove("ZAYAN_HQ_CONFIG");
    cmd.env_remove("ZAYAN_HQ_PASSWORD");
    cmd.env_remove("FORMAT");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("zhq should not crash");
    assert!(
        output.status.success(),
        "zhq failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("--json should produce valid JSON")
}

// ---------------------------------------------------------------------------
// Read-only views
// ---------------------------------------------------------------------------

#[test]
fn board_json_has_five_columns_in_order() {
    let home = TempDir::new().expect("tempdir");
    let json = json_stdout(zhq_cmd(home.path()).args(["board", "--json"]));

    let statuses: Vec<&str> = json["columns"]
        .as_array()
        .expect("columns array")
        .iter()
        .map(|c| c["status"].as_str().expect("status"))
        .collect();
    assert_eq!(statuses, ["backlog", "todo", "in_progress", "review", "done"]);
    assert_eq!(json["stats"]["total"], 3);
    assert_eq!(json["stats"]["done"], 1);
    assert_eq!(json["columns"][0]["tasks"][0]["title"], "API Authentication");
    assert_eq!(json["columns"][0]["tasks"][0]["assignee"], "⚙️ Atlas");
}

#[test]
fn board_filter_on_unknown_project_keeps_header_counts() {
    let home = TempDir::new().expect("tempdir");
    let json = json_stdout(zhq_cmd(home.path()).args(["board", "--project", "nope", "--json"]));

    assert_eq!(json["project"], "nope");
    assert_eq!(json["stats"]["total"], 3);
    for column in json["columns"].as_array().expect("columns") {
        assert!(column["tasks"].as_array().expect("tasks").is_empty());
    }
}

#[test]
fn board_text_lists_one_task_per_line() {
    let home = TempDir::new().expect("tempdir");
    zhq_cmd(home.path())
        .args(["--format", "text", "board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backlog  3  high  backend  API Authentication"))
        .stdout(predicate::str::contains("done  1  high  zayan  Setup projet Next.js"));
}

#[test]
fn board_status_filter_keeps_one_column() {
    let home = TempDir::new().expect("tempdir");
    let json = json_stdout(zhq_cmd(home.path()).args(["board", "--status", "Done", "--json"]));

    let columns = json["columns"].as_array().expect("columns");
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0]["status"], "done");
    assert_eq!(columns[0]["tasks"][0]["id"], "1");
    assert_eq!(json["stats"]["total"], 3);
}

#[test]
fn board_rejects_unknown_status_with_e2004() {
    let home = TempDir::new().expect("tempdir");
    let output = zhq_cmd(home.path())
        .args(["board", "--status", "archived", "--json"])
        .output()
        .expect("zhq should not crash");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("E2004"), "stderr: {stderr}");
    assert!(stderr.contains("backlog, todo, in_progress, review, done"));
}

#[test]
fn board_rejects_unknown_priority_in_text_mode() {
    let home = TempDir::new().expect("tempdir");
    zhq_cmd(home.path())
        .args(["--format", "text", "board", "--priority", "critical"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: invalid priority: 'critical'"))
        .stderr(predicate::str::contains("low, medium, high, urgent"));
}

#[test]
fn agents_json_lists_the_team() {
    let home = TempDir::new().expect("tempdir");
    let json = json_stdout(zhq_cmd(home.path()).args(["agents", "--json"]));
    let ids: Vec<&str> = json
        .as_array()
        .expect("agents array")
        .iter()
        .map(|a| a["id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids, ["zayan", "frontend", "backend", "devops", "qa"]);
    assert_eq!(json[0]["status"], "idle");
}

#[test]
fn agents_status_filter() {
    let home = TempDir::new().expect("tempdir");
    let json = json_stdout(zhq_cmd(home.path()).args(["agents", "-s", "working", "--json"]));
    assert!(json.as_array().expect("agents array").is_empty());

    zhq_cmd(home.path())
        .args(["--format", "text", "agents", "--status", "busy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid agent status"));
}

#[test]
fn projects_pretty_shows_signlink() {
    let home = TempDir::new().expect("tempdir");
    zhq_cmd(home.path())
        .args(["--format", "pretty", "projects"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SignLink"));
}

#[test]
fn feed_json_starts_with_welcome_entry() {
    let home = TempDir::new().expect("tempdir");
    let json = json_stdout(zhq_cmd(home.path()).args(["feed", "-n", "5", "--json"]));
    assert_eq!(json[0]["message"], "Dashboard Zayan HQ initialisé");
    assert_eq!(json[0]["type"], "message");
    assert_eq!(json[0]["agentId"], "zayan");
}

#[test]
fn feed_type_filter() {
    let home = TempDir::new().expect("tempdir");
    let json = json_stdout(zhq_cmd(home.path()).args(["feed", "--type", "commit", "--json"]));
    assert!(json.as_array().expect("feed array").is_empty());

    let output = zhq_cmd(home.path())
        .args(["--json", "feed", "--type", "push"])
        .output()
        .expect("zhq should not crash");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("E2004"));
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[test]
fn login_with_default_account_from_env() {
    let home = TempDir::new().expect("tempdir");
    let json = json_stdout(
        zhq_cmd(home.path())
            .env("ZAYAN_HQ_PASSWORD", "ZayanHQ2026")
            .args(["login", "--username", "clement", "--json"]),
    );
    assert_eq!(json["name"], "Clément");
    assert_eq!(json["email"], "clement@zayan-hq.local");
}

#[test]
fn login_reads_password_from_stdin() {
    let home = TempDir::new().expect("tempdir");
    zhq_cmd(home.path())
        .args(["--format", "text", "login", "-u", "clement", "--password-stdin"])
        .write_stdin("ZayanHQ2026\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Clément"));
}

#[test]
fn wrong_password_fails_without_saying_which_part() {
    let home = TempDir::new().expect("tempdir");
    let output = zhq_cmd(home.path())
        .env("ZAYAN_HQ_PASSWORD", "wrong")
        .args(["login", "-u", "clement", "--json"])
        .output()
        .expect("zhq should not crash");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("E1001"), "stderr: {stderr}");
    assert!(stderr.contains("Invalid credentials"));
}

#[test]
fn unknown_user_gets_the_same_error() {
    let home = TempDir::new().expect("tempdir");
    zhq_cmd(home.path())
        .env("ZAYAN_HQ_PASSWORD", "ZayanHQ2026")
        .args(["--format", "text", "login", "-u", "mallory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: Invalid credentials"));
}

#[test]
fn login_without_password_source_fails() {
    let home = TempDir::new().expect("tempdir");
    zhq_cmd(home.path())
        .args(["--format", "text", "login", "-u", "clement"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ZAYAN_HQ_PASSWORD"));
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn config_file_replaces_the_account() {
    let home = TempDir::new().expect("tempdir");
    let config = home.path().join("custom.toml");
    std::fs::write(
        &config,
        format!(
            "[auth]\nusername = \"alice\"\npassword_sha256 = \"{HUNTER2_SHA256}\"\ndisplay_name = \"Alice\"\n"
        ),
    )
    .expect("write config");

    let json = json_stdout(
        zhq_cmd(home.path())
            .env("ZAYAN_HQ_PASSWORD", "hunter2")
            .arg("--config")
            .arg(&config)
            .args(["login", "-u", "alice", "--json"]),
    );
    assert_eq!(json["name"], "Alice");

    // The built-in account no longer works.
    zhq_cmd(home.path())
        .env("ZAYAN_HQ_PASSWORD", "ZayanHQ2026")
        .arg("--config")
        .arg(&config)
        .args(["login", "-u", "clement"])
        .assert()
        .failure();
}

#[test]
fn config_env_var_is_honoured() {
    let home = TempDir::new().expect("tempdir");
    let config = home.path().join("env.toml");
    std::fs::write(&config, "[output]\nformat = \"json\"\n").expect("write config");

    let output = zhq_cmd(home.path())
        .env("ZAYAN_HQ_CONFIG", &config)
        .arg("agents")
        .output()
        .expect("zhq should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("config format is json");
    assert!(json.is_array());
}

#[test]
fn missing_explicit_config_is_an_error() {
    let home = TempDir::new().expect("tempdir");
    zhq_cmd(home.path())
        .args(["--format", "text", "--config"])
        .arg(home.path().join("absent.toml"))
        .arg("board")
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn malformed_config_reports_parse_code() {
    let home = TempDir::new().expect("tempdir");
    let config = home.path().join("bad.toml");
    std::fs::write(&config, "[timing]\ntick_ms = \"soon\"\n").expect("write config");

    let output = zhq_cmd(home.path())
        .arg("--json")
        .arg("--config")
        .arg(&config)
        .arg("board")
        .output()
        .expect("zhq should not crash");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("E1003"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// Completions
// ---------------------------------------------------------------------------

#[test]
fn bash_completions_mention_subcommands() {
    let home = TempDir::new().expect("tempdir");
    zhq_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zhq"))
        .stdout(predicate::str::contains("board"));
}
