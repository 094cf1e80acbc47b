//! Integration tests for the `tf` CLI.
//!
//! Each test runs `tf` as a subprocess against the seeded in-memory store,
//! pinned to a fixed date with `--today`, and checks stdout.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq;

const TODAY: &str = "2024-01-01";

/// Get the path to the built `tf` binary.
fn tf_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tf");
    path
}

/// Run `tf --today 2024-01-01` with the given args, returning (stdout, stderr, success).
fn run_tf(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(tf_bin())
        .arg("--today")
        .arg(TODAY)
        .args(args)
        .output()
        .expect("failed to run tf");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tf` expecting success, return stdout.
fn run_tf_ok(args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tf(args);
    if !success {
        panic!("tf {:?} failed:\nstdout: {}\nstderr: {}", args, stdout, stderr);
    }
    stdout
}

/// Run `tf shell` feeding `script` on stdin, return stdout.
fn run_shell(script: &str) -> String {
    let mut child = Command::new(tf_bin())
        .args(["--today", TODAY, "shell"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run tf shell");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn json_ids(out: &str) -> Vec<String> {
    let parsed: serde_json::Value = serde_json::from_str(out).unwrap();
    parsed["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[test]
fn test_list_defaults_to_today() {
    let out = run_tf_ok(&["list"]);
    assert!(out.starts_with("== Today =="));
    assert!(out.contains("t1"));
    assert!(out.contains("Newsletter Draft"));
    assert!(!out.contains("Monthly Log"));
}

#[test]
fn test_list_views_json() {
    assert_eq!(json_ids(&run_tf_ok(&["list", "--view", "today", "--json"])), vec!["t1", "t4"]);
    assert_eq!(json_ids(&run_tf_ok(&["list", "--view", "upcoming", "--json"])), vec!["t2", "t3"]);
    assert_eq!(
        json_ids(&run_tf_ok(&["list", "--view", "inbox", "--json"])),
        vec!["t1", "t2", "t3", "t4"]
    );
}

#[test]
fn test_list_project() {
    let out = run_tf_ok(&["list", "--project", "p2", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["title"], "Work");
    assert_eq!(json_ids(&out), vec!["t4"]);
}

#[test]
fn test_list_search_overrides_project() {
    let out = run_tf_ok(&["list", "--project", "p2", "--search", "plan", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["title"], "Search");
    assert_eq!(json_ids(&out), vec!["t3"]);
}

#[test]
fn test_list_empty_states() {
    let out = run_tf_ok(&["list", "--search", "zzz"]);
    assert!(out.contains("No results found"));
    assert!(out.contains("\"zzz\""));

    let out = run_tf_ok(&["list", "--project", "p3"]);
    assert!(out.contains("All clear!"));

    let out = run_tf_ok(&["list", "--project", "p3", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["empty_state"]["kind"], "all_clear");
}

#[test]
fn test_list_unknown_view_fails() {
    let (_, stderr, success) = run_tf(&["list", "--view", "someday"]);
    assert!(!success);
    assert!(stderr.contains("unknown view 'someday'"));
}

// ---------------------------------------------------------------------------
// Quick-add
// ---------------------------------------------------------------------------

#[test]
fn test_parse_command() {
    let out = run_tf_ok(&["parse", "Call mom !!0 @tomorrow #Personal #Personal"]);
    assert_eq!(out, "priority: P1\ndate: Tomorrow (2024-01-02)\ntags: 1 (#Personal)\n");
}

#[test]
fn test_parse_command_json() {
    let out = run_tf_ok(&["parse", "Just text", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["priority"], 4);
    assert_eq!(parsed["date_label"], "Today");
    assert_eq!(parsed["date_value"], TODAY);
    assert_eq!(parsed["tag_count"], 0);
}

#[test]
fn test_add_with_pickers() {
    let out = run_tf_ok(&[
        "add", "Buy milk", "--priority", "2", "--date", "2024-02-03", "--tag", "Grocery", "--project", "p4",
        "--json",
    ]);
    let task: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(task["id"], "t5");
    assert_eq!(task["content"], "Buy milk !!2 @2024-02-03 #Grocery");
    assert_eq!(task["priority"], 3);
    assert_eq!(task["due_date"], "2024-02-03");
    assert_eq!(task["project"], "p4");
    assert_eq!(task["labels"][0], "Grocery");
}

#[test]
fn test_add_subtask() {
    let out = run_tf_ok(&["add", "Outline", "--parent", "t4", "--json"]);
    let task: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(task["parent_id"], "t4");
    assert_eq!(task["project"], "p2");
}

#[test]
fn test_add_blank_text_fails() {
    let (_, stderr, success) = run_tf(&["add", "   "]);
    assert!(!success);
    assert!(stderr.contains("task text is empty"));
}

#[test]
fn test_add_invalid_priority_rejected_by_clap() {
    let (_, _, success) = run_tf(&["add", "x", "--priority", "7"]);
    assert!(!success);
}

// ---------------------------------------------------------------------------
// Profile, goals, projects, stats
// ---------------------------------------------------------------------------

#[test]
fn test_projects() {
    let out = run_tf_ok(&["projects"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "== Favorites ==",
            "  MacStories (p1)",
            "  Work (p2)",
            "== Projects ==",
            "* MacStories (p1) #db4c3f [6]",
            "* Work (p2) #3182ce [2]",
            "  Personal (p3) #38a169 [0]",
            "  Shopping (p4) #d69e2e [4]",
        ]
    );
}

#[test]
fn test_goals_validation() {
    let out = run_tf_ok(&["goals", "--daily", "8", "--weekly", "40", "--json"]);
    let user: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(user["daily_goal"], 8);
    assert_eq!(user["weekly_goal"], 40);

    let (_, stderr, success) = run_tf(&["goals", "--daily", "8", "--weekly", "42"]);
    assert!(!success);
    assert!(stderr.contains("weekly goal 42"));
}

#[test]
fn test_toggle_and_stats() {
    let out = run_tf_ok(&["toggle", "t1"]);
    assert!(out.starts_with("[x] t1"));
    let (_, stderr, success) = run_tf(&["toggle", "t99"]);
    assert!(!success);
    assert!(stderr.contains("task not found: t99"));

    let out = run_tf_ok(&["stats", "--json"]);
    let stats: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(stats["karma"], 14904);
    assert_eq!(stats["week"].as_array().unwrap().len(), 7);
}

#[test]
fn test_config_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("taskflow.toml");
    std::fs::write(
        &path,
        "[user]\nname = \"Ada\"\n\n[ui]\ndefault_view = \"upcoming\"\n",
    )
    .unwrap();
    let path = path.to_str().unwrap();

    let out = run_tf_ok(&["--config", path, "list"]);
    assert!(out.starts_with("== Upcoming =="));
    let out = run_tf_ok(&["--config", path, "profile"]);
    assert!(out.starts_with("Ada <panos@example.com>"));

    let (_, stderr, success) = run_tf(&["--config", "/nonexistent/taskflow.toml", "list"]);
    assert!(!success);
    assert!(stderr.contains("could not read"));
}

#[test]
fn test_invalid_today() {
    let output = Command::new(tf_bin())
        .args(["--today", "2024-02-30", "list"])
        .output()
        .expect("failed to run tf");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid --today"));
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

#[test]
fn test_shell_keeps_state_for_the_session() {
    let out = run_shell("new\ntext Write tests #Work\npriority 0\nsubmit\nview today\ntoggle t5\nquit\n");
    assert!(out.contains("> Write tests #Work !!0"));
    assert!(out.contains("added [ ] t5 P1 Today      Write tests #Work !!0 #Work"));
    assert!(out.contains("[x] t5"));
}
