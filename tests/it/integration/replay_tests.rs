//! The `replay` binary run against trace files.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const DRAG_TRACE: &str = r#"{
  "interactables": [
    { "surface": 7, "actions": ["drag"], "drag": { "lock_axis": "x" } }
  ],
  "events": [
    { "kind": "down", "pointer_id": 1, "page": {"x": 0, "y": 0}, "client": {"x": 0, "y": 0}, "timestamp": 0, "target": 0 },
    { "kind": "move", "pointer_id": 1, "page": {"x": 5, "y": 3}, "client": {"x": 5, "y": 3}, "timestamp": 16 },
    { "kind": "move", "pointer_id": 1, "page": {"x": 10, "y": 6}, "client": {"x": 10, "y": 6}, "timestamp": 32 },
    { "kind": "up", "pointer_id": 1, "page": {"x": 10, "y": 6}, "client": {"x": 10, "y": 6}, "timestamp": 48 }
  ]
}"#;

fn run_replay(args: &[&Path], extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_replay"))
        .args(args)
        .args(extra)
        .env("RUST_LOG", "off")
        .output()
        .expect("replay binary runs")
}

fn event_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect()
}

#[test]
fn test_replay_prints_one_line_per_event() {
    let dir = TempDir::new().unwrap();
    let trace = dir.path().join("drag.json");
    fs::write(&trace, DRAG_TRACE).unwrap();

    let output = run_replay(&[trace.as_path()], &[]);
    assert!(output.status.success());

    let events = event_lines(&output);
    let types: Vec<&str> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(types, vec!["dragstart", "dragmove", "dragmove", "dragend"]);

    // Locked to x: y stays at the start
    assert_eq!(events[2]["page"]["y"], 0.0);
    assert_eq!(events[2]["axis"], "x");
}

#[test]
fn test_replay_rejects_missing_trace() {
    let dir = TempDir::new().unwrap();
    let output = run_replay(&[dir.path().join("absent.json").as_path()], &[]);
    assert!(!output.status.success());
}

#[test]
fn test_replay_skips_misrouted_events() {
    let dir = TempDir::new().unwrap();
    let trace = dir.path().join("stray.json");
    fs::write(
        &trace,
        r#"{ "events": [
            { "kind": "move", "pointer_id": 4, "page": {"x": 1, "y": 1}, "client": {"x": 1, "y": 1}, "timestamp": 0 }
        ] }"#,
    )
    .unwrap();

    let output = run_replay(&[trace.as_path()], &["--timings"]);
    assert!(output.status.success());
    assert!(event_lines(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("move"));
}
