//! Integration tests for output formatting
//!
//! These run the built binary against the built-in sample data.

use std::path::PathBuf;
use std::process::{Command, Output};

fn geoprompt_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove 'deps' directory
    path.push("geoprompt");
    path
}

fn run(args: &[&str], cwd: &std::path::Path) -> Output {
    Command::new(geoprompt_bin())
        .args(args)
        .current_dir(cwd)
        .env_remove("GEOPROMPT_GENERATOR")
        .env_remove("GEOPROMPT_GEOCODER")
        .output()
        .expect("Failed to execute command")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

#[test]
fn test_catalog_json_is_valid() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["--json", "catalog"], dir.path());
    assert!(output.status.success(), "Command should succeed");

    let parsed = stdout_json(&output);
    assert_eq!(parsed["status"], "success");
    let entries = parsed["data"].as_array().expect("Should have data array");
    assert_eq!(entries.len(), 9);
    assert_eq!(entries[0]["keyword"], "tallest");
}

#[test]
fn test_ask_json_reports_layer() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["--demo", "--json", "ask", "show", "roads"], dir.path());
    assert!(output.status.success(), "Command should succeed");

    let parsed = stdout_json(&output);
    assert_eq!(parsed["data"]["reply"]["status"], "layer_added");
    assert_eq!(parsed["data"]["reply"]["feature_count"], 3);
    assert!(parsed["data"].get("export").is_none());
}

#[test]
fn test_ask_with_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("exports");
    let output = run(
        &["--demo", "--json", "ask", "show buildings", "--export", "csv", "--out", out.to_str().unwrap()],
        dir.path(),
    );
    assert!(output.status.success(), "Command should succeed");

    let parsed = stdout_json(&output);
    let path = PathBuf::from(parsed["data"]["export"]["path"].as_str().unwrap());
    assert!(path.starts_with(&out));
    assert!(path.extension().is_some_and(|ext| ext == "csv"));

    let text = std::fs::read_to_string(path).unwrap();
    assert_eq!(text.lines().count(), 5);
}

#[test]
fn test_center_on_place_without_data() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["--demo", "--json", "ask", "Center map on Tartu."], dir.path());
    assert!(output.status.success());

    let parsed = stdout_json(&output);
    assert_eq!(parsed["data"]["reply"]["status"], "centered");
    assert_eq!(parsed["data"]["reply"]["place"], "Tartu");
}

#[test]
fn test_config_shows_sources() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("geoprompt.toml"), "result_limit = 25\n").unwrap();

    let output = run(&["--json", "--data-dir", "elsewhere", "config"], dir.path());
    assert!(output.status.success());

    let parsed = stdout_json(&output);
    let rows = parsed["data"].as_array().unwrap();
    let row = |key: &str| rows.iter().find(|row| row["key"] == key).cloned().unwrap();

    assert_eq!(row("data_dir")["value"], "elsewhere");
    assert_eq!(row("data_dir")["source"], "cli");
    assert_eq!(row("result_limit")["value"], "25");
    assert_eq!(row("result_limit")["source"], "file");
}

#[test]
fn test_unknown_dataset_schema_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["--demo", "schema", "rivers"], dir.path());
    assert!(!output.status.success(), "Unknown dataset should fail");
}

#[test]
fn test_invalid_export_format_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["--demo", "ask", "show roads", "--export", "pdf"], dir.path());
    assert!(!output.status.success());
}

#[cfg(not(feature = "duckdb"))]
#[test]
fn test_dataset_query_without_engine_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["ask", "show roads"], dir.path());
    assert!(!output.status.success(), "Dataset queries need the duckdb feature");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--demo"), "stderr was: {}", stderr);
}
