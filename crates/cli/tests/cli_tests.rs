//! CLI integration tests

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run the CLI with `args`, isolated from any user config
fn nodeview(home: &Path, args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "-q", "-p", "nodeview-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .env_remove("NODEVIEW_CONFIG")
        .output()
        .expect("Failed to execute command")
}

const FLEET: &str = r#"[
    {"name": "render-01", "clusterName": "General", "state": "UP", "lockState": "OPEN",
     "totalCores": 8, "idleCores": 2, "bootTime": 1700000000, "platform": "Linux",
     "cpuModel": "Xeon 3.0Ghz", "totalRamMb": 16384, "freeRamMb": 1024,
     "totalSwapMb": 8192, "freeSwapMb": 8192},
    {"name": "render-02", "clusterName": "General", "state": "DOWN", "lockState": "LOCKED",
     "totalCores": 4, "idleCores": 1, "bootTime": 1700000100, "platform": "Linux",
     "cpuModel": "Xeon 3.0Ghz", "totalRamMb": 4096, "freeRamMb": 4096,
     "totalSwapMb": 2048, "freeSwapMb": 0},
    {"name": "comp-01", "clusterName": "Comp", "state": "REPAIR", "lockState": "OPEN",
     "totalCores": 2, "idleCores": 0, "bootTime": 1700000200, "platform": "Linux",
     "cpuModel": "Xeon 3.0Ghz", "totalRamMb": 8192, "freeRamMb": 100,
     "totalSwapMb": 4096, "freeSwapMb": 4000}
]"#;

fn write_fleet(dir: &TempDir) -> String {
    let path = dir.path().join("nodes.json");
    std::fs::write(&path, FLEET).unwrap();
    path.display().to_string()
}

fn names(stdout: &[u8]) -> Vec<String> {
    let rows: serde_json::Value = serde_json::from_slice(stdout).expect("stdout should be JSON");
    rows.as_array()
        .expect("stdout should be a JSON array")
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect()
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let home = TempDir::new().unwrap();
    let output = nodeview(home.path(), &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("render farm nodes"), "Should show about text");
    assert!(stdout.contains("show"), "Should show show command");
    assert!(stdout.contains("generate"), "Should show generate command");
    assert!(stdout.contains("columns"), "Should show columns command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let home = TempDir::new().unwrap();
    let output = nodeview(home.path(), &["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("nodeview"), "Should show binary name");
}

#[test]
fn test_columns_json() {
    let home = TempDir::new().unwrap();
    let output = nodeview(home.path(), &["columns", "--format", "json"]);
    assert!(output.status.success());

    let columns: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let columns = columns.as_array().unwrap();
    assert_eq!(columns.len(), 13);
    assert_eq!(columns[0]["header"], "Name");
    assert_eq!(columns[5]["key"], "lock_state");
    assert_eq!(columns[12]["header"], "Boot Time");
}

#[test]
fn test_show_table_from_file() {
    let home = TempDir::new().unwrap();
    let input = write_fleet(&home);
    let output = nodeview(home.path(), &["show", "--input", &input]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "show should succeed");
    assert!(stdout.contains("Lock State"));
    assert!(stdout.contains("render-02"));
    assert!(stdout.contains("DOWN"));
    assert!(stdout.contains("LOCKED"));
}

#[test]
fn test_show_sorted_numerically() {
    let home = TempDir::new().unwrap();
    let input = write_fleet(&home);
    let output = nodeview(
        home.path(),
        &["show", "--input", &input, "--sort", "total_ram_mb", "--format", "json"],
    );

    assert!(output.status.success());
    assert_eq!(names(&output.stdout), vec!["render-02", "comp-01", "render-01"]);
}

#[test]
fn test_show_sort_descending_and_filter() {
    let home = TempDir::new().unwrap();
    let input = write_fleet(&home);
    let output = nodeview(
        home.path(),
        &[
            "show", "--input", &input, "--sort", "Total Cores", "--desc", "--filter",
            "name=render", "--format", "json",
        ],
    );

    assert!(output.status.success());
    assert_eq!(names(&output.stdout), vec!["render-01", "render-02"]);
}

#[test]
fn test_show_unknown_column_fails() {
    let home = TempDir::new().unwrap();
    let input = write_fleet(&home);
    let output = nodeview(home.path(), &["show", "--input", &input, "--sort", "colour"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("unknown column"), "stderr: {}", stderr);
}

#[test]
fn test_show_invalid_record_fails() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("bad.json");
    std::fs::write(&path, FLEET.replace("\"idleCores\": 2", "\"idleCores\": 20")).unwrap();
    let output = nodeview(home.path(), &["show", "--input", &path.display().to_string()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("render-01"), "stderr: {}", stderr);
}

#[test]
fn test_generate_then_show() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("fleet.json");
    let path = path.display().to_string();

    let output = nodeview(
        home.path(),
        &["generate", "12", "--seed", "7", "--output", &path],
    );
    assert!(output.status.success(), "generate should succeed");

    let output = nodeview(home.path(), &["show", "--input", &path, "--format", "json"]);
    assert!(output.status.success());
    let shown = names(&output.stdout);
    assert_eq!(shown.len(), 12);
    assert_eq!(shown[0], "Host0000");
}

#[test]
fn test_config_file_sets_defaults() {
    let home = TempDir::new().unwrap();
    let input = write_fleet(&home);
    let config = home.path().join("config.json");
    std::fs::write(
        &config,
        r#"{"default_format": "json", "sort_column": "name", "descending": false}"#,
    )
    .unwrap();

    let output = nodeview(
        home.path(),
        &["--config", &config.display().to_string(), "show", "--input", &input],
    );

    assert!(output.status.success());
    assert_eq!(names(&output.stdout), vec!["comp-01", "render-01", "render-02"]);
}

#[test]
fn test_metrics_dump() {
    let home = TempDir::new().unwrap();
    let output = nodeview(
        home.path(),
        &["show", "--generate", "3", "--format", "json", "--metrics"],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert_eq!(names(&output.stdout).len(), 3);
    assert!(stderr.contains("nodeview_model_resets_total"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let home = TempDir::new().unwrap();
    let output = nodeview(
        home.path(),
        &["--verbose", "show", "--generate", "2", "--sort", "state", "--format", "json"],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert_eq!(names(&output.stdout).len(), 2, "logs must not reach stdout");
    assert!(stderr.contains("Generating synthetic nodes"), "stderr: {}", stderr);
    assert!(stderr.contains("Sorting overlay"), "stderr: {}", stderr);
}
