//! Integration tests that run the stagehook binary.

use std::{
    path::Path,
    process::{Command, Output},
};

use tempfile::TempDir;

const CYCLIC: &str = r#"
[[unit]]
path = "src/a/A.java"
package = "a"
imports = ["b.B"]
types = ["A"]

[[unit]]
path = "src/b/B.java"
package = "b"
imports = ["a.A"]
types = ["B"]
"#;

fn write_units(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("units.toml");
    std::fs::write(&path, content).expect("Failed to write units.toml");
    path.display().to_string()
}

fn stagehook(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stagehook"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run stagehook")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_escalation_prints_message_once_and_exits_with_status() {
    let dir = TempDir::new().unwrap();
    let units = write_units(&dir, CYCLIC);

    let output = stagehook(
        &["compile", "--units", &units, "--", "--import-cycles=fatal"],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert_eq!(stderr.matches("illegal import cycle").count(), 1);
    assert!(stderr.contains("error: illegal import cycle\n"));
}

#[test]
fn test_clean_run_exits_zero() {
    let dir = TempDir::new().unwrap();
    let units = write_units(&dir, CYCLIC);

    let output = stagehook(
        &["compile", "--units", &units, "--", "--import-cycles=off"],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("compiled 2 units (0 errors, 0 warnings), finished"));
}

#[test]
fn test_werror_fails_on_cycle_warning() {
    let dir = TempDir::new().unwrap();
    let units = write_units(&dir, CYCLIC);

    let output = stagehook(&["compile", "--units", &units, "--Werror"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: [import-cycles] import cycle: a -> b -> a"));
}

#[test]
fn test_bad_plugin_flag_is_a_command_line_error() {
    let dir = TempDir::new().unwrap();
    let units = write_units(&dir, CYCLIC);

    let output = stagehook(
        &["compile", "--units", &units, "--", "--check=sometimes"],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(
        "error: invalid command line: invalid value 'sometimes' for '--check' (expected strict, warn or off)"
    ));
}

#[test]
fn test_json_report() {
    let dir = TempDir::new().unwrap();
    let units = write_units(&dir, CYCLIC);

    let output = stagehook(
        &["compile", "--units", &units, "--format", "json"],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["state"], "finished");
    assert_eq!(json["units_compiled"], 2);
}

#[test]
fn test_check_reports_invalid_source_set() {
    let dir = TempDir::new().unwrap();
    let units = write_units(
        &dir,
        r#"
[[unit]]
path = "A.java"
package = "com..app"
"#,
    );

    let output = stagehook(&["check", "--units", &units], dir.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("com..app"));
}

#[test]
fn test_check_valid_source_set() {
    let dir = TempDir::new().unwrap();
    write_units(&dir, CYCLIC);

    // Defaults to ./units.toml
    let output = stagehook(&["check"], dir.path());

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("units.toml is valid"));
    assert!(stdout.contains("units: 2"));
}

#[test]
fn test_plugins_lists_flags() {
    let dir = TempDir::new().unwrap();

    let output = stagehook(&["plugins"], dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--check", "--direct-dep", "--import-cycles", "--naming", "--trace-dir"] {
        assert!(stdout.contains(flag), "missing {}", flag);
    }
}
