//! End-to-end tests of the `egtool` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use eg_format::read_eg;
use tempfile::tempdir;

const INPUT: &str = "\
# [Parameters]
# NAME = 'te'
# ShotNo = 100
# Date = '01/01/2020 00:00'
# DimNo = 2
# DimName = 'Time', 'R'
# DimSize = 2, 2
# DimUnit = 's', 'm'
# ValNo = 1
# ValName = 'Te'
# ValUnit = 'eV'
#
# [data]
0.0, 5.0, 100
0.0, 6.0, 110
0.5, 5.0, 101
0.5, 6.0, 111
";

fn egtool(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_egtool"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_input(dir: &Path) -> String {
    let path = dir.join("te@100.dat");
    fs::write(&path, INPUT).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn inspect_prints_summary() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path());
    let output = egtool(&["--color", "never", "inspect", &input]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Diagnostic: te"));
    assert!(stdout.contains("Shot: 100"));
    assert!(stdout.contains("Points: 4"));
    assert!(stdout.contains("2x2"));
}

#[test]
fn convert_rewrites_identifiers_and_format() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path());
    let out = dir.path().join("ece@7.dat");
    let out_str = out.to_string_lossy().into_owned();
    let output = egtool(&[
        "convert", &input, &out_str, "--name", "ece", "--shot", "7", "--fmt", "%.2f",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("# NAME = 'ece'"));
    assert!(text.contains("0.50, 6.00, 111.00"));

    let dataset = read_eg(&out).unwrap();
    assert_eq!(dataset.shot_no, Some(7));
    assert_eq!(dataset.dims, vec!["Time", "R"]);
}

#[test]
fn export_writes_json() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path());
    let json_path = dir.path().join("te.json");
    let json_str = json_path.to_string_lossy().into_owned();
    let output = egtool(&["export", &input, "--output", &json_str]);
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["dims"], serde_json::json!(["Time", "R"]));
    assert_eq!(value["shot_no"], serde_json::json!(100));
    assert_eq!(
        value["coords"][0]["values"]["data"],
        serde_json::json!([0.0, 0.5])
    );
    assert_eq!(value["data_vars"][0]["data"]["dim"], serde_json::json!([2, 2]));
}

#[test]
fn missing_input_fails() {
    let output = egtool(&["inspect", "/nonexistent/te@1.dat"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("file not found"));
}

#[test]
fn diag_requires_shot() {
    let output = egtool(&["inspect", "x.dat", "--diag", "ha2"]);
    assert!(!output.status.success());
}
