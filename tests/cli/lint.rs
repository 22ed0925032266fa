//! Lint subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_lint_clean_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.scss");
    fs::write(&test_file, ".card {\n  color: red;\n}\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["lint", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_lint_warnings_exit_0() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.scss");
    fs::write(&test_file, "ul.nav {\n  margin: 0;\n}\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["lint", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning[element-class-coupling]"))
        .stdout(predicate::str::contains("test.scss:1:1"))
        .stdout(predicate::str::contains("Found 1 issue(s)"));
}

#[test]
fn test_lint_errors_exit_1() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.scss");
    fs::write(&test_file, ".card {\n  color:red;\n}\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["lint", test_file.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error[colon-spacing]"))
        .stdout(predicate::str::contains("help:"));
}

#[test]
fn test_lint_severity_filter() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.scss");
    fs::write(&test_file, "ul.nav {\n  margin:0;\n}\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["lint", "--severity", "error", test_file.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("colon-spacing"))
        .stdout(predicate::str::contains("element-class-coupling").not());
}

#[test]
fn test_lint_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.scss");
    fs::write(&test_file, "#main {\n  color: red;\n}\n").unwrap();

    let assert = cargo_bin_cmd!("scuff")
        .args(["lint", "--format", "json", test_file.to_str().unwrap()])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["rule"], "no-id-selectors");
    assert_eq!(records[0]["severity"], "warning");
    assert_eq!(records[0]["line"], 1);
    assert_eq!(records[0]["column"], 1);
    assert!(records[0]["file"].as_str().unwrap().ends_with("test.scss"));
}

#[test]
fn test_lint_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("broken.scss");
    fs::write(&test_file, ".card {\n  color: red;\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["lint", test_file.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error[parse-error]: unclosed `{`"));
}

#[test]
fn test_lint_directory() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("components");
    fs::create_dir(&nested).unwrap();
    fs::write(temp_dir.path().join("a.css"), "ul.nav {\n  margin: 0;\n}\n").unwrap();
    fs::write(nested.join("b.scss"), "$fontSize: 12px;\n").unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "not a stylesheet").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["lint", temp_dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("element-class-coupling"))
        .stdout(predicate::str::contains("variable-naming"))
        .stdout(predicate::str::contains("Found 2 issue(s)"));
}

#[test]
fn test_lint_directory_exclude() {
    let temp_dir = TempDir::new().unwrap();
    let vendor = temp_dir.path().join("vendor");
    fs::create_dir(&vendor).unwrap();
    fs::write(vendor.join("lib.css"), "ul.nav {\n  margin: 0;\n}\n").unwrap();
    fs::write(temp_dir.path().join("a.css"), ".a {\n  margin: 0;\n}\n").unwrap();
    fs::write(
        temp_dir.path().join(".scuff.toml"),
        "exclude = [\"**/vendor/**\"]\n",
    )
    .unwrap();

    cargo_bin_cmd!("scuff")
        .args(["lint", temp_dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_lint_fail_fast() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("a.scss");
    fs::write(&first, ".a {\n  color:red;\n}\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["lint", "--fail-fast", first.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("colon-spacing"));
}

#[test]
fn test_lint_crlf_input() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.scss");
    fs::write(&test_file, ".card {\r\n  color: red;\r\n}\r\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["lint", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}
