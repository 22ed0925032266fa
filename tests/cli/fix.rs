//! Fix subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const COMPACT: &str = ".avatar{border-radius:50%;border:2px solid white; }\n";
const FIXED: &str = ".avatar {\n  border-radius: 50%;\n  border: 2px solid white;\n}\n";

#[test]
fn test_fix_writes_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("avatar.scss");
    fs::write(&test_file, COMPACT).unwrap();

    cargo_bin_cmd!("scuff")
        .args(["fix", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed"))
        .stdout(predicate::str::contains("No issues found"));

    assert_eq!(fs::read_to_string(&test_file).unwrap(), FIXED);
}

#[test]
fn test_fix_check_shows_diff() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("avatar.scss");
    fs::write(&test_file, COMPACT).unwrap();

    cargo_bin_cmd!("scuff")
        .args(["fix", "--check", test_file.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Diff in"))
        .stdout(predicate::str::contains("-.avatar{border-radius"))
        .stdout(predicate::str::contains("+.avatar {"));

    assert_eq!(fs::read_to_string(&test_file).unwrap(), COMPACT);
}

#[test]
fn test_fix_check_clean_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("clean.scss");
    fs::write(&test_file, FIXED).unwrap();

    cargo_bin_cmd!("scuff")
        .args(["fix", "--check", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Diff in").not());
}

#[test]
fn test_fix_reports_remaining_problems() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("main.scss");
    fs::write(&test_file, "#main {\n  color:red;\n}\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["fix", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("no-id-selectors"))
        .stdout(predicate::str::contains("colon-spacing").not());

    assert_eq!(
        fs::read_to_string(&test_file).unwrap(),
        "#main {\n  color: red;\n}\n"
    );
}

#[test]
fn test_fix_preserves_crlf() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("win.scss");
    fs::write(&test_file, ".a {\r\n  color:red;\r\n}\r\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["fix", test_file.to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&test_file).unwrap(),
        ".a {\r\n  color: red;\r\n}\r\n"
    );
}

#[test]
fn test_fix_leaves_unparseable_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("broken.scss");
    fs::write(&test_file, ".a{color:red\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["fix", test_file.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("parse-error"));

    assert_eq!(fs::read_to_string(&test_file).unwrap(), ".a{color:red\n");
}
