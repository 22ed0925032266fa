//! Parse subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_prints_tree() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.scss");
    fs::write(&test_file, "$gap: 4px;\n\n.card {\n  margin: $gap;\n}\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["parse", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stylesheet"))
        .stdout(predicate::str::contains("VariableDeclaration"))
        .stdout(predicate::str::contains("\".card\""))
        .stdout(predicate::str::contains("\"margin\""));
}

#[test]
fn test_parse_css_rejects_line_comments() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.css");
    fs::write(&test_file, "// note\n.a {\n  color: red;\n}\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["parse", test_file.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[parse-error]"))
        .stderr(predicate::str::contains("test.css:1:1"));
}

#[test]
fn test_parse_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.less");
    fs::write(&test_file, ".a { color: red; }\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["parse", test_file.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported file type"));
}
