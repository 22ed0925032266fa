//! Cross-cutting CLI tests (help, version, configuration errors)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_help() {
    cargo_bin_cmd!("scuff")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scuff checks CSS and SCSS"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("scuff")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand() {
    cargo_bin_cmd!("scuff")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    cargo_bin_cmd!("scuff")
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_lint_requires_paths() {
    cargo_bin_cmd!("scuff")
        .arg("lint")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<PATHS>"));
}

#[test]
fn test_rules_lists_every_rule() {
    let assert = cargo_bin_cmd!("scuff").arg("rules").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

    assert_eq!(stdout.lines().count(), 15);
    assert!(stdout.contains("indentation"));
    assert!(stdout.contains("variable-naming"));
    assert!(
        stdout
            .lines()
            .any(|l| l.starts_with("color-variants") && l.contains("scss"))
    );
}

#[test]
fn test_missing_input_exits_2() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.scss");

    cargo_bin_cmd!("scuff")
        .args(["lint", missing.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_sass_file_exits_2() {
    let temp_dir = TempDir::new().unwrap();
    let sass = temp_dir.path().join("legacy.sass");
    fs::write(&sass, ".a\n  color: red\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["lint", sass.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("`.sass` syntax is not supported"));
}

#[test]
fn test_sass_file_in_directory_exits_2() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.scss"), ".a {\n  color: red;\n}\n").unwrap();
    fs::write(temp_dir.path().join("b.sass"), ".b\n  color: red\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args(["lint", temp_dir.path().to_str().unwrap()])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_rule_in_config_exits_2() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("a.scss");
    fs::write(&test_file, ".a {\n  color: red;\n}\n").unwrap();
    fs::write(
        temp_dir.path().join(".scuff.toml"),
        "[rules]\nno-such-rule = \"off\"\n",
    )
    .unwrap();

    cargo_bin_cmd!("scuff")
        .args(["lint", test_file.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown rule `no-such-rule`"));
}

#[test]
fn test_invalid_config_exits_2() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("a.scss");
    let config = temp_dir.path().join("custom.toml");
    fs::write(&test_file, ".a {\n  color: red;\n}\n").unwrap();
    fs::write(&config, "max_nesting_depth = \"deep\"\n").unwrap();

    cargo_bin_cmd!("scuff")
        .args([
            "lint",
            "--config",
            config.to_str().unwrap(),
            test_file.to_str().unwrap(),
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_config_from_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("styles");
    fs::create_dir(&nested).unwrap();
    let test_file = nested.join("a.scss");
    fs::write(&test_file, "#app {\n  color: red;\n}\n").unwrap();
    fs::write(
        temp_dir.path().join("scuff.toml"),
        "[rules]\nno-id-selectors = \"off\"\n",
    )
    .unwrap();

    cargo_bin_cmd!("scuff")
        .args(["lint", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}
