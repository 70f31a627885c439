//! Integration tests for the `slime` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the fmt, get
//! and stats subcommands through the actual binary, including stdin/stdout
//! piping, file I/O, and error exits.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the sample.json fixture.
fn sample_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json")
}

fn slime() -> Command {
    Command::cargo_bin("slime").unwrap()
}

const SAMPLE_COMPACT: &str = concat!(
    r#"{"name":"Alice","age":30,"active":true,"ratio":0.5,"nickname":null,"#,
    r#""scores":[95,87,92],"address":{"city":"Oslo","zip":"0150","tags":["home",{"floor":3}]}}"#,
);

// ─────────────────────────────────────────────────────────────────────────────
// fmt subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn fmt_stdin_to_stdout() {
    slime()
        .arg("fmt")
        .write_stdin(r#"{ "b" : 1, "a" : [true, null] }"#)
        .assert()
        .success()
        .stdout("{\"b\":1,\"a\":[true,null]}\n");
}

#[test]
fn fmt_file_keeps_field_order() {
    slime()
        .args(["fmt", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout(format!("{SAMPLE_COMPACT}\n"));
}

#[test]
fn fmt_pretty() {
    slime()
        .args(["fmt", "--pretty"])
        .write_stdin(r#"{"a":[1]}"#)
        .assert()
        .success()
        .stdout("{\n  \"a\": [\n    1\n  ]\n}\n");
}

#[test]
fn fmt_file_to_file() {
    let output_path = std::env::temp_dir().join("slime-test-fmt-output.json");
    let _ = std::fs::remove_file(&output_path);

    slime()
        .args(["fmt", "-i", sample_json_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert_eq!(content, SAMPLE_COMPACT);
    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn fmt_rejects_invalid_json() {
    slime()
        .arg("fmt")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON from stdin"));
}

#[test]
fn missing_input_file_fails() {
    slime()
        .args(["fmt", "-i", "/nonexistent/slime-input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// get subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn get_scalar_field() {
    slime()
        .args(["get", "name", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout("\"Alice\"\n");
}

#[test]
fn get_nested_path_through_arrays() {
    slime()
        .args(["get", "address.tags.1.floor", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout("3\n");

    slime()
        .args(["get", "scores.2", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout("92\n");
}

#[test]
fn get_container_prints_json() {
    slime()
        .args(["get", "address.tags", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout("[\"home\",{\"floor\":3}]\n");
}

#[test]
fn get_nix_value_resolves() {
    slime()
        .args(["get", "nickname", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn get_numeric_segment_on_object_is_a_field_name() {
    slime()
        .args(["get", "0"])
        .write_stdin(r#"{"0":"zero"}"#)
        .assert()
        .success()
        .stdout("\"zero\"\n");
}

#[test]
fn get_unresolved_path_fails() {
    for path in ["missing", "scores.3", "scores.x", "name.first"] {
        slime()
            .args(["get", path, "-i", sample_json_path()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("does not resolve"));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// stats subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stats_text_output() {
    slime()
        .args(["stats", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes:      17"))
        .stdout(predicate::str::contains("OBJECT"))
        .stdout(predicate::str::contains("Symbols:    11"))
        .stdout(predicate::str::contains("Max depth:  5"));
}

#[test]
fn stats_json_output() {
    let output = slime()
        .args(["stats", "--json", "-i", sample_json_path()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["nodes"], 17);
    assert_eq!(stats["nix"], 1);
    assert_eq!(stats["bool"], 1);
    assert_eq!(stats["long"], 5);
    assert_eq!(stats["double"], 1);
    assert_eq!(stats["string"], 4);
    assert_eq!(stats["data"], 0);
    assert_eq!(stats["array"], 2);
    assert_eq!(stats["object"], 3);
    assert_eq!(stats["symbols"], 11);
    assert_eq!(stats["max_depth"], 5);
    assert!(stats.get("depth").is_none());
}

#[test]
fn stats_of_scalar_document() {
    let output = slime()
        .args(["stats", "--json"])
        .write_stdin("42")
        .output()
        .unwrap();
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["nodes"], 1);
    assert_eq!(stats["long"], 1);
    assert_eq!(stats["symbols"], 0);
    assert_eq!(stats["max_depth"], 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Global flags
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn verbose_logs_to_stderr_only() {
    slime()
        .args(["--verbose", "get", "age"])
        .env_remove("RUST_LOG")
        .write_stdin(r#"{"age":30}"#)
        .assert()
        .success()
        .stdout("30\n")
        .stderr(predicate::str::contains("loaded document"));
}

#[test]
fn quiet_by_default() {
    slime()
        .args(["get", "age"])
        .env_remove("RUST_LOG")
        .write_stdin(r#"{"age":30}"#)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn no_subcommand_prints_help() {
    slime()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
