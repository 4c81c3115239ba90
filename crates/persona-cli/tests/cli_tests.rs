//! Integration tests for the `persona` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise every subcommand
//! through the actual binary, including stdin/stdout piping, file I/O and
//! failure exit codes.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn persona() -> Command {
    Command::cargo_bin("persona").unwrap()
}

/// Unique scratch path under the system temp dir.
fn scratch(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("persona-cli-{}-{}", std::process::id(), name))
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// Encode subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn encode_stdin_to_stdout() {
    persona()
        .arg("encode")
        .write_stdin(r#"{"name":"Alice","age":7,"tags":["a","b"]}"#)
        .assert()
        .success()
        .stdout("name=Alice|age=7|tags=a,b");
}

#[test]
fn encode_file_to_file() {
    let out = scratch("encode.toon");
    let _ = std::fs::remove_file(&out);

    persona()
        .args(["encode", "-i", fixture("record.json").as_str(), "-o"])
        .arg(&out)
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).expect("output file must exist");
    assert!(content.starts_with(r#"meta={"schema_version":"1.0","source":"upload"}|"#));
    assert!(content.contains("|annotations=outdoor,daylight|"));
    let _ = std::fs::remove_file(&out);
}

#[test]
fn encode_rejects_non_object() {
    persona()
        .arg("encode")
        .write_stdin("[1,2,3]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to encode"));
}

#[test]
fn encode_rejects_invalid_json() {
    persona()
        .arg("encode")
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Decode subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn decode_stdin_to_stdout() {
    let output = persona()
        .arg("decode")
        .write_stdin("```toon\nname=Alice|age=7\n```")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!({"name": "Alice", "age": 7}));
}

#[test]
fn decode_garbage_is_empty_object() {
    let output = persona()
        .arg("decode")
        .write_stdin("nothing useful here")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!({}));
}

#[test]
fn decode_diagnostics_reports_skipped_tokens() {
    persona()
        .args(["decode", "--diagnostics"])
        .write_stdin("name=Alice|garbage_no_delimiter|age=7")
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped: garbage_no_delimiter"))
        .stderr(predicate::str::contains("mode: Pipe"));
}

#[test]
fn encode_then_decode_roundtrip() {
    let encoded = persona()
        .arg("encode")
        .write_stdin(r#"{"name":"Alice","head":{"shape":"oval"}}"#)
        .output()
        .unwrap();
    assert!(encoded.status.success());

    let decoded = persona()
        .arg("decode")
        .write_stdin(encoded.stdout)
        .output()
        .unwrap();
    assert_eq!(
        stdout_json(&decoded),
        json!({"name": "Alice", "head": {"shape": "oval"}})
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Recover subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn recover_fenced_json() {
    let output = persona()
        .arg("recover")
        .write_stdin("```json\n{\"meta\":{}}\n```")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!({"meta": {}}));
}

#[test]
fn recover_toon_reply_from_file() {
    let output = persona()
        .args(["recover", "-i", fixture("reply_toon.txt").as_str()])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let record = stdout_json(&output);
    assert_eq!(record["hair"], json!({"color": "red"}));
    assert_eq!(record["face"], json!("round"));
}

#[test]
fn recover_with_custom_keys() {
    let output = persona()
        .args(["recover", "--keys", "name, age"])
        .write_stdin("name=Alice|age=7")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!({"name": "Alice", "age": 7}));
}

#[test]
fn recover_failure_includes_raw_reply() {
    persona()
        .arg("recover")
        .write_stdin("not valid at all ###")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid at all ###"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Prompt subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn prompt_embeds_schema_as_toon() {
    persona()
        .args(["prompt", "--schema", fixture("character_schema.json").as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"meta={"type":"object"}|general={"type":"object"}"#))
        .stdout(predicate::str::contains(
            r#"annotations={"type":"array","items":{"type":"object"}}"#,
        ));
}

#[test]
fn prompt_uses_instructions_file() {
    let instructions = scratch("instructions.txt");
    std::fs::write(&instructions, "Only describe the face.\n").unwrap();

    persona()
        .args(["prompt", "--schema", fixture("character_schema.json").as_str(), "--instructions"])
        .arg(&instructions)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Only describe the face.\n\n"));

    let _ = std::fs::remove_file(&instructions);
}

#[test]
fn prompt_missing_schema_file_fails() {
    persona()
        .args(["prompt", "--schema", "/nonexistent/schema.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Stats subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stats_reports_sizes() {
    persona()
        .args(["stats", "-i", fixture("record.json").as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("JSON size:"))
        .stdout(predicate::str::contains("TOON size:"))
        .stdout(predicate::str::contains("Reduction:"));
}

#[test]
fn no_subcommand_shows_usage() {
    persona()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
