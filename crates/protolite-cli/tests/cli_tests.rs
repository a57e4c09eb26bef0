//! Integration tests for the `protolite` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise every
//! subcommand through the actual binary, including stdin/stdout piping,
//! file I/O and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

/// Fixture paths. Edited and stored versions of one record.
fn new_json() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/new.json")
}

fn old_json() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/old.json")
}

/// Parent-linked category rows.
fn rows_json() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/rows.json")
}

/// The same kind of categories, already nested.
fn forest_json() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/forest.json")
}

fn orders_json() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/orders.json")
}

fn protolite() -> Command {
    Command::cargo_bin("protolite").unwrap()
}

/// Run the binary and parse its stdout as JSON.
fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout must be valid JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// diff
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn diff_reports_changed_keys() {
    let out = run_json(protolite().args([
        "diff",
        "--new",
        new_json(),
        "--old",
        old_json(),
    ]));
    assert_eq!(
        out,
        json!({
            "name": "Ada Lovelace",
            "etag": "v2",
            "lines": [{ "id": "b", "qty": 2 }, { "id": "a", "qty": 5 }]
        })
    );
}

#[test]
fn diff_with_primary_key_and_ignore() {
    let out = run_json(protolite().args([
        "diff",
        "--new",
        new_json(),
        "--old",
        old_json(),
        "--primary-key",
        "id",
        "--ignore",
        "etag,updated_at",
    ]));
    assert_eq!(
        out,
        json!({
            "id": 42,
            "name": "Ada Lovelace",
            "lines": [null, { "id": "a", "qty": 5 }]
        })
    );
}

#[test]
fn diff_of_file_with_itself_is_empty_object() {
    let out = run_json(protolite().args([
        "diff",
        "--new",
        old_json(),
        "--old",
        old_json(),
    ]));
    assert_eq!(out, json!({}));
}

#[test]
fn diff_writes_output_file() {
    let dir = std::env::temp_dir().join("protolite-cli-diff-output");
    std::fs::create_dir_all(&dir).unwrap();
    let output_path = dir.join("changes.json");
    let _ = std::fs::remove_file(&output_path);

    protolite()
        .args(["diff", "--new", new_json(), "--old", old_json(), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(written["name"], json!("Ada Lovelace"));
    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn diff_missing_file_fails_with_context() {
    protolite()
        .args(["diff", "--new", "/nonexistent/new.json", "--old", old_json()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// tree / list / hash / find
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn tree_nests_rows_from_file() {
    let out = run_json(protolite().args(["tree", "-i", rows_json()]));
    assert_eq!(out.as_array().unwrap().len(), 2);
    assert_eq!(out[0]["children"][0]["children"][0]["name"], json!("Fantasy"));
    assert_eq!(out[0]["children"][1]["children"], json!([]));
    assert_eq!(out[1]["children"], json!([]));
}

#[test]
fn tree_accepts_custom_keys_from_stdin() {
    let out = run_json(
        protolite()
            .args(["tree", "--id-key", "code", "--parent-key", "up", "--children-key", "kids"])
            .write_stdin(r#"[{"code":"a"},{"code":"b","up":"a"}]"#),
    );
    assert_eq!(
        out,
        json!([{ "code": "a", "kids": [{ "code": "b", "up": "a", "kids": [] }] }])
    );
}

#[test]
fn tree_rejects_cycles() {
    protolite()
        .arg("tree")
        .write_stdin(r#"[{"id":1},{"id":2,"parent_id":1},{"id":1,"parent_id":2}]"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to build tree"));
}

#[test]
fn tree_rejects_non_array_input() {
    protolite()
        .arg("tree")
        .write_stdin(r#"{"id":1}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected a JSON array, got object"));
}

#[test]
fn list_flattens_in_pre_order() {
    let out = run_json(protolite().args(["list", "-i", forest_json()]));
    let ids: Vec<i64> = out
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [1, 2, 4, 3, 5]);
}

#[test]
fn list_with_levels() {
    let out = run_json(protolite().args(["list", "--levels", "-i", forest_json()]));
    let levels: Vec<(i64, i64)> = out
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| {
            (
                entry["node"]["id"].as_i64().unwrap(),
                entry["level"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(levels, [(1, 0), (2, 1), (4, 2), (3, 1), (5, 0)]);
}

#[test]
fn hash_indexes_every_node() {
    let out = run_json(protolite().args(["hash", "--key", "id", "-i", forest_json()]));
    let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["1", "2", "4", "3", "5"]);
    assert_eq!(out["4"], json!({ "id": 4, "name": "Fantasy" }));
}

#[test]
fn hash_with_log_index() {
    let out = run_json(protolite().args([
        "hash",
        "--key",
        "name",
        "--log-index",
        "-i",
        forest_json(),
    ]));
    assert_eq!(out["Science"][1], json!(1));
    assert_eq!(out["Music"][0]["id"], json!(5));
}

#[test]
fn find_returns_matching_node_or_null() {
    let out = run_json(protolite().args([
        "find",
        "--key",
        "name",
        "--value",
        "\"Fiction\"",
        "-i",
        forest_json(),
    ]));
    assert_eq!(out["id"], json!(2));

    let missing = run_json(protolite().args([
        "find",
        "--key",
        "id",
        "--value",
        "99",
        "-i",
        forest_json(),
    ]));
    assert_eq!(missing, Value::Null);
}

#[test]
fn find_rejects_invalid_value() {
    protolite()
        .args(["find", "--key", "id", "--value", "{oops", "-i", forest_json()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--value is not valid JSON"));
}

// ─────────────────────────────────────────────────────────────────────────────
// group / chunk / type
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn group_by_status() {
    let out = run_json(protolite().args(["group", "--key", "status", "-i", orders_json()]));
    let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["open", "paid", "void"]);
    assert_eq!(out["paid"].as_array().unwrap().len(), 2);
    assert_eq!(out["paid"][1]["id"], json!(5));
}

#[test]
fn chunk_splits_list() {
    let out = run_json(protolite().args(["chunk", "--size", "2", "-i", orders_json()]));
    let sizes: Vec<usize> = out
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_array().unwrap().len())
        .collect();
    assert_eq!(sizes, [2, 2, 1]);
}

#[test]
fn type_prints_tag() {
    protolite()
        .arg("type")
        .write_stdin("[1,2]")
        .assert()
        .success()
        .stdout("array\n");

    protolite()
        .arg("type")
        .write_stdin("null")
        .assert()
        .success()
        .stdout("undefined\n");
}

#[test]
fn invalid_json_input_fails() {
    protolite()
        .arg("type")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON in stdin"));
}

#[test]
fn verbose_flag_logs_to_stderr() {
    protolite()
        .args(["-v", "diff", "--new", new_json(), "--old", old_json()])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("diff complete"));
}

#[test]
fn missing_subcommand_shows_usage() {
    protolite()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
