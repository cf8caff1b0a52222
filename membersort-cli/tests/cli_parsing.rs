//! End-to-end CLI tests: sorting, explaining and editing the order list.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn membersort() -> Command {
    Command::cargo_bin("membersort").expect("membersort binary")
}

const UNSORTED: &str = r#"{
  "schema": "membersort.scopes.v1",
  "scopes": [
    {
      "scope": "com.acme.Widget",
      "declarations": [
        {"kind": "field", "fragments": ["count"], "modifiers": ["private"]},
        {"kind": "method", "name": "run", "modifiers": ["public"]}
      ]
    }
  ]
}"#;

const SORTED: &str = r#"{
  "schema": "membersort.scopes.v1",
  "scopes": [
    {
      "scope": "com.acme.Widget",
      "declarations": [
        {"kind": "method", "name": "run", "modifiers": ["public"]},
        {"kind": "field", "fragments": ["count"], "modifiers": ["private"]}
      ]
    }
  ]
}"#;

fn project(scopes: &str) -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    fs::write(td.path().join("widget.scopes.json"), scopes).unwrap();
    td
}

fn read_config(root: &Path) -> String {
    fs::read_to_string(root.join("membersort.toml")).unwrap_or_default()
}

#[test]
fn test_sort_reports_moves_as_text() {
    let temp = project(UNSORTED);

    membersort()
        .current_dir(temp.path())
        .args(["sort", "widget.scopes.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.acme.Widget: 1 of 2 members move"))
        .stdout(predicate::str::contains("1 of 1 scopes need reordering"));
}

#[test]
fn test_sort_check_exits_2_when_out_of_order() {
    let temp = project(UNSORTED);

    membersort()
        .current_dir(temp.path())
        .args(["sort", "widget.scopes.json", "--check"])
        .assert()
        .code(2);
}

#[test]
fn test_sort_check_succeeds_when_in_order() {
    let temp = project(SORTED);

    membersort()
        .current_dir(temp.path())
        .args(["sort", "widget.scopes.json", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.acme.Widget: in order"));
}

#[test]
fn test_sort_accepts_a_directory() {
    let temp = project(UNSORTED);

    membersort()
        .current_dir(temp.path())
        .args(["sort", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.acme.Widget"));
}

#[test]
fn test_sort_json_output() {
    let temp = project(UNSORTED);

    let output = membersort()
        .current_dir(temp.path())
        .args(["sort", "widget.scopes.json", "--format", "json"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json plan");
    assert_eq!(plan["schema"], "membersort.plan.v1");
    assert_eq!(plan["scopes"][0]["permutation"], serde_json::json!([1, 0]));
}

#[test]
fn test_sort_writes_artifacts() {
    let temp = project(UNSORTED);

    membersort()
        .current_dir(temp.path())
        .args(["sort", "widget.scopes.json", "--out-dir", "out"])
        .assert()
        .success();

    let out = temp.path().join("out");
    assert!(out.join("plan.json").exists());
    assert!(out.join("plan.md").exists());
    let diff = fs::read_to_string(out.join("preview.diff")).unwrap();
    assert!(diff.contains("--- a/com.acme.Widget"));
}

#[test]
fn test_sort_uses_config_output_section() {
    let temp = project(UNSORTED);
    fs::write(
        temp.path().join("membersort.toml"),
        "[output]\nformat = \"md\"\nout_dir = \"artifacts/membersort\"\n",
    )
    .unwrap();

    membersort()
        .current_dir(temp.path())
        .args(["sort", "widget.scopes.json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# membersort plan"));

    assert!(temp.path().join("artifacts/membersort/plan.json").exists());
}

#[test]
fn test_sort_uses_stored_order() {
    let temp = project(UNSORTED);
    fs::write(
        temp.path().join("membersort.toml"),
        "[preferences]\norder = \"private variable,public method\"\n",
    )
    .unwrap();

    membersort()
        .current_dir(temp.path())
        .args(["sort", "widget.scopes.json", "--check"])
        .assert()
        .success();
}

#[test]
fn test_sort_missing_input_fails() {
    let temp = project(UNSORTED);

    membersort()
        .current_dir(temp.path())
        .args(["sort", "missing.json"])
        .assert()
        .code(1);
}

#[test]
fn test_explain_prints_signature_and_rank() {
    let temp = tempfile::tempdir().unwrap();

    membersort()
        .current_dir(temp.path())
        .args(["explain", "method", "static", "public", "--name", "of"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signature: public static method"))
        .stdout(predicate::str::contains("Name:      of"))
        .stdout(predicate::str::contains("Rank:      2 of 39 (built-in order)"));
}

#[test]
fn test_explain_rejects_unknown_kind() {
    membersort()
        .args(["explain", "annotation", "public"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_order_show_prints_builtin_order() {
    let temp = tempfile::tempdir().unwrap();

    membersort()
        .current_dir(temp.path())
        .args(["order", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  0  public static final variable"))
        .stdout(predicate::str::contains(" 38  private enum"))
        .stdout(predicate::str::contains("order by name: true"));

    assert!(!temp.path().join("membersort.toml").exists());
}

#[test]
fn test_order_add_persists_entry() {
    let temp = tempfile::tempdir().unwrap();

    membersort()
        .current_dir(temp.path())
        .args([
            "order",
            "add",
            "--visibility",
            "private",
            "--modifier",
            "final",
            "--modifier",
            "static",
            "--kind",
            "method",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("added private static final method at 0"));

    assert!(read_config(temp.path()).contains("order = \"private static final method,public static final variable,"));
}

#[test]
fn test_order_add_after_index_and_edit() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("membersort.toml"),
        "# ordering\n[preferences]\norder = \"public method,public variable\"\n",
    )
    .unwrap();

    membersort()
        .current_dir(temp.path())
        .args(["order", "add", "--after", "0", "--no-visibility", "--modifier", "static", "--kind", "init"])
        .assert()
        .success();

    membersort()
        .current_dir(temp.path())
        .args(["order", "edit", "2", "--visibility", "private"])
        .assert()
        .success()
        .stdout(predicate::str::contains("entry 2 is now private variable"));

    let config = read_config(temp.path());
    assert!(config.starts_with("# ordering\n"));
    assert!(config.contains("order = \"public method,static init,private variable\""));
}

#[test]
fn test_order_moves_and_boundaries() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("membersort.toml"),
        "[preferences]\norder = \"a,b,c\"\n",
    )
    .unwrap();

    membersort()
        .current_dir(temp.path())
        .args(["order", "up", "0"])
        .assert()
        .success();
    assert!(read_config(temp.path()).contains("order = \"a,b,c\""));

    membersort()
        .current_dir(temp.path())
        .args(["order", "down", "0"])
        .assert()
        .success();
    assert!(read_config(temp.path()).contains("order = \"b,a,c\""));

    membersort()
        .current_dir(temp.path())
        .args(["order", "remove", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed c"));
    assert!(read_config(temp.path()).contains("order = \"b,a\""));
}

#[test]
fn test_order_rejects_out_of_range_index() {
    let temp = tempfile::tempdir().unwrap();

    membersort()
        .current_dir(temp.path())
        .args(["order", "remove", "99"])
        .assert()
        .code(1);
}

#[test]
fn test_order_refuses_to_commit_empty_list() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("membersort.toml"),
        "[preferences]\norder = \"a\"\n",
    )
    .unwrap();

    membersort()
        .current_dir(temp.path())
        .args(["order", "remove", "0"])
        .assert()
        .code(1);
    assert!(read_config(temp.path()).contains("order = \"a\""));
}

#[test]
fn test_order_reset_and_order_by_name() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("membersort.toml"),
        "[preferences]\norder = \"public method,,\"\n",
    )
    .unwrap();

    membersort()
        .current_dir(temp.path())
        .args(["order", "set-order-by-name", "false"])
        .assert()
        .success();

    membersort()
        .current_dir(temp.path())
        .args(["order", "reset"])
        .assert()
        .success();

    membersort()
        .current_dir(temp.path())
        .args(["order", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  4  public method"))
        .stdout(predicate::str::contains("order by name: false"));
}

#[test]
fn test_explicit_config_path() {
    let temp = tempfile::tempdir().unwrap();
    let config = temp.path().join("prefs.toml");

    membersort()
        .current_dir(temp.path())
        .args(["order", "set-order-by-name", "false", "--config"])
        .arg(&config)
        .assert()
        .success();

    assert!(fs::read_to_string(&config).unwrap().contains("order_by_name = false"));
    assert!(!temp.path().join("membersort.toml").exists());
}
