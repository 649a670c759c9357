//! End-to-end tests through the shared CLI entry point.
#![allow(clippy::unwrap_used)]

use pymodern::entry_point::run_with_args_to;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project_tempdir() -> TempDir {
    let mut target_dir = std::env::current_dir().unwrap();
    target_dir.push("target");
    target_dir.push("test-entry-point");
    fs::create_dir_all(&target_dir).unwrap();
    tempfile::Builder::new()
        .prefix("entry_point_")
        .tempdir_in(target_dir)
        .unwrap()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn run(args: &[&str]) -> (i32, String) {
    let mut out = Vec::new();
    let code = run_with_args_to(
        args.iter().map(|s| (*s).to_owned()).collect(),
        &mut out,
    )
    .unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_clean_tree_exits_zero() {
    let dir = project_tempdir();
    let root = dir.path();
    write_file(&root.join("ok.py"), "def f(x: int) -> int:\n    return x\n");

    let (code, output) = run(&[root.to_str().unwrap(), "--no-progress"]);
    assert_eq!(code, 0, "output was: {output}");
    assert!(output.contains("No outdated idioms"));
}

#[test]
fn test_findings_exit_one() {
    let dir = project_tempdir();
    let root = dir.path();
    write_file(&root.join("old.py"), "from typing import List\n");

    let (code, output) = run(&[root.to_str().unwrap(), "--no-progress"]);
    assert_eq!(code, 1, "output was: {output}");
    assert!(output.contains("PM101"));
}

#[test]
fn test_parse_error_alone_exits_one() {
    let dir = project_tempdir();
    let root = dir.path();
    write_file(&root.join("broken.py"), "def broken(:\n");

    let (code, output) = run(&[root.to_str().unwrap(), "--no-progress"]);
    assert_eq!(code, 1, "output was: {output}");
    assert!(output.contains("Parse Errors"));
}

#[test]
fn test_unknown_rule_id_exits_two() {
    let dir = project_tempdir();
    let root = dir.path();
    write_file(&root.join("ok.py"), "x = 1\n");

    let (code, _) = run(&[root.to_str().unwrap(), "--rules", "PM999"]);
    assert_eq!(code, 2);
}

#[test]
fn test_missing_path_exits_two() {
    let dir = project_tempdir();
    let missing = dir.path().join("does-not-exist");

    let (code, _) = run(&[missing.to_str().unwrap()]);
    assert_eq!(code, 2);
}

#[test]
fn test_root_and_paths_are_mutually_exclusive() {
    let dir = project_tempdir();
    let root = dir.path();
    write_file(&root.join("ok.py"), "x = 1\n");

    let (code, _) = run(&[
        root.to_str().unwrap(),
        "--root",
        root.to_str().unwrap(),
    ]);
    assert_eq!(code, 2);
}

#[test]
fn test_json_output_is_structured_and_stable() {
    let dir = project_tempdir();
    let root = dir.path();
    write_file(
        &root.join("old.py"),
        "from typing import List\nx = '%s' % 'y'\n",
    );

    let (code1, out1) = run(&[root.to_str().unwrap(), "--json"]);
    let (code2, out2) = run(&[root.to_str().unwrap(), "--json"]);
    assert_eq!(code1, 1);
    assert_eq!(out1, out2, "JSON report must be byte-identical across runs");

    let value: serde_json::Value = serde_json::from_str(&out1).unwrap();
    assert_eq!(value["summary"]["total_files"], 1);
    assert_eq!(value["summary"]["rule_counts"]["PM101"], 1);
    assert_eq!(value["summary"]["rule_counts"]["PM401"], 1);
    let findings = value["files"][0]["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0]["rule_id"], "PM101");
}

#[test]
fn test_rules_flag_limits_report() {
    let dir = project_tempdir();
    let root = dir.path();
    write_file(
        &root.join("old.py"),
        "from typing import List\nx = '%s' % 'y'\n",
    );

    let (code, out) = run(&[root.to_str().unwrap(), "--json", "--rules", "PM401"]);
    assert_eq!(code, 1);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(value["summary"]["rule_counts"].get("PM101").is_none());
    assert_eq!(value["summary"]["rule_counts"]["PM401"], 1);
}

#[test]
fn test_github_format_emits_annotations() {
    let dir = project_tempdir();
    let root = dir.path();
    write_file(&root.join("old.py"), "import os\nos.system('true')\n");

    let (code, out) = run(&[root.to_str().unwrap(), "--format", "github"]);
    assert_eq!(code, 1);
    assert!(
        out.contains("::warning file=old.py,line=2"),
        "output was: {out}"
    );
    assert!(out.contains("title=PM303"));
}

#[test]
fn test_list_rules_exits_zero() {
    let (code, out) = run(&["--list-rules"]);
    assert_eq!(code, 0);
    assert!(out.contains("PM101"));
    assert!(out.contains("PM405"));
    assert!(out.contains("legacy-typing-import"));
}

#[test]
fn test_quiet_prints_only_summary() {
    let dir = project_tempdir();
    let root = dir.path();
    write_file(&root.join("old.py"), "from typing import List\n");

    let (code, out) = run(&[root.to_str().unwrap(), "--quiet"]);
    assert_eq!(code, 1);
    assert!(out.contains("[SUMMARY]"));
    assert!(!out.contains("Rule ID"), "no tables in quiet mode: {out}");
}
