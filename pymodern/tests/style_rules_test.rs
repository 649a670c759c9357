//! Behavioral tests for the style modernization rules and inline suppression.
#![allow(clippy::unwrap_used)]

use pymodern::auditor::{AuditReport, Auditor};
use pymodern::config::Config;
use pymodern::registry::Registry;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project_tempdir() -> TempDir {
    let mut target_dir = std::env::current_dir().unwrap();
    target_dir.push("target");
    target_dir.push("test-style-rules");
    fs::create_dir_all(&target_dir).unwrap();
    tempfile::Builder::new()
        .prefix("style_rules_")
        .tempdir_in(target_dir)
        .unwrap()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn audit_dir(root: &Path) -> AuditReport {
    let auditor = Auditor::new(Registry::builtin().unwrap(), Config::default())
        .with_root(root.to_path_buf());
    auditor.audit(&[root.to_path_buf()]).unwrap()
}

fn rule_lines(report: &AuditReport, rule_id: &str) -> Vec<usize> {
    report
        .files
        .iter()
        .flat_map(|f| f.findings.iter())
        .filter(|f| f.rule_id == rule_id)
        .map(|f| f.line)
        .collect()
}

#[test]
fn test_percent_format_on_literal_flagged() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(
        &root.join("fmt.py"),
        concat!(
            "name = 'world'\n",
            "greeting = 'hello %s' % name\n",
            "remainder = 10 % 3\n",
        ),
    );

    let report = audit_dir(root);
    // Integer modulo must not be confused with %-formatting.
    assert_eq!(rule_lines(&report, "PM401"), vec![2]);
}

#[test]
fn test_str_format_call_flagged() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(
        &root.join("fmt.py"),
        concat!(
            "a = '{}: {}'.format('k', 'v')\n",
            "template = get_template()\n",
            "b = template.format(1)\n",
        ),
    );

    let report = audit_dir(root);
    // Only the literal receiver is structural enough to flag.
    assert_eq!(rule_lines(&report, "PM402"), vec![1]);
}

#[test]
fn test_mutable_default_arguments_flagged() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(
        &root.join("defaults.py"),
        concat!(
            "def collect(item, bucket=[]):\n",
            "    bucket.append(item)\n",
            "    return bucket\n",
            "\n",
            "def index(key, mapping=dict()):\n",
            "    return mapping.get(key)\n",
            "\n",
            "def safe(key, mapping=None):\n",
            "    return (mapping or {}).get(key)\n",
        ),
    );

    let report = audit_dir(root);
    assert_eq!(rule_lines(&report, "PM403"), vec![1, 5]);
}

#[test]
fn test_type_comparison_flagged() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(
        &root.join("checks.py"),
        concat!(
            "def check(x):\n",
            "    if type(x) == int:\n",
            "        return True\n",
            "    if isinstance(x, str):\n",
            "        return True\n",
            "    return x == int\n",
        ),
    );

    let report = audit_dir(root);
    assert_eq!(rule_lines(&report, "PM404"), vec![2]);
}

#[test]
fn test_super_with_arguments_flagged() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(
        &root.join("klass.py"),
        concat!(
            "class Child(Base):\n",
            "    def __init__(self):\n",
            "        super(Child, self).__init__()\n",
            "\n",
            "    def reset(self):\n",
            "        super().reset()\n",
        ),
    );

    let report = audit_dir(root);
    assert_eq!(rule_lines(&report, "PM405"), vec![3]);
}

#[test]
fn test_pragma_suppresses_all_rules_on_line() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(
        &root.join("suppressed.py"),
        concat!(
            "a = '%s' % 'x'  # pragma: no pymodern\n",
            "b = '%s' % 'y'\n",
        ),
    );

    let report = audit_dir(root);
    assert_eq!(rule_lines(&report, "PM401"), vec![2]);
}

#[test]
fn test_noqa_suppresses_named_rule_only() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(
        &root.join("noqa.py"),
        concat!(
            "from typing import List  # noqa: PM101\n",
            "xs: List[int] = []\n",
        ),
    );

    let report = audit_dir(root);
    assert!(rule_lines(&report, "PM101").is_empty(), "{:?}", report.files);
}

#[test]
fn test_per_file_ignores_from_config() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(
        &root.join("tests/test_fixtures.py"),
        "def make(bucket=[]):\n    return bucket\n",
    );
    write_file(
        &root.join("app.py"),
        "def make(bucket=[]):\n    return bucket\n",
    );
    write_file(
        &root.join(".pymodern.toml"),
        "[pymodern]\nper-file-ignores = { \"tests/*\" = [\"PM403\"] }\n",
    );

    let config = Config::load(root);
    let auditor = Auditor::new(Registry::builtin().unwrap(), Config::default())
        .with_config(config)
        .with_root(root.to_path_buf());
    let report = auditor.audit(&[root.to_path_buf()]).unwrap();

    let flagged: Vec<String> = report
        .files
        .iter()
        .map(|f| f.file.to_string_lossy().into_owned())
        .collect();
    assert_eq!(flagged.len(), 1, "{flagged:?}");
    assert!(flagged[0].ends_with("app.py"));
}
