//! Scanner behavior: filtering, partial failure, and cycle detection.
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
    target_dir.push("test-scanner");
    fs::create_dir_all(&target_dir).unwrap();
    tempfile::Builder::new()
        .prefix("scanner_")
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

#[test]
fn test_default_exclude_folders_skipped() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(&root.join("app.py"), "from typing import List\n");
    write_file(
        &root.join(".venv/lib/site.py"),
        "from typing import List\n",
    );
    write_file(
        &root.join("build/gen.py"),
        "from typing import List\n",
    );

    let report = audit_dir(root);
    assert_eq!(report.summary.total_files, 1);
    assert!(report.files[0].file.ends_with("app.py"));
}

#[test]
fn test_include_folders_override_defaults() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(&root.join("build/gen.py"), "from typing import List\n");

    let auditor = Auditor::new(Registry::builtin().unwrap(), Config::default())
        .with_root(root.to_path_buf())
        .with_includes(vec!["build".to_owned()]);
    let report = auditor.audit(&[root.to_path_buf()]).unwrap();
    assert_eq!(report.summary.total_files, 1);
}

#[test]
fn test_extension_filter() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(&root.join("mod.py"), "from typing import List\n");
    write_file(&root.join("stub.pyi"), "from typing import List\n");
    write_file(&root.join("notes.txt"), "from typing import List\n");

    let report = audit_dir(root);
    assert_eq!(report.summary.total_files, 2, "py and pyi only");
}

#[test]
fn test_exclude_path_globs() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(&root.join("app.py"), "from typing import List\n");
    write_file(
        &root.join("pkg/migrations/0001_init.py"),
        "from typing import List\n",
    );

    let auditor = Auditor::new(Registry::builtin().unwrap(), Config::default())
        .with_root(root.to_path_buf())
        .with_exclude_paths(vec!["**/migrations/**".to_owned()]);
    let report = auditor.audit(&[root.to_path_buf()]).unwrap();
    assert_eq!(report.summary.total_files, 1);
}

#[test]
fn test_invalid_exclude_glob_is_fatal() {
    let dir = project_tempdir();
    let root = dir.path();
    write_file(&root.join("app.py"), "x = 1\n");

    let auditor = Auditor::new(Registry::builtin().unwrap(), Config::default())
        .with_root(root.to_path_buf())
        .with_exclude_paths(vec!["a[".to_owned()]);
    let err = auditor
        .audit(&[root.to_path_buf()])
        .expect_err("unclosed character class must not be accepted");
    assert!(err.to_string().contains("invalid exclude glob"));
}

#[test]
fn test_parse_error_is_isolated_to_its_file() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(&root.join("broken.py"), "def broken(:\n    pass\n");
    write_file(&root.join("ok.py"), "from typing import List\n");

    let report = audit_dir(root);

    assert_eq!(report.summary.parse_errors_count, 1);
    let broken = report
        .files
        .iter()
        .find(|f| f.file.ends_with("broken.py"))
        .unwrap();
    assert_eq!(broken.findings.len(), 1, "exactly one parse-error finding");
    assert_eq!(broken.findings[0].rule_id, "PM000");

    let ok = report
        .files
        .iter()
        .find(|f| f.file.ends_with("ok.py"))
        .unwrap();
    assert_eq!(
        ok.findings[0].rule_id, "PM101",
        "the healthy file still reports its findings"
    );
}

#[test]
fn test_single_file_path_is_audited() {
    let dir = project_tempdir();
    let root = dir.path();

    let file = root.join("one.py");
    write_file(&file, "from typing import List\n");

    let auditor = Auditor::new(Registry::builtin().unwrap(), Config::default())
        .with_root(root.to_path_buf());
    let report = auditor.audit(&[file]).unwrap();
    assert_eq!(report.summary.total_files, 1);
    assert_eq!(report.summary.rule_counts.get("PM101"), Some(&1));
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_reported_not_looped() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(&root.join("pkg/mod.py"), "from typing import List\n");
    // pkg/loop -> pkg creates a traversal cycle.
    std::os::unix::fs::symlink(root.join("pkg"), root.join("pkg/loop")).unwrap();

    let report = audit_dir(root);

    // The audit terminates, reports the cycle, and still audits the real file.
    assert!(
        !report.traversal_errors.is_empty(),
        "cycle should surface as a traversal error"
    );
    assert!(report.summary.rule_counts.contains_key("PM101"));
    assert_eq!(
        report.summary.traversal_errors_count,
        report.traversal_errors.len()
    );
}
