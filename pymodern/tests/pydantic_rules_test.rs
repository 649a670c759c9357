//! Behavioral tests for the Pydantic v1 migration rules.
#![allow(clippy::unwrap_used)]

use pymodern::auditor::{AuditReport, Auditor};
use pymodern::config::Config;
use pymodern::registry::Registry;
use pymodern::rules::Finding;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project_tempdir() -> TempDir {
    let mut target_dir = std::env::current_dir().unwrap();
    target_dir.push("target");
    target_dir.push("test-pydantic-rules");
    fs::create_dir_all(&target_dir).unwrap();
    tempfile::Builder::new()
        .prefix("pydantic_rules_")
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

fn all_findings(report: &AuditReport) -> Vec<&Finding> {
    report
        .files
        .iter()
        .flat_map(|f| f.findings.iter())
        .collect()
}

#[test]
fn test_nested_config_class_in_model_flagged() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(
        &root.join("models.py"),
        concat!(
            "from pydantic import BaseModel\n",
            "\n",
            "class User(BaseModel):\n",
            "    name: str\n",
            "\n",
            "    class Config:\n",
            "        frozen = True\n",
        ),
    );

    let report = audit_dir(root);
    let findings = all_findings(&report);
    let config_findings: Vec<_> = findings.iter().filter(|f| f.rule_id == "PM201").collect();
    assert_eq!(config_findings.len(), 1, "{findings:?}");
    assert_eq!(config_findings[0].line, 6);
    assert!(config_findings[0].message.contains("User"));
}

#[test]
fn test_config_class_outside_model_not_flagged() {
    let dir = project_tempdir();
    let root = dir.path();

    // `class Config` in a plain class is not a Pydantic idiom.
    write_file(
        &root.join("plain.py"),
        "class Settings:\n    class Config:\n        pass\n",
    );

    let report = audit_dir(root);
    assert!(
        all_findings(&report).iter().all(|f| f.rule_id != "PM201"),
        "{:?}",
        report.files
    );
}

#[test]
fn test_qualified_base_and_settings_base_flagged() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(
        &root.join("settings.py"),
        concat!(
            "import pydantic\n",
            "\n",
            "class AppSettings(pydantic.BaseSettings):\n",
            "    class Config:\n",
            "        env_prefix = 'APP_'\n",
        ),
    );

    let report = audit_dir(root);
    let findings = all_findings(&report);
    assert_eq!(
        findings.iter().filter(|f| f.rule_id == "PM201").count(),
        1,
        "{findings:?}"
    );
}

#[test]
fn test_legacy_validators_flagged() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(
        &root.join("validators.py"),
        concat!(
            "from pydantic import BaseModel, validator, root_validator\n",
            "\n",
            "class User(BaseModel):\n",
            "    name: str\n",
            "\n",
            "    @validator('name')\n",
            "    def check_name(cls, v):\n",
            "        return v\n",
            "\n",
            "    @root_validator\n",
            "    def check_all(cls, values):\n",
            "        return values\n",
        ),
    );

    let report = audit_dir(root);
    let findings = all_findings(&report);
    // Both imports on line 1, plus the two decorator usages.
    let validator_lines: Vec<usize> = findings
        .iter()
        .filter(|f| f.rule_id == "PM202")
        .map(|f| f.line)
        .collect();
    assert_eq!(validator_lines, vec![1, 1, 6, 10], "{findings:?}");
}

#[test]
fn test_serializer_calls_require_pydantic_import() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(
        &root.join("uses_pydantic.py"),
        concat!(
            "from pydantic import BaseModel\n",
            "\n",
            "def dump(user):\n",
            "    return user.dict(), user.json()\n",
        ),
    );
    // Same calls, but no pydantic import anywhere: stays silent.
    write_file(
        &root.join("no_pydantic.py"),
        "def dump(thing):\n    return thing.dict(), thing.json()\n",
    );

    let report = audit_dir(root);
    for file in &report.files {
        assert!(
            file.file.to_string_lossy().ends_with("uses_pydantic.py"),
            "only the pydantic module should report: {:?}",
            report.files
        );
    }
    assert_eq!(report.summary.rule_counts.get("PM203"), Some(&2));
}

#[test]
fn test_json_module_calls_not_confused_with_serializers() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(
        &root.join("io.py"),
        concat!(
            "import json\n",
            "from pydantic import BaseModel\n",
            "\n",
            "def encode(payload):\n",
            "    return json.dumps(payload)\n",
        ),
    );

    let report = audit_dir(root);
    assert!(
        all_findings(&report).iter().all(|f| f.rule_id != "PM203"),
        "{:?}",
        report.files
    );
}

#[test]
fn test_rule_subset_excludes_pydantic_rules() {
    let dir = project_tempdir();
    let root = dir.path();

    write_file(
        &root.join("models.py"),
        concat!(
            "from pydantic import BaseModel\n",
            "\n",
            "class User(BaseModel):\n",
            "    class Config:\n",
            "        pass\n",
        ),
    );

    let registry = Registry::with_selection(Some(&["PM101".to_owned()]), &[]).unwrap();
    let auditor = Auditor::new(registry, Config::default()).with_root(root.to_path_buf());
    let report = auditor.audit(&[root.to_path_buf()]).unwrap();
    assert!(!report.has_findings(), "{:?}", report.files);
}
