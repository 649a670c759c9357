//! Deterministic merge of per-file results.
//!
//! Parallel collection order is arbitrary; everything is sorted here so the
//! report depends only on (registry, source tree).

use super::types::{AuditReport, AuditSummary, FileAudit, FileReport};
use crate::errors::CyclicPathError;
use std::collections::BTreeMap;

pub(crate) fn aggregate(
    mut per_file: Vec<FileAudit>,
    mut traversal_errors: Vec<CyclicPathError>,
) -> AuditReport {
    per_file.sort_by(|a, b| a.file.cmp(&b.file));
    traversal_errors.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.error.cmp(&b.error)));

    let mut summary = AuditSummary {
        total_files: per_file.len(),
        traversal_errors_count: traversal_errors.len(),
        ..AuditSummary::default()
    };

    let mut rule_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut files = Vec::new();
    for audit in per_file {
        summary.total_lines += audit.lines;
        summary.total_findings += audit.findings.len();
        if audit.had_parse_error {
            summary.parse_errors_count += 1;
        }
        for finding in &audit.findings {
            *rule_counts.entry(finding.rule_id.clone()).or_insert(0) += 1;
        }
        if !audit.findings.is_empty() {
            files.push(FileReport {
                file: audit.file,
                findings: audit.findings,
            });
        }
    }
    summary.rule_counts = rule_counts;

    AuditReport {
        files,
        traversal_errors,
        summary,
    }
}
