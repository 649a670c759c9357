//! Report types produced by an audit run.

use crate::errors::CyclicPathError;
use crate::rules::Finding;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Findings for one file, ordered by ascending source position.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path of the audited file.
    pub file: PathBuf,
    /// Findings in (line, col, rule id) order.
    pub findings: Vec<Finding>,
}

/// Aggregate counters for an audit run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditSummary {
    /// Number of files scanned (including clean ones).
    pub total_files: usize,
    /// Number of source lines scanned.
    pub total_lines: usize,
    /// Total findings, including parse-error findings.
    pub total_findings: usize,
    /// Number of files that failed to read or parse.
    pub parse_errors_count: usize,
    /// Number of traversal errors (symlink cycles, unreadable subtrees).
    pub traversal_errors_count: usize,
    /// Findings per rule identifier, in identifier order.
    pub rule_counts: BTreeMap<String, usize>,
}

/// The full audit report.
///
/// Fully determined by (registry, source tree): files are sorted by path,
/// findings by position, counters keyed by ordered maps, so re-running on
/// unchanged input serializes byte-identically.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Per-file finding groups, sorted by path. Clean files are omitted.
    pub files: Vec<FileReport>,
    /// Traversal errors, sorted by path.
    pub traversal_errors: Vec<CyclicPathError>,
    /// Aggregate counters.
    pub summary: AuditSummary,
}

impl AuditReport {
    /// Returns whether the audit produced any finding at all.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        self.summary.total_findings > 0
    }
}

/// Per-file result produced by the parallel stage, before aggregation.
#[derive(Debug)]
pub(crate) struct FileAudit {
    pub(crate) file: PathBuf,
    pub(crate) findings: Vec<Finding>,
    pub(crate) lines: usize,
    pub(crate) had_parse_error: bool,
}
