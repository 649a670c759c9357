//! GitHub Actions workflow-command output.
//!
//! Each finding becomes one `::error`/`::warning`/`::notice` annotation that
//! GitHub attaches to the changed file in a pull request.

use crate::auditor::AuditReport;
use crate::utils::normalize_display_path;
use std::io::Write;
use std::path::Path;

fn annotation_level(severity: &str) -> &'static str {
    match severity.to_uppercase().as_str() {
        "CRITICAL" | "HIGH" => "error",
        "MEDIUM" => "warning",
        _ => "notice",
    }
}

/// Escapes annotation message data per the workflow-command rules.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes annotation property values per the workflow-command rules.
fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Print the report as GitHub Actions annotations.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn print_github_with_root(
    writer: &mut impl Write,
    report: &AuditReport,
    root: Option<&Path>,
) -> std::io::Result<()> {
    for file in &report.files {
        let display = match root.and_then(|r| file.file.strip_prefix(r).ok()) {
            Some(relative) => normalize_display_path(relative),
            None => normalize_display_path(&file.file),
        };
        for finding in &file.findings {
            writeln!(
                writer,
                "::{} file={},line={},endLine={},title={}::{} (use: {})",
                annotation_level(&finding.severity),
                escape_property(&display),
                finding.line,
                finding.end_line,
                escape_property(&finding.rule_id),
                escape_data(&finding.message),
                escape_data(&finding.replacement),
            )?;
        }
    }
    Ok(())
}
