use crate::auditor::AuditReport;
use crate::constants::RULE_ID_PARSE_ERROR;
use crate::registry::{self, RuleCategory};
use crate::rules::Finding;
use crate::utils::normalize_display_path;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use super::summary::{print_header, print_rule_summary};
use super::tables::{get_severity_color, print_findings, print_parse_errors};

/// Print the full report, grouped by rule category.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn print_report(writer: &mut impl Write, report: &AuditReport) -> std::io::Result<()> {
    print_header(writer)?;

    if !report.has_findings() && report.traversal_errors.is_empty() {
        writeln!(writer, "{}", "✓ All modern! No outdated idioms found.".green())?;
        return Ok(());
    }

    let all_findings: Vec<&Finding> = report
        .files
        .iter()
        .flat_map(|file| file.findings.iter())
        .collect();

    for category in [
        RuleCategory::Typing,
        RuleCategory::Pydantic,
        RuleCategory::Stdlib,
        RuleCategory::Style,
    ] {
        let in_category: Vec<&Finding> = all_findings
            .iter()
            .copied()
            .filter(|f| {
                registry::get_rule_descriptor(&f.rule_id)
                    .is_some_and(|d| d.category == category)
            })
            .collect();
        print_findings(
            writer,
            &format!("{} Modernization", category.as_str()),
            &in_category,
        )?;
    }

    let parse_errors: Vec<&Finding> = all_findings
        .iter()
        .copied()
        .filter(|f| f.rule_id == RULE_ID_PARSE_ERROR)
        .collect();
    print_parse_errors(writer, &parse_errors)?;

    print_traversal_errors(writer, report)?;
    print_rule_summary(writer, report)?;
    Ok(())
}

/// Print findings grouped by file.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_report_grouped(
    writer: &mut impl Write,
    report: &AuditReport,
) -> std::io::Result<()> {
    print_header(writer)?;

    let mut grouped: BTreeMap<String, Vec<&Finding>> = BTreeMap::new();
    for file in &report.files {
        grouped
            .entry(file.file.to_string_lossy().into_owned())
            .or_default()
            .extend(file.findings.iter());
    }

    for (file, findings) in grouped {
        writeln!(
            writer,
            "\nFile: {}",
            normalize_display_path(Path::new(&file)).bold().underline()
        )?;
        for finding in findings {
            let color = match get_severity_color(&finding.severity) {
                comfy_table::Color::Red => colored::Color::Red,
                comfy_table::Color::Yellow => colored::Color::Yellow,
                comfy_table::Color::Blue => colored::Color::Blue,
                _ => colored::Color::White,
            };
            writeln!(
                writer,
                "  Line {}: [{}] {} (use: {})",
                finding.line.to_string().cyan(),
                finding.rule_id,
                finding.message.color(color),
                finding.replacement
            )?;
        }
    }

    print_traversal_errors(writer, report)?;
    print_rule_summary(writer, report)?;
    Ok(())
}

/// Print a quiet report (no detailed tables) for CI/CD mode.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_report_quiet(writer: &mut impl Write, report: &AuditReport) -> std::io::Result<()> {
    writeln!(
        writer,
        "\n[SUMMARY] {} outdated idioms in {} of {} files, {} parse errors",
        report.summary.total_findings - report.summary.parse_errors_count,
        report.files.len(),
        report.summary.total_files,
        report.summary.parse_errors_count
    )?;
    Ok(())
}

fn print_traversal_errors(
    writer: &mut impl Write,
    report: &AuditReport,
) -> std::io::Result<()> {
    if report.traversal_errors.is_empty() {
        return Ok(());
    }
    writeln!(writer, "\n{}", "Traversal Errors".bold().underline())?;
    for error in &report.traversal_errors {
        writeln!(
            writer,
            "  {}: {}",
            normalize_display_path(&error.path).yellow(),
            error.error
        )?;
    }
    Ok(())
}
