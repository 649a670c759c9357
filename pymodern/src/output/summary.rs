use crate::auditor::AuditReport;
use crate::registry;
use colored::Colorize;
use std::io::Write;

/// Print the report header.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn print_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "{}", "pymodern audit".bold())?;
    Ok(())
}

/// Print per-rule finding counts with the modern replacement for each.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn print_rule_summary(writer: &mut impl Write, report: &AuditReport) -> std::io::Result<()> {
    if report.summary.rule_counts.is_empty() {
        return Ok(());
    }

    writeln!(writer, "\n{}", "Findings per rule".bold().underline())?;
    for (rule_id, count) in &report.summary.rule_counts {
        match registry::get_rule_descriptor(rule_id) {
            Some(descriptor) => writeln!(
                writer,
                "  {:>4}x {} {} -> {}",
                count,
                rule_id.dimmed(),
                descriptor.name,
                descriptor.replacement
            )?,
            None => writeln!(writer, "  {:>4}x {} (unparsable file)", count, rule_id.dimmed())?,
        }
    }
    Ok(())
}
