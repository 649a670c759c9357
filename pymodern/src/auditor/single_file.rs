//! Single file audit pipeline: read, parse, match, suppress.

use super::types::FileAudit;
use super::Auditor;
use crate::constants::RULE_ID_PARSE_ERROR;
use crate::matcher::MatcherVisitor;
use crate::rules::{build_rules, Finding};
use crate::scanner::{read_facts, ParseOutcome};
use crate::utils::{get_suppressed_lines, is_line_suppressed, LineIndex};
use std::path::Path;

impl Auditor {
    /// Processes a single file and returns its findings.
    ///
    /// Parse and read failures become a reserved `PM000` finding so one bad
    /// file never blocks the rest of the audit.
    pub(crate) fn process_single_file(&self, file_path: &Path) -> FileAudit {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }

        let facts = read_facts(file_path);
        let lines = facts.source.lines().count();

        let module = match facts.outcome {
            ParseOutcome::Parsed(module) => module,
            ParseOutcome::Failed { message, line } => {
                return FileAudit {
                    file: facts.path,
                    findings: vec![parse_error_finding(file_path, message, line)],
                    lines,
                    had_parse_error: true,
                };
            }
        };

        let line_index = LineIndex::new(&facts.source);
        let suppressed_lines = get_suppressed_lines(&facts.source);

        let mut matcher = MatcherVisitor::new(
            build_rules(&self.registry),
            facts.path.clone(),
            line_index,
            &facts.source,
        );
        matcher.match_module(&module);

        if matcher.recursion_limit_hit() && self.verbose {
            eprintln!(
                "[VERBOSE] Recursion limit hit in {}; deeply nested code was skipped",
                file_path.display()
            );
        }

        let findings = matcher
            .findings
            .into_iter()
            .filter(|finding| {
                !is_line_suppressed(&suppressed_lines, finding.line, &finding.rule_id)
                    && !self.is_rule_ignored_for_path(file_path, &finding.rule_id)
            })
            .collect();

        FileAudit {
            file: facts.path,
            findings,
            lines,
            had_parse_error: false,
        }
    }
}

fn parse_error_finding(file_path: &Path, message: String, line: usize) -> Finding {
    Finding {
        rule_id: RULE_ID_PARSE_ERROR.to_owned(),
        severity: "HIGH".to_owned(),
        message,
        replacement: "Fix the syntax error so the file can be audited.".to_owned(),
        file: file_path.to_path_buf(),
        line,
        col: 0,
        end_line: line,
        end_col: 0,
        snippet: String::new(),
    }
}
