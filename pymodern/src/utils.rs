//! Small shared helpers: offset-to-line mapping, path display, inline suppression.

use crate::constants::SUPPRESSION_RE;
use ruff_text_size::TextSize;
use rustc_hash::{FxHashMap, FxHashSet};

/// A utility struct to convert byte offsets to line numbers and columns.
///
/// The AST parser works with byte offsets, but findings are reported with
/// line/column positions which are more human-readable.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    /// Uses byte iteration for performance since '\n' is always a single byte in UTF-8.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a `TextSize` (byte offset) to a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: TextSize) -> usize {
        let offset = offset.to_usize();
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Converts a `TextSize` (byte offset) to a 0-indexed column number.
    #[must_use]
    pub fn column_index(&self, offset: TextSize) -> usize {
        let line = self.line_index(offset);
        let line_start = self.line_starts.get(line - 1).copied().unwrap_or(0);
        offset.to_usize().saturating_sub(line_start)
    }
}

/// Inline suppression parsed from a source comment.
#[derive(Debug, Clone)]
pub enum Suppression {
    /// `# pragma: no pymodern` or bare `# noqa` suppresses every rule on the line.
    All,
    /// `# noqa: PM101, PM204` suppresses only the named rules.
    Rules(FxHashSet<String>),
}

/// Scans source for suppression comments.
///
/// Returns a map of 1-indexed line numbers to the suppression in effect there.
/// This allows users to acknowledge a legacy idiom without it failing the audit.
#[must_use]
pub fn get_suppressed_lines(source: &str) -> FxHashMap<usize, Suppression> {
    let mut suppressed = FxHashMap::default();
    for (i, line) in source.lines().enumerate() {
        let Some(caps) = SUPPRESSION_RE().captures(line) else {
            continue;
        };
        let suppression = match caps.get(1) {
            Some(ids) => {
                let rules: FxHashSet<String> = ids
                    .as_str()
                    .split(',')
                    .map(|id| id.trim().to_uppercase())
                    .filter(|id| !id.is_empty())
                    .collect();
                if rules.is_empty() {
                    Suppression::All
                } else {
                    Suppression::Rules(rules)
                }
            }
            None => Suppression::All,
        };
        suppressed.insert(i + 1, suppression);
    }
    suppressed
}

/// Returns whether a rule is suppressed on the given line.
#[must_use]
pub fn is_line_suppressed(
    suppressed: &FxHashMap<usize, Suppression>,
    line: usize,
    rule_id: &str,
) -> bool {
    match suppressed.get(&line) {
        Some(Suppression::All) => true,
        Some(Suppression::Rules(rules)) => rules.contains(&rule_id.to_uppercase()),
        None => false,
    }
}

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
#[must_use]
pub fn normalize_display_path(path: &std::path::Path) -> String {
    let s = path.to_string_lossy();
    let normalized = s.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Extracts the matched source text for a finding, truncated to one line.
#[must_use]
pub fn snippet_at(source: &str, start: usize, end: usize) -> String {
    let end = end.min(source.len());
    let start = start.min(end);
    let raw = &source[start..end];
    let first_line = raw.lines().next().unwrap_or(raw);
    if first_line.len() > crate::constants::MAX_SNIPPET_CHARS {
        let mut cut = crate::constants::MAX_SNIPPET_CHARS;
        while !first_line.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &first_line[..cut])
    } else {
        first_line.to_owned()
    }
}
