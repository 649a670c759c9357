//! The audit driver: options, parallel fan-out, and aggregation.
//!
//! Each file's scan-and-match pipeline is independent; the only
//! synchronization point is the final aggregation, which sorts collected
//! results instead of relying on completion order.

mod aggregation;
mod builder;
mod single_file;

/// Report types produced by an audit run.
pub mod types;

pub use types::{AuditReport, AuditSummary, FileReport};

use crate::config::Config;
use crate::constants::CHUNK_SIZE;
use crate::errors::ConfigurationError;
use crate::registry::Registry;
use crate::scanner::{self, ScanFilters};
use globset::GlobMatcher;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use rustc_hash::FxHashSet;
use std::path::PathBuf;

pub(crate) struct PerFileIgnoreRule {
    matcher: GlobMatcher,
    rule_ids: FxHashSet<String>,
}

/// Main audit state and runtime configuration.
pub struct Auditor {
    /// Enabled rule set.
    pub registry: Registry,
    /// File extensions (without dot) to include.
    pub extensions: Vec<String>,
    /// Folders to exclude from scanning.
    pub exclude_folders: Vec<String>,
    /// Folders to force-include (overrides default exclusions).
    pub include_folders: Vec<String>,
    /// Glob patterns for paths to skip.
    pub exclude_paths: Vec<String>,
    /// Audit root for relative path resolution.
    pub analysis_root: PathBuf,
    /// Configuration object.
    pub config: Config,
    /// Whether to emit verbose diagnostics to stderr.
    pub verbose: bool,
    /// Progress bar for tracking audit progress (thread-safe).
    pub progress_bar: Option<std::sync::Arc<indicatif::ProgressBar>>,
    per_file_ignore_rules: Vec<PerFileIgnoreRule>,
}

impl Auditor {
    /// Runs the audit over the given paths (files or directories).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if an exclude glob fails to compile.
    /// Everything else — unreadable files, syntax errors, cyclic subtrees —
    /// is recovered per file or per subtree and surfaced in the report.
    pub fn audit(&self, paths: &[PathBuf]) -> Result<AuditReport, ConfigurationError> {
        let filters = self.build_filters()?;

        let mut files = Vec::new();
        let mut traversal_errors = Vec::new();
        for path in paths {
            let (found, diagnostics) =
                scanner::collect_source_files(path, &filters, self.verbose);
            files.extend(found);
            traversal_errors.extend(diagnostics);
        }
        files.sort();
        files.dedup();

        if let Some(ref pb) = self.progress_bar {
            pb.set_length(files.len() as u64);
            pb.set_position(0);
        }
        if self.verbose {
            eprintln!(
                "[VERBOSE] Auditing {} files with {} rules",
                files.len(),
                self.registry.len()
            );
        }

        let mut per_file = Vec::with_capacity(files.len());
        for chunk in files.chunks(CHUNK_SIZE) {
            let chunk_results: Vec<types::FileAudit> = chunk
                .par_iter()
                .filter_map(|path| {
                    if crate::CANCELLED.load(std::sync::atomic::Ordering::Relaxed) {
                        return None;
                    }
                    Some(self.process_single_file(path))
                })
                .collect();
            per_file.extend(chunk_results);
        }

        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }

        Ok(aggregation::aggregate(per_file, traversal_errors))
    }

    fn build_filters(&self) -> Result<ScanFilters, ConfigurationError> {
        let mut exclude_folders: FxHashSet<String> = crate::constants::DEFAULT_EXCLUDE_FOLDERS()
            .iter()
            .map(|f| (*f).to_owned())
            .collect();
        exclude_folders.extend(self.exclude_folders.iter().cloned());
        for folder in &self.include_folders {
            exclude_folders.remove(folder);
        }

        let exclude_globs = if self.exclude_paths.is_empty() {
            None
        } else {
            let mut builder = globset::GlobSetBuilder::new();
            for pattern in &self.exclude_paths {
                let glob = globset::Glob::new(pattern).map_err(|err| {
                    ConfigurationError::InvalidGlob {
                        pattern: pattern.clone(),
                        error: err.to_string(),
                    }
                })?;
                builder.add(glob);
            }
            Some(
                builder
                    .build()
                    .map_err(|err| ConfigurationError::InvalidGlob {
                        pattern: self.exclude_paths.join(","),
                        error: err.to_string(),
                    })?,
            )
        };

        Ok(ScanFilters {
            extensions: self.extensions.iter().cloned().collect(),
            exclude_folders,
            include_folders: self.include_folders.iter().cloned().collect(),
            exclude_globs,
        })
    }

    /// Returns whether a rule id should be ignored for a given file path.
    #[must_use]
    pub fn is_rule_ignored_for_path(&self, file_path: &std::path::Path, rule_id: &str) -> bool {
        if self.per_file_ignore_rules.is_empty() {
            return false;
        }

        let normalized_rule_id = rule_id.trim().to_uppercase();
        if normalized_rule_id.is_empty() {
            return false;
        }

        let relative_path = match file_path.strip_prefix(&self.analysis_root) {
            Ok(p) => p,
            Err(_) => file_path,
        };

        let normalized_path = Self::normalize_glob_path(relative_path);
        self.per_file_ignore_rules.iter().any(|rule| {
            rule.rule_ids.contains(&normalized_rule_id) && rule.matcher.is_match(&normalized_path)
        })
    }

    #[must_use]
    fn normalize_glob_path(path: &std::path::Path) -> String {
        path.to_string_lossy().replace('\\', "/")
    }
}
