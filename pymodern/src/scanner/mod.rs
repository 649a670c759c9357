//! Source scanner: directory traversal and per-file fact production.

use crate::errors::CyclicPathError;
use crate::utils::LineIndex;
use rustc_hash::FxHashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Filters applied while walking a source tree.
#[derive(Debug, Clone, Default)]
pub struct ScanFilters {
    /// File extensions (without dot) to include.
    pub extensions: FxHashSet<String>,
    /// Folder names skipped during traversal.
    pub exclude_folders: FxHashSet<String>,
    /// Folder names force-included even when excluded by default.
    pub include_folders: FxHashSet<String>,
    /// Glob patterns for paths to skip.
    pub exclude_globs: Option<globset::GlobSet>,
}

impl ScanFilters {
    fn is_excluded_dir(&self, name: &str) -> bool {
        if self.include_folders.contains(name) {
            return false;
        }
        self.exclude_folders.contains(name)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.contains(e))
    }

    fn is_excluded_path(&self, path: &Path) -> bool {
        self.exclude_globs
            .as_ref()
            .is_some_and(|set| set.is_match(path))
    }
}

/// Walks `root` and collects matching source files, gitignore-aware.
///
/// Symlinks are followed; every visited directory is recorded by its real
/// (canonical) path so a symlink cycle is reported as a [`CyclicPathError`]
/// for that subtree instead of looping. Traversal continues elsewhere.
///
/// The returned file list is sorted so downstream processing order never
/// depends on filesystem enumeration order.
#[must_use]
pub fn collect_source_files(
    root: &Path,
    filters: &ScanFilters,
    verbose: bool,
) -> (Vec<PathBuf>, Vec<CyclicPathError>) {
    let mut files = Vec::new();
    let mut diagnostics = Vec::new();
    let mut visited_dirs: FxHashSet<PathBuf> = FxHashSet::default();
    let mut skip_prefixes: Vec<PathBuf> = Vec::new();

    if root.is_file() {
        if filters.matches_extension(root) && !filters.is_excluded_path(root) {
            files.push(root.to_path_buf());
        }
        return (files, diagnostics);
    }

    let walker = ignore::WalkBuilder::new(root).follow_links(true).build();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // The ignore crate reports its own loop detection here as well.
                diagnostics.push(CyclicPathError {
                    path: root.to_path_buf(),
                    error: err.to_string(),
                });
                continue;
            }
        };
        let path = entry.path();

        if skip_prefixes.iter().any(|prefix| path.starts_with(prefix)) {
            continue;
        }

        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        if is_dir {
            let name = entry.file_name().to_string_lossy();
            if path != root && filters.is_excluded_dir(&name) {
                if verbose {
                    eprintln!("[VERBOSE] Skipping excluded folder: {}", path.display());
                }
                skip_prefixes.push(path.to_path_buf());
                continue;
            }
            match path.canonicalize() {
                Ok(real) => {
                    if !visited_dirs.insert(real) {
                        diagnostics.push(CyclicPathError {
                            path: path.to_path_buf(),
                            error: "directory already visited via another link (symlink cycle)"
                                .to_owned(),
                        });
                        skip_prefixes.push(path.to_path_buf());
                    }
                }
                Err(err) => {
                    diagnostics.push(CyclicPathError {
                        path: path.to_path_buf(),
                        error: format!("failed to resolve real path: {err}"),
                    });
                    skip_prefixes.push(path.to_path_buf());
                }
            }
            continue;
        }

        if filters.matches_extension(path) && !filters.is_excluded_path(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    (files, diagnostics)
}

/// Parse outcome for one file.
#[derive(Debug)]
pub enum ParseOutcome {
    /// The module parsed; facts are the syntax tree.
    Parsed(Box<ruff_python_ast::ModModule>),
    /// The file could not be read or parsed.
    Failed {
        /// Human-readable failure description.
        message: String,
        /// 1-indexed line of the failure (1 when unknown).
        line: usize,
    },
}

/// Parse-level facts for one source file.
///
/// Produced by the scanner, consumed once by the matcher, then dropped.
#[derive(Debug)]
pub struct FileFacts {
    /// Path of the scanned file.
    pub path: PathBuf,
    /// Full source text.
    pub source: String,
    /// Parsed module or failure description.
    pub outcome: ParseOutcome,
}

/// Reads and parses one file into [`FileFacts`].
///
/// Never fails: read and parse errors are captured in the outcome so one bad
/// file cannot abort the scan.
#[must_use]
pub fn read_facts(path: &Path) -> FileFacts {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            return FileFacts {
                path: path.to_path_buf(),
                source: String::new(),
                outcome: ParseOutcome::Failed {
                    message: format!("Failed to read file: {err}"),
                    line: 1,
                },
            };
        }
    };

    let outcome = match ruff_python_parser::parse_module(&source) {
        Ok(parsed) => ParseOutcome::Parsed(Box::new(parsed.into_syntax())),
        Err(err) => {
            let line = LineIndex::new(&source).line_index(err.location.start());
            ParseOutcome::Failed {
                message: format!("Syntax error: {err}"),
                line,
            }
        }
    };

    FileFacts {
        path: path.to_path_buf(),
        source,
        outcome,
    }
}
