//! Builder-style methods for the auditor.

use globset::GlobBuilder;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{Auditor, PerFileIgnoreRule};
use crate::config::Config;
use crate::registry::Registry;

impl Default for Auditor {
    fn default() -> Self {
        // The builtin catalog is statically unique; an empty registry is the
        // only safe fallback if that ever regresses.
        let registry = Registry::builtin().unwrap_or_else(|_| Registry::empty());
        Self {
            registry,
            extensions: crate::constants::DEFAULT_EXTENSIONS
                .iter()
                .map(|e| (*e).to_owned())
                .collect(),
            exclude_folders: Vec::new(),
            include_folders: Vec::new(),
            exclude_paths: Vec::new(),
            analysis_root: std::path::PathBuf::from("."),
            config: Config::default(),
            verbose: false,
            progress_bar: None,
            per_file_ignore_rules: Vec::new(),
        }
    }
}

impl Auditor {
    /// Creates a new auditor with the given rule set and configuration.
    #[must_use]
    pub fn new(registry: Registry, config: Config) -> Self {
        let per_file_ignore_rules =
            build_per_file_ignore_rules(config.pymodern.per_file_ignores.as_ref());
        Self {
            registry,
            config,
            per_file_ignore_rules,
            ..Self::default()
        }
    }

    /// Builder-style method to set the audit root.
    #[must_use]
    pub fn with_root(mut self, root: std::path::PathBuf) -> Self {
        self.analysis_root = root;
        self
    }

    /// Builder-style method to set verbose mode.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Builder-style method to set the included file extensions.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    /// Builder-style method to set excluded folders.
    #[must_use]
    pub fn with_excludes(mut self, folders: Vec<String>) -> Self {
        self.exclude_folders = folders;
        self
    }

    /// Builder-style method to set included folders.
    #[must_use]
    pub fn with_includes(mut self, folders: Vec<String>) -> Self {
        self.include_folders = folders;
        self
    }

    /// Builder-style method to set excluded path globs.
    #[must_use]
    pub fn with_exclude_paths(mut self, globs: Vec<String>) -> Self {
        self.exclude_paths = globs;
        self
    }

    /// Builder-style method to set the enabled rule set.
    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Builder-style method to set config.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self.per_file_ignore_rules =
            build_per_file_ignore_rules(self.config.pymodern.per_file_ignores.as_ref());
        self
    }

    /// Builder-style method to attach a progress bar.
    #[must_use]
    pub fn with_progress(
        mut self,
        progress_bar: Option<std::sync::Arc<indicatif::ProgressBar>>,
    ) -> Self {
        self.progress_bar = progress_bar;
        self
    }
}

fn build_per_file_ignore_rules(
    per_file_ignores: Option<&FxHashMap<String, Vec<String>>>,
) -> Vec<PerFileIgnoreRule> {
    let mut rules = Vec::new();
    if let Some(mapping) = per_file_ignores {
        for (pattern, ids) in mapping {
            match GlobBuilder::new(pattern).literal_separator(true).build() {
                Ok(glob) => {
                    let rule_ids = ids
                        .iter()
                        .map(|id| id.trim().to_uppercase())
                        .filter(|id| !id.is_empty())
                        .collect::<FxHashSet<_>>();

                    if rule_ids.is_empty() {
                        continue;
                    }

                    rules.push(PerFileIgnoreRule {
                        matcher: glob.compile_matcher(),
                        rule_ids,
                    });
                }
                Err(err) => {
                    eprintln!("[WARN] Skipping invalid per-file ignore glob '{pattern}': {err}");
                }
            }
        }
    }
    rules
}
