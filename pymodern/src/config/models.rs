use rustc_hash::FxHashMap;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section for pymodern.
    pub pymodern: PymodernConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during discovery, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for pymodern.
pub struct PymodernConfig {
    /// Subset of rule identifiers to enable. `None` enables every rule.
    pub rules: Option<Vec<String>>,
    /// Rule identifiers to disable.
    pub ignore: Option<Vec<String>>,
    /// File extensions (without dot) to include.
    pub extensions: Option<Vec<String>>,
    /// Glob patterns for paths to skip.
    pub exclude_paths: Option<Vec<String>>,
    /// List of folders to exclude.
    pub exclude_folders: Option<Vec<String>>,
    /// List of folders to include.
    pub include_folders: Option<Vec<String>>,
    /// Per-file rule ignores (glob -> rule IDs).
    #[serde(alias = "per-file-ignores")]
    pub per_file_ignores: Option<FxHashMap<String, Vec<String>>>,
}

#[derive(Debug, Deserialize, Clone)]
pub(super) struct PyProject {
    pub(super) tool: ToolConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub(super) struct ToolConfig {
    pub(super) pymodern: PymodernConfig,
}
