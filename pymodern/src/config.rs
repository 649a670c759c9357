//! Configuration discovery and models.
//!
//! Configuration lives in `.pymodern.toml` at the project root, or in a
//! `[tool.pymodern]` table of `pyproject.toml`. Discovery walks up from the
//! scanned path; CLI flags override file configuration.

mod loader;
mod models;

pub use models::{Config, PymodernConfig};

impl Config {
    /// Loads configuration for `path`, walking up parent directories.
    ///
    /// Falls back to defaults when no configuration file is found or a
    /// candidate file does not parse.
    #[must_use]
    pub fn load(path: &std::path::Path) -> Self {
        loader::load_from_path(path)
    }
}
