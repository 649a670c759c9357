//! Error taxonomy for audit setup and traversal.

use std::path::PathBuf;

/// Fatal setup error: the audit never starts when one of these is raised.
#[derive(Debug)]
pub enum ConfigurationError {
    /// Two catalog entries share a rule identifier.
    DuplicateRuleId(String),
    /// An enabled-rules selection names an identifier the catalog does not contain.
    UnknownRuleId(String),
    /// An exclude pattern failed to compile as a glob.
    InvalidGlob {
        /// The offending pattern.
        pattern: String,
        /// The compile error text.
        error: String,
    },
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateRuleId(id) => write!(f, "duplicate rule id in catalog: {id}"),
            Self::UnknownRuleId(id) => write!(f, "unknown rule id: {id}"),
            Self::InvalidGlob { pattern, error } => {
                write!(f, "invalid exclude glob '{pattern}': {error}")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Non-fatal traversal error surfaced in the report.
///
/// A cyclic subtree is abandoned; the rest of the walk continues.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CyclicPathError {
    /// Directory at which the cycle (or walk failure) was detected.
    pub path: PathBuf,
    /// Human-readable description.
    pub error: String,
}

impl std::fmt::Display for CyclicPathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "traversal error at {}: {}", self.path.display(), self.error)
    }
}

impl std::error::Error for CyclicPathError {}
