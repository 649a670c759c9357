//! Command line interface definition.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.pymodern.toml):
  Create this file in your project root (or use [tool.pymodern] in
  pyproject.toml) to set defaults.

  [pymodern]
  # Rule selection
  rules = [\"PM101\", \"PM201\"]   # Enable only these rules (default: all)
  ignore = [\"PM405\"]            # Disable these rules

  # Path filters
  extensions = [\"py\", \"pyi\"]
  exclude_paths = [\"**/migrations/**\"]
  exclude_folders = [\"build\", \"dist\", \".venv\"]
  include_folders = [\"src\"]     # Force-include these

  # Per-file rule ignores (glob -> rule IDs)
  per-file-ignores = { \"tests/*\" = [\"PM403\"], \"legacy/*\" = [\"PM101\"] }

INLINE SUPPRESSION:
  x = model.dict()  # pragma: no pymodern   (suppress every rule)
  from typing import List  # noqa: PM101    (suppress named rules)

EXIT CODES:
  0  no findings
  1  one or more findings (including parse errors)
  2  fatal error (unknown rule id, invalid glob, missing path)
";

/// Report output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Category tables plus a per-rule summary.
    #[default]
    Text,
    /// Findings grouped by file.
    Grouped,
    /// Structured JSON report.
    Json,
    /// GitHub Actions annotations.
    Github,
}

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pymodern - Audits Python codebases for outdated idioms and reports the modern replacement",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Paths to audit (files or directories).
    /// When no paths are provided, defaults to the current directory.
    pub paths: Vec<PathBuf>,

    /// Audit root (mutually exclusive with positional paths).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Subset of rule identifiers to enable (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub rules: Vec<String>,

    /// File extensions to include (without dot). Defaults to py, pyi.
    #[arg(long = "extension")]
    pub extensions: Vec<String>,

    /// Glob patterns for paths to skip.
    #[arg(long = "exclude-path")]
    pub exclude_paths: Vec<String>,

    /// Folders to exclude from the audit.
    #[arg(long, alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// Folders to force-include in the audit (overrides default exclusions).
    #[arg(long, alias = "include-folder")]
    pub include_folders: Vec<String>,

    /// Report output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output raw JSON (shorthand for --format json).
    #[arg(long)]
    pub json: bool,

    /// Only print the summary line.
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose diagnostics on stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the rule catalog and exit.
    #[arg(long)]
    pub list_rules: bool,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// Returns the effective output format, honoring the `--json` shorthand.
    #[must_use]
    pub fn effective_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }

    /// Returns whether output is machine-readable (no decorations, no progress).
    #[must_use]
    pub fn is_structured(&self) -> bool {
        matches!(
            self.effective_format(),
            OutputFormat::Json | OutputFormat::Github
        )
    }
}
