//! pymodern - fast modernization audits for Python codebases.
//!
//! Scans a source tree, parses each file with the ruff parser, evaluates a
//! builtin catalog of outdated-idiom rules structurally against the AST, and
//! produces a deterministic report with per-rule counts. Advisory only: the
//! exit code is the sole control signal (0 = clean, 1 = findings, 2 = fatal
//! configuration error).

/// The audit driver: options, parallel fan-out, and aggregation.
pub mod auditor;
/// Command line interface definition.
pub mod cli;
/// Configuration discovery and models.
pub mod config;
/// Shared limits, regexes, and name sets.
pub mod constants;
/// Shared entry point used by the binary and by tests.
pub mod entry_point;
/// Error taxonomy for audit setup and traversal.
pub mod errors;
/// Structural rule matcher.
pub mod matcher;
/// Human-readable report rendering.
pub mod output;
/// Typed metadata registry for all rule IDs.
pub mod registry;
/// Machine-readable report formats for CI systems.
pub mod report;
/// Rule trait, finding type, and rule implementations.
pub mod rules;
/// Source scanner: directory traversal and per-file fact production.
pub mod scanner;
/// Small shared helpers.
pub mod utils;

/// Process-wide cancellation flag, set by Ctrl-C and checked inside the
/// parallel audit loop.
pub static CANCELLED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);
