//! Rule trait, finding type, and shared matching helpers.

use crate::registry::RuleDescriptor;
use crate::utils::LineIndex;
use ruff_python_ast::{Expr, Stmt};
use ruff_text_size::TextRange;
use serde::Serialize;
use std::path::PathBuf;

/// Module containing Pydantic v1 migration rules.
pub mod pydantic_rules;
/// Module containing standard-library modernization rules.
pub mod stdlib_rules;
/// Module containing style modernization rules.
pub mod style_rules;
/// Module containing typing modernization rules.
pub mod typing_rules;

/// Context passed to rules during matching.
#[derive(Debug)]
pub struct Context<'a> {
    /// Path to the file being audited.
    pub filename: PathBuf,
    /// Line index for accurate line/column mapping.
    pub line_index: LineIndex,
    /// Full source text, for snippet extraction.
    pub source: &'a str,
}

/// A single occurrence of an outdated idiom.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// ID of the rule that triggered the finding.
    pub rule_id: String,
    /// Severity level (e.g. "HIGH", "LOW").
    pub severity: String,
    /// Description of the outdated construct.
    pub message: String,
    /// Recommended modern replacement.
    pub replacement: String,
    /// File where the occurrence was found.
    pub file: PathBuf,
    /// 1-indexed start line.
    pub line: usize,
    /// 0-indexed start column.
    pub col: usize,
    /// 1-indexed end line.
    pub end_line: usize,
    /// 0-indexed end column.
    pub end_col: usize,
    /// Matched source text, truncated to one line.
    pub snippet: String,
}

/// Trait defining a modernization rule.
///
/// Rules receive every statement and expression of a module in source order
/// and may keep per-module state between calls (the matcher constructs a
/// fresh instance per file).
pub trait Rule: Send + Sync {
    /// Returns the descriptive name of the rule implementation.
    fn name(&self) -> &'static str;
    /// Returns the catalog metadata for the rule.
    fn descriptor(&self) -> &'static RuleDescriptor;
    /// Called when entering a statement.
    fn enter_stmt(&mut self, _stmt: &Stmt, _context: &Context) -> Option<Vec<Finding>> {
        None
    }
    /// Called when visiting an expression.
    fn visit_expr(&mut self, _expr: &Expr, _context: &Context) -> Option<Vec<Finding>> {
        None
    }
}

/// Builds a finding for `descriptor` covering `range`.
#[must_use]
pub fn create_finding(
    message: impl Into<String>,
    descriptor: &'static RuleDescriptor,
    context: &Context,
    range: TextRange,
) -> Finding {
    Finding {
        rule_id: descriptor.id.to_owned(),
        severity: descriptor.default_severity.as_str().to_owned(),
        message: message.into(),
        replacement: descriptor.replacement.to_owned(),
        file: context.filename.clone(),
        line: context.line_index.line_index(range.start()),
        col: context.line_index.column_index(range.start()),
        end_line: context.line_index.line_index(range.end()),
        end_col: context.line_index.column_index(range.end()),
        snippet: crate::utils::snippet_at(
            context.source,
            range.start().to_usize(),
            range.end().to_usize(),
        ),
    }
}

/// Resolves a dotted call path like `os.path.join` from a callee expression.
///
/// Only plain `Name` / `Attribute` chains resolve; anything dynamic returns
/// `None` so rules stay structural and never guess.
#[must_use]
pub fn get_call_name(func: &Expr) -> Option<String> {
    match func {
        Expr::Name(node) => Some(node.id.to_string()),
        Expr::Attribute(node) => {
            if let Expr::Name(value) = &*node.value {
                Some(format!("{}.{}", value.id, node.attr))
            } else if let Expr::Attribute(inner) = &*node.value {
                if let Expr::Name(name) = &*inner.value {
                    Some(format!("{}.{}.{}", name.id, inner.attr, node.attr))
                } else {
                    None
                }
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Returns the trailing name of a decorator expression (`@x.y(...)` -> `y`).
#[must_use]
pub fn get_decorator_name(decorator: &Expr) -> String {
    match decorator {
        Expr::Name(node) => node.id.to_string(),
        Expr::Attribute(node) => node.attr.to_string(),
        Expr::Call(node) => get_decorator_name(&node.func),
        _ => String::new(),
    }
}

/// Instantiates the rule implementations for every enabled registry entry.
///
/// Rules carry per-module state, so the matcher calls this once per file.
#[must_use]
pub fn build_rules(registry: &crate::registry::Registry) -> Vec<Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = Vec::new();
    for descriptor in registry.descriptors().iter().copied() {
        match descriptor.id {
            "PM101" => rules.push(Box::new(typing_rules::LegacyTypingImportRule::new(
                descriptor,
            ))),
            "PM102" => rules.push(Box::new(typing_rules::OptionalAnnotationRule::new(
                descriptor,
            ))),
            "PM103" => rules.push(Box::new(typing_rules::UnionAnnotationRule::new(descriptor))),
            "PM201" => rules.push(Box::new(pydantic_rules::LegacyConfigClassRule::new(
                descriptor,
            ))),
            "PM202" => rules.push(Box::new(pydantic_rules::LegacyValidatorRule::new(
                descriptor,
            ))),
            "PM203" => rules.push(Box::new(pydantic_rules::LegacySerializerCallRule::new(
                descriptor,
            ))),
            "PM301" => rules.push(Box::new(stdlib_rules::OsPathRule::new(descriptor))),
            "PM302" => rules.push(Box::new(stdlib_rules::DatetimeUtcnowRule::new(descriptor))),
            "PM303" => rules.push(Box::new(stdlib_rules::OsSystemRule::new(descriptor))),
            "PM304" => rules.push(Box::new(stdlib_rules::NamedtupleFactoryRule::new(
                descriptor,
            ))),
            "PM401" => rules.push(Box::new(style_rules::PercentFormatRule::new(descriptor))),
            "PM402" => rules.push(Box::new(style_rules::StrFormatRule::new(descriptor))),
            "PM403" => rules.push(Box::new(style_rules::MutableDefaultRule::new(descriptor))),
            "PM404" => rules.push(Box::new(style_rules::TypeComparisonRule::new(descriptor))),
            "PM405" => rules.push(Box::new(style_rules::SuperWithArgumentsRule::new(
                descriptor,
            ))),
            _ => {}
        }
    }
    rules
}

/// Checks whether a statement imports the given top-level module.
///
/// Matches `import pydantic`, `import pydantic.v1` and
/// `from pydantic import ...` alike.
#[must_use]
pub fn imports_module(stmt: &Stmt, module: &str) -> bool {
    match stmt {
        Stmt::Import(node) => node.names.iter().any(|alias| {
            alias.name.id.as_str() == module
                || alias.name.id.as_str().starts_with(&format!("{module}."))
        }),
        Stmt::ImportFrom(node) => node.module.as_ref().is_some_and(|m| {
            m.as_str() == module || m.as_str().starts_with(&format!("{module}."))
        }),
        _ => false,
    }
}
