//! Typing modernization rules (PEP 585 / PEP 604).

use crate::constants::LEGACY_TYPING_ALIASES;
use crate::registry::RuleDescriptor;
use crate::rules::{create_finding, Context, Finding, Rule};
use ruff_python_ast as ast;
use ruff_python_ast::{Expr, Stmt};
use ruff_text_size::Ranged;

/// Rule for detecting deprecated `typing` imports (PM101).
pub struct LegacyTypingImportRule {
    descriptor: &'static RuleDescriptor,
}

impl LegacyTypingImportRule {
    /// Creates a new legacy-typing-import rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Rule for LegacyTypingImportRule {
    fn name(&self) -> &'static str {
        "LegacyTypingImportRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn enter_stmt(&mut self, stmt: &Stmt, context: &Context) -> Option<Vec<Finding>> {
        let Stmt::ImportFrom(node) = stmt else {
            return None;
        };
        let module = node.module.as_ref().map(ast::Identifier::as_str)?;
        if module != "typing" {
            return None;
        }

        let mut findings = Vec::new();
        for alias in &node.names {
            let imported = alias.name.id.as_str();
            let replacement = if LEGACY_TYPING_ALIASES().contains(imported) {
                Some(format!("builtin `{}`", imported.to_lowercase()))
            } else if imported == "Optional" || imported == "Union" {
                Some("the `|` union syntax".to_owned())
            } else {
                None
            };
            if let Some(replacement) = replacement {
                findings.push(create_finding(
                    format!("`from typing import {imported}` is deprecated; use {replacement}."),
                    self.descriptor,
                    context,
                    alias.range(),
                ));
            }
        }
        if findings.is_empty() {
            None
        } else {
            Some(findings)
        }
    }
}

/// Matches an `Optional`/`Union` head, bare or qualified with `typing.`.
fn is_typing_head(expr: &Expr, name: &str) -> bool {
    match expr {
        Expr::Name(node) => node.id.as_str() == name,
        Expr::Attribute(node) => {
            if node.attr.as_str() != name {
                return false;
            }
            matches!(&*node.value, Expr::Name(base) if base.id.as_str() == "typing")
        }
        _ => false,
    }
}

/// Rule for detecting `Optional[X]` annotations (PM102).
pub struct OptionalAnnotationRule {
    descriptor: &'static RuleDescriptor,
}

impl OptionalAnnotationRule {
    /// Creates a new optional-annotation rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Rule for OptionalAnnotationRule {
    fn name(&self) -> &'static str {
        "OptionalAnnotationRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn visit_expr(&mut self, expr: &Expr, context: &Context) -> Option<Vec<Finding>> {
        let Expr::Subscript(node) = expr else {
            return None;
        };
        if !is_typing_head(&node.value, "Optional") {
            return None;
        }
        Some(vec![create_finding(
            "`Optional[X]` is outdated; write `X | None`.",
            self.descriptor,
            context,
            node.range(),
        )])
    }
}

/// Rule for detecting `Union[X, Y]` annotations (PM103).
pub struct UnionAnnotationRule {
    descriptor: &'static RuleDescriptor,
}

impl UnionAnnotationRule {
    /// Creates a new union-annotation rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Rule for UnionAnnotationRule {
    fn name(&self) -> &'static str {
        "UnionAnnotationRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn visit_expr(&mut self, expr: &Expr, context: &Context) -> Option<Vec<Finding>> {
        let Expr::Subscript(node) = expr else {
            return None;
        };
        if !is_typing_head(&node.value, "Union") {
            return None;
        }
        Some(vec![create_finding(
            "`Union[X, Y]` is outdated; write `X | Y`.",
            self.descriptor,
            context,
            node.range(),
        )])
    }
}
