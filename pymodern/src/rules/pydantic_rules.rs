//! Pydantic v1 -> v2 migration rules.

use crate::registry::RuleDescriptor;
use crate::rules::{create_finding, get_decorator_name, imports_module, Context, Finding, Rule};
use ruff_python_ast::{Expr, Stmt};
use ruff_text_size::Ranged;
use smallvec::SmallVec;

/// Resolves a base-class expression to a dotted name, when it is static.
fn base_class_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Name(node) => Some(node.id.to_string()),
        Expr::Attribute(node) => {
            let Expr::Name(value) = &*node.value else {
                return None;
            };
            Some(format!("{}.{}", value.id, node.attr))
        }
        _ => None,
    }
}

/// Base-class names that mark a class as a Pydantic model.
///
/// Matches direct derivation only; resolving transitive model hierarchies
/// would require cross-file analysis, which stays out of a per-file matcher.
fn is_pydantic_base(name: &str) -> bool {
    matches!(
        name,
        "BaseModel" | "BaseSettings" | "pydantic.BaseModel" | "pydantic.BaseSettings"
    )
}

/// Rule for detecting a nested `class Config` inside a Pydantic model (PM201).
pub struct LegacyConfigClassRule {
    descriptor: &'static RuleDescriptor,
}

impl LegacyConfigClassRule {
    /// Creates a new legacy-config rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Rule for LegacyConfigClassRule {
    fn name(&self) -> &'static str {
        "LegacyConfigClassRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn enter_stmt(&mut self, stmt: &Stmt, context: &Context) -> Option<Vec<Finding>> {
        let Stmt::ClassDef(node) = stmt else {
            return None;
        };

        let mut base_names: SmallVec<[String; 4]> = SmallVec::new();
        for base in node.bases() {
            if let Some(name) = base_class_name(base) {
                base_names.push(name);
            }
        }
        if !base_names.iter().any(|name| is_pydantic_base(name)) {
            return None;
        }

        let mut findings = Vec::new();
        for body_stmt in &node.body {
            if let Stmt::ClassDef(inner) = body_stmt {
                if inner.name.as_str() == "Config" {
                    findings.push(create_finding(
                        format!(
                            "Model '{}' uses a nested `class Config`; Pydantic v2 replaced it with `model_config = ConfigDict(...)`.",
                            node.name
                        ),
                        self.descriptor,
                        context,
                        inner.name.range(),
                    ));
                }
            }
        }
        if findings.is_empty() {
            None
        } else {
            Some(findings)
        }
    }
}

/// Rule for detecting `@validator` / `@root_validator` decorators and their
/// imports from `pydantic` (PM202).
pub struct LegacyValidatorRule {
    descriptor: &'static RuleDescriptor,
}

fn modern_validator(name: &str) -> Option<&'static str> {
    match name {
        "validator" => Some("field_validator"),
        "root_validator" => Some("model_validator"),
        _ => None,
    }
}

impl LegacyValidatorRule {
    /// Creates a new legacy-validator rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Rule for LegacyValidatorRule {
    fn name(&self) -> &'static str {
        "LegacyValidatorRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn enter_stmt(&mut self, stmt: &Stmt, context: &Context) -> Option<Vec<Finding>> {
        let mut findings = Vec::new();
        match stmt {
            Stmt::FunctionDef(node) => {
                for decorator in &node.decorator_list {
                    let name = get_decorator_name(&decorator.expression);
                    let Some(modern) = modern_validator(&name) else {
                        continue;
                    };
                    findings.push(create_finding(
                        format!("`@{name}` was removed in Pydantic v2; use `@{modern}`."),
                        self.descriptor,
                        context,
                        decorator.range(),
                    ));
                }
            }
            Stmt::ImportFrom(node) => {
                let module = node.module.as_ref().map(ruff_python_ast::Identifier::as_str)?;
                if module != "pydantic" {
                    return None;
                }
                for alias in &node.names {
                    let imported = alias.name.id.as_str();
                    let Some(modern) = modern_validator(imported) else {
                        continue;
                    };
                    findings.push(create_finding(
                        format!(
                            "`pydantic.{imported}` was removed in v2; import `{modern}` instead."
                        ),
                        self.descriptor,
                        context,
                        alias.range(),
                    ));
                }
            }
            _ => return None,
        }
        if findings.is_empty() {
            None
        } else {
            Some(findings)
        }
    }
}

/// Rule for detecting `.dict()` / `.json()` calls on models (PM203).
///
/// Only fires in modules that import `pydantic`: a bare attribute name is too
/// weak a signal on its own, and the matcher never sees cross-file types.
pub struct LegacySerializerCallRule {
    descriptor: &'static RuleDescriptor,
    saw_pydantic_import: bool,
    deferred: Vec<Finding>,
}

impl LegacySerializerCallRule {
    /// Creates a new legacy-serializer rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self {
            descriptor,
            saw_pydantic_import: false,
            deferred: Vec::new(),
        }
    }
}

impl Rule for LegacySerializerCallRule {
    fn name(&self) -> &'static str {
        "LegacySerializerCallRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn enter_stmt(&mut self, stmt: &Stmt, _context: &Context) -> Option<Vec<Finding>> {
        if !self.saw_pydantic_import && imports_module(stmt, "pydantic") {
            self.saw_pydantic_import = true;
            // Release calls seen before the import (e.g. under TYPE_CHECKING reordering).
            if !self.deferred.is_empty() {
                return Some(std::mem::take(&mut self.deferred));
            }
        }
        None
    }

    fn visit_expr(&mut self, expr: &Expr, context: &Context) -> Option<Vec<Finding>> {
        let Expr::Call(call) = expr else {
            return None;
        };
        let Expr::Attribute(attr) = &*call.func else {
            return None;
        };
        let modern = match attr.attr.as_str() {
            "dict" => ".model_dump()",
            "json" => ".model_dump_json()",
            _ => return None,
        };
        if !call.arguments.args.is_empty() {
            return None;
        }
        // `json.dumps(...)`-style module calls are not model serializers.
        if let Expr::Name(base) = &*attr.value {
            if base.id.as_str() == "json" {
                return None;
            }
        }
        let finding = create_finding(
            format!(
                "`.{}()` was removed in Pydantic v2; use `{modern}`.",
                attr.attr
            ),
            self.descriptor,
            context,
            call.range(),
        );
        if self.saw_pydantic_import {
            Some(vec![finding])
        } else {
            self.deferred.push(finding);
            None
        }
    }
}
