//! Style modernization rules.

use crate::registry::RuleDescriptor;
use crate::rules::{create_finding, Context, Finding, Rule};
use ruff_python_ast as ast;
use ruff_python_ast::{Expr, Stmt};
use ruff_text_size::Ranged;

/// Rule for detecting %-formatting on string literals (PM401).
pub struct PercentFormatRule {
    descriptor: &'static RuleDescriptor,
}

impl PercentFormatRule {
    /// Creates a new percent-format rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Rule for PercentFormatRule {
    fn name(&self) -> &'static str {
        "PercentFormatRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn visit_expr(&mut self, expr: &Expr, context: &Context) -> Option<Vec<Finding>> {
        let Expr::BinOp(node) = expr else {
            return None;
        };
        if !matches!(node.op, ast::Operator::Mod) {
            return None;
        }
        if !matches!(&*node.left, Expr::StringLiteral(_)) {
            return None;
        }
        Some(vec![create_finding(
            "%-formatting predates f-strings; use an f-string.",
            self.descriptor,
            context,
            node.range(),
        )])
    }
}

/// Rule for detecting `"...".format(...)` calls (PM402).
pub struct StrFormatRule {
    descriptor: &'static RuleDescriptor,
}

impl StrFormatRule {
    /// Creates a new str-format rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Rule for StrFormatRule {
    fn name(&self) -> &'static str {
        "StrFormatRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn visit_expr(&mut self, expr: &Expr, context: &Context) -> Option<Vec<Finding>> {
        let Expr::Call(call) = expr else {
            return None;
        };
        let Expr::Attribute(attr) = &*call.func else {
            return None;
        };
        if attr.attr.as_str() != "format" || !matches!(&*attr.value, Expr::StringLiteral(_)) {
            return None;
        }
        Some(vec![create_finding(
            "`str.format()` on a literal; use an f-string.",
            self.descriptor,
            context,
            call.range(),
        )])
    }
}

/// Returns whether a parameter default is a freshly constructed mutable value.
fn is_mutable_default(default: &Expr) -> bool {
    match default {
        Expr::List(_) | Expr::Dict(_) | Expr::Set(_) => true,
        Expr::Call(call) => matches!(
            &*call.func,
            Expr::Name(name) if matches!(name.id.as_str(), "list" | "dict" | "set")
        ),
        _ => false,
    }
}

/// Rule for detecting mutable default arguments (PM403).
pub struct MutableDefaultRule {
    descriptor: &'static RuleDescriptor,
}

impl MutableDefaultRule {
    /// Creates a new mutable-default rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Rule for MutableDefaultRule {
    fn name(&self) -> &'static str {
        "MutableDefaultRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn enter_stmt(&mut self, stmt: &Stmt, context: &Context) -> Option<Vec<Finding>> {
        let Stmt::FunctionDef(node) = stmt else {
            return None;
        };

        let mut findings = Vec::new();
        let params = node
            .parameters
            .posonlyargs
            .iter()
            .chain(&node.parameters.args)
            .chain(&node.parameters.kwonlyargs);
        for param in params {
            let Some(default) = &param.default else {
                continue;
            };
            if is_mutable_default(default) {
                findings.push(create_finding(
                    format!(
                        "Parameter '{}' of '{}' has a mutable default shared across calls; default to None instead.",
                        param.parameter.name, node.name
                    ),
                    self.descriptor,
                    context,
                    default.range(),
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

/// Rule for detecting `type(x) == T` comparisons (PM404).
pub struct TypeComparisonRule {
    descriptor: &'static RuleDescriptor,
}

impl TypeComparisonRule {
    /// Creates a new type-comparison rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self { descriptor }
    }
}

fn is_type_call(expr: &Expr) -> bool {
    let Expr::Call(call) = expr else {
        return false;
    };
    matches!(&*call.func, Expr::Name(name) if name.id.as_str() == "type")
        && call.arguments.args.len() == 1
}

impl Rule for TypeComparisonRule {
    fn name(&self) -> &'static str {
        "TypeComparisonRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn visit_expr(&mut self, expr: &Expr, context: &Context) -> Option<Vec<Finding>> {
        let Expr::Compare(node) = expr else {
            return None;
        };
        let equality = node
            .ops
            .iter()
            .any(|op| matches!(op, ast::CmpOp::Eq | ast::CmpOp::NotEq));
        if !equality {
            return None;
        }
        if !is_type_call(&node.left) && !node.comparators.iter().any(is_type_call) {
            return None;
        }
        Some(vec![create_finding(
            "Comparing `type(x)` with `==` ignores subclasses; use `isinstance(x, T)`.",
            self.descriptor,
            context,
            node.range(),
        )])
    }
}

/// Rule for detecting `super(C, self)` calls (PM405).
pub struct SuperWithArgumentsRule {
    descriptor: &'static RuleDescriptor,
}

impl SuperWithArgumentsRule {
    /// Creates a new super-with-arguments rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Rule for SuperWithArgumentsRule {
    fn name(&self) -> &'static str {
        "SuperWithArgumentsRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn visit_expr(&mut self, expr: &Expr, context: &Context) -> Option<Vec<Finding>> {
        let Expr::Call(call) = expr else {
            return None;
        };
        if !matches!(&*call.func, Expr::Name(name) if name.id.as_str() == "super") {
            return None;
        }
        if call.arguments.args.is_empty() {
            return None;
        }
        Some(vec![create_finding(
            "`super()` with explicit arguments is a Python 2 idiom; use zero-argument `super()`.",
            self.descriptor,
            context,
            call.range(),
        )])
    }
}
