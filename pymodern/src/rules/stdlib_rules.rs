//! Standard-library modernization rules.

use crate::constants::OS_PATH_FUNCTIONS;
use crate::registry::RuleDescriptor;
use crate::rules::{create_finding, get_call_name, Context, Finding, Rule};
use ruff_python_ast as ast;
use ruff_python_ast::{Expr, Stmt};
use ruff_text_size::Ranged;

/// Rule for detecting `os.path` usage (PM301).
pub struct OsPathRule {
    descriptor: &'static RuleDescriptor,
}

impl OsPathRule {
    /// Creates a new os-path rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Rule for OsPathRule {
    fn name(&self) -> &'static str {
        "OsPathRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn enter_stmt(&mut self, stmt: &Stmt, context: &Context) -> Option<Vec<Finding>> {
        let Stmt::ImportFrom(node) = stmt else {
            return None;
        };
        let module = node.module.as_ref().map(ast::Identifier::as_str)?;
        if module != "os.path" {
            return None;
        }
        let mut findings = Vec::new();
        for alias in &node.names {
            findings.push(create_finding(
                format!(
                    "`from os.path import {}` manipulates paths as strings; prefer `pathlib.Path`.",
                    alias.name.id
                ),
                self.descriptor,
                context,
                alias.range(),
            ));
        }
        Some(findings)
    }

    fn visit_expr(&mut self, expr: &Expr, context: &Context) -> Option<Vec<Finding>> {
        let Expr::Call(call) = expr else {
            return None;
        };
        let name = get_call_name(&call.func)?;
        let func = name.strip_prefix("os.path.")?;
        if !OS_PATH_FUNCTIONS().contains(func) {
            return None;
        }
        Some(vec![create_finding(
            format!("`os.path.{func}()` manipulates paths as strings; prefer `pathlib.Path`."),
            self.descriptor,
            context,
            call.range(),
        )])
    }
}

/// Rule for detecting naive-UTC datetime constructors (PM302).
pub struct DatetimeUtcnowRule {
    descriptor: &'static RuleDescriptor,
}

impl DatetimeUtcnowRule {
    /// Creates a new datetime-utcnow rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Rule for DatetimeUtcnowRule {
    fn name(&self) -> &'static str {
        "DatetimeUtcnowRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn visit_expr(&mut self, expr: &Expr, context: &Context) -> Option<Vec<Finding>> {
        let Expr::Call(call) = expr else {
            return None;
        };
        let name = get_call_name(&call.func)?;
        let (legacy, modern) = if name == "datetime.utcnow" || name == "datetime.datetime.utcnow" {
            ("utcnow", "datetime.now(timezone.utc)")
        } else if name == "datetime.utcfromtimestamp" || name == "datetime.datetime.utcfromtimestamp"
        {
            (
                "utcfromtimestamp",
                "datetime.fromtimestamp(ts, tz=timezone.utc)",
            )
        } else {
            return None;
        };
        Some(vec![create_finding(
            format!("`datetime.{legacy}()` returns a naive datetime; use `{modern}`."),
            self.descriptor,
            context,
            call.range(),
        )])
    }
}

/// Rule for detecting `os.system` calls (PM303).
pub struct OsSystemRule {
    descriptor: &'static RuleDescriptor,
}

impl OsSystemRule {
    /// Creates a new os-system rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Rule for OsSystemRule {
    fn name(&self) -> &'static str {
        "OsSystemRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn visit_expr(&mut self, expr: &Expr, context: &Context) -> Option<Vec<Finding>> {
        let Expr::Call(call) = expr else {
            return None;
        };
        if get_call_name(&call.func)? != "os.system" {
            return None;
        }
        Some(vec![create_finding(
            "`os.system()` shells out through a single string; use `subprocess.run([...], check=True)`.",
            self.descriptor,
            context,
            call.range(),
        )])
    }
}

/// Rule for detecting the `namedtuple` factory (PM304).
pub struct NamedtupleFactoryRule {
    descriptor: &'static RuleDescriptor,
    imported_bare: bool,
}

impl NamedtupleFactoryRule {
    /// Creates a new namedtuple-factory rule instance.
    #[must_use]
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self {
            descriptor,
            imported_bare: false,
        }
    }
}

impl Rule for NamedtupleFactoryRule {
    fn name(&self) -> &'static str {
        "NamedtupleFactoryRule"
    }
    fn descriptor(&self) -> &'static RuleDescriptor {
        self.descriptor
    }

    fn enter_stmt(&mut self, stmt: &Stmt, context: &Context) -> Option<Vec<Finding>> {
        let Stmt::ImportFrom(node) = stmt else {
            return None;
        };
        let module = node.module.as_ref().map(ast::Identifier::as_str)?;
        if module != "collections" {
            return None;
        }
        let mut findings = Vec::new();
        for alias in &node.names {
            if alias.name.id.as_str() == "namedtuple" {
                self.imported_bare = true;
                findings.push(create_finding(
                    "`collections.namedtuple` predates typed records; use `typing.NamedTuple` or `@dataclass`.",
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

    fn visit_expr(&mut self, expr: &Expr, context: &Context) -> Option<Vec<Finding>> {
        let Expr::Call(call) = expr else {
            return None;
        };
        let name = get_call_name(&call.func)?;
        let qualified = name == "collections.namedtuple";
        let bare = self.imported_bare && name == "namedtuple";
        if !qualified && !bare {
            return None;
        }
        Some(vec![create_finding(
            "`namedtuple(...)` produces an untyped record; use `typing.NamedTuple` or `@dataclass`.",
            self.descriptor,
            context,
            call.range(),
        )])
    }
}
