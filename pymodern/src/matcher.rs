//! Structural rule matcher.
//!
//! Walks every statement and expression of a parsed module in source order,
//! dispatching each node to the enabled rules. Matching is purely syntactic:
//! occurrences inside comments or string literals never reach a rule because
//! they are not AST nodes.

use crate::constants::MAX_RECURSION_DEPTH;
use crate::rules::{Context, Finding, Rule};
use crate::utils::LineIndex;
use ruff_python_ast as ast;
use ruff_python_ast::{Expr, Stmt};
use std::path::PathBuf;

/// Visitor that feeds AST nodes to the rule set and collects findings.
pub struct MatcherVisitor<'a> {
    rules: Vec<Box<dyn Rule>>,
    context: Context<'a>,
    /// Findings collected so far. Sorted by `match_module`.
    pub findings: Vec<Finding>,
    depth: usize,
    recursion_limit_hit: bool,
}

impl<'a> MatcherVisitor<'a> {
    /// Creates a matcher for one file.
    #[must_use]
    pub fn new(
        rules: Vec<Box<dyn Rule>>,
        filename: PathBuf,
        line_index: LineIndex,
        source: &'a str,
    ) -> Self {
        Self {
            rules,
            context: Context {
                filename,
                line_index,
                source,
            },
            findings: Vec::new(),
            depth: 0,
            recursion_limit_hit: false,
        }
    }

    /// Matches every enabled rule against a parsed module.
    ///
    /// Findings are sorted by (line, col, rule id) so the output is fully
    /// determined by the input, independent of rule evaluation order.
    pub fn match_module(&mut self, module: &ast::ModModule) {
        for stmt in &module.body {
            self.visit_stmt(stmt);
        }
        self.findings.sort_by(|a, b| {
            (a.line, a.col, a.rule_id.as_str()).cmp(&(b.line, b.col, b.rule_id.as_str()))
        });
    }

    /// Returns whether the traversal bailed out on pathologically deep nesting.
    #[must_use]
    pub fn recursion_limit_hit(&self) -> bool {
        self.recursion_limit_hit
    }

    fn dispatch_stmt(&mut self, stmt: &Stmt) {
        for rule in &mut self.rules {
            if let Some(found) = rule.enter_stmt(stmt, &self.context) {
                self.findings.extend(found);
            }
        }
    }

    fn dispatch_expr(&mut self, expr: &Expr) {
        for rule in &mut self.rules {
            if let Some(found) = rule.visit_expr(expr, &self.context) {
                self.findings.extend(found);
            }
        }
    }

    /// Visits a statement, dispatching it to rules and recursing into children.
    pub fn visit_stmt(&mut self, stmt: &Stmt) {
        if self.depth >= MAX_RECURSION_DEPTH {
            self.recursion_limit_hit = true;
            return;
        }
        self.depth += 1;

        self.dispatch_stmt(stmt);

        match stmt {
            Stmt::FunctionDef(node) => self.visit_function_def(node),
            Stmt::ClassDef(node) => self.visit_class_def(node),
            Stmt::Assign(node) => {
                for target in &node.targets {
                    self.visit_expr(target);
                }
                self.visit_expr(&node.value);
            }
            Stmt::AugAssign(node) => {
                self.visit_expr(&node.target);
                self.visit_expr(&node.value);
            }
            Stmt::AnnAssign(node) => {
                self.visit_expr(&node.target);
                self.visit_expr(&node.annotation);
                if let Some(value) = &node.value {
                    self.visit_expr(value);
                }
            }
            Stmt::Expr(node) => self.visit_expr(&node.value),
            Stmt::If(node) => {
                self.visit_expr(&node.test);
                for stmt in &node.body {
                    self.visit_stmt(stmt);
                }
                for clause in &node.elif_else_clauses {
                    if let Some(test) = &clause.test {
                        self.visit_expr(test);
                    }
                    for stmt in &clause.body {
                        self.visit_stmt(stmt);
                    }
                }
            }
            Stmt::For(node) => {
                self.visit_expr(&node.target);
                self.visit_expr(&node.iter);
                for stmt in &node.body {
                    self.visit_stmt(stmt);
                }
                for stmt in &node.orelse {
                    self.visit_stmt(stmt);
                }
            }
            Stmt::While(node) => {
                self.visit_expr(&node.test);
                for stmt in &node.body {
                    self.visit_stmt(stmt);
                }
                for stmt in &node.orelse {
                    self.visit_stmt(stmt);
                }
            }
            Stmt::With(node) => {
                for item in &node.items {
                    self.visit_expr(&item.context_expr);
                    if let Some(vars) = &item.optional_vars {
                        self.visit_expr(vars);
                    }
                }
                for stmt in &node.body {
                    self.visit_stmt(stmt);
                }
            }
            Stmt::Try(node) => {
                for stmt in &node.body {
                    self.visit_stmt(stmt);
                }
                for ast::ExceptHandler::ExceptHandler(handler) in &node.handlers {
                    if let Some(exc) = &handler.type_ {
                        self.visit_expr(exc);
                    }
                    for stmt in &handler.body {
                        self.visit_stmt(stmt);
                    }
                }
                for stmt in &node.orelse {
                    self.visit_stmt(stmt);
                }
                for stmt in &node.finalbody {
                    self.visit_stmt(stmt);
                }
            }
            Stmt::Match(node) => {
                self.visit_expr(&node.subject);
                for case in &node.cases {
                    if let Some(guard) = &case.guard {
                        self.visit_expr(guard);
                    }
                    for stmt in &case.body {
                        self.visit_stmt(stmt);
                    }
                }
            }
            Stmt::Return(node) => {
                if let Some(value) = &node.value {
                    self.visit_expr(value);
                }
            }
            Stmt::Assert(node) => {
                self.visit_expr(&node.test);
                if let Some(msg) = &node.msg {
                    self.visit_expr(msg);
                }
            }
            Stmt::Raise(node) => {
                if let Some(exc) = &node.exc {
                    self.visit_expr(exc);
                }
                if let Some(cause) = &node.cause {
                    self.visit_expr(cause);
                }
            }
            Stmt::Delete(node) => {
                for target in &node.targets {
                    self.visit_expr(target);
                }
            }
            _ => {}
        }

        self.depth -= 1;
    }

    fn visit_function_def(&mut self, node: &ast::StmtFunctionDef) {
        for decorator in &node.decorator_list {
            self.visit_expr(&decorator.expression);
        }
        self.visit_parameters(&node.parameters);
        if let Some(returns) = &node.returns {
            self.visit_expr(returns);
        }
        for stmt in &node.body {
            self.visit_stmt(stmt);
        }
    }

    fn visit_class_def(&mut self, node: &ast::StmtClassDef) {
        for decorator in &node.decorator_list {
            self.visit_expr(&decorator.expression);
        }
        if let Some(arguments) = &node.arguments {
            for base in &arguments.args {
                self.visit_expr(base);
            }
            for keyword in &arguments.keywords {
                self.visit_expr(&keyword.value);
            }
        }
        for stmt in &node.body {
            self.visit_stmt(stmt);
        }
    }

    fn visit_parameters(&mut self, parameters: &ast::Parameters) {
        for param in parameters
            .posonlyargs
            .iter()
            .chain(&parameters.args)
            .chain(&parameters.kwonlyargs)
        {
            if let Some(annotation) = &param.parameter.annotation {
                self.visit_expr(annotation);
            }
            if let Some(default) = &param.default {
                self.visit_expr(default);
            }
        }
        if let Some(vararg) = &parameters.vararg {
            if let Some(annotation) = &vararg.annotation {
                self.visit_expr(annotation);
            }
        }
        if let Some(kwarg) = &parameters.kwarg {
            if let Some(annotation) = &kwarg.annotation {
                self.visit_expr(annotation);
            }
        }
    }

    /// Visits an expression, dispatching it to rules and recursing into children.
    pub fn visit_expr(&mut self, expr: &Expr) {
        if self.depth >= MAX_RECURSION_DEPTH {
            self.recursion_limit_hit = true;
            return;
        }
        self.depth += 1;

        self.dispatch_expr(expr);

        match expr {
            Expr::BoolOp(node) => {
                for value in &node.values {
                    self.visit_expr(value);
                }
            }
            Expr::BinOp(node) => {
                self.visit_expr(&node.left);
                self.visit_expr(&node.right);
            }
            Expr::UnaryOp(node) => self.visit_expr(&node.operand),
            Expr::Lambda(node) => {
                if let Some(parameters) = &node.parameters {
                    self.visit_parameters(parameters);
                }
                self.visit_expr(&node.body);
            }
            Expr::If(node) => {
                self.visit_expr(&node.test);
                self.visit_expr(&node.body);
                self.visit_expr(&node.orelse);
            }
            Expr::Dict(node) => {
                for item in &node.items {
                    if let Some(key) = &item.key {
                        self.visit_expr(key);
                    }
                    self.visit_expr(&item.value);
                }
            }
            Expr::Set(node) => {
                for elt in &node.elts {
                    self.visit_expr(elt);
                }
            }
            Expr::ListComp(node) => {
                self.visit_generators(&node.generators);
                self.visit_expr(&node.elt);
            }
            Expr::SetComp(node) => {
                self.visit_generators(&node.generators);
                self.visit_expr(&node.elt);
            }
            Expr::DictComp(node) => {
                self.visit_generators(&node.generators);
                self.visit_expr(&node.key);
                self.visit_expr(&node.value);
            }
            Expr::Generator(node) => {
                self.visit_generators(&node.generators);
                self.visit_expr(&node.elt);
            }
            Expr::Await(node) => self.visit_expr(&node.value),
            Expr::Yield(node) => {
                if let Some(value) = &node.value {
                    self.visit_expr(value);
                }
            }
            Expr::YieldFrom(node) => self.visit_expr(&node.value),
            Expr::Compare(node) => {
                self.visit_expr(&node.left);
                for comparator in &node.comparators {
                    self.visit_expr(comparator);
                }
            }
            Expr::Call(node) => {
                self.visit_expr(&node.func);
                for arg in &node.arguments.args {
                    self.visit_expr(arg);
                }
                for keyword in &node.arguments.keywords {
                    self.visit_expr(&keyword.value);
                }
            }
            Expr::Attribute(node) => self.visit_expr(&node.value),
            Expr::Subscript(node) => {
                self.visit_expr(&node.value);
                self.visit_expr(&node.slice);
            }
            Expr::Named(node) => {
                self.visit_expr(&node.target);
                self.visit_expr(&node.value);
            }
            Expr::FString(node) => {
                for part in &node.value {
                    match part {
                        ast::FStringPart::Literal(_) => {}
                        ast::FStringPart::FString(f) => {
                            for element in &f.elements {
                                if let ast::InterpolatedStringElement::Interpolation(interp) =
                                    element
                                {
                                    self.visit_expr(&interp.expression);
                                }
                            }
                        }
                    }
                }
            }
            Expr::List(node) => {
                for elt in &node.elts {
                    self.visit_expr(elt);
                }
            }
            Expr::Tuple(node) => {
                for elt in &node.elts {
                    self.visit_expr(elt);
                }
            }
            Expr::Slice(node) => {
                if let Some(lower) = &node.lower {
                    self.visit_expr(lower);
                }
                if let Some(upper) = &node.upper {
                    self.visit_expr(upper);
                }
                if let Some(step) = &node.step {
                    self.visit_expr(step);
                }
            }
            Expr::Starred(node) => self.visit_expr(&node.value),
            _ => {}
        }

        self.depth -= 1;
    }

    fn visit_generators(&mut self, generators: &[ast::Comprehension]) {
        for generator in generators {
            self.visit_expr(&generator.target);
            self.visit_expr(&generator.iter);
            for if_expr in &generator.ifs {
                self.visit_expr(if_expr);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::registry::Registry;
    use crate::rules::build_rules;
    use std::path::Path;

    fn match_source(source: &str) -> Vec<Finding> {
        let registry = Registry::builtin().unwrap();
        let parsed = ruff_python_parser::parse_module(source).unwrap();
        let module = parsed.into_syntax();
        let mut matcher = MatcherVisitor::new(
            build_rules(&registry),
            Path::new("test.py").to_path_buf(),
            LineIndex::new(source),
            source,
        );
        matcher.match_module(&module);
        matcher.findings
    }

    #[test]
    fn test_clean_module_has_no_findings() {
        let findings = match_source("def add(a: int, b: int) -> int:\n    return a + b\n");
        assert!(findings.is_empty(), "unexpected: {findings:?}");
    }

    #[test]
    fn test_constructs_inside_strings_are_not_matched() {
        // The legacy idioms only occur as string/comment content here.
        let source = concat!(
            "doc = \"use os.path.join() and Optional[int]\"\n",
            "# from typing import List\n",
        );
        let findings = match_source(source);
        assert!(findings.is_empty(), "unexpected: {findings:?}");
    }

    #[test]
    fn test_findings_are_ordered_by_position() {
        let source = concat!(
            "import os\n",
            "p = os.path.join('a', 'b')\n",
            "q = os.system('ls')\n",
        );
        let findings = match_source(source);
        let ids: Vec<&str> = findings.iter().map(|f| f.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["PM301", "PM303"]);
        assert!(findings[0].line < findings[1].line);
    }

    #[test]
    fn test_overlapping_spans_both_report() {
        // The Optional sits inside the Union span; both findings are retained.
        let source = "x: Union[int, Optional[str]] = 1\n";
        let findings = match_source(source);
        let ids: Vec<&str> = findings.iter().map(|f| f.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["PM103", "PM102"]);
        assert_eq!(findings[0].line, findings[1].line);
        assert!(findings[0].col < findings[1].col);
    }

    #[test]
    fn test_nested_constructs_are_reached() {
        let source = concat!(
            "class Outer:\n",
            "    def method(self):\n",
            "        if True:\n",
            "            return '{}'.format(1)\n",
        );
        let findings = match_source(source);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "PM402");
        assert_eq!(findings[0].line, 4);
    }
}
