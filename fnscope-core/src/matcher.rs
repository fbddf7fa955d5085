//! Named callable lookup over the program tree
//!
//! Global invariants enforced:
//! - Exactly one pre-order traversal per lookup
//! - A node matches at most one rule
//! - Bodiless declarations (overload signatures, abstract members) never match
//! - Only a strictly better priority replaces the current best candidate,
//!   so the earliest definition wins among equals
//!
//! Recognized shapes and their priorities (lower wins):
//!
//! | Shape                                              | Priority          |
//! |----------------------------------------------------|-------------------|
//! | `function f() {}` at program level                 | 0                 |
//! | `export function f() {}` / `export const f = () =>`| 0                 |
//! | `export default function f() {}`                   | 0                 |
//! | `const f = () => {}` at program level              | 1                 |
//! | `obj.f = function () {}`, `exports['f'] = () => {}`| 1                 |
//! | class methods, object methods, function properties | 2                 |
//! | nested `function f() {}`                           | 3                 |
//! | nested `const f = () => {}`                        | 4                 |

use crate::keys::{resolve_key_name, resolve_member_name, resolve_private_name};
use swc_common::{Span, Spanned};
use swc_ecma_ast::*;
use swc_ecma_visit::{Visit, VisitWith};

/// Match precedence; lower values are preferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u8);

impl Priority {
    /// Program-level or exported function declarations
    pub const TOP_LEVEL_DECLARATION: Priority = Priority(0);
    /// Program-level variable bindings
    pub const TOP_LEVEL_BINDING: Priority = Priority(1);
    /// Functions attached to a member (`module.exports.f = ...`)
    pub const MEMBER_ASSIGNMENT: Priority = Priority(1);
    /// Class methods and object members
    pub const MEMBER: Priority = Priority(2);
    /// Function declarations inside another scope
    pub const NESTED_DECLARATION: Priority = Priority(3);
    /// Variable bindings inside another scope
    pub const NESTED_BINDING: Priority = Priority(4);

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Syntactic form a candidate was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    FunctionDeclaration,
    ExportedFunction,
    ExportedVariable,
    DefaultExportFunction,
    VariableBinding,
    ClassMethod,
    ObjectMethod,
    ObjectProperty,
    MemberAssignment,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::FunctionDeclaration => "function declaration",
            Shape::ExportedFunction => "exported function",
            Shape::ExportedVariable => "exported variable",
            Shape::DefaultExportFunction => "default export",
            Shape::VariableBinding => "variable binding",
            Shape::ClassMethod => "class method",
            Shape::ObjectMethod => "object method",
            Shape::ObjectProperty => "object property",
            Shape::MemberAssignment => "member assignment",
        }
    }
}

/// Where a declaration sits relative to the program body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Direct child of the module or script body
    Program,
    Nested,
}

/// The best match found so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub shape: Shape,
    pub priority: Priority,
    /// Span of the captured node, before any comment or decorator extension
    pub span: Span,
    /// Spans of the decorators attached to the captured node
    pub decorators: Vec<Span>,
}

/// Find the best-matching callable named `target` in a program
///
/// Returns `None` if no recognized shape introduces the name.
pub fn find_best_match(program: &Program, target: &str) -> Option<Candidate> {
    let mut collector = MatchCollector {
        target,
        best: None,
        statements: Vec::new(),
    };
    program.visit_with(&mut collector);
    collector.best
}

/// Visitor holding the running best candidate for one lookup
struct MatchCollector<'a> {
    target: &'a str,
    best: Option<Candidate>,
    /// Spans of the statements enclosing the node being visited, innermost last
    statements: Vec<Span>,
}

impl MatchCollector<'_> {
    fn offer(&mut self, shape: Shape, priority: Priority, span: Span, decorators: &[Decorator]) {
        if let Some(best) = &self.best {
            if best.priority <= priority {
                return;
            }
        }

        tracing::debug!(
            name = self.target,
            shape = shape.as_str(),
            priority = priority.value(),
            lo = span.lo.0,
            hi = span.hi.0,
            "new best candidate"
        );
        self.best = Some(Candidate {
            shape,
            priority,
            span,
            decorators: decorators.iter().map(|d| d.span).collect(),
        });
    }

    fn is_target(&self, name: &str) -> bool {
        name == self.target
    }

    fn is_target_key(&self, name: Option<String>) -> bool {
        name.as_deref() == Some(self.target)
    }

    fn within_statement(&mut self, span: Span, visit: impl FnOnce(&mut Self)) {
        self.statements.push(span);
        visit(self);
        self.statements.pop();
    }

    /// Program body statements know their placement; everything else is nested
    fn visit_program_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Decl(Decl::Fn(decl)) => self.within_statement(stmt.span(), |this| {
                this.enter_fn_decl(decl, Placement::Program)
            }),
            Stmt::Decl(Decl::Var(decl)) => self.within_statement(stmt.span(), |this| {
                this.enter_var_decl(decl, Placement::Program)
            }),
            _ => self.visit_stmt(stmt),
        }
    }

    fn enter_fn_decl(&mut self, decl: &FnDecl, placement: Placement) {
        if self.is_target(&decl.ident.sym) {
            if decl.function.body.is_some() {
                let priority = match placement {
                    Placement::Program => Priority::TOP_LEVEL_DECLARATION,
                    Placement::Nested => Priority::NESTED_DECLARATION,
                };
                self.offer(
                    Shape::FunctionDeclaration,
                    priority,
                    decl.function.span,
                    &[],
                );
            } else {
                tracing::trace!(name = self.target, "skipping bodiless function signature");
            }
        }

        decl.visit_children_with(self);
    }

    fn enter_var_decl(&mut self, decl: &VarDecl, placement: Placement) {
        let priority = match placement {
            Placement::Program => Priority::TOP_LEVEL_BINDING,
            Placement::Nested => Priority::NESTED_BINDING,
        };

        // Declarators are matched one at a time so that each is offered before
        // anything nested in its initializer, keeping document order.
        for declarator in &decl.decls {
            if self.declarator_matches(declarator) {
                self.offer(Shape::VariableBinding, priority, decl.span, &[]);
            }
            declarator.visit_with(self);
        }
    }

    fn declarator_matches(&self, declarator: &VarDeclarator) -> bool {
        let Pat::Ident(binding) = &declarator.name else {
            return false;
        };
        self.is_target(&binding.id.sym)
            && declarator
                .init
                .as_deref()
                .is_some_and(is_function_like)
    }
}

impl Visit for MatchCollector<'_> {
    fn visit_module(&mut self, module: &Module) {
        for item in &module.body {
            match item {
                ModuleItem::Stmt(stmt) => self.visit_program_stmt(stmt),
                ModuleItem::ModuleDecl(decl) => decl.visit_with(self),
            }
        }
    }

    fn visit_script(&mut self, script: &Script) {
        for stmt in &script.body {
            self.visit_program_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        self.within_statement(stmt.span(), |this| stmt.visit_children_with(this));
    }

    fn visit_decl(&mut self, decl: &Decl) {
        self.within_statement(decl.span(), |this| decl.visit_children_with(this));
    }

    fn visit_module_decl(&mut self, decl: &ModuleDecl) {
        self.within_statement(decl.span(), |this| decl.visit_children_with(this));
    }

    fn visit_fn_decl(&mut self, decl: &FnDecl) {
        self.enter_fn_decl(decl, Placement::Nested);
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) {
        self.enter_var_decl(decl, Placement::Nested);
    }

    fn visit_export_decl(&mut self, export: &ExportDecl) {
        match &export.decl {
            Decl::Fn(decl) if self.is_target(&decl.ident.sym) => {
                if decl.function.body.is_some() {
                    self.offer(
                        Shape::ExportedFunction,
                        Priority::TOP_LEVEL_DECLARATION,
                        decl.function.span,
                        &[],
                    );
                } else {
                    tracing::trace!(name = self.target, "skipping bodiless exported signature");
                }
            }
            Decl::Var(decl) => {
                if decl.decls.iter().any(|d| self.declarator_matches(d)) {
                    self.offer(
                        Shape::ExportedVariable,
                        Priority::TOP_LEVEL_DECLARATION,
                        decl.span,
                        &[],
                    );
                }
            }
            _ => {}
        }

        export.visit_children_with(self);
    }

    fn visit_export_default_decl(&mut self, export: &ExportDefaultDecl) {
        // Anonymous default exports have no name to match
        if let DefaultDecl::Fn(expr) = &export.decl {
            let named = expr
                .ident
                .as_ref()
                .is_some_and(|ident| self.is_target(&ident.sym));
            if named && expr.function.body.is_some() {
                self.offer(
                    Shape::DefaultExportFunction,
                    Priority::TOP_LEVEL_DECLARATION,
                    expr.function.span,
                    &[],
                );
            }
        }

        export.visit_children_with(self);
    }

    fn visit_class_method(&mut self, method: &ClassMethod) {
        if method.function.body.is_some() && self.is_target_key(resolve_key_name(&method.key)) {
            self.offer(
                Shape::ClassMethod,
                Priority::MEMBER,
                method.span,
                &method.function.decorators,
            );
        }

        method.visit_children_with(self);
    }

    fn visit_private_method(&mut self, method: &PrivateMethod) {
        if method.function.body.is_some() && self.is_target_key(resolve_private_name(&method.key))
        {
            self.offer(
                Shape::ClassMethod,
                Priority::MEMBER,
                method.span,
                &method.function.decorators,
            );
        }

        method.visit_children_with(self);
    }

    fn visit_constructor(&mut self, constructor: &Constructor) {
        if constructor.body.is_some() && self.is_target_key(resolve_key_name(&constructor.key)) {
            self.offer(Shape::ClassMethod, Priority::MEMBER, constructor.span, &[]);
        }

        constructor.visit_children_with(self);
    }

    fn visit_prop(&mut self, prop: &Prop) {
        match prop {
            Prop::Method(method) => {
                if method.function.body.is_some()
                    && self.is_target_key(resolve_key_name(&method.key))
                {
                    // The key may sit before the function span (`async`, `*` prefixes)
                    let lo = method.key.span().lo.min(method.function.span.lo);
                    let span = Span::new(lo, method.function.span.hi);
                    self.offer(Shape::ObjectMethod, Priority::MEMBER, span, &[]);
                }
            }
            Prop::Getter(getter) => {
                if getter.body.is_some() && self.is_target_key(resolve_key_name(&getter.key)) {
                    self.offer(Shape::ObjectMethod, Priority::MEMBER, getter.span, &[]);
                }
            }
            Prop::Setter(setter) => {
                if setter.body.is_some() && self.is_target_key(resolve_key_name(&setter.key)) {
                    self.offer(Shape::ObjectMethod, Priority::MEMBER, setter.span, &[]);
                }
            }
            Prop::KeyValue(kv) => {
                if is_function_like(&kv.value) && self.is_target_key(resolve_key_name(&kv.key)) {
                    let span = Span::new(kv.key.span().lo, kv.value.span().hi);
                    self.offer(Shape::ObjectProperty, Priority::MEMBER, span, &[]);
                }
            }
            _ => {}
        }

        prop.visit_children_with(self);
    }

    fn visit_assign_expr(&mut self, assign: &AssignExpr) {
        if let AssignTarget::Simple(SimpleAssignTarget::Member(member)) = &assign.left {
            if is_function_like(&assign.right) && self.is_target_key(resolve_member_name(&member.prop))
            {
                if let Some(&statement) = self.statements.last() {
                    self.offer(
                        Shape::MemberAssignment,
                        Priority::MEMBER_ASSIGNMENT,
                        statement,
                        &[],
                    );
                }
            }
        }

        assign.visit_children_with(self);
    }
}

/// Arrow functions and function expressions, looking through parentheses
fn is_function_like(expr: &Expr) -> bool {
    match expr {
        Expr::Arrow(_) => true,
        Expr::Fn(fn_expr) => fn_expr.function.body.is_some(),
        Expr::Paren(paren) => is_function_like(&paren.expr),
        _ => false,
    }
}
