use std::collections::{HashMap, HashSet};

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::AssignmentExpr,
        statements::{BlockStmt, CatchClause, VarDeclStmt},
        types::Type,
    },
    errors::{
        diagnostics::{Diagnostic, DiagnosticSink},
        errors::ErrorImpl,
    },
    Span,
};

use super::inference::infer_type;

/// Everything the checker knows about declared names.
///
/// There is a single namespace for the whole program: blocks, functions and classes
/// do not open new scopes.
#[derive(Debug, Default)]
pub struct Environment {
    pub symbol_table: HashMap<String, Type>,
    pub static_variables: HashSet<String>,
    pub assigned_variables: HashSet<String>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    pub fn is_declared(&self, variable_name: &str) -> bool {
        self.symbol_table.contains_key(variable_name)
    }

    pub fn get_type(&self, variable_name: &str) -> Option<Type> {
        self.symbol_table.get(variable_name).copied()
    }

    pub fn is_static(&self, variable_name: &str) -> bool {
        self.static_variables.contains(variable_name)
    }

    pub fn is_assigned(&self, variable_name: &str) -> bool {
        self.assigned_variables.contains(variable_name)
    }

    pub fn mark_assigned(&mut self, variable_name: &str) {
        self.assigned_variables.insert(String::from(variable_name));
    }
}

#[derive(Debug, Default)]
pub struct TypeChecker {
    pub environment: Environment,
    diagnostics: Vec<Diagnostic>,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker::default()
    }

    /// Walks `program` and appends every semantic diagnostic to `sink`.
    ///
    /// All state is reset first, so one checker can be reused across documents.
    #[tracing::instrument(skip_all, fields(statements = program.statements.len()))]
    pub fn check(&mut self, program: &Program, sink: &mut dyn DiagnosticSink) {
        self.environment = Environment::new();
        self.diagnostics.clear();

        for stmt in &program.statements {
            type_check_stmt(self, stmt);
        }

        tracing::debug!(diagnostics = self.diagnostics.len(), "checked program");

        for diagnostic in self.diagnostics.drain(..) {
            sink.report(diagnostic);
        }
    }

    fn report(&mut self, error: ErrorImpl, span: Span) {
        tracing::debug!(error = %error, start = span.start, "semantic error");
        self.diagnostics.push(Diagnostic::from_error_impl(error, span));
    }

    /// Reports a mismatch when `value` cannot be stored in `variable` of type `declared`.
    /// Returns whether the types were compatible.
    fn check_compatible(&mut self, variable: &str, declared: Type, value: &Expr) -> bool {
        let actual = infer_type(&self.environment, value);

        if declared.is_compatible_with(&actual) {
            return true;
        }

        self.report(
            ErrorImpl::TypeMatchError {
                variable: String::from(variable),
                expected: declared.to_string(),
                received: actual.to_string(),
            },
            value.get_span(),
        );
        false
    }
}

/// Checks `program` with a fresh checker and sink.
pub fn check(program: &Program, sink: &mut dyn DiagnosticSink) {
    TypeChecker::new().check(program, sink);
}

/// Checks `program` and returns its diagnostics.
pub fn type_check(program: &Program) -> Vec<Diagnostic> {
    let mut diagnostics = vec![];
    check(program, &mut diagnostics);
    diagnostics
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, ast: &Stmt) {
    match ast {
        Stmt::VariableDeclaration(decl) => type_check_var_decl(type_checker, decl),
        // A static reassignment is reported over the whole statement, `;` included
        Stmt::Expression(stmt) => match &stmt.expression {
            Expr::Assignment(assignment) => {
                type_check_assignment(type_checker, assignment, stmt.span)
            }
            expression => type_check_expr(type_checker, expression),
        },
        Stmt::Block(block) => type_check_block(type_checker, block),
        Stmt::If(if_stmt) => {
            type_check_expr(type_checker, &if_stmt.test);
            type_check_block(type_checker, &if_stmt.consequent);
            if let Some(alternate) = &if_stmt.alternate {
                type_check_stmt(type_checker, alternate);
            }
        }
        Stmt::While(while_stmt) => {
            type_check_expr(type_checker, &while_stmt.test);
            type_check_block(type_checker, &while_stmt.body);
        }
        Stmt::DoWhile(do_while) => {
            type_check_block(type_checker, &do_while.body);
            type_check_expr(type_checker, &do_while.test);
        }
        Stmt::For(for_stmt) => {
            if let Some(init) = &for_stmt.init {
                type_check_stmt(type_checker, init);
            }
            if let Some(test) = &for_stmt.test {
                type_check_expr(type_checker, test);
            }
            if let Some(update) = &for_stmt.update {
                type_check_expr(type_checker, update);
            }
            type_check_block(type_checker, &for_stmt.body);
        }
        Stmt::FunctionDeclaration(function) => type_check_block(type_checker, &function.body),
        Stmt::ClassDeclaration(class) => type_check_block(type_checker, &class.body),
        Stmt::Return(ret) => {
            if let Some(value) = &ret.value {
                type_check_expr(type_checker, value);
            }
        }
        Stmt::Throw(throw) => {
            if let Some(value) = &throw.value {
                type_check_expr(type_checker, value);
            }
        }
        Stmt::Break(_) | Stmt::Continue(_) => {}
        Stmt::Match(match_stmt) => {
            type_check_expr(type_checker, &match_stmt.discriminant);
            for case in &match_stmt.cases {
                type_check_expr(type_checker, &case.test);
                type_check_stmt(type_checker, &case.consequent);
            }
            if let Some(default) = &match_stmt.default {
                type_check_stmt(type_checker, default);
            }
        }
        Stmt::Try(try_stmt) => {
            type_check_block(type_checker, &try_stmt.block);
            if let Some(handler) = &try_stmt.handler {
                type_check_catch(type_checker, handler);
            }
            if let Some(finalizer) = &try_stmt.finalizer {
                type_check_block(type_checker, &finalizer.body);
            }
        }
        Stmt::Retry(retry) => {
            type_check_expr(type_checker, &retry.count);
            type_check_block(type_checker, &retry.body);
            if let Some(handler) = &retry.handler {
                type_check_catch(type_checker, handler);
            }
        }
    }
}

pub fn type_check_block(type_checker: &mut TypeChecker, ast: &BlockStmt) {
    for stmt in ast.iter() {
        type_check_stmt(type_checker, stmt);
    }
}

fn type_check_catch(type_checker: &mut TypeChecker, clause: &CatchClause) {
    type_check_block(type_checker, &clause.body);
}

fn type_check_var_decl(type_checker: &mut TypeChecker, decl: &VarDeclStmt) {
    let name = decl.identifier.as_str();

    if type_checker.environment.is_declared(name) {
        type_checker.report(
            ErrorImpl::VariableAlreadyDeclared {
                variable: decl.identifier.clone(),
            },
            decl.span,
        );

        if let Some(value) = &decl.assigned_value {
            type_check_expr(type_checker, value);
        }
        return;
    }

    if decl.is_static {
        type_checker
            .environment
            .static_variables
            .insert(decl.identifier.clone());
    }

    match (decl.explicit_type, &decl.assigned_value) {
        (None, value) => {
            type_checker
                .environment
                .symbol_table
                .insert(decl.identifier.clone(), Type::Any);

            if value.is_some() {
                type_checker.environment.mark_assigned(name);
            }
        }
        (Some(declared), Some(value)) => {
            // A rejected initializer leaves the name undeclared
            if type_checker.check_compatible(name, declared, value) {
                type_checker
                    .environment
                    .symbol_table
                    .insert(decl.identifier.clone(), declared);
                type_checker.environment.mark_assigned(name);
            }
        }
        (Some(declared), None) => {
            type_checker
                .environment
                .symbol_table
                .insert(decl.identifier.clone(), declared);
        }
    }

    if let Some(value) = &decl.assigned_value {
        type_check_expr(type_checker, value);
    }
}

fn type_check_assignment(type_checker: &mut TypeChecker, assignment: &AssignmentExpr, span: Span) {
    match assignment.assignee.as_identifier() {
        Some(name) => {
            let environment = &type_checker.environment;

            if environment.is_static(name) && environment.is_assigned(name) {
                type_checker.report(
                    ErrorImpl::StaticReassignment {
                        variable: String::from(name),
                    },
                    span,
                );
            } else {
                if environment.is_static(name) {
                    type_checker.environment.mark_assigned(name);
                }

                match type_checker.environment.get_type(name) {
                    Some(Type::Any) | None => {}
                    Some(declared) => {
                        type_checker.check_compatible(name, declared, &assignment.value);
                    }
                }
            }
        }
        None => type_check_expr(type_checker, &assignment.assignee),
    }

    type_check_expr(type_checker, &assignment.value);
}

pub fn type_check_expr(type_checker: &mut TypeChecker, ast: &Expr) {
    match ast {
        Expr::Literal(_) | Expr::Identifier(_) => {}
        Expr::Assignment(assignment) => {
            type_check_assignment(type_checker, assignment, assignment.span)
        }
        Expr::Binary(binary) => {
            type_check_expr(type_checker, &binary.left);
            type_check_expr(type_checker, &binary.right);
        }
        Expr::Logical(logical) => {
            type_check_expr(type_checker, &logical.left);
            type_check_expr(type_checker, &logical.right);
        }
        Expr::Unary(unary) => type_check_expr(type_checker, &unary.argument),
        Expr::Call(call) => {
            type_check_expr(type_checker, &call.callee);
            for argument in &call.arguments {
                type_check_expr(type_checker, argument);
            }
        }
        Expr::Member(member) => type_check_expr(type_checker, &member.object),
        Expr::Array(array) => {
            for element in &array.elements {
                type_check_expr(type_checker, element);
            }
        }
        Expr::Object(object) => {
            for property in &object.properties {
                type_check_expr(type_checker, &property.value);
            }
        }
    }
}
