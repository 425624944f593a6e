use serde::Serialize;

use crate::Span;

use super::{
    expressions::{
        ArrayExpr, AssignmentExpr, BinaryExpr, CallExpr, IdentifierExpr, LiteralExpr,
        LogicalExpr, MemberExpr, ObjectExpr, UnaryExpr,
    },
    statements::{
        BlockStmt, BreakStmt, ClassDeclStmt, ContinueStmt, DoWhileStmt, ExpressionStmt,
        FnDeclStmt, ForStmt, IfStmt, MatchStmt, RetryStmt, ReturnStmt, ThrowStmt, TryStmt,
        VarDeclStmt, WhileStmt,
    },
};

/// Root of a parsed document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// Statement Types
///
/// Every statement kind the parser can produce. Consumers match exhaustively, so a
/// new kind cannot be silently skipped by the type checker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Stmt {
    VariableDeclaration(VarDeclStmt),
    If(IfStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    For(ForStmt),
    FunctionDeclaration(FnDeclStmt),
    ClassDeclaration(ClassDeclStmt),
    Return(ReturnStmt),
    Throw(ThrowStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Match(MatchStmt),
    Try(TryStmt),
    Retry(RetryStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Stmt {
    /// Returns the span of the statement.
    pub fn get_span(&self) -> Span {
        match self {
            Stmt::VariableDeclaration(stmt) => stmt.span,
            Stmt::If(stmt) => stmt.span,
            Stmt::While(stmt) => stmt.span,
            Stmt::DoWhile(stmt) => stmt.span,
            Stmt::For(stmt) => stmt.span,
            Stmt::FunctionDeclaration(stmt) => stmt.span,
            Stmt::ClassDeclaration(stmt) => stmt.span,
            Stmt::Return(stmt) => stmt.span,
            Stmt::Throw(stmt) => stmt.span,
            Stmt::Break(stmt) => stmt.span,
            Stmt::Continue(stmt) => stmt.span,
            Stmt::Match(stmt) => stmt.span,
            Stmt::Try(stmt) => stmt.span,
            Stmt::Retry(stmt) => stmt.span,
            Stmt::Expression(stmt) => stmt.span,
            Stmt::Block(stmt) => stmt.span,
        }
    }
}

/// Expression Types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    Literal(LiteralExpr),
    Identifier(IdentifierExpr),
    Binary(BinaryExpr),
    Logical(LogicalExpr),
    Unary(UnaryExpr),
    Assignment(AssignmentExpr),
    Call(CallExpr),
    Member(MemberExpr),
    Array(ArrayExpr),
    Object(ObjectExpr),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn get_span(&self) -> Span {
        match self {
            Expr::Literal(expr) => expr.span,
            Expr::Identifier(expr) => expr.span,
            Expr::Binary(expr) => expr.span,
            Expr::Logical(expr) => expr.span,
            Expr::Unary(expr) => expr.span,
            Expr::Assignment(expr) => expr.span,
            Expr::Call(expr) => expr.span,
            Expr::Member(expr) => expr.span,
            Expr::Array(expr) => expr.span,
            Expr::Object(expr) => expr.span,
        }
    }

    /// The identifier name if this is a bare identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expr::Identifier(identifier) => Some(&identifier.name),
            _ => None,
        }
    }

    /// Wraps the expression in an expression statement.
    pub fn into_stmt(self, span: Span) -> Stmt {
        Stmt::Expression(ExpressionStmt {
            expression: self,
            span,
        })
    }
}
