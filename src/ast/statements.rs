use std::slice::Iter;

use serde::Serialize;

use crate::Span;

use super::{
    ast::{Expr, Stmt},
    types::Type,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

/// `static`? `var` type? name (`=` initializer)? `;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub is_static: bool,
    pub explicit_type: Option<Type>,
    pub assigned_value: Option<Expr>,
    pub span: Span,
}

/// `elif` and `else if` both produce an `IfStmt` in the `alternate` slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStmt {
    pub test: Expr,
    pub consequent: BlockStmt,
    pub alternate: Option<Box<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStmt {
    pub test: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoWhileStmt {
    pub body: BlockStmt,
    pub test: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStmt {
    pub init: Option<Box<Stmt>>,
    pub test: Option<Expr>,
    pub update: Option<Expr>,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FnDeclStmt {
    pub identifier: String,
    pub parameters: Vec<String>,
    pub body: BlockStmt,
    pub span: Span,
}

/// Class members are ordinary statements inside the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDeclStmt {
    pub name: String,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThrowStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinueStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCase {
    pub test: Expr,
    pub consequent: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchStmt {
    pub discriminant: Expr,
    pub cases: Vec<MatchCase>,
    pub default: Option<Box<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchClause {
    pub param: String,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinallyClause {
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TryStmt {
    pub block: BlockStmt,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<FinallyClause>,
    pub span: Span,
}

/// `retry (count) { ... } catch (e) { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetryStmt {
    pub count: Expr,
    pub body: BlockStmt,
    pub handler: Option<CatchClause>,
    pub span: Span,
}
