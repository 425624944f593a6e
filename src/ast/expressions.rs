use serde::Serialize;

use crate::Span;

use super::ast::Expr;

// LITERALS

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Bool(bool),
    Nil,
}

/// Literal Expression
///
/// `raw` is the exact source text, quotes included for strings. Number inference
/// looks at it to tell `1` from `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralExpr {
    pub value: LiteralValue,
    pub raw: String,
    pub span: Span,
}

/// Identifier Expression
/// Represents a name in the AST. This includes functions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifierExpr {
    pub name: String,
    pub span: Span,
}

// OPERATORS

/// Arithmetic, equality and relational operators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpr {
    pub operator: String,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

/// `and` / `or`, whichever way they were spelled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalExpr {
    pub operator: String,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpr {
    pub operator: String,
    pub argument: Box<Expr>,
    pub span: Span,
}

impl UnaryExpr {
    pub fn is_negation(&self) -> bool {
        self.operator == "not" || self.operator == "!"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentExpr {
    pub assignee: Box<Expr>,
    pub value: Box<Expr>,
    pub span: Span,
}

// ACCESS

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub property: IdentifierExpr,
    pub span: Span,
}

// COLLECTIONS

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayExpr {
    pub elements: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub key: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectExpr {
    pub properties: Vec<Property>,
    pub span: Span,
}
