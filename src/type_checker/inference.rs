//! Flow-insensitive type inference for expressions.
//!
//! Inference never reports anything; it only looks at the node and the current
//! symbol table. Calls and member accesses are always `any`.

use crate::ast::{ast::Expr, expressions::LiteralValue, types::Type};

use super::type_checker::Environment;

const COMPARISON_OPERATORS: [&str; 6] = ["==", "!=", "<", "<=", ">", ">="];

pub fn infer_type(environment: &Environment, expr: &Expr) -> Type {
    match expr {
        Expr::Literal(literal) => match literal.value {
            LiteralValue::Number(_) if literal.raw.contains('.') => Type::Float,
            LiteralValue::Number(_) => Type::Int,
            LiteralValue::String(_) => Type::String,
            LiteralValue::Bool(_) => Type::Bool,
            LiteralValue::Nil => Type::Any,
        },
        Expr::Array(_) => Type::Array,
        Expr::Object(_) => Type::Object,
        Expr::Identifier(identifier) => environment.get_type(&identifier.name).unwrap_or(Type::Any),
        Expr::Logical(_) => Type::Bool,
        Expr::Binary(binary) => {
            if COMPARISON_OPERATORS.contains(&binary.operator.as_str()) {
                return Type::Bool;
            }

            let left = infer_type(environment, &binary.left);
            let right = infer_type(environment, &binary.right);

            // Division always produces a float
            if left == Type::Int && right == Type::Int && binary.operator != "/" {
                Type::Int
            } else {
                Type::Float
            }
        }
        Expr::Unary(unary) if unary.is_negation() => Type::Bool,
        Expr::Unary(unary) => infer_type(environment, &unary.argument),
        Expr::Call(_) | Expr::Member(_) | Expr::Assignment(_) => Type::Any,
    }
}
