use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, Stmt},
    errors::errors::Error,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, loosest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Or,
    And,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Member,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    parser.led("=", BindingPower::Assignment, parse_assignment_expr);

    // Logical
    parser.led("or", BindingPower::Or, parse_logical_expr);
    parser.led("and", BindingPower::And, parse_logical_expr);

    // Equality and relational
    parser.led("==", BindingPower::Equality, parse_binary_expr);
    parser.led("!=", BindingPower::Equality, parse_binary_expr);
    parser.led("<", BindingPower::Relational, parse_binary_expr);
    parser.led("<=", BindingPower::Relational, parse_binary_expr);
    parser.led(">", BindingPower::Relational, parse_binary_expr);
    parser.led(">=", BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led("+", BindingPower::Additive, parse_binary_expr);
    parser.led("-", BindingPower::Additive, parse_binary_expr);
    parser.led("*", BindingPower::Multiplicative, parse_binary_expr);
    parser.led("/", BindingPower::Multiplicative, parse_binary_expr);
    parser.led("%", BindingPower::Multiplicative, parse_binary_expr);

    parser.led("(", BindingPower::Call, parse_call_expr);

    // Member
    parser.led(".", BindingPower::Member, parse_member_expr);

    // Literals and symbols
    parser.nud("<number>", parse_primary_expr);
    parser.nud("<string>", parse_primary_expr);
    parser.nud("<identifier>", parse_primary_expr);
    parser.nud("true", parse_primary_expr);
    parser.nud("false", parse_primary_expr);
    parser.nud("nil", parse_primary_expr);
    parser.nud("not", parse_prefix_expr);
    parser.nud("!", parse_prefix_expr);
    parser.nud("-", parse_prefix_expr);
    parser.nud("(", parse_grouping_expr);
    parser.nud("[", parse_array_expr);
    parser.nud("{", parse_object_expr);

    // Statements
    parser.stmt("var", parse_var_decl_stmt);
    parser.stmt("static", parse_var_decl_stmt);
    parser.stmt("if", parse_if_stmt);
    parser.stmt("while", parse_while_stmt);
    parser.stmt("do", parse_do_while_stmt);
    parser.stmt("for", parse_for_stmt);
    parser.stmt("function", parse_fn_decl_stmt);
    parser.stmt("class", parse_class_decl_stmt);
    parser.stmt("return", parse_return_stmt);
    parser.stmt("throw", parse_throw_stmt);
    parser.stmt("break", parse_break_stmt);
    parser.stmt("continue", parse_continue_stmt);
    parser.stmt("match", parse_match_stmt);
    parser.stmt("try", parse_try_stmt);
    parser.stmt("retry", parse_retry_stmt);
    parser.stmt("{", parse_block_stmt);
}

// Lookup tables inside parser struct, keyed by `Token::lookup_key`
pub type StmtLookup = HashMap<&'static str, StmtHandler>;
pub type NUDLookup = HashMap<&'static str, NUDHandler>;
pub type LEDLookup = HashMap<&'static str, LEDHandler>;
pub type BPLookup = HashMap<&'static str, BindingPower>;
