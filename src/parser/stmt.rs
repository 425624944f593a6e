use crate::{
    ast::{
        ast::{Expr, Stmt},
        statements::{
            BlockStmt, BreakStmt, CatchClause, ClassDeclStmt, ContinueStmt, DoWhileStmt,
            FinallyClause, FnDeclStmt, ForStmt, IfStmt, MatchCase, MatchStmt,
            RetryStmt, ReturnStmt, ThrowStmt, TryStmt, VarDeclStmt, WhileStmt,
        },
    },
    errors::{
        diagnostics::ParseError,
        errors::{Error, ErrorImpl},
    },
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{parser::Parser, types::parse_type};

/// Parses one statement, recording a non-fatal error and resynchronizing instead of
/// failing. Returns `Ok(None)` when the statement was discarded.
pub fn parse_stmt_recovering(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    let start_pos = parser.get_pos();

    match parse_stmt(parser) {
        Ok(stmt) => Ok(Some(stmt)),
        Err(error) if error.is_fatal() => Err(error),
        Err(error) => {
            parser.record_error(error);
            parser.skip_to_next_statement(start_pos);
            Ok(None)
        }
    }
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.nested(|parser| {
        let handler = parser
            .get_stmt_lookup()
            .get(parser.current_token().lookup_key())
            .copied();

        if let Some(handler) = handler {
            return handler(parser);
        }

        if parser.current_token_kind() != TokenKind::Identifier {
            return Err(parser.unexpected());
        }

        let start = parser.current_token().span.start;
        let expr = parse_expr(parser, BindingPower::Default)?;
        parser.expect(";")?;

        Ok(expr.into_stmt(parser.span_from(start)))
    })
}

/// Parses `{ stmt* }`. When `fatal`, a missing brace aborts the parse.
pub fn parse_block(parser: &mut Parser, fatal: bool) -> Result<BlockStmt, Error> {
    let escalate = |error: Error| if fatal { error.into_fatal() } else { error };

    let start = parser.expect("{").map_err(escalate)?.span.start;

    let mut body = vec![];
    while !parser.at("}") && parser.has_tokens() {
        if let Some(stmt) = parse_stmt_recovering(parser)? {
            body.push(stmt);
        }
    }

    parser.expect("}").map_err(escalate)?;

    Ok(BlockStmt {
        body,
        span: parser.span_from(start),
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser, false)?))
}

/// `static`? `var` type? name (`=` expr)?, without the terminator.
fn parse_var_decl(parser: &mut Parser) -> Result<VarDeclStmt, Error> {
    let start_token = parser.advance();
    let is_static = start_token.is("static");

    if is_static {
        parser.expect("var")?;
    }

    let explicit_type = if parser.current_token().is_type_keyword() {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let identifier = parser
        .expect_identifier("expected identifier during variable declaration")?
        .value;

    let assigned_value = if parser.at("=") {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(VarDeclStmt {
        identifier,
        is_static,
        explicit_type,
        assigned_value,
        span: parser.span_from(start_token.span.start),
    })
}

/// A missing `;` after a declaration is recorded without abandoning the statement;
/// the error runs from the end of the declaration to the end of its line.
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let mut declaration = parse_var_decl(parser)?;

    if parser.at(";") {
        parser.advance();
        declaration.span = parser.span_from(declaration.span.start);
    } else {
        let end = declaration.span.end;
        parser.record_parse_error(ParseError::new(
            ErrorImpl::MissingSemicolon.to_string(),
            Span::new(end, parser.line_end(end)),
        ));
    }

    Ok(Stmt::VariableDeclaration(declaration))
}

fn parse_if(parser: &mut Parser) -> Result<IfStmt, Error> {
    // `if` or `elif`
    let start = parser.advance().span.start;

    parser.expect("(")?;
    let test = parse_expr(parser, BindingPower::Default)?;
    parser.expect(")")?;

    let consequent = parse_block(parser, false)?;

    let alternate = if parser.at("else") {
        parser.advance();
        if parser.at("if") {
            Some(Box::new(Stmt::If(parser.nested(parse_if)?)))
        } else {
            Some(Box::new(Stmt::Block(parse_block(parser, false)?)))
        }
    } else if parser.at("elif") {
        Some(Box::new(Stmt::If(parser.nested(parse_if)?)))
    } else {
        None
    };

    Ok(IfStmt {
        test,
        consequent,
        alternate,
        span: parser.span_from(start),
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::If(parse_if(parser)?))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    parser.expect("(")?;
    let test = parse_expr(parser, BindingPower::Default)?;
    parser.expect(")")?;

    let body = parse_block(parser, false)?;

    Ok(Stmt::While(WhileStmt {
        test,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_do_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let body = parse_block(parser, false)?;

    parser.expect("while")?;
    parser.expect("(")?;
    let test = parse_expr(parser, BindingPower::Default)?;
    parser.expect(")")?;

    if parser.at(";") {
        parser.advance();
    }

    Ok(Stmt::DoWhile(DoWhileStmt {
        body,
        test,
        span: parser.span_from(start),
    }))
}

/// `for (init?; test?; update?) block`. Any error inside the header is fatal.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let (init, test, update) = parse_for_header(parser).map_err(Error::into_fatal)?;
    let body = parse_block(parser, false)?;

    Ok(Stmt::For(ForStmt {
        init,
        test,
        update,
        body,
        span: parser.span_from(start),
    }))
}

type ForHeader = (Option<Box<Stmt>>, Option<Expr>, Option<Expr>);

fn parse_for_header(parser: &mut Parser) -> Result<ForHeader, Error> {
    parser.expect("(")?;

    let init = if parser.at(";") {
        None
    } else if parser.current_token().is_one_of_many(&["var", "static"]) {
        Some(Box::new(Stmt::VariableDeclaration(parse_var_decl(parser)?)))
    } else {
        let start = parser.current_token().span.start;
        let expr = parse_expr(parser, BindingPower::Default)?;
        Some(Box::new(expr.into_stmt(parser.span_from(start))))
    };
    parser.expect(";")?;

    let test = if parser.at(";") {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };
    parser.expect(";")?;

    let update = if parser.at(")") {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };
    parser.expect(")")?;

    Ok((init, test, update))
}

/// `function name(a, b) { ... }`. A malformed header or body brace is fatal.
pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let identifier = parser
        .expect_identifier("expected function name")
        .map_err(Error::into_fatal)?
        .value;

    parser.expect("(").map_err(Error::into_fatal)?;

    let mut parameters = Vec::new();
    while !parser.at(")") {
        let name = parser
            .expect_identifier("expected parameter name")
            .map_err(Error::into_fatal)?
            .value;
        parameters.push(name);

        if parser.at(",") {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(")").map_err(Error::into_fatal)?;

    let body = parse_block(parser, true)?;

    Ok(Stmt::FunctionDeclaration(FnDeclStmt {
        identifier,
        parameters,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_class_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let name = parser
        .expect_identifier("expected class name")
        .map_err(Error::into_fatal)?
        .value;

    let body = parse_block(parser, true)?;

    Ok(Stmt::ClassDeclaration(ClassDeclStmt {
        name,
        body,
        span: parser.span_from(start),
    }))
}

fn parse_optional_argument(parser: &mut Parser) -> Result<Option<Expr>, Error> {
    if parser.at(";") || parser.at("}") || !parser.has_tokens() {
        return Ok(None);
    }

    Ok(Some(parse_expr(parser, BindingPower::Default)?))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let value = parse_optional_argument(parser)?;
    parser.expect(";")?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: parser.span_from(start),
    }))
}

pub fn parse_throw_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let value = parse_optional_argument(parser)?;
    parser.expect(";")?;

    Ok(Stmt::Throw(ThrowStmt {
        value,
        span: parser.span_from(start),
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    parser.expect(";")?;

    Ok(Stmt::Break(BreakStmt {
        span: parser.span_from(start),
    }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    parser.expect(";")?;

    Ok(Stmt::Continue(ContinueStmt {
        span: parser.span_from(start),
    }))
}

/// Body of a `case` or `default` arm: a block or a single statement.
fn parse_arm_body(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.at("{") {
        Ok(Stmt::Block(parse_block(parser, false)?))
    } else {
        parse_stmt(parser)
    }
}

fn parse_match_case(parser: &mut Parser) -> Result<MatchCase, Error> {
    let start = parser.advance().span.start;

    let test = parse_expr(parser, BindingPower::Default)?;
    parser.expect("=>")?;
    let consequent = parse_arm_body(parser)?;

    Ok(MatchCase {
        test,
        consequent: Box::new(consequent),
        span: parser.span_from(start),
    })
}

/// Parses the arms between the braces of a `match`.
fn parse_match_arms(
    parser: &mut Parser,
) -> Result<(Vec<MatchCase>, Option<Box<Stmt>>), Error> {
    let mut cases = vec![];
    let mut default = None;

    while !parser.at("}") && parser.has_tokens() {
        let start_pos = parser.get_pos();

        let arm = if parser.at("case") {
            parse_match_case(parser).map(|case| cases.push(case))
        } else if parser.at("default") {
            let default_token = parser.advance();

            let arm = parser
                .expect("=>")
                .and_then(|_| parse_arm_body(parser));

            match arm {
                // The first default arm wins
                Ok(_) if default.is_some() => {
                    parser.record_error(Error::new(
                        ErrorImpl::DuplicateDefault,
                        default_token.span,
                    ));
                    Ok(())
                }
                Ok(body) => {
                    default = Some(Box::new(body));
                    Ok(())
                }
                Err(error) => Err(error),
            }
        } else {
            Err(parser.unexpected_detailed("expected `case` or `default`"))
        };

        match arm {
            Ok(()) => {}
            Err(error) if error.is_fatal() => return Err(error),
            Err(error) => {
                parser.record_error(error);
                parser.skip_to_next_statement(start_pos);
            }
        }
    }

    Ok((cases, default))
}

pub fn parse_match_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    parser.expect("(")?;
    let discriminant = parse_expr(parser, BindingPower::Default)?;
    parser.expect(")")?;
    parser.expect("{")?;

    let (cases, default) = parser.in_match(parse_match_arms)?;

    parser.expect("}")?;

    Ok(Stmt::Match(MatchStmt {
        discriminant,
        cases,
        default,
        span: parser.span_from(start),
    }))
}

/// `catch (name) { ... }`
fn parse_catch_clause(parser: &mut Parser) -> Result<CatchClause, Error> {
    let start = parser.advance().span.start;

    parser.expect("(")?;
    let param = parser
        .expect_identifier("expected catch parameter name")?
        .value;
    parser.expect(")")?;

    let body = parse_block(parser, false)?;

    Ok(CatchClause {
        param,
        body,
        span: parser.span_from(start),
    })
}

pub fn parse_try_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let block = parse_block(parser, false)?;

    let handler = if parser.at("catch") {
        Some(parse_catch_clause(parser)?)
    } else {
        None
    };

    let finalizer = if parser.at("finally") {
        let finally_start = parser.advance().span.start;
        let body = parse_block(parser, false)?;
        Some(FinallyClause {
            body,
            span: parser.span_from(finally_start),
        })
    } else {
        None
    };

    Ok(Stmt::Try(TryStmt {
        block,
        handler,
        finalizer,
        span: parser.span_from(start),
    }))
}

pub fn parse_retry_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    parser.expect("(")?;
    let count = parse_expr(parser, BindingPower::Default)?;
    parser.expect(")")?;

    let body = parse_block(parser, false)?;

    let handler = if parser.at("catch") {
        Some(parse_catch_clause(parser)?)
    } else {
        None
    };

    Ok(Stmt::Retry(RetryStmt {
        count,
        body,
        handler,
        span: parser.span_from(start),
    }))
}
