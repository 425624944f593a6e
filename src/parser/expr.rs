use crate::{
    ast::{
        ast::Expr,
        expressions::{
            ArrayExpr, AssignmentExpr, BinaryExpr, CallExpr, IdentifierExpr, LiteralExpr,
            LiteralValue, LogicalExpr, MemberExpr, ObjectExpr, Property, UnaryExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.nested(|parser| parse_expr_with_bp(parser, bp))
}

fn parse_expr_with_bp(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let nud = parser
        .get_nud_lookup()
        .get(parser.current_token().lookup_key())
        .copied();

    let Some(nud) = nud else {
        return Err(parser.unexpected());
    };

    let left = nud(parser)?;
    parse_infix_chain(parser, left, bp)
}

/// While the current token binds tighter than `bp`, folds it into `left`.
///
/// Each fold makes the tree one level deeper, so it is charged one nesting level
/// and `a + b + c ...` stays within the depth limit like any other nesting.
fn parse_infix_chain(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let key = parser.current_token().lookup_key();

    let next_bp = match parser.get_bp_lookup().get(key) {
        Some(next_bp) if *next_bp > bp => *next_bp,
        _ => return Ok(left),
    };

    let Some(led) = parser.get_led_lookup().get(key).copied() else {
        return Ok(left);
    };

    parser.nested(|parser| {
        let left = led(parser, left, next_bp)?;
        parse_infix_chain(parser, left, bp)
    })
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    let value = match token.kind {
        TokenKind::Identifier => {
            parser.advance();
            return Ok(Expr::Identifier(IdentifierExpr {
                name: token.value,
                span: token.span,
            }));
        }
        TokenKind::Number => match token.value.parse::<f64>() {
            Ok(number) => LiteralValue::Number(number),
            Err(_) => return Err(parser.unexpected_detailed("invalid number literal")),
        },
        TokenKind::String => LiteralValue::String(token.value.clone()),
        TokenKind::Keyword if token.value == "true" => LiteralValue::Bool(true),
        TokenKind::Keyword if token.value == "false" => LiteralValue::Bool(false),
        TokenKind::Keyword if token.value == "nil" => LiteralValue::Nil,
        _ => return Err(parser.unexpected()),
    };

    parser.advance();

    Ok(Expr::Literal(LiteralExpr {
        value,
        raw: parser.source_text(token.span).to_string(),
        span: token.span,
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: left.get_span().to(right.get_span()),
        operator: operator_token.value,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_logical_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Logical(LogicalExpr {
        span: left.get_span().to(right.get_span()),
        operator: operator_token.value,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let argument = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary(UnaryExpr {
        span: operator_token.span.to(argument.get_span()),
        operator: operator_token.value,
        argument: Box::new(argument),
    }))
}

/// Assignment is right-associative: `a = b = c` assigns `b = c` to `a`.
pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    if !matches!(left, Expr::Identifier(_) | Expr::Member(_)) {
        return Err(Error::new(
            ErrorImpl::InvalidAssignmentTarget,
            left.get_span(),
        ));
    }

    parser.advance();
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Assignment(AssignmentExpr {
        span: left.get_span().to(value.get_span()),
        assignee: Box::new(left),
        value: Box::new(value),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(")")?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let mut arguments = vec![];

    while !parser.at(")") && parser.has_tokens() {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        if parser.at(",") {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(")")?;

    Ok(Expr::Call(CallExpr {
        span: parser.span_from(left.get_span().start),
        callee: Box::new(left),
        arguments,
    }))
}

/// `object.property`; keywords are accepted as property names.
pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    if !matches!(
        parser.current_token_kind(),
        TokenKind::Identifier | TokenKind::Keyword
    ) {
        return Err(parser.unexpected_detailed("expected property name after `.`"));
    }

    let property = parser.advance();

    Ok(Expr::Member(MemberExpr {
        span: left.get_span().to(property.span),
        object: Box::new(left),
        property: IdentifierExpr {
            name: property.value,
            span: property.span,
        },
    }))
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;

    let mut elements = vec![];

    while !parser.at("]") && parser.has_tokens() {
        elements.push(parse_expr(parser, BindingPower::Default)?);

        if parser.at(",") {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect("]")?;

    Ok(Expr::Array(ArrayExpr {
        elements,
        span: parser.span_from(start),
    }))
}

/// `{ key: value, "quoted key": value }`
pub fn parse_object_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;

    let mut properties = vec![];

    while !parser.at("}") && parser.has_tokens() {
        if !matches!(
            parser.current_token_kind(),
            TokenKind::Identifier | TokenKind::String
        ) {
            return Err(parser.unexpected_detailed("expected property key"));
        }

        let key = parser.advance();
        parser.expect(":")?;
        let value = parse_expr(parser, BindingPower::Default)?;

        properties.push(Property {
            span: Span::new(key.span.start, value.get_span().end),
            key: key.value,
            value,
        });

        if parser.at(",") {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect("}")?;

    Ok(Expr::Object(ObjectExpr {
        properties,
        span: parser.span_from(start),
    }))
}
