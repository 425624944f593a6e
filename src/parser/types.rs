//! Type annotation parsing.
//!
//! Declarations may name one of the primitive type keywords between `var` and the
//! variable name: `var int count = 0;`.

use crate::{ast::types::Type, errors::errors::Error};

use super::parser::Parser;

pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.current_token();

    if !token.is_type_keyword() {
        return Err(parser.unexpected_detailed("expected a type name"));
    }

    match Type::from_annotation(&token.value) {
        Some(ty) => {
            parser.advance();
            Ok(ty)
        }
        None => Err(parser.unexpected_detailed("expected a type name")),
    }
}
