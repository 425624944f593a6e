//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals and negative-literal folding
//! - String literals and the unterminated-string error
//! - Operators and symbols
//! - Comments

use crate::{config::FrontendConfig, errors::errors::ErrorImpl, Span};

use super::{
    lexer::{tokenize, tokenize_with_config},
    tokens::TokenKind,
};

#[test]
fn test_tokenize_keywords() {
    let tokens = tokenize("var static if else elif while do for function class return").unwrap();

    for token in &tokens[..11] {
        assert_eq!(token.kind, TokenKind::Keyword, "{} should be a keyword", token.value);
    }
    assert_eq!(tokens[0].value, "var");
    assert_eq!(tokens[10].value, "return");
    assert_eq!(tokens[11].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_type_names_are_keywords() {
    let tokens = tokenize("int float string bool array object any").unwrap();

    assert!(tokens[..7].iter().all(|t| t.kind == TokenKind::Keyword));
    assert!(tokens[..7].iter().all(|t| t.is_type_keyword()));
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo baz_123 _underscore $dollar CamelCase").unwrap();

    let values: Vec<&str> = tokens[..5].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "baz_123", "_underscore", "$dollar", "CamelCase"]);
    assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Identifier));
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 100.5").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].value, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_modulo() {
    let tokens = tokenize("10 % 3").unwrap();

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "10");
    assert_eq!(tokens[1].kind, TokenKind::Symbol);
    assert_eq!(tokens[1].value, "%");
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].value, "3");
}

#[test]
fn test_minus_before_digit_folds_into_number() {
    let tokens = tokenize("x = -5; y = a - 1; z = a -1;").unwrap();
    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();

    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].value, "-5");

    // Spaced subtraction stays a symbol
    assert_eq!(&values[6..9], &["a", "-", "1"]);

    // Unspaced `-1` after an operand folds as well
    assert_eq!(values[12], "a");
    assert_eq!(tokens[13].kind, TokenKind::Number);
    assert_eq!(values[13], "-1");
}

#[test]
fn test_folding_can_be_disabled() {
    let config = FrontendConfig::new().with_fold_negative_literals(false);
    let tokens = tokenize_with_config("-5", &config).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Symbol);
    assert_eq!(tokens[0].value, "-");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].value, "5");
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" 'world' "multiple words""#).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[0].span, Span::new(0, 7));
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "world");
    assert_eq!(tokens[2].value, "multiple words");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_string_escapes_are_kept_verbatim() {
    let tokens = tokenize(r#""say \"hi\"\n" 'it\'s'"#).unwrap();

    assert_eq!(tokens[0].value, r#"say \"hi\"\n"#);
    assert_eq!(tokens[1].value, r"it\'s");
}

#[test]
fn test_unterminated_string_is_error() {
    let error = tokenize("var s = \"never closed;").unwrap_err();

    assert!(error.is_fatal());
    assert_eq!(error.get_kind(), &ErrorImpl::UnterminatedString { start: 8 });
    assert_eq!(error.get_span().start, 8);
}

#[test]
fn test_trailing_backslash_leaves_string_unterminated() {
    let error = tokenize(r"'abc\'").unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::UnterminatedString { start: 0 });
}

#[test]
fn test_tokenize_operators() {
    let tokens = tokenize("== != >= <= => < > = ! + - * / %").unwrap();

    let operators: Vec<&str> = tokens[..5].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(operators, vec!["==", "!=", ">=", "<=", "=>"]);
    assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Operator));
    assert!(tokens[5..14].iter().all(|t| t.kind == TokenKind::Symbol));
}

#[test]
fn test_logical_operators_are_spelled_as_keywords() {
    let tokens = tokenize("a && b || c").unwrap();

    assert_eq!(tokens[1].kind, TokenKind::Operator);
    assert_eq!(tokens[1].value, "and");
    assert_eq!(tokens[1].span, Span::new(2, 4));
    assert_eq!(tokens[3].value, "or");
}

#[test]
fn test_tokenize_punctuation() {
    let tokens = tokenize("( ) { } [ ] ; , . :").unwrap();

    let values: Vec<&str> = tokens[..10].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["(", ")", "{", "}", "[", "]", ";", ",", ".", ":"]);
    assert!(tokens[..10].iter().all(|t| t.kind == TokenKind::Symbol));
}

#[test]
fn test_comments_are_skipped() {
    let tokens = tokenize("a // line comment\n/* block\ncomment */ b").unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].value, "b");
}

#[test]
fn test_unterminated_block_comment_consumes_rest() {
    let tokens = tokenize("a /* never closed\nvar x = 1;").unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_token_spans_are_byte_offsets() {
    let source = "var x = 10;";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].span, Span::new(0, 3));
    assert_eq!(tokens[1].span, Span::new(4, 5));
    assert_eq!(tokens[3].span, Span::new(8, 10));
    assert_eq!(tokens[4].span, Span::new(10, 11));
    assert_eq!(tokens[5].span, Span::new(11, 11));
}

#[test]
fn test_unknown_characters_become_symbols() {
    let tokens = tokenize("@ # é").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Symbol);
    assert_eq!(tokens[0].value, "@");
    assert_eq!(tokens[2].value, "é");
    assert_eq!(tokens[2].span, Span::new(4, 6));
}

#[test]
fn test_empty_source() {
    let tokens = tokenize("   \n\t ").unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert_eq!(tokens[0].span, Span::new(6, 6));
}
