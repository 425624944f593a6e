//! Property-based tests for the front end
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use scriptcheck::{
    analyze,
    lexer::{lexer::tokenize, tokens::KEYWORDS},
    parser::parser::parse,
};

// Strategy for generating identifiers that are not keywords
fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,6}".prop_filter("Not a keyword", |s| !KEYWORDS.contains(s.as_str()))
}

// Strategy for small well-formed statements
fn statement_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (ident_strategy(), 0u32..1000).prop_map(|(name, n)| format!("{} = {} + 1;", name, n)),
        (ident_strategy(), ident_strategy())
            .prop_map(|(a, b)| format!("if ({} < {}) {{ {} = {}; }}", a, b, a, b)),
        (ident_strategy(), "[a-z ]{0,10}")
            .prop_map(|(name, text)| format!("{}(\"{}\", [1, 2.5]);", name, text)),
        ident_strategy().prop_map(|name| format!("while ({}) {{ break; }}", name)),
    ]
}

proptest! {
    /// Property: The lexer never panics, whatever the input
    #[test]
    fn tokenize_never_panics(source in "\\PC{0,64}") {
        let _ = tokenize(&source);
    }

    /// Property: Parsing and checking never panic, and every recorded span stays
    /// inside the source
    #[test]
    fn parse_errors_stay_in_bounds(source in "[a-z0-9 ;{}()=+\\-*/<>!.,:\\[\\]\"'\n]{0,80}") {
        if let Ok(result) = parse(&source) {
            for error in &result.errors {
                prop_assert!(error.span.start <= error.span.end);
                prop_assert!(error.span.end <= source.len());
            }
        }
        let _ = analyze(&source);
    }

    /// Property: Parsing the same text twice gives the same result
    #[test]
    fn parse_is_idempotent(source in "\\PC{0,64}") {
        prop_assert_eq!(parse(&source), parse(&source));
    }

    /// Property: Generated well-formed programs parse without errors
    #[test]
    fn generated_programs_parse_cleanly(
        statements in prop::collection::vec(statement_strategy(), 0..8)
    ) {
        let source = statements.join("\n");
        let result = parse(&source).expect("Parse failed");

        prop_assert!(result.errors.is_empty(), "errors in {:?}: {:?}", source, result.errors);
        prop_assert_eq!(result.program.statements.len(), statements.len());

        for stmt in &result.program.statements {
            let span = stmt.get_span();
            prop_assert!(span.start <= span.end && span.end <= source.len());
        }
    }

    /// Property: Declaring a fresh variable and assigning to it is always clean
    #[test]
    fn fresh_variables_assign_cleanly(name in ident_strategy(), first in 0i64..100, second in 0i64..100) {
        let source = format!("var int {} = {};\n{} = {};", name, first, name, second);
        prop_assert!(analyze(&source).unwrap().is_empty());
    }
}
