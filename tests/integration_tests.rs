//! Integration tests for the whole front end.
//!
//! These tests drive source text through tokenization, parsing and type checking
//! using only the public API, the way an editor integration would.

use scriptcheck::{
    analyze, analyze_with_config,
    ast::ast::Stmt,
    display_diagnostic,
    errors::errors::ErrorImpl,
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::parse,
    type_checker::type_checker::type_check,
    FrontendConfig, Span,
};
use serde_json::Value;

const PROGRAM: &str = r#"
// Inventory bookkeeping
static var string owner = "warehouse";
var int count = 0;
var float ratio = 1;
var items = [1, 2, 3];
var meta = { name: "stock", 'tags': [] };

function restock(amount) {
    count = count + 1;
    return count + amount;
}

class Shelf {
    var capacity = 10;
}

if (count >= 10 and not full) {
    log("full");
} elif (count == 0) {
    log("empty");
} else {
    log(count);
}

while (count < 100) { count = count + 1; }
do { count = count - 1; } while (count > 0);
for (var i = 0; i < 3; i = i + 1) { if (i == 2) { break; } continue; }

match (count) {
    case 1 => { log("one"); }
    case 2 => log("two");
    default => { log("many"); }
}

try { restock(5); } catch (err) { throw err; } finally { log("done"); }
retry (3) { fetch(); } catch (e) { log(e.message); }
"#;

/// Asserts every `span` object in the serialized tree lies within `[0, len]`.
fn assert_spans_within(value: &Value, len: usize) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Object(span)) = map.get("span") {
                let start = span["start"].as_u64().unwrap() as usize;
                let end = span["end"].as_u64().unwrap() as usize;
                assert!(start <= end && end <= len, "span {}..{} out of 0..{}", start, end, len);
            }
            map.values().for_each(|child| assert_spans_within(child, len));
        }
        Value::Array(values) => values.iter().for_each(|child| assert_spans_within(child, len)),
        _ => {}
    }
}

#[test]
fn test_valid_program_has_no_errors_and_spans_in_bounds() {
    let result = parse(PROGRAM).unwrap();

    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.program.statements.len(), 14);

    let json = serde_json::to_value(&result.program).unwrap();
    assert_spans_within(&json, PROGRAM.len());

    assert!(type_check(&result.program).is_empty());
}

#[test]
fn test_modulo_tokens() {
    let tokens = tokenize("10 % 3").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "10");
    assert_eq!(tokens[1].kind, TokenKind::Symbol);
    assert_eq!(tokens[1].value, "%");
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].value, "3");
}

#[test]
fn test_parse_is_idempotent() {
    assert_eq!(parse(PROGRAM).unwrap(), parse(PROGRAM).unwrap());

    let broken = "var x = ;\nfunction f() { y = }\n";
    assert_eq!(parse(broken).unwrap(), parse(broken).unwrap());
}

#[test]
fn test_static_reassignment_is_reported_once() {
    let source = "static var x = 10; x = 20;";
    let diagnostics = analyze(source).unwrap();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("static"));
    assert_eq!(&source[diagnostics[0].span.start..diagnostics[0].span.end], "x = 20;");
}

#[test]
fn test_plain_reassignment_is_clean() {
    assert!(analyze("var x = 10; x = 20;").unwrap().is_empty());
}

#[test]
fn test_redeclaration_is_attached_to_second_declaration() {
    let source = "var x = 10; var x = 20;";
    let diagnostics = analyze(source).unwrap();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("already declared"));
    assert_eq!(diagnostics[0].span, Span::new(12, source.len()));
}

#[test]
fn test_type_mismatch_names_both_types() {
    let diagnostics = analyze("var int x = 5; x = \"hello\";").unwrap();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("expected 'int'"));
    assert!(diagnostics[0].message.contains("received 'string'"));
}

#[test]
fn test_int_widens_to_float() {
    assert!(analyze("var float y = 1; y = 2;").unwrap().is_empty());
}

#[test]
fn test_missing_semicolon_at_end_of_line() {
    let source = "var x = 5\nvar y = x;\n";
    let diagnostics = analyze(source).unwrap();

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].span, Span::new(9, 9));

    // Parsing resumes at the next line
    let result = parse(source).unwrap();
    assert_eq!(result.program.statements.len(), 2);
    assert!(matches!(
        &result.program.statements[1],
        Stmt::VariableDeclaration(decl) if decl.identifier == "y"
    ));

    // Same at the very end of the input
    let diagnostics = analyze("var x = 5").unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].span, Span::new(9, 9));
}

#[test]
fn test_unterminated_string_aborts_with_offset() {
    let source = "var a = 1;\nvar s = \"no end;\nvar b = 2;";
    let error = analyze(source).unwrap_err();

    assert!(error.is_fatal());
    assert_eq!(error.get_kind(), &ErrorImpl::UnterminatedString { start: 19 });
    assert!(error.to_string().contains("19"));
}

#[test]
fn test_recursion_limit_is_configurable() {
    let source = format!("x = {}1{};", "[".repeat(50), "]".repeat(50));

    assert!(analyze(&source).unwrap().is_empty());

    let config = FrontendConfig::new().with_max_nesting_depth(10);
    let error = analyze_with_config(&source, &config).unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::RecursionLimit { limit: 10 });
}

#[test]
fn test_long_flat_chains_fail_instead_of_overflowing() {
    let sum = format!("var int x = 1{};", " + 1".repeat(10_000));
    let error = analyze(&sum).unwrap_err();
    assert!(error.is_fatal());
    assert_eq!(error.get_kind(), &ErrorImpl::RecursionLimit { limit: 200 });

    let members = format!("var y = a{};", ".b".repeat(10_000));
    let error = analyze(&members).unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::RecursionLimit { limit: 200 });

    // Chains under the limit are still checked normally
    let short = format!("var int z = 1{};", " + 1".repeat(50));
    assert!(analyze(&short).unwrap().is_empty());
}

#[test]
fn test_one_error_per_malformed_statement() {
    let source = "var a = ;\nb = (1 + ;\n}\nvar c = 3;\nc = 4;";
    let result = parse(source).unwrap();

    assert_eq!(result.errors.len(), 3);
    assert_eq!(result.program.statements.len(), 2);
}

#[test]
fn test_parse_and_semantic_errors_are_combined_in_order() {
    let diagnostics = analyze("var x = 1;\nvar x = 2;\nx = ;\n").unwrap();

    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics[0].message.starts_with("unexpected token"));
    assert!(diagnostics[1].message.contains("already declared"));
}

#[test]
fn test_display_diagnostic_renders_source_line() {
    let source = "var int x = 5;\nx = 'text';\n";
    let diagnostics = analyze(source).unwrap();
    let rendered = display_diagnostic(&diagnostics[0], source, "demo.sc");

    assert!(rendered.contains("-> demo.sc:2:5"));
    assert!(rendered.contains("2 | x = 'text';"));
    assert!(rendered.ends_with("^^^^^^"));
}

#[test]
fn test_diagnostics_serialize_to_json() {
    let diagnostics = analyze("var x = 1; var x = 2;").unwrap();
    let json = serde_json::to_value(&diagnostics).unwrap();

    assert_eq!(json[0]["severity"], "error");
    assert_eq!(json[0]["span"]["start"], 11);
}
