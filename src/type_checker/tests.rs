use crate::{
    errors::diagnostics::{Diagnostic, Severity},
    parser::parser::parse,
    Span,
};

use super::type_checker::{type_check, TypeChecker};

fn diagnostics(source: &str) -> Vec<Diagnostic> {
    let result = parse(source).unwrap();
    assert!(
        result.errors.is_empty(),
        "unexpected parse errors: {:?}",
        result.errors
    );
    type_check(&result.program)
}

#[test]
fn test_static_reassignment() {
    let diagnostics = diagnostics("static var x = 10; x = 20;");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "cannot reassign static variable 'x'");
    assert_eq!(diagnostics[0].span, Span::new(19, 26));
    assert_eq!(diagnostics[0].severity, Severity::Error);
}

#[test]
fn test_first_write_to_uninitialized_static_is_allowed() {
    assert!(diagnostics("static var int x; x = 1;").is_empty());

    let diagnostics = diagnostics("static var x; x = 1; x = 2;");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].span.start, 21);
}

#[test]
fn test_plain_reassignment_is_allowed() {
    assert!(diagnostics("var x = 10; x = 20;").is_empty());
}

#[test]
fn test_redeclaration() {
    let diagnostics = diagnostics("var x = 10; var x = 20;");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "variable 'x' is already declared");
    assert_eq!(diagnostics[0].span, Span::new(12, 23));
}

#[test]
fn test_namespace_is_flat() {
    let diags = diagnostics("if (a) { var x = 1; } var x = 2;");
    assert_eq!(diags.len(), 1);

    let diags = diagnostics("function f() { var n = 1; } function g() { var n = 2; }");
    assert_eq!(diags.len(), 1);
}

#[test]
fn test_assignment_type_mismatch() {
    let diagnostics = diagnostics("var int x = 5; x = \"hello\";");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message,
        "types do not match for 'x': expected 'int', received 'string'"
    );
    assert_eq!(diagnostics[0].span, Span::new(19, 26));
}

#[test]
fn test_int_widens_to_float() {
    assert!(diagnostics("var float y = 1; y = 2;").is_empty());
}

#[test]
fn test_float_does_not_narrow_to_int() {
    let diagnostics = diagnostics("var int n = 0; n = n / 2;");

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("received 'float'"));
}

#[test]
fn test_rejected_initializer_leaves_name_untyped() {
    let diagnostics = diagnostics("var int x = 1.5;\nx = 'str';");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].span, Span::new(12, 15));
}

#[test]
fn test_rejected_declaration_can_be_redeclared() {
    let diagnostics = diagnostics("var int x = 'a'; var x = 1;");

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.starts_with("types do not match"));
}

#[test]
fn test_nil_fits_any_declaration() {
    assert!(diagnostics("var int x = nil; var string s; s = nil;").is_empty());
}

#[test]
fn test_untyped_variables_accept_anything() {
    assert!(diagnostics("var v = 1; v = 'text'; v = [1, 2]; v = {};").is_empty());
}

#[test]
fn test_member_assignment_is_not_typed() {
    assert!(diagnostics("var int x = 1; obj.x = 'a';").is_empty());
}

#[test]
fn test_redeclared_initializer_is_still_walked() {
    let diagnostics = diagnostics("static var s = 1; var s = (s = 2);");

    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics[0].message.contains("already declared"));
    assert!(diagnostics[1].message.contains("cannot reassign"));
}

#[test]
fn test_static_reassignment_still_walks_value() {
    let diagnostics = diagnostics("static var a = 1; static var b = 1; a = (b = 2);");

    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics
        .iter()
        .all(|d| d.message.starts_with("cannot reassign static variable")));
}

#[test]
fn test_nested_statements_are_checked() {
    let source = "\
function f() { static var k = 1; k = 2; }
class C { var int n = 'x'; }
match (v) { case 1 => { var a = 1; var a = 2; } default => { } }
try { } catch (e) { var int t = true; } finally { }
retry (3) { } catch (e) { var float r = 'no'; }
for (var i = 0; i < 3; i = i + 1) { var i = 5; }
";
    assert_eq!(diagnostics(source).len(), 6);
}

#[test]
fn test_state_resets_between_checks() {
    let program = parse("static var x = 1; var y = 2;").unwrap().program;
    let mut checker = TypeChecker::new();

    let mut first = vec![];
    checker.check(&program, &mut first);
    let mut second = vec![];
    checker.check(&program, &mut second);

    assert!(first.is_empty());
    assert!(second.is_empty());
}

#[test]
fn test_nested_static_reassignment_uses_expression_span() {
    let source = "static var x = 1; log(x = 2);";
    let diagnostics = diagnostics(source);

    assert_eq!(diagnostics.len(), 1);
    let span = diagnostics[0].span;
    assert_eq!(&source[span.start..span.end], "x = 2");
}
