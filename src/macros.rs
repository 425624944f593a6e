//! Utility macros for the front end.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler that emits the matched text as a token
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexer handler that pushes the matched text as a token of `$kind`.
///
/// Generates a handler function that creates the token at the current position
/// and advances the lexer past the match.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: SYMBOL.clone(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Symbol),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |lexer, matched| {
            let span = Span::new(lexer.pos, lexer.pos + matched.len());
            lexer.push(MK_TOKEN!($kind, String::from(matched), span));
            lexer.advance_n(matched.len());
            Ok(())
        }
    };
}
