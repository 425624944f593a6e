//! Parse errors and diagnostics handed back to callers.
//!
//! Both carry exact byte spans; converting them to line/column positions is left to
//! the caller (see [`crate::get_line_at_position`]).

use serde::Serialize;

use crate::Span;

use super::errors::{Error, ErrorImpl};

/// A recoverable syntax error recorded while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.message.clone(), self.span)
    }
}

impl From<Error> for ParseError {
    fn from(error: Error) -> Self {
        ParseError::new(error.to_string(), error.get_span())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub span: Span,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, span: Span, severity: Severity) -> Self {
        Diagnostic {
            span,
            message: message.into(),
            severity,
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Diagnostic::new(message, span, Severity::Error)
    }

    /// Builds an error diagnostic whose message is the error's display text.
    pub fn from_error_impl(error: ErrorImpl, span: Span) -> Self {
        Diagnostic::error(error.to_string(), span)
    }
}

/// Anything diagnostics can be appended to.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
