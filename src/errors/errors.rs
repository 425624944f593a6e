use thiserror::Error;

use crate::Span;

/// An error raised by the lexer or parser.
///
/// Most syntax errors are recoverable: the parser records them and resynchronizes at
/// the next statement boundary. Errors marked fatal abort the whole parse.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
    fatal: bool,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        let fatal = matches!(
            error_impl.category(),
            ErrorCategory::Lexical | ErrorCategory::Resource
        );

        Error {
            internal_error: error_impl,
            span,
            fatal,
        }
    }

    /// Marks the error as unrecoverable.
    pub fn into_fatal(mut self) -> Self {
        self.fatal = true;
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    pub fn get_span(&self) -> Span {
        self.span
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_category(&self) -> ErrorCategory {
        self.internal_error.category()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::MissingSemicolon => "MissingSemicolon",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::DuplicateDefault => "DuplicateDefault",
            ErrorImpl::RecursionLimit { .. } => "RecursionLimit",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::StaticReassignment { .. } => "StaticReassignment",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
        }
    }
}

/// Which stage an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Raised by the lexer; aborts the parse
    Lexical,
    /// Raised by the parser; usually recovered at the statement boundary
    Syntax,
    /// Raised when a resource bound (nesting depth) is exceeded; aborts the parse
    Resource,
    /// Produced by the type checker; only ever reported as a diagnostic
    Semantic,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unterminated string literal starting at offset {start}")]
    UnterminatedString { start: usize },
    #[error("unexpected token `{token}`")]
    UnexpectedToken { token: String },
    #[error("unexpected token `{token}`: {message}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("expected `{expected}` but found `{found}`")]
    ExpectedToken { expected: String, found: String },
    #[error("missing semicolon after variable declaration")]
    MissingSemicolon,
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("match statement already has a default case")]
    DuplicateDefault,
    #[error("nesting exceeds the maximum depth of {limit}")]
    RecursionLimit { limit: usize },
    #[error("variable '{variable}' is already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("cannot reassign static variable '{variable}'")]
    StaticReassignment { variable: String },
    #[error("types do not match for '{variable}': expected '{expected}', received '{received}'")]
    TypeMatchError {
        variable: String,
        expected: String,
        received: String,
    },
}

impl ErrorImpl {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorImpl::UnterminatedString { .. } => ErrorCategory::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::ExpectedToken { .. }
            | ErrorImpl::MissingSemicolon
            | ErrorImpl::InvalidAssignmentTarget
            | ErrorImpl::DuplicateDefault => ErrorCategory::Syntax,
            ErrorImpl::RecursionLimit { .. } => ErrorCategory::Resource,
            ErrorImpl::VariableAlreadyDeclared { .. }
            | ErrorImpl::StaticReassignment { .. }
            | ErrorImpl::TypeMatchError { .. } => ErrorCategory::Semantic,
        }
    }
}
