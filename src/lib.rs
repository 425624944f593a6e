#![allow(clippy::module_inception)]

use serde::Serialize;

use crate::{
    errors::{
        diagnostics::{Diagnostic, Severity},
        errors::Error,
    },
    parser::parser::parse_with_config,
    type_checker::type_checker::TypeChecker,
};

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

pub use config::FrontendConfig;

/// Half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Span covering both `self` and `other`.
    pub fn to(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses and checks `source`, returning parse errors (as diagnostics) followed by
/// semantic diagnostics.
///
/// Fatal errors (lexical errors, malformed function/class/for headers, nesting beyond
/// the configured depth) abort the whole call.
pub fn analyze(source: &str) -> Result<Vec<Diagnostic>, Error> {
    analyze_with_config(source, &FrontendConfig::default())
}

pub fn analyze_with_config(source: &str, config: &FrontendConfig) -> Result<Vec<Diagnostic>, Error> {
    let parsed = parse_with_config(source, config)?;

    let mut diagnostics: Vec<Diagnostic> = parsed
        .errors
        .iter()
        .map(|error| error.to_diagnostic())
        .collect();

    TypeChecker::new().check(&parsed.program, &mut diagnostics);

    Ok(diagnostics)
}

/// Maps a byte offset to `(line_number, line_text, column)`.
///
/// Lines and columns are 1-based and 0-based respectively, matching what the CLI
/// prints. Offsets past the end of the text map onto the last line.
pub fn get_line_at_position(source: &str, position: usize) -> (usize, String, usize) {
    let pos = position.min(source.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.trim_end_matches(['\n', '\r']).to_string(), line_pos);
        }

        start = end;
        line_number += 1;
    }

    // `pos` sits at the very end of the text
    if source.ends_with('\n') || source.is_empty() {
        (line_number, String::new(), 0)
    } else {
        let last = source.rsplit('\n').next().unwrap_or("");
        (line_number - 1, last.to_string(), last.len())
    }
}

/// Renders a diagnostic with a source excerpt.
///
/// ```text
/// error: variable 'x' is already declared
/// -> script.sc:2:1
///   |
/// 2 | var x = 20;
///   | ^^^^^^^^^^^
/// ```
pub fn display_diagnostic(diagnostic: &Diagnostic, source: &str, file_name: &str) -> String {
    let severity = match diagnostic.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Information => "info",
        Severity::Hint => "hint",
    };

    render_excerpt(
        &format!("{}: {}", severity, diagnostic.message),
        diagnostic.span,
        source,
        file_name,
    )
}

/// Renders a fatal error the same way as a diagnostic, naming the error kind.
///
/// ```text
/// error[UnterminatedString]: unterminated string literal starting at offset 8
/// -> script.sc:1:9
///   |
/// 1 | var s = "oops;
///   |         ^^^^^^
/// ```
pub fn display_error(error: &Error, source: &str, file_name: &str) -> String {
    render_excerpt(
        &format!("error[{}]: {}", error.get_error_name(), error),
        error.get_span(),
        source,
        file_name,
    )
}

fn render_excerpt(heading: &str, span: Span, source: &str, file_name: &str) -> String {
    let (line, line_text, line_pos) = get_line_at_position(source, span.start);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let column = line_pos.saturating_sub(removed_whitespace);

    // Underline stops at the end of the printed line
    let visible = line_text_removed.len().saturating_sub(column);
    let underline = span.len().min(visible).max(1);

    let mut out = String::new();
    out.push_str(&format!("{}\n", heading));
    out.push_str(&format!("-> {}:{}:{}\n", file_name, line, line_pos + 1));
    out.push_str(&format!("{:>padding$}\n", "|"));
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));
    out.push_str(&format!(
        "{:>padding$} {}{}",
        "|",
        " ".repeat(column),
        "^".repeat(underline)
    ));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += c.len_utf8();
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
