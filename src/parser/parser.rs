//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parsing entry points.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and a statement lookup for statement dispatch.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Syntax errors inside a statement are recorded and the parser resynchronizes at
//! the next statement boundary. Fatal errors abort the parse.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    ast::ast::Program,
    config::FrontendConfig,
    errors::{
        diagnostics::ParseError,
        errors::{Error, ErrorImpl},
    },
    lexer::{
        lexer::tokenize_with_config,
        tokens::{Token, TokenKind},
    },
    Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt_recovering,
};

/// Output of a parse: the program plus every recovered syntax error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and maintains lookup tables for
/// parsing statements and expressions. It tracks the current position in the
/// token stream and provides methods for token consumption.
pub struct Parser {
    /// The list of tokens to parse, always ending in EOF
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The source text, kept for literal raw text
    source: String,
    /// Byte offsets of every `\n` in the source
    line_breaks: Vec<usize>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Recovered syntax errors
    errors: Vec<ParseError>,
    /// Current nesting of statements and expressions
    depth: usize,
    max_depth: usize,
    /// How many `match` bodies enclose the cursor
    match_depth: usize,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// `tokens` must end with an EOF token, as produced by the lexer.
    pub fn new(tokens: Vec<Token>, source: &str, config: &FrontendConfig) -> Self {
        let line_breaks = source
            .char_indices()
            .filter(|(_, c)| *c == '\n')
            .map(|(i, _)| i)
            .collect();

        Parser {
            tokens,
            pos: 0,
            source: source.to_string(),
            line_breaks,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            errors: vec![],
            depth: 0,
            max_depth: config.max_nesting_depth,
            match_depth: 0,
        }
    }

    /// Returns the current token without advancing.
    ///
    /// The cursor never moves past the trailing EOF token, so this always succeeds.
    pub fn current_token(&self) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    pub fn get_pos(&self) -> usize {
        self.pos
    }

    /// Whether the current token is the keyword, operator or symbol `text`.
    pub fn at(&self, text: &str) -> bool {
        self.current_token().is(text)
    }

    /// Consumes the keyword, operator or symbol `text`, or fails with `ExpectedToken`.
    pub fn expect(&mut self, text: &str) -> Result<Token, Error> {
        if self.at(text) {
            return Ok(self.advance());
        }

        let token = self.current_token();
        Err(Error::new(
            ErrorImpl::ExpectedToken {
                expected: String::from(text),
                found: token.to_string(),
            },
            token.span,
        ))
    }

    /// Consumes an identifier, or fails with `message` as context.
    pub fn expect_identifier(&mut self, message: &str) -> Result<Token, Error> {
        if self.current_token_kind() == TokenKind::Identifier {
            return Ok(self.advance());
        }

        Err(self.unexpected_detailed(message))
    }

    /// `UnexpectedToken` error at the current token.
    pub fn unexpected(&self) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.to_string(),
            },
            token.span,
        )
    }

    /// `UnexpectedTokenDetailed` error at the current token.
    pub fn unexpected_detailed(&self, message: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.to_string(),
                message: String::from(message),
            },
            token.span,
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// End offset of the last consumed token, or 0 before the first.
    pub fn previous_end(&self) -> usize {
        match self.pos {
            0 => 0,
            pos => self.tokens[pos - 1].span.end,
        }
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.previous_end().max(start))
    }

    /// Offset of the end of the physical line containing `offset`.
    pub fn line_end(&self, offset: usize) -> usize {
        let index = self.line_breaks.partition_point(|&line_break| line_break < offset);
        self.line_breaks
            .get(index)
            .copied()
            .unwrap_or(self.source.len())
    }

    /// Source text covered by `span`.
    pub fn source_text(&self, span: Span) -> &str {
        self.source.get(span.start..span.end).unwrap_or("")
    }

    /// Runs `parse_fn` one nesting level deeper, failing once the configured depth
    /// is exceeded.
    pub fn nested<T>(
        &mut self,
        parse_fn: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= self.max_depth {
            return Err(Error::new(
                ErrorImpl::RecursionLimit {
                    limit: self.max_depth,
                },
                self.current_token().span,
            ));
        }

        self.depth += 1;
        let result = parse_fn(self);
        self.depth -= 1;
        result
    }

    /// Runs `parse_fn` as the body of a `match` statement.
    pub fn in_match<T>(
        &mut self,
        parse_fn: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.match_depth += 1;
        let result = parse_fn(self);
        self.match_depth -= 1;
        result
    }

    pub fn record_error(&mut self, error: Error) {
        tracing::debug!(error = %error, start = error.get_span().start, "recovered syntax error");
        self.errors.push(ParseError::from(error));
    }

    pub fn record_parse_error(&mut self, error: ParseError) {
        tracing::debug!(error = %error.message, start = error.start(), "recovered syntax error");
        self.errors.push(error);
    }

    /// Panic-mode resynchronization after an error in a statement that began at token
    /// index `start_pos`.
    ///
    /// Skips until a `;` (consumed), a `{` or `}` (left in place), a token that starts
    /// a statement (left in place), or EOF. Inside `match` bodies `case` and `default`
    /// also stop the scan. At least one token is always consumed.
    pub fn skip_to_next_statement(&mut self, start_pos: usize) {
        if self.pos == start_pos {
            let skipped = self.advance();
            if skipped.is(";") {
                return;
            }
        }

        while self.has_tokens() {
            let token = self.current_token();

            if token.is(";") {
                self.advance();
                return;
            }

            if token.is_one_of_many(&["{", "}"]) || token.starts_statement() {
                return;
            }

            if self.match_depth > 0 && token.is_one_of_many(&["case", "default"]) {
                return;
            }

            self.advance();
        }
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `key` - The token lookup key to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, key: &'static str, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(key, binding_power);
        self.led_lookup.insert(key, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, key: &'static str, nud_fn: NUDHandler) {
        self.nud_lookup.insert(key, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, key: &'static str, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(key, stmt_fn);
    }
}

/// Parses `source` with the default configuration.
pub fn parse(source: &str) -> Result<ParseResult, Error> {
    parse_with_config(source, &FrontendConfig::default())
}

/// Parses `source` into a [`Program`].
///
/// Recoverable syntax errors are collected in [`ParseResult::errors`]. `Err` is
/// returned for lexical errors, malformed function/class/for headers and nesting
/// beyond `config.max_nesting_depth`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_with_config(source: &str, config: &FrontendConfig) -> Result<ParseResult, Error> {
    let tokens = tokenize_with_config(source, config)?;

    let mut parser = Parser::new(tokens, source, config);
    create_token_lookups(&mut parser);

    let mut statements = vec![];

    while parser.has_tokens() {
        if let Some(stmt) = parse_stmt_recovering(&mut parser)? {
            statements.push(stmt);
        }
    }

    tracing::debug!(
        statements = statements.len(),
        errors = parser.errors.len(),
        "parsed program"
    );

    Ok(ParseResult {
        program: Program {
            statements,
            span: Span::new(0, source.len()),
        },
        errors: parser.errors,
    })
}
