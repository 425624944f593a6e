use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    config::FrontendConfig,
    errors::errors::{Error, ErrorImpl},
    Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, KEYWORDS};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"^\s+").unwrap();
    static ref LINE_COMMENT: Regex = Regex::new(r"^//[^\n]*").unwrap();
    // An unterminated block comment runs to the end of the input
    static ref BLOCK_COMMENT: Regex = Regex::new(r"(?s)^/\*.*?(?:\*/|\z)").unwrap();
    static ref DOUBLE_QUOTED: Regex = Regex::new(r#"(?s)^"(?:[^"\\]|\\.)*""#).unwrap();
    static ref SINGLE_QUOTED: Regex = Regex::new(r"(?s)^'(?:[^'\\]|\\.)*'").unwrap();
    static ref OPEN_QUOTE: Regex = Regex::new(r#"^["']"#).unwrap();
    static ref SIGNED_NUMBER: Regex = Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?").unwrap();
    static ref NUMBER: Regex = Regex::new(r"^[0-9]+(?:\.[0-9]+)?").unwrap();
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*").unwrap();
    static ref LOGICAL: Regex = Regex::new(r"^(?:&&|\|\|)").unwrap();
    static ref OPERATOR: Regex = Regex::new(r"^(?:==|!=|>=|<=|=>)").unwrap();
    static ref SYMBOL: Regex = Regex::new(r"(?s)^.").unwrap();
}

pub type RegexHandler = fn(&mut Lexer, &str) -> Result<(), Error>;

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

/// Cursor over the source text plus the tokens produced so far.
///
/// Patterns are tried in order at the cursor; the first one that matches consumes
/// its text through its handler.
pub struct Lexer<'a> {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, config: &FrontendConfig) -> Lexer<'a> {
        let number = if config.fold_negative_literals {
            SIGNED_NUMBER.clone()
        } else {
            NUMBER.clone()
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            patterns: vec![
                RegexPattern { regex: WHITESPACE.clone(), handler: skip_handler },
                RegexPattern { regex: LINE_COMMENT.clone(), handler: skip_handler },
                RegexPattern { regex: BLOCK_COMMENT.clone(), handler: skip_handler },
                RegexPattern { regex: DOUBLE_QUOTED.clone(), handler: string_handler },
                RegexPattern { regex: SINGLE_QUOTED.clone(), handler: string_handler },
                RegexPattern { regex: OPEN_QUOTE.clone(), handler: unterminated_string_handler },
                RegexPattern { regex: number, handler: MK_DEFAULT_HANDLER!(TokenKind::Number) },
                RegexPattern { regex: IDENTIFIER.clone(), handler: symbol_handler },
                RegexPattern { regex: LOGICAL.clone(), handler: logical_handler },
                RegexPattern { regex: OPERATOR.clone(), handler: MK_DEFAULT_HANDLER!(TokenKind::Operator) },
                RegexPattern { regex: SYMBOL.clone(), handler: MK_DEFAULT_HANDLER!(TokenKind::Symbol) },
            ],
            source,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &'a str {
        let source: &'a str = self.source;
        &source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    lexer.advance_n(matched.len());
    Ok(())
}

/// Strings keep their escapes verbatim; the token value is the text between the quotes.
fn string_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let contents = &matched[1..matched.len() - 1];
    let span = Span::new(lexer.pos, lexer.pos + matched.len());

    lexer.push(MK_TOKEN!(TokenKind::String, String::from(contents), span));
    lexer.advance_n(matched.len());
    Ok(())
}

fn unterminated_string_handler(lexer: &mut Lexer, _matched: &str) -> Result<(), Error> {
    Err(Error::new(
        ErrorImpl::UnterminatedString { start: lexer.pos },
        Span::new(lexer.pos, lexer.source.len()),
    ))
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let span = Span::new(lexer.pos, lexer.pos + matched.len());

    if KEYWORDS.contains(matched) {
        lexer.push(MK_TOKEN!(TokenKind::Keyword, String::from(matched), span));
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Identifier, String::from(matched), span));
    }

    lexer.advance_n(matched.len());
    Ok(())
}

/// `&&` and `||` are spelled `and` and `or` from here on.
fn logical_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let value = if matched == "&&" { "and" } else { "or" };
    let span = Span::new(lexer.pos, lexer.pos + matched.len());

    lexer.push(MK_TOKEN!(TokenKind::Operator, String::from(value), span));
    lexer.advance_n(matched.len());
    Ok(())
}

/// Tokenizes `source` with the default configuration.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    tokenize_with_config(source, &FrontendConfig::default())
}

/// Tokenizes `source`, ending the stream with an EOF token at `source.len()`.
///
/// The only error is an unterminated string literal, which aborts tokenization.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize_with_config(source: &str, config: &FrontendConfig) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, config);
    let patterns = lex.patterns.clone();

    while !lex.at_eof() {
        let remainder = lex.remainder();
        let mut matched = false;

        for pattern in patterns.iter() {
            if let Some(found) = pattern.regex.find(remainder) {
                (pattern.handler)(&mut lex, found.as_str())?;
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: remainder.chars().take(1).collect() },
                Span::new(lex.pos, lex.pos + 1),
            ));
        }
    }

    let end = source.len();
    lex.push(MK_TOKEN!(TokenKind::EOF, String::new(), Span::new(end, end)));

    tracing::debug!(token_count = lex.tokens.len(), "tokenized source");
    Ok(lex.tokens)
}
