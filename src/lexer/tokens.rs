use lazy_static::lazy_static;
use serde::Serialize;
use std::{collections::HashSet, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref KEYWORDS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for keyword in [
            "var", "static", "if", "else", "elif", "while", "do", "for", "function", "class",
            "return", "throw", "match", "case", "default", "try", "catch", "finally", "retry",
            "break", "continue", "true", "false", "nil", "and", "or", "not",
        ] {
            set.insert(keyword);
        }
        for type_name in TYPE_KEYWORDS {
            set.insert(type_name);
        }
        set
    };
}

/// Keywords that name a declarable type.
pub const TYPE_KEYWORDS: [&str; 7] = ["int", "float", "string", "bool", "array", "object", "any"];

/// Keywords that begin a statement; panic-mode recovery stops in front of these.
pub const STATEMENT_KEYWORDS: [&str; 15] = [
    "var", "static", "if", "while", "do", "for", "function", "class", "return", "throw", "match",
    "try", "retry", "break", "continue",
];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum TokenKind {
    EOF,
    String,
    Number,
    Identifier,
    Keyword,
    /// Two-character operators and the `&&`/`||` spellings of `and`/`or`
    Operator,
    /// Any other single character
    Symbol,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "end of input"),
            TokenKind::String => write!(f, "\"{}\"", self.value),
            _ => write!(f, "{}", self.value),
        }
    }
}

impl Token {
    /// Whether this is the keyword, operator or symbol spelled `text`.
    ///
    /// Literal and identifier tokens never match, so the string `"("` is not `(`.
    pub fn is(&self, text: &str) -> bool {
        matches!(
            self.kind,
            TokenKind::Keyword | TokenKind::Operator | TokenKind::Symbol
        ) && self.value == text
    }

    pub fn is_one_of_many(&self, texts: &[&str]) -> bool {
        texts.iter().any(|text| self.is(text))
    }

    /// Key used by the parser's handler tables.
    ///
    /// Literal kinds share one key per kind; everything else is keyed by its text.
    pub fn lookup_key(&self) -> &str {
        match self.kind {
            TokenKind::EOF => "<eof>",
            TokenKind::String => "<string>",
            TokenKind::Number => "<number>",
            TokenKind::Identifier => "<identifier>",
            _ => &self.value,
        }
    }

    pub fn is_type_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword && TYPE_KEYWORDS.contains(&self.value.as_str())
    }

    pub fn starts_statement(&self) -> bool {
        self.kind == TokenKind::Keyword && STATEMENT_KEYWORDS.contains(&self.value.as_str())
    }

    pub fn debug(&self) -> String {
        format!(
            "{:>4}..{:<4} {:<10} {}",
            self.span.start,
            self.span.end,
            self.kind.to_string(),
            self.value
        )
    }
}
