//! Lexer token types

use std::fmt;

/// Token kinds for the mapping language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Unquoted identifier, text taken verbatim.
    LiteralIdentifier(String),
    /// Quoted identifier. Holds the content between the delimiters with
    /// doubled delimiters still undecoded.
    QuotedIdentifier(String),

    // Delimiters
    Equals,
    Comma,
    LParen,
    RParen,

    // Special
    Eof,
    Error(String),
}

impl TokenKind {
    /// How the token reads in a diagnostic, e.g. `'='` or `'<EOF>'`.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::LiteralIdentifier(s) => format!("'{}'", s),
            TokenKind::QuotedIdentifier(s) => format!("'\"{}\"'", s),
            TokenKind::Equals => "'='".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Eof => "'<EOF>'".to_string(),
            TokenKind::Error(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Source location span. Line and column are 1-based; column counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            line: 1,
            column: 1,
        }
    }
}

/// A token with its kind and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}
