//! Parser implementation

use super::ast::*;
use crate::lexer::*;

/// Recursive-descent parser for
///
/// ```text
/// mapping := entry (',' entry)* EOF
/// entry   := column '=' field
/// column  := LITERAL | QUOTED
/// field   := LITERAL | QUOTED | LITERAL '(' ')'
/// ```
///
/// Stops at the first lexical or syntax error.
pub struct Parser<I: Iterator<Item = Token>> {
    tokens: I,
    current: Token,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Create a new parser over a token stream.
    pub fn new(tokens: impl IntoIterator<Item = Token, IntoIter = I>) -> Self {
        let mut tokens = tokens.into_iter();
        let current = tokens.next().unwrap_or_else(|| Token {
            kind: TokenKind::Eof,
            span: Span::default(),
        });
        Self { tokens, current }
    }

    /// Parse the whole token stream into a MappingAst.
    pub fn parse(&mut self) -> Result<MappingAst, ParseError> {
        let mut entries = vec![self.parse_entry()?];

        loop {
            match &self.current.kind {
                TokenKind::Comma => {
                    self.advance();
                    entries.push(self.parse_entry()?);
                }
                TokenKind::Eof => break,
                _ => return Err(self.extraneous()),
            }
        }

        Ok(MappingAst { entries })
    }

    /// Parse `column '=' field`.
    fn parse_entry(&mut self) -> Result<EntryNode, ParseError> {
        let start = self.current.span;
        let column = self.expect_identifier("column")?;

        if !self.check(&TokenKind::Equals) {
            return Err(self.missing("'='"));
        }
        self.advance();

        let field = self.parse_field()?;
        let end = field.span();

        Ok(EntryNode {
            column,
            field,
            span: Span {
                start: start.start,
                end: end.end,
                line: start.line,
                column: start.column,
            },
        })
    }

    /// Parse a field reference, which may be a zero-argument function call.
    fn parse_field(&mut self) -> Result<FieldNode, ParseError> {
        let ident = self.expect_identifier("field")?;

        if !self.check(&TokenKind::LParen) {
            return Ok(FieldNode::Identifier(ident));
        }

        match ident {
            IdentifierNode::Literal { text, span } => {
                self.advance();
                if !self.check(&TokenKind::RParen) {
                    return Err(self.mismatched("')'"));
                }
                let end = self.current.span.end;
                self.advance();
                Ok(FieldNode::Function {
                    name: text,
                    span: Span { end, ..span },
                })
            }
            quoted @ IdentifierNode::Quoted { .. } => Ok(FieldNode::Identifier(quoted)),
        }
    }

    fn expect_identifier(&mut self, role: &str) -> Result<IdentifierNode, ParseError> {
        let span = self.current.span;
        let node = match &self.current.kind {
            TokenKind::LiteralIdentifier(text) => IdentifierNode::Literal {
                text: text.clone(),
                span,
            },
            TokenKind::QuotedIdentifier(inner) => IdentifierNode::Quoted {
                inner: inner.clone(),
                span,
            },
            _ => return Err(self.mismatched(role)),
        };
        self.advance();
        Ok(node)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn advance(&mut self) {
        if self.current.kind == TokenKind::Eof {
            return;
        }
        let last = self.current.span;
        self.current = self.tokens.next().unwrap_or(Token {
            kind: TokenKind::Eof,
            span: Span {
                start: last.end,
                end: last.end,
                ..last
            },
        });
    }

    fn mismatched(&self, expecting: &str) -> ParseError {
        self.error_at_current(|found| format!("mismatched input {} expecting {}", found, expecting))
    }

    fn missing(&self, what: &str) -> ParseError {
        self.error_at_current(|found| format!("missing {} at {}", what, found))
    }

    fn extraneous(&self) -> ParseError {
        self.error_at_current(|found| format!("extraneous input {} expecting {{',', <EOF>}}", found))
    }

    /// Lexer errors take precedence over the grammar message.
    fn error_at_current(&self, message: impl FnOnce(&str) -> String) -> ParseError {
        match &self.current.kind {
            TokenKind::Error(msg) => self.error(msg),
            kind => self.error(&message(&kind.describe())),
        }
    }

    fn error(&self, msg: &str) -> ParseError {
        let span = self.current.span;
        ParseError {
            message: msg.to_string(),
            line: span.line,
            column: span.column,
        }
    }
}

/// Tokenize and parse mapping text.
pub fn parse(source: &str) -> Result<MappingAst, ParseError> {
    Parser::new(Lexer::new(source)).parse()
}
