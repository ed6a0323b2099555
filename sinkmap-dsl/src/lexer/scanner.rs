//! Lexer implementation

use super::token::*;
use sinkmap_core::QUOTE;
use std::iter::Peekable;
use std::str::CharIndices;

/// Lexer for mapping text.
///
/// Yields tokens lazily and ends with exactly one `Eof` token.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    column: usize,
    pos: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
            column: 1,
            pos: 0,
            finished: false,
        }
    }

    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Get the next token from the source.
    fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start_pos = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some(c) => match c {
                '=' => {
                    self.advance();
                    TokenKind::Equals
                }
                ',' => {
                    self.advance();
                    TokenKind::Comma
                }
                '(' => {
                    self.advance();
                    TokenKind::LParen
                }
                ')' => {
                    self.advance();
                    TokenKind::RParen
                }
                QUOTE => self.scan_quoted(),
                c if is_literal_char(c) => self.scan_literal(),
                c => {
                    self.advance();
                    TokenKind::Error(format!("token recognition error at: '{}'", c))
                }
            },
        };

        Token {
            kind,
            span: Span {
                start: start_pos,
                end: self.pos,
                line: start_line,
                column: start_col,
            },
        }
    }

    /// Scan an unquoted identifier.
    fn scan_literal(&mut self) -> TokenKind {
        let start = self.pos;

        while let Some(c) = self.peek_char() {
            if is_literal_char(c) {
                self.advance();
            } else {
                break;
            }
        }

        TokenKind::LiteralIdentifier(self.source[start..self.pos].to_string())
    }

    /// Scan a quoted identifier. A doubled delimiter stays in the token text.
    fn scan_quoted(&mut self) -> TokenKind {
        let start = self.pos;
        self.advance(); // opening quote
        let inner_start = self.pos;

        loop {
            match self.peek_char() {
                None => {
                    return TokenKind::Error(format!(
                        "token recognition error at: '{}'",
                        &self.source[start..self.pos]
                    ))
                }
                Some(QUOTE) => {
                    let inner_end = self.pos;
                    self.advance();
                    if self.peek_char() == Some(QUOTE) {
                        self.advance();
                    } else {
                        return TokenKind::QuotedIdentifier(
                            self.source[inner_start..inner_end].to_string(),
                        );
                    }
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if !is_whitespace(c) {
                break;
            }
            self.advance();
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((i, c)) = self.chars.next() {
            self.pos = i + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

/// Characters allowed in an unquoted identifier.
pub fn is_literal_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-')
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_entry() {
        assert_eq!(
            kinds("c1=value.f1"),
            vec![
                TokenKind::LiteralIdentifier("c1".into()),
                TokenKind::Equals,
                TokenKind::LiteralIdentifier("value.f1".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_whitespace_is_insignificant() {
        assert_eq!(kinds(" c1 =\tvalue.f1 ,\n c2=key "), kinds("c1=value.f1,c2=key"));
    }

    #[test]
    fn test_quoted_keeps_doubled_delimiter() {
        assert_eq!(
            kinds(r#""My""Col"=value"#),
            vec![
                TokenKind::QuotedIdentifier(r#"My""Col"#.into()),
                TokenKind::Equals,
                TokenKind::LiteralIdentifier("value".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_allows_separators_and_spaces() {
        assert_eq!(
            kinds(r#""a = b, c""#)[0],
            TokenKind::QuotedIdentifier("a = b, c".into())
        );
    }

    #[test]
    fn test_function_call_tokens() {
        assert_eq!(
            kinds("now()"),
            vec![
                TokenKind::LiteralIdentifier("now".into()),
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_quote() {
        let tokens = Lexer::new(r#"c1="abc"#).tokenize();
        let err = &tokens[2];
        assert_eq!(
            err.kind,
            TokenKind::Error(r#"token recognition error at: '"abc'"#.into())
        );
        assert_eq!(err.span.column, 4);
    }

    #[test]
    fn test_stray_symbol() {
        let tokens = Lexer::new("c1=$x").tokenize();
        assert_eq!(
            tokens[2].kind,
            TokenKind::Error("token recognition error at: '$'".into())
        );
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = Lexer::new("c1=value.f1,\n  c2=key").tokenize();
        let c2 = tokens
            .iter()
            .find(|t| t.kind == TokenKind::LiteralIdentifier("c2".into()))
            .unwrap();
        assert_eq!((c2.span.line, c2.span.column), (2, 3));
    }

    #[test]
    fn test_empty_input_is_single_eof() {
        assert_eq!(kinds("   "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let mut lexer = Lexer::new("a");
        assert!(lexer.next().is_some());
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Eof));
        assert!(lexer.next().is_none());
    }
}
