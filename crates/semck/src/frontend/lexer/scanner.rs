//! Lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{CheckError, CheckResult, Span};
use logos::Logos;

/// Lexer over a source string, with one token of lookahead
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    peeked: Option<Token>,
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            peeked: None,
            at_eof: false,
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> CheckResult<Token> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }

        if self.at_eof {
            let len = self.inner.source().len();
            return Ok(Token::new(TokenKind::Eof, Span::new(len, len)));
        }

        match self.inner.next() {
            Some(Ok(kind)) => Ok(Token::new(kind, self.inner.span().into())),
            Some(Err(())) => Err(CheckError::lexer(
                format!("unexpected character '{}'", self.inner.slice()),
                self.inner.span().into(),
            )),
            None => {
                self.at_eof = true;
                let len = self.inner.source().len();
                Ok(Token::new(TokenKind::Eof, Span::new(len, len)))
            }
        }
    }

    /// Peek at the next token without consuming it
    pub fn peek(&mut self) -> CheckResult<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.next_token()?,
        };
        Ok(&*self.peeked.insert(token))
    }

    /// Tokenize the entire source and return all tokens, ending with `Eof`
    pub fn tokenize_all(mut self) -> CheckResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        let source = "int bool float list if else while do true false";
        let mut lexer = Lexer::new(source);

        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Int));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Bool));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Float));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::List));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::If));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Else));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::While));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Do));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::True));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::False));
    }

    #[test]
    fn test_identifiers_are_not_keywords() {
        let mut lexer = Lexer::new("integer lists _x do2");

        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::Identifier(s) if s == "integer"
        ));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::Identifier(s) if s == "lists"
        ));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::Identifier(s) if s == "_x"
        ));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::Identifier(s) if s == "do2"
        ));
    }

    #[test]
    fn test_numeric_literals() {
        let mut lexer = Lexer::new("42 3.14 1.0e5 7");

        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::IntLiteral(s) if s == "42"
        ));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::RealLiteral(s) if s == "3.14"
        ));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::RealLiteral(s) if s == "1.0e5"
        ));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::IntLiteral(s) if s == "7"
        ));
    }

    #[test]
    fn test_operators() {
        let source = "+ - * / % == != < > <= >= && || ! = ? :";
        let mut lexer = Lexer::new(source);

        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Plus));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Minus));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Star));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Slash));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Percent));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::EqEq));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::NotEq));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Lt));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Gt));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::LtEq));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::GtEq));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::AmpAmp));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::PipePipe));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Bang));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Eq));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Question));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Colon));
    }

    #[test]
    fn test_comments() {
        let source = "int // line comment\nx /* block */ ;";
        let mut lexer = Lexer::new(source);

        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Int));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::Identifier(s) if s == "x"
        ));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Semi));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Eof));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("a = 1;");

        assert!(matches!(&lexer.peek().unwrap().kind, TokenKind::Identifier(s) if s == "a"));
        assert!(matches!(&lexer.peek().unwrap().kind, TokenKind::Identifier(s) if s == "a"));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Identifier(_)));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Eq));
    }

    #[test]
    fn test_spans() {
        let tokens = Lexer::new("bool b;").tokenize_all().unwrap();

        assert_eq!(tokens[0].span, Span::new(0, 4));
        assert_eq!(tokens[1].span, Span::new(5, 6));
        assert_eq!(tokens[2].span, Span::new(6, 7));
        assert_eq!(tokens[3].span, Span::new(7, 7));
    }

    #[test]
    fn test_unexpected_character() {
        let mut lexer = Lexer::new("int a = 1 # 2;");
        let err = loop {
            match lexer.next_token() {
                Ok(token) if token.kind == TokenKind::Eof => panic!("expected a lexer error"),
                Ok(_) => {}
                Err(e) => break e,
            }
        };

        assert!(matches!(err, CheckError::Lexer { span, .. } if span == Span::new(10, 11)));
    }
}
