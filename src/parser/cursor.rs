//! One-token lookahead over the lexer.

use std::mem;

use crate::error::{MapError, Result};

use super::lexer::{Lexer, Token, TokenKind};
use super::span::Span;

pub(super) struct Cursor<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token<'a>>,
    last_span: Span,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            peeked: None,
            last_span: Span::default(),
        }
    }

    fn pull(&mut self) -> Result<Token<'a>> {
        let token = match self.lexer.next() {
            Some(token) => token?,
            None => Token {
                kind: TokenKind::Eof,
                span: Span::new(self.last_span.end, self.last_span.end),
            },
        };
        self.last_span = token.span;
        Ok(token)
    }

    pub fn peek(&mut self) -> Result<&Token<'a>> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.pull()?,
        };
        Ok(self.peeked.insert(token))
    }

    pub fn next(&mut self) -> Result<Token<'a>> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.pull(),
        }
    }

    /// Consume the next token if it is the same kind of punctuation as `kind`.
    pub fn eat(&mut self, kind: &TokenKind<'_>) -> Result<bool> {
        if mem::discriminant(&self.peek()?.kind) == mem::discriminant(kind) {
            self.next()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Consume punctuation `kind` or fail with a grammar error.
    pub fn expect(&mut self, kind: &TokenKind<'_>) -> Result<Token<'a>> {
        let token = self.next()?;
        if mem::discriminant(&token.kind) == mem::discriminant(kind) {
            Ok(token)
        } else {
            Err(unexpected(&token, &kind.to_string()))
        }
    }
}

/// Grammar error for a token that does not fit.
pub(super) fn unexpected(token: &Token<'_>, expected: &str) -> MapError {
    MapError::malformed(
        token.span.line(),
        format!("expected {}, found {}", expected, token.kind),
    )
}
