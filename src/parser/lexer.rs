//! Tokenizer for grid map source text.
//!
//! Produces a lazy stream of structural tokens. The lexer knows nothing about
//! which tokens may follow which; that is the parser's job. Whitespace
//! (newlines included) and `//` comments are skipped between tokens.

use std::fmt;
use std::iter::FusedIterator;

use thiserror::Error;

use super::span::{Location, Span};

/// The kind of a token, borrowing from the source where possible.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind<'a> {
    /// `"..."` contents as written, escapes validated but not decoded.
    QuotedString(&'a str),
    /// Raw contents of a `{" ... "}` grid block.
    BlockString(&'a str),
    /// `'...'` resource literal contents.
    Resource(&'a str),
    Identifier(&'a str),
    /// `/obj/foo/bar`
    Path(&'a str),
    /// Numeric literal, as spelled in the source.
    Number(&'a str),
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Equals,
    Eof,
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::QuotedString(s) => write!(f, "string \"{}\"", s),
            TokenKind::BlockString(_) => write!(f, "grid block"),
            TokenKind::Resource(r) => write!(f, "resource '{}'", r),
            TokenKind::Identifier(i) => write!(f, "identifier `{}`", i),
            TokenKind::Path(p) => write!(f, "path `{}`", p),
            TokenKind::Number(n) => write!(f, "number `{}`", n),
            TokenKind::LParen => write!(f, "`(`"),
            TokenKind::RParen => write!(f, "`)`"),
            TokenKind::LBrace => write!(f, "`{{`"),
            TokenKind::RBrace => write!(f, "`}}`"),
            TokenKind::Comma => write!(f, "`,`"),
            TokenKind::Semicolon => write!(f, "`;`"),
            TokenKind::Equals => write!(f, "`=`"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

/// A token with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub span: Span,
}

/// Why the lexer gave up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexErrorReason {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated resource literal")]
    UnterminatedResource,
    #[error("unterminated grid block (missing `\"}}`)")]
    UnterminatedBlock,
    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(char),
    #[error("unexpected control character {0:?}")]
    UnexpectedControl(char),
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),
}

/// A lexical error at a specific source location.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {}, column {}: {reason}", .location.line, .location.column)]
pub struct LexError {
    pub location: Location,
    pub reason: LexErrorReason,
}

impl LexError {
    /// Byte offset of the error in the source.
    pub fn offset(&self) -> usize {
        self.location.offset
    }
}

/// Lazy tokenizer over map source text.
///
/// Yields tokens up to and including a final [`TokenKind::Eof`], or stops
/// after the first error. Clone it (or call [`Lexer::restart`]) to scan the
/// same text again.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    loc: Location,
    done: bool,
}

/// Start tokenizing `source`.
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            loc: Location::start(),
            done: false,
        }
    }

    /// Rewind to the beginning of the source.
    pub fn restart(&mut self) {
        self.loc = Location::start();
        self.done = false;
    }

    fn rest(&self) -> &'a str {
        &self.source[self.loc.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.loc.advance(ch);
        Some(ch)
    }

    fn error(&self, location: Location, reason: LexErrorReason) -> LexError {
        LexError { location, reason }
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\r' | '\n' | '\u{feff}' => {
                    self.bump();
                }
                '/' if self.peek_second() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        self.skip_trivia();
        let start = self.loc;

        let Some(ch) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span: Span::new(start, start),
            });
        };

        let kind = match ch {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '}' => self.single(TokenKind::RBrace),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            '=' => self.single(TokenKind::Equals),
            '{' if self.peek_second() == Some('"') => self.block_string(start)?,
            '{' => self.single(TokenKind::LBrace),
            '"' => self.quoted_string(start)?,
            '\'' => self.resource(start)?,
            '/' => self.path(start)?,
            '-' | '.' | '0'..='9' => self.number(start)?,
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(start),
            c if c.is_control() => {
                return Err(self.error(start, LexErrorReason::UnexpectedControl(c)))
            }
            c => return Err(self.error(start, LexErrorReason::UnexpectedCharacter(c))),
        };

        Ok(Token {
            kind,
            span: Span::new(start, self.loc),
        })
    }

    fn single(&mut self, kind: TokenKind<'a>) -> TokenKind<'a> {
        self.bump();
        kind
    }

    fn quoted_string(&mut self, start: Location) -> Result<TokenKind<'a>, LexError> {
        self.bump();
        let content_start = self.loc.offset;

        loop {
            let here = self.loc;
            match self.bump() {
                None | Some('\n') => {
                    return Err(self.error(start, LexErrorReason::UnterminatedString))
                }
                Some('"') => break,
                Some('\\') => match self.peek() {
                    // Text macros like \improper or \[ are legal escapes too.
                    Some(c) if is_escape_char(c) => {
                        self.bump();
                    }
                    Some('\n') | None => {
                        return Err(self.error(start, LexErrorReason::UnterminatedString))
                    }
                    Some(c) => return Err(self.error(here, LexErrorReason::InvalidEscape(c))),
                },
                Some(c) if c.is_control() && c != '\t' => {
                    return Err(self.error(here, LexErrorReason::UnexpectedControl(c)))
                }
                Some(_) => {}
            }
        }

        let content_end = self.loc.offset - 1;
        Ok(TokenKind::QuotedString(&self.source[content_start..content_end]))
    }

    fn block_string(&mut self, start: Location) -> Result<TokenKind<'a>, LexError> {
        self.bump();
        self.bump();
        let content_start = self.loc.offset;

        let Some(len) = self.rest().find("\"}") else {
            return Err(self.error(start, LexErrorReason::UnterminatedBlock));
        };
        let content = &self.source[content_start..content_start + len];

        for c in content.chars() {
            if c.is_control() && !matches!(c, '\n' | '\r' | '\t') {
                return Err(self.error(self.loc, LexErrorReason::UnexpectedControl(c)));
            }
            self.loc.advance(c);
        }
        self.bump();
        self.bump();

        Ok(TokenKind::BlockString(content))
    }

    fn resource(&mut self, start: Location) -> Result<TokenKind<'a>, LexError> {
        self.bump();
        let content_start = self.loc.offset;

        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(self.error(start, LexErrorReason::UnterminatedResource))
                }
                Some('\'') => break,
                // `\'` does not close the literal.
                Some('\\') => {
                    self.bump();
                    if matches!(self.peek(), None | Some('\n')) {
                        return Err(self.error(start, LexErrorReason::UnterminatedResource));
                    }
                    self.bump();
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        let content = &self.source[content_start..self.loc.offset];
        self.bump();

        Ok(TokenKind::Resource(content))
    }

    fn path(&mut self, start: Location) -> Result<TokenKind<'a>, LexError> {
        while self.peek() == Some('/') && self.peek_second().is_some_and(is_ident_char) {
            self.bump();
            while self.peek().is_some_and(is_ident_char) {
                self.bump();
            }
        }

        if self.loc.offset == start.offset {
            return Err(self.error(start, LexErrorReason::UnexpectedCharacter('/')));
        }

        Ok(TokenKind::Path(&self.source[start.offset..self.loc.offset]))
    }

    fn number(&mut self, start: Location) -> Result<TokenKind<'a>, LexError> {
        if self.peek() == Some('-') {
            self.bump();
        }
        let mut digits = self.eat_digits();
        if self.peek() == Some('.') {
            self.bump();
            digits += self.eat_digits();
        }
        if digits == 0 {
            return Err(self.error(start, LexErrorReason::UnexpectedCharacter(
                self.source[start.offset..].chars().next().unwrap_or('-'),
            )));
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let mut lookahead = self.rest().chars().skip(1);
            let next = lookahead.next();
            let has_exponent = match next {
                Some('+' | '-') => lookahead.next().is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };
            if has_exponent {
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                self.eat_digits();
            }
        }

        Ok(TokenKind::Number(&self.source[start.offset..self.loc.offset]))
    }

    fn eat_digits(&mut self) -> usize {
        let mut count = 0;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            count += 1;
        }
        count
    }

    fn identifier(&mut self, start: Location) -> TokenKind<'a> {
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        TokenKind::Identifier(&self.source[start.offset..self.loc.offset])
    }
}

fn is_escape_char(c: char) -> bool {
    c.is_ascii_alphabetic() || "\"\\[]<>'".contains(c)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.next_token();
        if matches!(
            result,
            Err(_)
                | Ok(Token {
                    kind: TokenKind::Eof,
                    ..
                })
        ) {
            self.done = true;
        }
        Some(result)
    }
}

impl FusedIterator for Lexer<'_> {}
