//! Tokenizer.

use crate::{ReadError, ReadErrorKind};
use cesky_ir::Span;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TokenKind {
    /// `(` or `[`.
    Open(char),
    /// `)` or `]`.
    Close(char),
    Quote,
    Quasiquote,
    Unquote,
    UnquoteSplicing,
    /// `#;`
    DatumComment,
    Dot,
    Bool(bool),
    Number(f64),
    Str(String),
    Symbol(String),
    Eof,
}

#[derive(Clone, Debug)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Byte-offset cursor over the source text.
pub(crate) struct Lexer<'src> {
    src: &'src str,
    pos: usize,
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | '"' | ',' | '\'' | '`' | ';')
}

/// Numbers are an optional sign followed by digits with at most one `.`.
/// Everything else that is not a delimiter is a symbol.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    let mut digits = 0usize;
    let mut dots = 0usize;
    for b in body.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return None,
        }
    }
    if digits == 0 || dots > 1 {
        return None;
    }
    text.parse().ok()
}

impl<'src> Lexer<'src> {
    /// Start lexing at byte offset `start`, rounded down to a char boundary.
    pub fn new(src: &'src str, start: usize) -> Self {
        let mut pos = start.min(src.len());
        while !src.is_char_boundary(pos) {
            pos -= 1;
        }
        Lexer { src, pos }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::from_range(start..self.pos)
    }

    fn error(&self, kind: ReadErrorKind, start: usize) -> ReadError {
        ReadError::new(kind, self.span_from(start))
    }

    fn skip_atmosphere(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == ';' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token, ReadError> {
        self.skip_atmosphere();
        let start = self.pos;
        let Some(c) = self.bump() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span: self.span_from(start),
            });
        };
        let kind = match c {
            '(' | '[' => TokenKind::Open(c),
            ')' | ']' => TokenKind::Close(c),
            '\'' => TokenKind::Quote,
            '`' => TokenKind::Quasiquote,
            ',' => {
                if self.peek() == Some('@') {
                    self.bump();
                    TokenKind::UnquoteSplicing
                } else {
                    TokenKind::Unquote
                }
            }
            '"' => self.string(start)?,
            '#' => self.hash(start)?,
            '{' | '}' => return Err(self.error(ReadErrorKind::UnexpectedChar(c), start)),
            _ => self.atom(start),
        };
        Ok(Token {
            kind,
            span: self.span_from(start),
        })
    }

    fn string(&mut self, start: usize) -> Result<TokenKind, ReadError> {
        let mut text = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error(ReadErrorKind::UnterminatedString, start)),
                Some('"') => return Ok(TokenKind::Str(text)),
                Some('\\') => match self.bump() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('\\') => text.push('\\'),
                    Some('"') => text.push('"'),
                    Some(other) => {
                        return Err(self.error(ReadErrorKind::BadEscape(other), start));
                    }
                    None => return Err(self.error(ReadErrorKind::UnterminatedString, start)),
                },
                Some(c) => text.push(c),
            }
        }
    }

    fn hash(&mut self, start: usize) -> Result<TokenKind, ReadError> {
        if self.peek() == Some(';') {
            self.bump();
            return Ok(TokenKind::DatumComment);
        }
        let word_start = self.pos;
        while self.peek().is_some_and(|c| !is_delimiter(c)) {
            self.bump();
        }
        match &self.src[word_start..self.pos] {
            "t" | "true" => Ok(TokenKind::Bool(true)),
            "f" | "false" => Ok(TokenKind::Bool(false)),
            other => Err(self.error(ReadErrorKind::BadHash(other.to_string()), start)),
        }
    }

    fn atom(&mut self, start: usize) -> TokenKind {
        while self.peek().is_some_and(|c| !is_delimiter(c)) {
            self.bump();
        }
        let text = &self.src[start..self.pos];
        if text == "." {
            TokenKind::Dot
        } else if let Some(n) = parse_number(text) {
            TokenKind::Number(n)
        } else {
            TokenKind::Symbol(text.to_string())
        }
    }
}
