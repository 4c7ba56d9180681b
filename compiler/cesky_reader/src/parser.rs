//! Recursive-descent datum parser.

use crate::lexer::{Lexer, TokenKind};
use crate::{ReadError, ReadErrorKind, Spanned};
use cesky_ir::{ensure_sufficient_stack, keywords, Span, Symbol};
use cesky_value::Value;

/// What the next token sequence amounts to, from a list's point of view.
enum Item {
    Datum(Value, Span),
    Close(char, Span),
    Dot(Span),
    Eof(Span),
}

/// Pull parser yielding one top-level form at a time.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
}

impl<'src> Parser<'src> {
    pub fn new(src: &'src str) -> Self {
        Self::starting_at(src, 0)
    }

    /// Parse from byte offset `start`.
    pub fn starting_at(src: &'src str, start: usize) -> Self {
        Parser {
            lexer: Lexer::new(src, start),
        }
    }

    /// The next top-level form, or `None` at end of input.
    pub fn next_form(&mut self) -> Result<Option<Spanned<Value>>, ReadError> {
        match self.next_item()? {
            Item::Datum(value, span) => Ok(Some(Spanned { value, span })),
            Item::Eof(_) => Ok(None),
            Item::Close(c, span) => Err(ReadError::new(ReadErrorKind::UnexpectedClose(c), span)),
            Item::Dot(span) => Err(ReadError::new(ReadErrorKind::BadDot, span)),
        }
    }

    fn next_item(&mut self) -> Result<Item, ReadError> {
        loop {
            let token = self.lexer.next_token()?;
            let span = token.span;
            let value = match token.kind {
                TokenKind::DatumComment => {
                    self.datum()?;
                    continue;
                }
                TokenKind::Open(open) => return self.list(open, span),
                TokenKind::Close(c) => return Ok(Item::Close(c, span)),
                TokenKind::Dot => return Ok(Item::Dot(span)),
                TokenKind::Eof => return Ok(Item::Eof(span)),
                TokenKind::Quote => return self.abbreviation(keywords::QUOTE, span),
                TokenKind::Quasiquote => return self.abbreviation(keywords::QUASIQUOTE, span),
                TokenKind::Unquote => return self.abbreviation(keywords::UNQUOTE, span),
                TokenKind::UnquoteSplicing => {
                    return self.abbreviation(keywords::UNQUOTE_SPLICING, span)
                }
                TokenKind::Bool(b) => Value::Bool(b),
                TokenKind::Number(n) => Value::Number(n),
                TokenKind::Str(s) => Value::string(&s),
                TokenKind::Symbol(name) => Value::Symbol(Symbol::intern(&name)),
            };
            return Ok(Item::Datum(value, span));
        }
    }

    /// A complete datum; closers, dots and end of input are errors here.
    fn datum(&mut self) -> Result<(Value, Span), ReadError> {
        match self.next_item()? {
            Item::Datum(value, span) => Ok((value, span)),
            Item::Close(c, span) => Err(ReadError::new(ReadErrorKind::UnexpectedClose(c), span)),
            Item::Dot(span) => Err(ReadError::new(ReadErrorKind::BadDot, span)),
            Item::Eof(span) => Err(ReadError::new(ReadErrorKind::UnexpectedEof, span)),
        }
    }

    fn abbreviation(&mut self, head: Symbol, start: Span) -> Result<Item, ReadError> {
        ensure_sufficient_stack(|| {
            let (value, span) = self.datum()?;
            let form = Value::list([Value::Symbol(head), value]);
            Ok(Item::Datum(form, Span::new(start.start, span.end)))
        })
    }

    fn list(&mut self, open: char, start: Span) -> Result<Item, ReadError> {
        let close = if open == '[' { ']' } else { ')' };
        ensure_sufficient_stack(|| {
            let mut items = Vec::new();
            loop {
                match self.next_item()? {
                    Item::Datum(value, _) => items.push(value),
                    Item::Close(found, span) => {
                        check_close(close, found, span)?;
                        let whole = Span::new(start.start, span.end);
                        return Ok(Item::Datum(Value::list(items), whole));
                    }
                    Item::Dot(span) => {
                        if items.is_empty() {
                            return Err(ReadError::new(ReadErrorKind::BadDot, span));
                        }
                        let (tail, _) = self.datum()?;
                        return match self.next_item()? {
                            Item::Close(found, end) => {
                                check_close(close, found, end)?;
                                let whole = Span::new(start.start, end.end);
                                Ok(Item::Datum(Value::list_with_tail(items, tail), whole))
                            }
                            Item::Eof(end) => {
                                Err(ReadError::new(ReadErrorKind::UnexpectedEof, end))
                            }
                            Item::Datum(_, span) | Item::Dot(span) => {
                                Err(ReadError::new(ReadErrorKind::BadDot, span))
                            }
                        };
                    }
                    Item::Eof(_) => {
                        return Err(ReadError::new(ReadErrorKind::UnexpectedEof, start));
                    }
                }
            }
        })
    }
}

fn check_close(expected: char, found: char, span: Span) -> Result<(), ReadError> {
    if expected == found {
        Ok(())
    } else {
        Err(ReadError::new(
            ReadErrorKind::MismatchedClose { expected, found },
            span,
        ))
    }
}
