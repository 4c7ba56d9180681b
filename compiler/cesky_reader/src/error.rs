//! Reader errors.

use cesky_ir::Span;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadErrorKind {
    /// Input ended inside a list, after a quote, or before any form.
    UnexpectedEof,
    UnexpectedClose(char),
    MismatchedClose { expected: char, found: char },
    /// `.` outside a list, at the start of a list, or not followed by
    /// exactly one datum and a closer.
    BadDot,
    UnterminatedString,
    BadEscape(char),
    /// `#` followed by something other than `t`, `f` or `;`.
    BadHash(String),
    UnexpectedChar(char),
    /// More than one form where exactly one was expected.
    TrailingInput,
}

impl fmt::Display for ReadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => f.write_str("unexpected end of input"),
            Self::UnexpectedClose(c) => write!(f, "unexpected `{c}`"),
            Self::MismatchedClose { expected, found } => {
                write!(f, "expected `{expected}` to close, found `{found}`")
            }
            Self::BadDot => f.write_str("misplaced `.`"),
            Self::UnterminatedString => f.write_str("unterminated string"),
            Self::BadEscape(c) => write!(f, "unknown escape `\\{c}` in string"),
            Self::BadHash(text) => write!(f, "bad syntax `#{text}`"),
            Self::UnexpectedChar(c) => write!(f, "unexpected character `{c}`"),
            Self::TrailingInput => f.write_str("expected a single form"),
        }
    }
}

/// A read failure and where it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadError {
    pub kind: ReadErrorKind,
    pub span: Span,
}

impl ReadError {
    pub fn new(kind: ReadErrorKind, span: Span) -> Self {
        ReadError { kind, span }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.kind, self.span.start)
    }
}

impl std::error::Error for ReadError {}
