//! Reader: text to [`Value`] data.
//!
//! The reader produces ordinary values (pairs, symbols, numbers, strings,
//! booleans). Each top-level form comes with the byte span it was read from;
//! the evaluator ignores spans, the driver uses them for error locations.
//!
//! Grammar summary:
//! - `( ... )` and `[ ... ]` lists, with `.` for a dotted tail
//! - `'x`, `` `x ``, `,x`, `,@x` expand to `(quote x)`, `(quasiquote x)`,
//!   `(unquote x)`, `(unquote-splicing x)`
//! - `#t`, `#f`, `#true`, `#false`
//! - numbers: optional sign, digits, at most one decimal point
//! - strings with `\n`, `\t`, `\\` and `\"` escapes
//! - `;` line comments and `#;` datum comments

mod error;
mod lexer;
mod parser;

pub use error::{ReadError, ReadErrorKind};
pub use parser::Parser;

use cesky_ir::Span;
use cesky_value::Value;

/// A value paired with the source range it was read from.
#[derive(Clone, Debug)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

/// Read every top-level form in `src`.
pub fn read_all(src: &str) -> Result<Vec<Spanned<Value>>, ReadError> {
    let mut parser = Parser::new(src);
    let mut forms = Vec::new();
    while let Some(form) = parser.next_form()? {
        forms.push(form);
    }
    Ok(forms)
}

/// Read every top-level form in `src`, dropping spans.
pub fn read_values(src: &str) -> Result<Vec<Value>, ReadError> {
    Ok(read_all(src)?.into_iter().map(|form| form.value).collect())
}

/// Read exactly one form.
pub fn read_one(src: &str) -> Result<Value, ReadError> {
    let mut parser = Parser::new(src);
    let Some(form) = parser.next_form()? else {
        return Err(ReadError::new(
            ReadErrorKind::UnexpectedEof,
            Span::from_range(src.len()..src.len()),
        ));
    };
    if let Some(extra) = parser.next_form()? {
        return Err(ReadError::new(ReadErrorKind::TrailingInput, extra.span));
    }
    Ok(form.value)
}
