//! Textual rendering of values.
//!
//! Three modes, as used by `~a`, `~s` and `~v`:
//! - [`PrintMode::Display`]: strings are emitted raw
//! - [`PrintMode::Write`]: strings are quoted and escaped
//! - [`PrintMode::Print`]: like `Write`, with a leading `'` on symbols and
//!   lists so that the output reads back as an expression
//!
//! Lists are walked iteratively along the `cdr`; only `car` nesting recurses.

use crate::Value;
use cesky_ir::ensure_sufficient_stack;
use std::fmt::{self, Write as _};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PrintMode {
    Display,
    Write,
    Print,
}

/// Render `value` in `mode`.
pub fn format_value(value: &Value, mode: PrintMode) -> String {
    let mut out = String::new();
    render(&mut out, value, mode);
    out
}

/// Render in [`PrintMode::Display`].
pub fn display_string(value: &Value) -> String {
    format_value(value, PrintMode::Display)
}

/// Render in [`PrintMode::Write`].
pub fn write_string(value: &Value) -> String {
    format_value(value, PrintMode::Write)
}

/// Render in [`PrintMode::Print`].
pub fn print_string(value: &Value) -> String {
    format_value(value, PrintMode::Print)
}

/// Append the rendering of `value` to `out`.
pub fn render(out: &mut String, value: &Value, mode: PrintMode) {
    if mode == PrintMode::Print {
        if matches!(value, Value::Symbol(_) | Value::Pair(_) | Value::Null) {
            out.push('\'');
        }
        datum(out, value, PrintMode::Write);
    } else {
        datum(out, value, mode);
    }
}

fn datum(out: &mut String, value: &Value, mode: PrintMode) {
    match value {
        Value::Null => out.push_str("()"),
        Value::Void => out.push_str("#<void>"),
        Value::Undefined => out.push_str("#<undefined>"),
        Value::Eof => out.push_str("#<eof>"),
        Value::Bool(true) => out.push_str("#t"),
        Value::Bool(false) => out.push_str("#f"),
        Value::Number(n) => number(out, *n),
        Value::Str(s) => {
            if mode == PrintMode::Display {
                out.push_str(s);
            } else {
                quoted(out, s);
            }
        }
        Value::Symbol(sym) => {
            let name = sym.name();
            if name.is_empty() && mode != PrintMode::Display {
                out.push_str("||");
            } else {
                out.push_str(name);
            }
        }
        Value::Pair(_) => list(out, value, mode),
        Value::Closure(closure) => match &closure.name {
            Some(name) => {
                let _ = write!(out, "#<procedure:{name}>");
            }
            None => out.push_str("#<procedure>"),
        },
        Value::Primitive(prim) => {
            let _ = write!(out, "#<procedure:{}>", prim.name);
        }
        Value::MetaOp(op) => {
            let _ = write!(out, "#<procedure:{}>", op.name());
        }
        Value::Continuation(_) => out.push_str("#<continuation>"),
        Value::Hash(_) => out.push_str("#<hash>"),
        Value::Variable(var) => {
            out.push_str("#<variable:");
            datum(out, &var.name, PrintMode::Display);
            out.push('>');
        }
        Value::Opaque(_) => out.push_str("#<opaque>"),
        Value::Handle(handle) => {
            let _ = write!(out, "#<handle:{}>", handle.name());
        }
    }
}

fn list(out: &mut String, value: &Value, mode: PrintMode) {
    out.push('(');
    let mut items = value.iter_list();
    let mut first = true;
    for item in items.by_ref() {
        if !first {
            out.push(' ');
        }
        first = false;
        ensure_sufficient_stack(|| datum(out, &item, mode));
    }
    let tail = items.rest();
    if !tail.is_null() {
        out.push_str(" . ");
        ensure_sufficient_stack(|| datum(out, tail, mode));
    }
    out.push(')');
}

fn number(out: &mut String, n: f64) {
    if n.is_nan() {
        out.push_str("+nan.0");
    } else if n.is_infinite() {
        out.push_str(if n > 0.0 { "+inf.0" } else { "-inf.0" });
    } else {
        let _ = write!(out, "{n}");
    }
}

fn quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

impl fmt::Display for Value {
    /// Renders in [`PrintMode::Print`], the form used in error reports and
    /// at the REPL.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_string(self))
    }
}
