//! Formatting, errors, output handles and reading from strings.

use super::{args, PrimContext, PrimitiveDef};
use cesky_reader::Parser;
use cesky_value::errors::{arg_error, index_out_of_range, read_error, type_error, user_error};
use cesky_value::printer::{format_value, PrintMode};
use cesky_value::{ArityMask, EvalResult, HandleKind, Value};

pub(super) const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef::new("~v", ArityMask::ANY, tilde_v),
    PrimitiveDef::new("~a", ArityMask::ANY, tilde_a),
    PrimitiveDef::new("~s", ArityMask::ANY, tilde_s),
    PrimitiveDef::new("error", ArityMask::ANY, error),
    PrimitiveDef::new("alert", ArityMask::ANY, alert),
    PrimitiveDef::new("arg-error", ArityMask::exactly(3), arg_error_prim),
    PrimitiveDef::new("fd-open-output", ArityMask::exactly(1), fd_open_output),
    PrimitiveDef::new("fd-write", ArityMask::exactly(2), fd_write),
    PrimitiveDef::new("string-read", ArityMask::between(1, 3), string_read),
];

fn join(values: &[Value], mode: PrintMode, sep: &str) -> String {
    let mut out = String::new();
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(&format_value(v, mode));
    }
    out
}

fn tilde_v(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::string(&join(a, PrintMode::Print, " ")))
}

fn tilde_a(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::string(&join(a, PrintMode::Display, "")))
}

fn tilde_s(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::string(&join(a, PrintMode::Write, " ")))
}

/// Message shared by `error` and `alert`: a leading string is displayed,
/// the remaining values follow after `": "` in print mode.
fn message(a: &[Value]) -> String {
    match a.split_first() {
        Some((Value::Str(head), [])) => head.to_string(),
        Some((Value::Str(head), rest)) => {
            format!("{head}: {}", join(rest, PrintMode::Print, " "))
        }
        _ => join(a, PrintMode::Print, " "),
    }
}

fn error(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Err(user_error(message(a)))
}

fn alert(ctx: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    ctx.print.write_line(HandleKind::Stdout, &message(a));
    Ok(Value::Void)
}

/// `(arg-error who what value)`
fn arg_error_prim(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let who = args::symbol("arg-error", &a[0])?;
    let what = args::string("arg-error", &a[1])?;
    Err(arg_error(who.name(), what, &a[2]))
}

/// Only the standard streams are available: `'stdout` or `'stderr`.
fn fd_open_output(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    match a[0].as_symbol().map(|s| s.name()) {
        Some("stdout") => Ok(Value::handle(HandleKind::Stdout)),
        Some("stderr") => Ok(Value::handle(HandleKind::Stderr)),
        _ => Err(type_error("fd-open-output", "'stdout or 'stderr", &a[0])),
    }
}

fn fd_write(ctx: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let Value::Handle(handle) = &a[0] else {
        return Err(type_error("fd-write", "an output handle", &a[0]));
    };
    let text = args::string("fd-write", &a[1])?;
    ctx.print.write(handle.kind, text);
    Ok(Value::Void)
}

/// `(string-read str [start])`: every form in `str` from character
/// position `start`, as a list. A third argument naming the source is
/// accepted and ignored.
fn string_read(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let src = args::string("string-read", &a[0])?;
    let start = match a.get(1) {
        Some(v) => {
            let chars = args::index("string-read", v)?;
            match src.char_indices().nth(chars) {
                Some((byte, _)) => byte,
                None if chars == src.chars().count() => src.len(),
                None => return Err(index_out_of_range("string-read", v)),
            }
        }
        None => 0,
    };
    let mut parser = Parser::starting_at(src, start);
    let mut forms = Vec::new();
    loop {
        match parser.next_form() {
            Ok(Some(form)) => forms.push(form.value),
            Ok(None) => break,
            Err(err) => return Err(read_error("string-read", err.to_string())),
        }
    }
    Ok(Value::list(forms))
}
