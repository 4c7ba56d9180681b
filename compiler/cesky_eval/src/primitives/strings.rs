//! Strings and symbols. Positions count characters, not bytes.

use super::{args, PrimContext, PrimitiveDef};
use cesky_ir::Symbol;
use cesky_value::errors::{index_out_of_range, type_error};
use cesky_value::{ArityMask, EvalResult, Value};

pub(super) const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef::new("string?", ArityMask::exactly(1), is_string),
    PrimitiveDef::new("string-length", ArityMask::exactly(1), string_length),
    PrimitiveDef::new("string-ref", ArityMask::exactly(2), string_ref),
    PrimitiveDef::new("substring", ArityMask::between(2, 3), substring),
    PrimitiveDef::new("string", ArityMask::ANY, string),
    PrimitiveDef::new("string=?", ArityMask::exactly(2), string_eq),
    PrimitiveDef::new("string-ci=?", ArityMask::exactly(2), string_ci_eq),
    PrimitiveDef::new("string<?", ArityMask::exactly(2), string_lt),
    PrimitiveDef::new("string-split", ArityMask::between(1, 2), string_split),
    PrimitiveDef::new("string->symbol", ArityMask::exactly(1), string_to_symbol),
    PrimitiveDef::new(
        "string->uninterned-symbol",
        ArityMask::exactly(1),
        string_to_uninterned_symbol,
    ),
    PrimitiveDef::new("symbol->string", ArityMask::exactly(1), symbol_to_string),
    PrimitiveDef::new("symbol?", ArityMask::exactly(1), is_symbol),
];

fn is_string(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::Bool(matches!(a[0], Value::Str(_))))
}

fn string_length(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(args::count(args::string("string-length", &a[0])?.chars().count()))
}

/// The character code at a position.
fn string_ref(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let s = args::string("string-ref", &a[0])?;
    let index = args::index("string-ref", &a[1])?;
    match s.chars().nth(index) {
        Some(c) => Ok(Value::Number(f64::from(u32::from(c)))),
        None => Err(index_out_of_range("string-ref", &a[1])),
    }
}

fn substring(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let s = args::string("substring", &a[0])?;
    let len = s.chars().count();
    let start = args::index("substring", &a[1])?;
    let end = match a.get(2) {
        Some(v) => args::index("substring", v)?,
        None => len,
    };
    if end > len {
        return Err(index_out_of_range("substring", &a[2]));
    }
    if start > end {
        return Err(index_out_of_range("substring", &a[1]));
    }
    let piece: String = s.chars().skip(start).take(end - start).collect();
    Ok(Value::string(&piece))
}

/// Build a string from character codes.
fn string(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let mut out = String::with_capacity(a.len());
    for v in a {
        let code = args::index("string", v)?;
        let c = u32::try_from(code)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| type_error("string", "a character code", v))?;
        out.push(c);
    }
    Ok(Value::string(&out))
}

fn string_eq(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let lhs = args::string("string=?", &a[0])?;
    let rhs = args::string("string=?", &a[1])?;
    Ok(Value::Bool(lhs == rhs))
}

fn string_ci_eq(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let lhs = args::string("string-ci=?", &a[0])?;
    let rhs = args::string("string-ci=?", &a[1])?;
    Ok(Value::Bool(lhs.to_lowercase() == rhs.to_lowercase()))
}

fn string_lt(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let lhs = args::string("string<?", &a[0])?;
    let rhs = args::string("string<?", &a[1])?;
    Ok(Value::Bool(lhs < rhs))
}

/// Split on a literal separator (default a single space). Empty pieces are
/// kept; an empty separator splits into characters.
fn string_split(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let s = args::string("string-split", &a[0])?;
    let sep = match a.get(1) {
        Some(v) => args::string("string-split", v)?,
        None => " ",
    };
    let pieces: Vec<Value> = if sep.is_empty() {
        s.chars()
            .map(|c| Value::string(c.encode_utf8(&mut [0; 4])))
            .collect()
    } else {
        s.split(sep).map(Value::string).collect()
    };
    Ok(Value::list(pieces))
}

fn string_to_symbol(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let s = args::string("string->symbol", &a[0])?;
    Ok(Value::Symbol(Symbol::intern(s)))
}

fn string_to_uninterned_symbol(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let s = args::string("string->uninterned-symbol", &a[0])?;
    Ok(Value::Symbol(Symbol::uninterned(s)))
}

fn symbol_to_string(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let sym = args::symbol("symbol->string", &a[0])?;
    Ok(Value::string(sym.name()))
}

fn is_symbol(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::Bool(matches!(a[0], Value::Symbol(_))))
}
