//! Pairs and lists.

use super::{args, PrimContext, PrimitiveDef};
use cesky_value::errors::index_out_of_range;
use cesky_value::{ArityMask, EvalResult, Value};

pub(super) const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef::new("pair?", ArityMask::exactly(1), is_pair),
    PrimitiveDef::new("null?", ArityMask::exactly(1), is_null),
    PrimitiveDef::new("list?", ArityMask::exactly(1), is_list),
    PrimitiveDef::new("cons", ArityMask::exactly(2), cons),
    PrimitiveDef::new("car", ArityMask::exactly(1), car),
    PrimitiveDef::new("cdr", ArityMask::exactly(1), cdr),
    PrimitiveDef::new("set-car!", ArityMask::exactly(2), set_car),
    PrimitiveDef::new("set-cdr!", ArityMask::exactly(2), set_cdr),
    PrimitiveDef::new("list", ArityMask::ANY, list),
    PrimitiveDef::new("append", ArityMask::ANY, append),
    PrimitiveDef::new("reverse", ArityMask::exactly(1), reverse),
    PrimitiveDef::new("length", ArityMask::exactly(1), length),
    PrimitiveDef::new("list-ref", ArityMask::exactly(2), list_ref),
    PrimitiveDef::new("list-set", ArityMask::exactly(3), list_set),
];

fn is_pair(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::Bool(matches!(a[0], Value::Pair(_))))
}

fn is_null(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::Bool(a[0].is_null()))
}

fn is_list(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::Bool(a[0].is_list()))
}

fn cons(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::cons(a[0].clone(), a[1].clone()))
}

fn car(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(args::pair("car", &a[0])?.car())
}

fn cdr(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(args::pair("cdr", &a[0])?.cdr())
}

fn set_car(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    args::pair("set-car!", &a[0])?.set_car(a[1].clone());
    Ok(Value::Void)
}

fn set_cdr(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    args::pair("set-cdr!", &a[0])?.set_cdr(a[1].clone());
    Ok(Value::Void)
}

fn list(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::list(a.iter().cloned()))
}

/// All but the last argument must be proper lists; the last becomes the
/// tail unchanged.
fn append(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let Some((last, init)) = a.split_last() else {
        return Ok(Value::Null);
    };
    let mut items = Vec::new();
    for list in init {
        items.extend(args::list("append", list)?);
    }
    Ok(Value::list_with_tail(items, last.clone()))
}

fn reverse(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let items = args::list("reverse", &a[0])?;
    Ok(items
        .into_iter()
        .fold(Value::Null, |acc, item| Value::cons(item, acc)))
}

fn length(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(args::count(args::list("length", &a[0])?.len()))
}

fn list_ref(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let index = args::index("list-ref", &a[1])?;
    let mut iter = a[0].iter_list();
    match iter.nth(index) {
        Some(item) => Ok(item),
        None => Err(index_out_of_range("list-ref", &a[1])),
    }
}

/// Functional update: a fresh list with one element replaced.
fn list_set(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let mut items = args::list("list-set", &a[0])?;
    let index = args::index("list-set", &a[1])?;
    let Some(slot) = items.get_mut(index) else {
        return Err(index_out_of_range("list-set", &a[1]));
    };
    *slot = a[2].clone();
    Ok(Value::list(items))
}
