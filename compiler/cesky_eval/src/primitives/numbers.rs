//! Arithmetic, comparison and bitwise operations on numbers.
//!
//! Numbers are `f64`. Integer-only operations (`quotient`, `remainder`,
//! `modulo`, the bitwise family) reject values with a fractional part.

use super::{args, PrimContext, PrimitiveDef};
use cesky_value::errors::division_by_zero;
use cesky_value::{ArityMask, EvalError, EvalResult, Value};

pub(super) const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef::new("number?", ArityMask::exactly(1), is_number),
    PrimitiveDef::new("integer?", ArityMask::exactly(1), is_integer),
    PrimitiveDef::new("zero?", ArityMask::exactly(1), is_zero),
    PrimitiveDef::new("+", ArityMask::ANY, add),
    PrimitiveDef::new("-", ArityMask::at_least(1), sub),
    PrimitiveDef::new("*", ArityMask::ANY, mul),
    PrimitiveDef::new("/", ArityMask::at_least(1), div),
    PrimitiveDef::new("quotient", ArityMask::exactly(2), quotient),
    PrimitiveDef::new("remainder", ArityMask::exactly(2), remainder),
    PrimitiveDef::new("modulo", ArityMask::exactly(2), modulo),
    PrimitiveDef::new("=", ArityMask::at_least(1), num_eq),
    PrimitiveDef::new("<", ArityMask::at_least(1), lt),
    PrimitiveDef::new("<=", ArityMask::at_least(1), le),
    PrimitiveDef::new(">", ArityMask::at_least(1), gt),
    PrimitiveDef::new(">=", ArityMask::at_least(1), ge),
    PrimitiveDef::new("bitwise-and", ArityMask::ANY, bit_and),
    PrimitiveDef::new("bitwise-ior", ArityMask::ANY, bit_ior),
    PrimitiveDef::new("bitwise-xor", ArityMask::ANY, bit_xor),
    PrimitiveDef::new("bitwise-not", ArityMask::exactly(1), bit_not),
];

fn is_number(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::Bool(matches!(a[0], Value::Number(_))))
}

fn is_integer(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::Bool(
        matches!(a[0], Value::Number(n) if n.is_finite() && n.fract() == 0.0),
    ))
}

fn is_zero(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::Bool(args::number("zero?", &a[0])? == 0.0))
}

fn numbers(who: &str, a: &[Value]) -> Result<Vec<f64>, EvalError> {
    a.iter().map(|v| args::number(who, v)).collect()
}

fn add(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    // `Sum` for floats starts at -0.0; `(+)` must be 0.
    Ok(Value::Number(numbers("+", a)?.into_iter().fold(0.0, |acc, n| acc + n)))
}

fn mul(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::Number(numbers("*", a)?.into_iter().product()))
}

/// `(- x)` negates; otherwise subtracts the rest from the first.
fn sub(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let nums = numbers("-", a)?;
    Ok(Value::Number(match nums.split_first() {
        Some((first, [])) => -first,
        Some((first, rest)) => rest.iter().fold(*first, |acc, n| acc - n),
        None => 0.0,
    }))
}

/// `(/ x)` is the reciprocal. Any zero divisor is an error.
fn div(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let nums = numbers("/", a)?;
    let (first, rest) = match nums.split_first() {
        Some((first, [])) => (1.0, std::slice::from_ref(first)),
        Some((first, rest)) => (*first, rest),
        None => return Ok(Value::Number(1.0)),
    };
    let mut acc = first;
    for divisor in rest {
        if *divisor == 0.0 {
            return Err(division_by_zero("/"));
        }
        acc /= divisor;
    }
    Ok(Value::Number(acc))
}

fn int_pair(who: &str, a: &[Value]) -> Result<(f64, f64), EvalError> {
    let lhs = args::integer(who, &a[0])?;
    let rhs = args::integer(who, &a[1])?;
    if rhs == 0.0 {
        return Err(division_by_zero(who));
    }
    Ok((lhs, rhs))
}

/// Truncating division.
fn quotient(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let (lhs, rhs) = int_pair("quotient", a)?;
    Ok(Value::Number((lhs / rhs).trunc()))
}

/// Sign follows the dividend.
fn remainder(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let (lhs, rhs) = int_pair("remainder", a)?;
    Ok(Value::Number(lhs % rhs))
}

/// Sign follows the divisor.
fn modulo(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let (lhs, rhs) = int_pair("modulo", a)?;
    Ok(Value::Number(((lhs % rhs) + rhs) % rhs))
}

fn compare(who: &str, a: &[Value], holds: fn(f64, f64) -> bool) -> EvalResult {
    let nums = numbers(who, a)?;
    Ok(Value::Bool(nums.windows(2).all(|w| holds(w[0], w[1]))))
}

#[allow(clippy::float_cmp, reason = "numeric equality is exact")]
fn num_eq(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    compare("=", a, |x, y| x == y)
}

fn lt(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    compare("<", a, |x, y| x < y)
}

fn le(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    compare("<=", a, |x, y| x <= y)
}

fn gt(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    compare(">", a, |x, y| x > y)
}

fn ge(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    compare(">=", a, |x, y| x >= y)
}

fn fold_bits(who: &str, a: &[Value], init: i64, op: fn(i64, i64) -> i64) -> EvalResult {
    let mut acc = init;
    for v in a {
        acc = op(acc, args::bits(who, v)?);
    }
    Ok(args::from_bits(acc))
}

fn bit_and(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    fold_bits("bitwise-and", a, -1, |x, y| x & y)
}

fn bit_ior(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    fold_bits("bitwise-ior", a, 0, |x, y| x | y)
}

fn bit_xor(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    fold_bits("bitwise-xor", a, 0, |x, y| x ^ y)
}

fn bit_not(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(args::from_bits(!args::bits("bitwise-not", &a[0])?))
}
