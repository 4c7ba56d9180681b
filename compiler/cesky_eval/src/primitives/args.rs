//! Argument extraction shared by the native procedures.

use cesky_ir::Symbol;
use cesky_trie::Trie;
use cesky_value::errors::{index_out_of_range, type_error};
use cesky_value::{EvalError, Pair, Value};
use std::rc::Rc;

pub(super) fn number(who: &str, value: &Value) -> Result<f64, EvalError> {
    value
        .as_number()
        .ok_or_else(|| type_error(who, "a number", value))
}

/// A number with no fractional part.
pub(super) fn integer(who: &str, value: &Value) -> Result<f64, EvalError> {
    match value.as_number() {
        Some(n) if n.is_finite() && n.fract() == 0.0 => Ok(n),
        _ => Err(type_error(who, "an integer", value)),
    }
}

/// A non-negative integer, for list and string positions.
pub(super) fn index(who: &str, value: &Value) -> Result<usize, EvalError> {
    let n = integer(who, value)?;
    if n < 0.0 || n > MAX_SAFE_INDEX {
        return Err(index_out_of_range(who, value));
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "range checked above"
    )]
    let index = n as usize;
    Ok(index)
}

/// Integers above 2^53 are not exactly representable.
const MAX_SAFE_INDEX: f64 = 9_007_199_254_740_991.0;

/// Integer conversion for the bitwise operators.
pub(super) fn bits(who: &str, value: &Value) -> Result<i64, EvalError> {
    let n = integer(who, value)?;
    if n.abs() > MAX_SAFE_INDEX {
        return Err(type_error(who, "an exact integer", value));
    }
    #[expect(clippy::cast_possible_truncation, reason = "magnitude checked above")]
    let bits = n as i64;
    Ok(bits)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "bitwise results of safe integers stay representable"
)]
pub(super) fn from_bits(n: i64) -> Value {
    Value::Number(n as f64)
}

#[expect(clippy::cast_precision_loss, reason = "counts are far below 2^53")]
pub(super) fn count(n: usize) -> Value {
    Value::Number(n as f64)
}

pub(super) fn string<'v>(who: &str, value: &'v Value) -> Result<&'v str, EvalError> {
    value
        .as_str()
        .ok_or_else(|| type_error(who, "a string", value))
}

pub(super) fn symbol(who: &str, value: &Value) -> Result<Symbol, EvalError> {
    value
        .as_symbol()
        .ok_or_else(|| type_error(who, "a symbol", value))
}

pub(super) fn pair<'v>(who: &str, value: &'v Value) -> Result<&'v Rc<Pair>, EvalError> {
    value
        .as_pair()
        .ok_or_else(|| type_error(who, "a pair", value))
}

pub(super) fn hash<'v>(who: &str, value: &'v Value) -> Result<&'v Trie<Value>, EvalError> {
    match value {
        Value::Hash(trie) => Ok(trie),
        _ => Err(type_error(who, "a hash table", value)),
    }
}

/// Elements of a proper list.
pub(super) fn list(who: &str, value: &Value) -> Result<Vec<Value>, EvalError> {
    value
        .list_to_vec()
        .ok_or_else(|| type_error(who, "a list", value))
}
