//! Persistent symbol-keyed hash tables, backed by [`Trie`].

use super::{args, PrimContext, PrimitiveDef};
use cesky_trie::Trie;
use cesky_value::errors::{arity_mismatch, key_not_found};
use cesky_value::{ArityMask, EvalResult, Value};

pub(super) const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef::new("hash?", ArityMask::exactly(1), is_hash),
    PrimitiveDef::new("hash", ArityMask::ANY, hash),
    PrimitiveDef::new("hash-ref", ArityMask::between(2, 3), hash_ref),
    PrimitiveDef::new("hash-set", ArityMask::exactly(3), hash_set),
    PrimitiveDef::new("hash-remove", ArityMask::exactly(2), hash_remove),
    PrimitiveDef::new("hash-keys", ArityMask::exactly(1), hash_keys),
    PrimitiveDef::new("hash-count", ArityMask::exactly(1), hash_count),
    PrimitiveDef::new("hash-keys-subset?", ArityMask::exactly(2), hash_keys_subset),
];

fn is_hash(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::Bool(matches!(a[0], Value::Hash(_))))
}

/// `(hash key value ...)`; later duplicates win.
fn hash(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    if a.len() % 2 != 0 {
        return Err(arity_mismatch("hash", "an even number", a));
    }
    let mut trie = Trie::new();
    for entry in a.chunks_exact(2) {
        let key = args::symbol("hash", &entry[0])?;
        trie = trie.extend(key, entry[1].clone());
    }
    Ok(Value::hash(trie))
}

/// Missing keys yield the default when one is given.
fn hash_ref(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let trie = args::hash("hash-ref", &a[0])?;
    let key = args::symbol("hash-ref", &a[1])?;
    match (trie.lookup(key), a.get(2)) {
        (Some(value), _) => Ok(value.clone()),
        (None, Some(default)) => Ok(default.clone()),
        (None, None) => Err(key_not_found("hash-ref", &a[1])),
    }
}

fn hash_set(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let trie = args::hash("hash-set", &a[0])?;
    let key = args::symbol("hash-set", &a[1])?;
    Ok(Value::hash(trie.extend(key, a[2].clone())))
}

fn hash_remove(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let trie = args::hash("hash-remove", &a[0])?;
    let key = args::symbol("hash-remove", &a[1])?;
    Ok(Value::hash(trie.remove(key)))
}

/// Keys sorted by name.
fn hash_keys(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let trie = args::hash("hash-keys", &a[0])?;
    Ok(Value::list(trie.keys().into_iter().map(Value::Symbol)))
}

fn hash_count(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(args::count(args::hash("hash-count", &a[0])?.len()))
}

fn hash_keys_subset(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let lhs = args::hash("hash-keys-subset?", &a[0])?;
    let rhs = args::hash("hash-keys-subset?", &a[1])?;
    Ok(Value::Bool(lhs.is_keys_subset(rhs)))
}
