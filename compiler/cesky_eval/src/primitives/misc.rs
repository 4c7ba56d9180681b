//! Identity, procedures, opaque records, variables and environment access.

use super::{args, PrimContext, PrimitiveDef};
use cesky_value::errors::{protocol_error, type_error, unset_variable};
use cesky_value::{ArityMask, EvalResult, Value};

pub(super) const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef::new("eq?", ArityMask::exactly(2), eq),
    PrimitiveDef::new("not", ArityMask::exactly(1), not),
    PrimitiveDef::new("void", ArityMask::ANY, void),
    PrimitiveDef::new("procedure?", ArityMask::exactly(1), is_procedure),
    PrimitiveDef::new("opaque", ArityMask::exactly(2), opaque),
    PrimitiveDef::new("opaque-ref", ArityMask::exactly(3), opaque_ref),
    PrimitiveDef::new("variable?", ArityMask::exactly(1), is_variable),
    PrimitiveDef::new("variable", ArityMask::exactly(1), variable),
    PrimitiveDef::new("variable-ref", ArityMask::exactly(1), variable_ref),
    PrimitiveDef::new("variable-set!", ArityMask::exactly(2), variable_set),
    PrimitiveDef::new("top-ref", ArityMask::exactly(1), top_ref),
    PrimitiveDef::new("kernel-env", ArityMask::exactly(0), kernel_env),
];

fn eq(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::Bool(a[0].is_eq(&a[1])))
}

fn not(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::Bool(a[0].is_false()))
}

fn void(_: &PrimContext<'_>, _: &[Value]) -> EvalResult {
    Ok(Value::Void)
}

fn is_procedure(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::Bool(a[0].is_procedure()))
}

/// `(opaque key payload)`
fn opaque(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::opaque(a[0].clone(), a[1].clone()))
}

/// `(opaque-ref key value default)`: the payload when `value` is an opaque
/// record sealed with `key`, otherwise `default`.
fn opaque_ref(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(match &a[1] {
        Value::Opaque(record) if record.key.is_eq(&a[0]) => record.payload.clone(),
        _ => a[2].clone(),
    })
}

fn is_variable(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::Bool(matches!(a[0], Value::Variable(_))))
}

/// A fresh, unset variable; the argument names it for printing.
fn variable(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    Ok(Value::variable(a[0].clone()))
}

fn variable_ref(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let Value::Variable(var) = &a[0] else {
        return Err(type_error("variable-ref", "a variable", &a[0]));
    };
    var.get().ok_or_else(|| unset_variable("variable-ref", &a[0]))
}

/// Variables are write-once.
fn variable_set(_: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let Value::Variable(var) = &a[0] else {
        return Err(type_error("variable-set!", "a variable", &a[0]));
    };
    if var.try_set(a[1].clone()) {
        Ok(Value::Void)
    } else {
        Err(protocol_error(
            "variable-set!",
            "variable already has a value",
            &a[0],
        ))
    }
}

/// Current top-level binding of a symbol, or `#f`.
fn top_ref(ctx: &PrimContext<'_>, a: &[Value]) -> EvalResult {
    let name = args::symbol("top-ref", &a[0])?;
    Ok(ctx
        .top_level
        .get(&name)
        .cloned()
        .unwrap_or(Value::Bool(false)))
}

/// The kernel environment as a hash table.
fn kernel_env(ctx: &PrimContext<'_>, _: &[Value]) -> EvalResult {
    Ok(Value::hash(ctx.kernel_env.clone()))
}
