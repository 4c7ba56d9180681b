use super::*;
use pretty_assertions::assert_eq;

fn num(value: &Value) -> f64 {
    value.as_number().unwrap_or(f64::NAN)
}

#[test]
fn empty_lookup_misses() {
    let env = Env::empty();
    assert!(env.is_empty());
    assert!(env.lookup(Symbol::intern("x")).is_none());
}

#[test]
fn inner_binding_shadows_outer() {
    let x = Symbol::intern("x");
    let outer = Env::empty().extend(x, Value::Number(1.0));
    let inner = outer.extend(x, Value::Number(2.0));
    assert_eq!(inner.lookup(x).map(num), Some(2.0));
    assert_eq!(outer.lookup(x).map(num), Some(1.0));
    assert_eq!(inner.depth(), 2);
}

#[test]
fn extension_leaves_parent_untouched() {
    let x = Symbol::intern("x");
    let y = Symbol::intern("y");
    let parent = Env::empty().extend(x, Value::Number(1.0));
    let child = parent.extend(y, Value::Number(2.0));
    assert!(parent.lookup(y).is_none());
    assert_eq!(child.lookup(x).map(num), Some(1.0));
}

#[test]
fn debug_shows_innermost_first() {
    let env = Env::empty()
        .extend(Symbol::intern("a"), Value::Number(1.0))
        .extend(Symbol::intern("b"), Value::Bool(true));
    assert_eq!(format!("{env:?}"), "[b = #t, a = 1]");
}

#[test]
fn dropping_a_long_scope_is_iterative() {
    let x = Symbol::intern("x");
    let mut env = Env::empty();
    for i in 0..1_000_000 {
        env = env.extend(x, Value::Number(f64::from(i)));
    }
    assert_eq!(env.depth(), 1_000_000);
    drop(env);
}

#[test]
fn dropping_nested_closures_is_iterative() {
    let f = Symbol::intern("f");
    let mut value = Value::Null;
    for _ in 0..500_000 {
        let env = Env::empty().extend(f, value);
        value = Value::closure(Value::Null, Value::Symbol(f), None, env);
    }
    assert!(value.is_procedure());
    drop(value);
}

#[test]
fn shared_captured_scope_survives_drop() {
    let x = Symbol::intern("x");
    let scope = Env::empty().extend(x, Value::Number(7.0));
    let closure = Value::closure(Value::Null, Value::Symbol(x), None, scope.clone());
    let outer = Env::empty().extend(Symbol::intern("g"), closure);
    drop(outer);
    assert_eq!(scope.lookup(x).map(num), Some(7.0));
}
