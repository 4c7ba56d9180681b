use super::*;
use pretty_assertions::assert_eq;

#[test]
fn only_false_is_false() {
    assert!(Value::Bool(false).is_false());
    assert!(Value::Bool(true).is_truthy());
    assert!(Value::Number(0.0).is_truthy());
    assert!(Value::Null.is_truthy());
    assert!(Value::string("").is_truthy());
}

#[test]
fn list_round_trip() {
    let v = Value::list([Value::Number(1.0), Value::Number(2.0)]);
    let items = v.list_to_vec().unwrap_or_default();
    assert_eq!(items.len(), 2);
    assert!(v.is_list());
}

#[test]
fn improper_list_is_not_a_list() {
    let v = Value::cons(Value::Number(1.0), Value::Number(2.0));
    assert!(v.list_to_vec().is_none());
    assert!(!v.is_list());
    let mut iter = v.iter_list();
    assert_eq!(iter.by_ref().count(), 1);
    assert!(matches!(iter.rest(), Value::Number(n) if *n == 2.0));
}

#[test]
fn eq_is_identity_for_heap_values() {
    let a = Value::cons(Value::Null, Value::Null);
    let b = Value::cons(Value::Null, Value::Null);
    assert!(a.is_eq(&a.clone()));
    assert!(!a.is_eq(&b));

    let s = Value::string("x");
    assert!(s.is_eq(&s.clone()));
    assert!(!s.is_eq(&Value::string("x")));
}

#[test]
fn eq_compares_scalars_by_value() {
    assert!(Value::Number(3.0).is_eq(&Value::Number(3.0)));
    assert!(!Value::Number(0.0).is_eq(&Value::Number(-0.0)));
    assert!(Value::symbol("k").is_eq(&Value::symbol("k")));
    assert!(Value::Null.is_eq(&Value::Null));
    assert!(!Value::Null.is_eq(&Value::Void));
    assert!(Value::MetaOp(MetaOp::Apply).is_eq(&Value::MetaOp(MetaOp::Apply)));
}

#[test]
fn pairs_are_mutable() {
    let v = Value::cons(Value::Number(1.0), Value::Null);
    let pair = v.as_pair().cloned();
    if let Some(pair) = pair {
        pair.set_car(Value::symbol("changed"));
        pair.set_cdr(Value::Number(9.0));
    }
    assert_eq!(crate::printer::write_string(&v), "(changed . 9)");
}

#[test]
fn variables_assign_once() {
    let v = Variable::new(Value::symbol("v"));
    assert!(v.get().is_none());
    assert!(v.try_set(Value::Number(1.0)));
    assert!(!v.try_set(Value::Number(2.0)));
    assert!(matches!(v.get(), Some(Value::Number(n)) if n == 1.0));
}

#[test]
fn procedures() {
    assert!(Value::MetaOp(MetaOp::CallPrompt).is_procedure());
    assert!(Value::Continuation(Kont::Terminal).is_procedure());
    assert!(!Value::symbol("car").is_procedure());
}

#[test]
fn dropping_long_list_is_iterative() {
    let v = Value::list((0..1_000_000).map(|i| Value::Number(f64::from(i))));
    drop(v);
}

#[test]
fn dropping_deep_nesting_is_iterative() {
    let mut v = Value::Null;
    for _ in 0..1_000_000 {
        v = Value::list([v]);
    }
    drop(v);
}

#[test]
fn type_names() {
    assert_eq!(Value::Number(1.0).type_name(), "number");
    assert_eq!(Value::MetaOp(MetaOp::KernelEval).type_name(), "procedure");
    assert_eq!(Value::Hash(cesky_trie::Trie::new()).type_name(), "hash");
}

#[test]
fn meta_op_names() {
    let names: Vec<&str> = MetaOp::ALL.iter().map(|op| op.name()).collect();
    assert_eq!(
        names,
        vec![
            "apply",
            "call/cc",
            "call/prompt",
            "continuation-prompt-available?",
            "kernel-eval"
        ]
    );
}
