use super::*;
use pretty_assertions::assert_eq;

#[test]
fn keywords_have_fixed_ids() {
    assert_eq!(Symbol::intern("quote"), keywords::QUOTE);
    assert_eq!(Symbol::intern("lambda"), keywords::LAMBDA);
    assert_eq!(Symbol::intern("let"), keywords::LET);
    assert_eq!(Symbol::intern(""), keywords::EMPTY);
    assert_eq!(keywords::UNQUOTE_SPLICING.name(), "unquote-splicing");
    assert_eq!(keywords::EMPTY.id(), 0);
}

#[test]
fn intern_is_idempotent() {
    let a = Symbol::intern("symbol-test-alpha");
    let b = Symbol::intern("symbol-test-alpha");
    assert_eq!(a, b);
    assert_eq!(a.name(), "symbol-test-alpha");
    assert!(a.is_interned());
}

#[test]
fn uninterned_symbols_are_distinct() {
    let interned = Symbol::intern("symbol-test-beta");
    let u1 = Symbol::uninterned("symbol-test-beta");
    let u2 = Symbol::uninterned("symbol-test-beta");
    assert_ne!(u1, u2);
    assert_ne!(u1, interned);
    assert_eq!(u1.name(), "symbol-test-beta");
    assert!(!u1.is_interned());
    // Interning afterwards still finds the original.
    assert_eq!(Symbol::intern("symbol-test-beta"), interned);
}

#[test]
fn ordering_by_name() {
    let a = Symbol::intern("symbol-test-a");
    let b = Symbol::intern("symbol-test-b");
    assert_eq!(b.cmp_by_name(a), Ordering::Greater);
    assert_eq!(a.cmp_by_name(a), Ordering::Equal);
}

#[test]
fn display_and_debug() {
    let s = Symbol::intern("car");
    assert_eq!(s.to_string(), "car");
    assert!(format!("{s:?}").starts_with("Symbol(car#"));
}

#[test]
fn concurrent_interning_agrees() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| Symbol::intern("symbol-test-shared")))
        .collect();
    let ids: Vec<Symbol> = handles
        .into_iter()
        .map(|h| h.join().unwrap_or_else(|_| panic!("thread panicked")))
        .collect();
    assert!(ids.windows(2).all(|w| w[0] == w[1]));
}
