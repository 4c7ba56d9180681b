use super::*;
use pretty_assertions::assert_eq;

fn sym(name: &str) -> Symbol {
    Symbol::intern(name)
}

/// Recompute counts from scratch and compare with the stored ones.
fn verify_counts<V>(node: &Node<V>, is_root: bool) -> u32 {
    let mut total = u32::from(node.value.is_some());
    for child in node.children.iter().flatten() {
        total += verify_counts(child, false);
    }
    assert_eq!(node.count, total, "stale count");
    if !is_root {
        assert!(total > 0, "empty node left unpruned");
    }
    total
}

#[test]
fn empty_trie() {
    let t: Trie<i32> = Trie::new();
    assert!(t.is_empty());
    assert_eq!(t.len(), 0);
    assert_eq!(t.lookup(sym("missing")), None);
    assert!(t.keys().is_empty());
}

#[test]
fn extend_then_lookup() {
    let t = Trie::new().extend(sym("foo"), 42).extend(sym("bar"), 43);
    assert_eq!(t.lookup(sym("foo")), Some(&42));
    assert_eq!(t.lookup(sym("bar")), Some(&43));
    assert_eq!(t.lookup(sym("baz")), None);
    assert_eq!(t.len(), 2);
    verify_counts(&t.root, true);
}

#[test]
fn update_does_not_change_count() {
    let t = Trie::new().extend(sym("foo"), 1);
    let t2 = t.extend(sym("foo"), 2);
    assert_eq!(t2.len(), 1);
    assert_eq!(t2.lookup(sym("foo")), Some(&2));
    verify_counts(&t2.root, true);
}

#[test]
fn old_root_survives_extend() {
    let t0 = Trie::new().extend(sym("a"), 1);
    let t1 = t0.extend(sym("a"), 10).extend(sym("b"), 2);
    assert_eq!(t0.lookup(sym("a")), Some(&1));
    assert_eq!(t0.lookup(sym("b")), None);
    assert_eq!(t1.lookup(sym("a")), Some(&10));
}

#[test]
fn old_root_survives_remove() {
    let t0 = Trie::new().extend(sym("a"), 1).extend(sym("b"), 2);
    let t1 = t0.remove(sym("a"));
    assert_eq!(t0.lookup(sym("a")), Some(&1));
    assert_eq!(t1.lookup(sym("a")), None);
    assert_eq!(t1.lookup(sym("b")), Some(&2));
    assert_eq!(t0.len(), 2);
    assert_eq!(t1.len(), 1);
}

#[test]
fn remove_absent_returns_same_root() {
    let t = Trie::new().extend(sym("a"), 1);
    let same = t.remove(sym("never-bound-key"));
    assert!(same.ptr_eq(&t));
}

#[test]
fn remove_prunes_empty_paths() {
    let keys: Vec<Symbol> = (0..64).map(|i| sym(&format!("prune-{i}"))).collect();
    let full: Trie<usize> = keys.iter().copied().zip(0..).collect();
    let emptied = keys.iter().fold(full, |t, k| t.remove(*k));
    assert!(emptied.is_empty());
    assert!(emptied.root.children.iter().all(Option::is_none));
    verify_counts(&emptied.root, true);
}

#[test]
fn symbol_with_id_zero_lives_at_root() {
    let t = Trie::new().extend(cesky_ir::keywords::EMPTY, "root");
    assert_eq!(t.root.value, Some("root"));
    assert!(t.root.children.iter().all(Option::is_none));
    assert_eq!(t.remove(cesky_ir::keywords::EMPTY).len(), 0);
}

#[test]
fn unchanged_subtrees_are_shared() {
    let a = sym("share-a");
    let b = sym("share-b");
    let t0 = Trie::new().extend(a, 1).extend(b, 2);
    let t1 = t0.extend(a, 3);
    let slot = digit(b.id());
    if slot != digit(a.id()) {
        let before = t0.root.children[slot].as_ref();
        let after = t1.root.children[slot].as_ref();
        assert!(matches!((before, after), (Some(x), Some(y)) if Rc::ptr_eq(x, y)));
    }
}

#[test]
fn keys_are_sorted_by_name() {
    let t = Trie::new()
        .extend(sym("zebra"), ())
        .extend(sym("apple"), ())
        .extend(sym("mango"), ());
    let names: Vec<&str> = t.keys().into_iter().map(Symbol::name).collect();
    assert_eq!(names, vec!["apple", "mango", "zebra"]);
}

#[test]
fn uninterned_keys_are_separate() {
    let interned = sym("twin");
    let other = Symbol::uninterned("twin");
    let t = Trie::new().extend(interned, 1).extend(other, 2);
    assert_eq!(t.len(), 2);
    assert_eq!(t.lookup(interned), Some(&1));
    assert_eq!(t.lookup(other), Some(&2));
}

#[test]
fn subset_relations() {
    let small = Trie::new().extend(sym("a"), 1);
    let big = small.extend(sym("b"), 2);
    let empty: Trie<i32> = Trie::new();

    assert!(small.is_keys_subset(&big));
    assert!(!big.is_keys_subset(&small));
    assert!(big.is_keys_subset(&big));
    assert!(empty.is_keys_subset(&small));
    assert!(!small.is_keys_subset(&empty));

    let disjoint = Trie::new().extend(sym("c"), 1);
    assert!(!disjoint.is_keys_subset(&big));
}

#[test]
fn subset_ignores_values() {
    let a = Trie::new().extend(sym("k"), 1);
    let b = Trie::new().extend(sym("k"), 99);
    assert!(a.is_keys_subset(&b));
}

#[test]
fn iter_visits_every_binding() {
    let t: Trie<u32> = (0..100u32).map(|i| (sym(&format!("iter-{i}")), i)).collect();
    let mut seen: Vec<u32> = t.iter().map(|(_, v)| *v).collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..100).collect::<Vec<_>>());
    verify_counts(&t.root, true);
}

#[test]
fn debug_lists_bindings() {
    let t = Trie::new().extend(sym("dbg"), 7);
    assert!(format!("{t:?}").contains("7"));
}
