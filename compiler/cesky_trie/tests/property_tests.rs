//! Property-based tests for the persistent trie.
//!
//! Keys are drawn from a small pool of names so that generated operation
//! sequences hit the same keys repeatedly (updates, re-inserts, removals of
//! bound and unbound keys).

use cesky_ir::Symbol;
use cesky_trie::Trie;
use proptest::prelude::*;
use std::collections::HashMap;

fn key(index: u8) -> Symbol {
    Symbol::intern(&format!("prop-key-{index}"))
}

#[derive(Clone, Debug)]
enum Op {
    Extend(u8, i64),
    Remove(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..48, any::<i64>()).prop_map(|(k, v)| Op::Extend(k, v)),
        (0u8..48).prop_map(Op::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn lookup_after_extend(pairs in prop::collection::vec((0u8..200, any::<i64>()), 0..64)) {
        let mut trie = Trie::new();
        for (k, v) in &pairs {
            trie = trie.extend(key(*k), *v);
            prop_assert_eq!(trie.lookup(key(*k)), Some(v));
        }
    }

    #[test]
    fn remove_then_lookup_is_absent(keys in prop::collection::vec(0u8..200, 1..64), victim in 0u8..200) {
        let trie: Trie<u8> = keys.iter().map(|k| (key(*k), *k)).collect();
        let removed = trie.remove(key(victim));
        prop_assert_eq!(removed.lookup(key(victim)), None);
    }

    #[test]
    fn count_matches_distinct_keys(keys in prop::collection::vec(0u8..200, 0..100)) {
        let trie: Trie<()> = keys.iter().map(|k| (key(*k), ())).collect();
        let mut distinct = keys.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(trie.len(), distinct.len());

        let mut reversed = keys;
        reversed.reverse();
        let trie2: Trie<()> = reversed.iter().map(|k| (key(*k), ())).collect();
        prop_assert_eq!(trie2.len(), distinct.len());
    }

    #[test]
    fn old_versions_are_untouched(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut versions: Vec<(Trie<i64>, HashMap<u8, i64>)> = vec![(Trie::new(), HashMap::new())];
        for op in ops {
            let (trie, model) = versions.last().cloned().unwrap_or_default();
            let mut model = model;
            let next = match op {
                Op::Extend(k, v) => {
                    model.insert(k, v);
                    trie.extend(key(k), v)
                }
                Op::Remove(k) => {
                    model.remove(&k);
                    trie.remove(key(k))
                }
            };
            versions.push((next, model));
        }
        for (trie, model) in &versions {
            prop_assert_eq!(trie.len(), model.len());
            for k in 0u8..48 {
                prop_assert_eq!(trie.lookup(key(k)), model.get(&k));
            }
        }
    }

    #[test]
    fn remove_yields_subset(keys in prop::collection::vec(0u8..200, 0..64), victim in 0u8..200) {
        let trie: Trie<u8> = keys.iter().map(|k| (key(*k), *k)).collect();
        prop_assert!(trie.remove(key(victim)).is_keys_subset(&trie));
    }

    #[test]
    fn keys_are_sorted_and_complete(keys in prop::collection::vec(0u8..200, 0..64)) {
        let trie: Trie<u8> = keys.iter().map(|k| (key(*k), *k)).collect();
        let listed = trie.keys();
        prop_assert_eq!(listed.len(), trie.len());
        prop_assert!(listed.windows(2).all(|w| w[0].name() <= w[1].name()));
        prop_assert!(listed.iter().all(|k| trie.lookup(*k).is_some()));
    }
}
