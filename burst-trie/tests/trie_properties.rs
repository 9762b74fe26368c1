//! Model-based properties: every operation sequence must agree with `BTreeMap`/`BTreeSet`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Once;

use burst_trie::node::{AccessContainer, Child};
use burst_trie::{
    BurstMap, BurstTrie, CompactArray, Container, Entry, ListContainer, TravOrder,
    TrieStatsTrait,
};
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Routes trie logging to the test writer. Filter with `RUST_LOG=burst_trie=trace`.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Clone, Debug)]
enum Op {
    Insert(Vec<u8>, u64),
    Remove(Vec<u8>),
    Get(Vec<u8>),
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A small alphabet makes shared prefixes, and therefore bursts, likely.
    prop::collection::vec(prop_oneof![Just(0u8), Just(b'a'), Just(b'b'), Just(255u8)], 0..=10)
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        30 => key.clone().prop_map(Op::Remove),
        20 => key.prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=1000)
}

/// No container below the root may be empty, and no leaf may exceed `container_max`.
fn validate_node<T, C: Container<T>>(node: &AccessContainer<T, C>, container_max: usize) {
    for (byte, child) in node.children() {
        assert!(!child.is_empty(), "empty container left attached at slot {byte}");
        match child {
            Child::Access(inner) => validate_node(inner, container_max),
            Child::Leaf(leaf) => assert!(
                leaf.len() <= container_max,
                "leaf at slot {byte} holds {} items, over {container_max}",
                leaf.len()
            ),
        }
    }
}

fn validate_trie<T, C: Container<T>>(trie: &BurstTrie<T, C>) {
    if let Some(root) = trie.root() {
        validate_node(root, trie.config().container_max());
    }
    let stats = trie.get_trie_stats();
    assert_eq!(stats.num_values, trie.len());
    assert_eq!(stats.num_empty_containers, 0);
}

fn check_against_model<C>(ops: Vec<Op>, container_max: usize) -> Result<(), TestCaseError>
where
    C: Container<Entry<Vec<u8>, u64>>,
{
    init_tracing();
    let mut map = BurstMap::<Vec<u8>, u64, C>::with_container_max(container_max).unwrap();
    let mut model: BTreeMap<Vec<u8>, u64> = BTreeMap::new();

    for op in ops {
        match op {
            Op::Insert(key, value) => {
                let got = map.insert(key.clone(), value);
                prop_assert_eq!(got, model.insert(key, value));
            }
            Op::Remove(key) => {
                prop_assert_eq!(map.remove(&key), model.remove(&key));
            }
            Op::Get(key) => {
                prop_assert_eq!(map.get(&key), model.get(&key));
            }
        }
        prop_assert_eq!(map.len(), model.len());
    }

    validate_trie(map.trie());

    let got: Vec<(Vec<u8>, u64)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    let expected: Vec<(Vec<u8>, u64)> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
    prop_assert_eq!(got, expected);

    let rev: Vec<&Vec<u8>> = map
        .iter_order(TravOrder::RevOrder)
        .unwrap()
        .map(|(k, _)| k)
        .collect();
    let expected_rev: Vec<&Vec<u8>> = model.keys().rev().collect();
    prop_assert_eq!(rev, expected_rev);

    // Keys rebuilt from the trie path must match the stored keys.
    for (key, entry) in map.trie().entries() {
        prop_assert_eq!(&key, &entry.key);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn compact_matches_btreemap(ops in ops_strategy(), container_max in 1usize..6) {
        check_against_model::<CompactArray<Entry<Vec<u8>, u64>>>(ops, container_max)?;
    }

    #[test]
    fn list_matches_btreemap(ops in ops_strategy(), container_max in 1usize..6) {
        check_against_model::<ListContainer<Entry<Vec<u8>, u64>>>(ops, container_max)?;
    }

    #[test]
    fn duplicate_insert_is_idempotent(keys in prop::collection::vec(key_strategy(), 0..200)) {
        let mut trie: BurstTrie<Vec<u8>> = BurstTrie::with_container_max(2).unwrap();
        trie.extend(keys.iter().cloned());
        let len = trie.len();
        for k in &keys {
            let prev = trie.insert(k.clone());
            prop_assert_eq!(prev.as_ref(), Some(k));
        }
        prop_assert_eq!(trie.len(), len);
        let distinct: BTreeSet<&Vec<u8>> = keys.iter().collect();
        prop_assert_eq!(len, distinct.len());
    }

    #[test]
    fn removing_everything_leaves_an_empty_root(
        keys in prop::collection::vec(key_strategy(), 1..200),
        container_max in 1usize..4,
    ) {
        let mut trie: BurstTrie<Vec<u8>, ListContainer<Vec<u8>>> =
            BurstTrie::with_container_max(container_max).unwrap();
        trie.extend(keys.iter().cloned());
        for k in &keys {
            trie.remove(k);
            prop_assert!(!trie.contains(k));
            validate_trie(&trie);
        }
        prop_assert!(trie.is_empty());
        let root = trie.root().unwrap();
        prop_assert!(root.is_empty());
        let stats = trie.get_trie_stats();
        prop_assert_eq!(stats.num_access_containers, 1);
    }

    #[test]
    fn iteration_resumes_where_it_stopped(
        keys in prop::collection::btree_set(key_strategy(), 0..300),
        split in 0usize..300,
    ) {
        let trie: BurstTrie<Vec<u8>> = keys.iter().cloned().collect();
        let mut iter = trie.iter();
        let head: Vec<&Vec<u8>> = iter.by_ref().take(split).collect();
        let tail: Vec<&Vec<u8>> = iter.collect();
        let all: Vec<&Vec<u8>> = head.into_iter().chain(tail).collect();
        let expected: Vec<&Vec<u8>> = keys.iter().collect();
        prop_assert_eq!(all, expected);
    }

    #[test]
    fn sorting_leaves_does_not_change_contents(
        keys in prop::collection::btree_set(key_strategy(), 0..300),
    ) {
        let mut trie: BurstTrie<Vec<u8>> = BurstTrie::with_container_max(8).unwrap();
        trie.extend(keys.iter().cloned());
        trie.sort_containers(TravOrder::RevOrder);
        let any: BTreeSet<&Vec<u8>> = trie.iter_order(TravOrder::AnyOrder).unwrap().collect();
        prop_assert_eq!(any, keys.iter().collect::<BTreeSet<_>>());
        trie.sort_containers(TravOrder::InOrder);
        let asc: Vec<&Vec<u8>> = trie.iter_order(TravOrder::AnyOrder).unwrap().collect();
        prop_assert_eq!(asc, keys.iter().collect::<Vec<_>>());
    }
}
