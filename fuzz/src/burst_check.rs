#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use burst_trie::{BurstMap, Entry, ListContainer, TrieStatsTrait};

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: Vec<u8> },
    Insert { key: Vec<u8>, val: usize },
    Update { key: Vec<u8>, val: usize },
    Delete { key: Vec<u8> },
}

#[derive(Arbitrary, Debug)]
struct Input {
    container_max: u8,
    list_leaves: bool,
    methods: Vec<MapMethod>,
}

fn run<C>(container_max: usize, methods: &[MapMethod])
where
    C: burst_trie::Container<Entry<Vec<u8>, usize>>,
{
    let mut trie = BurstMap::<Vec<u8>, usize, C>::with_container_max(container_max).unwrap();
    let mut bt_map = BTreeMap::<Vec<u8>, usize>::new();

    for m in methods {
        match m {
            MapMethod::Get { key } => {
                assert_eq!(trie.get(key), bt_map.get(key));
            }
            MapMethod::Insert { key, val } => {
                if key.len() > C::MAX_SUFFIX_LEN {
                    continue;
                }
                let btree_insert = bt_map.insert(key.clone(), *val);
                let t_insert = trie.insert(key.clone(), *val);
                assert_eq!(t_insert, btree_insert);
            }
            MapMethod::Update { key, val } => {
                let old_bt = bt_map.get_mut(key);
                let old_t = trie.get_mut(key);
                assert_eq!(old_t, old_bt);
                if let (Some(old_bt), Some(old_t)) = (old_bt, old_t) {
                    *old_bt = *val;
                    *old_t = *val;
                }
                assert_eq!(trie.get(key), bt_map.get(key));
            }
            MapMethod::Delete { key } => {
                assert_eq!(trie.remove(key), bt_map.remove(key));
            }
        }
        assert_eq!(trie.len(), bt_map.len());
    }

    let got: Vec<(&Vec<u8>, &usize)> = trie.iter().collect();
    let expected: Vec<(&Vec<u8>, &usize)> = bt_map.iter().collect();
    assert_eq!(got, expected);

    let stats = trie.trie().get_trie_stats();
    assert_eq!(stats.num_values, bt_map.len());
    assert_eq!(stats.num_empty_containers, 0);
    assert!(stats.max_leaf_occupancy <= container_max);
}

fuzz_target!(|input: Input| {
    let container_max = usize::from(input.container_max.max(1));
    if input.list_leaves {
        run::<ListContainer<Entry<Vec<u8>, usize>>>(container_max, &input.methods);
    } else {
        run::<burst_trie::CompactArray<Entry<Vec<u8>, usize>>>(container_max, &input.methods);
    }
});
