#![no_main]

use std::collections::BTreeSet;

use libfuzzer_sys::fuzz_target;

use burst_trie::{BurstTrie, CompactArray, Container, TravOrder};

fuzz_target!(|input: (u8, Vec<Vec<u8>>, usize)| {
    let (container_max, mut keys, split) = input;
    // Longer keys are rejected by the default leaf container.
    keys.retain(|k| k.len() <= CompactArray::<Vec<u8>>::MAX_SUFFIX_LEN);
    let mut trie: BurstTrie<Vec<u8>> =
        BurstTrie::with_container_max(usize::from(container_max.max(1))).unwrap();
    trie.extend(keys.iter().cloned());
    let expected: BTreeSet<&Vec<u8>> = keys.iter().collect();

    let asc: Vec<&Vec<u8>> = trie.iter().collect();
    assert!(asc.iter().eq(expected.iter()));

    let desc: Vec<&Vec<u8>> = trie.iter_order(TravOrder::RevOrder).unwrap().collect();
    assert!(desc.iter().eq(expected.iter().rev()));

    let mut iter = trie.iter();
    let head = iter.by_ref().take(split).count();
    assert_eq!(head + iter.count(), expected.len());

    for (key, item) in trie.entries() {
        assert_eq!(&key, item);
    }
});
