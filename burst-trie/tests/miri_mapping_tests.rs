//! Miri tests for the slot storage under access containers.
//!
//! `BitArray` keeps its slots as `MaybeUninit` and tracks occupancy in a bitset, so these tests
//! drive it with owned values through every path that writes, overwrites, moves out of or drops
//! a slot. Run with `cargo +nightly miri test --test miri_mapping_tests`.

use burst_trie::mapping::NodeMapping;
use burst_trie::mapping::direct_mapping::DirectMapping;
use burst_trie::utils::bitarray::BitArray;
use burst_trie::utils::bitset::Bitset64;
use burst_trie::{BurstTrie, ListContainer};

/// Fill, mutate and drain every slot of a DirectMapping
#[test]
fn miri_direct_mapping_basic_ops() {
    let mut dm = DirectMapping::<i32>::new();

    for i in 0..=255u8 {
        dm.add_child(i, i as i32);
        assert_eq!(*dm.seek_child(i).unwrap(), i as i32);
    }

    for i in 0..=255u8 {
        *dm.seek_child_mut(i).unwrap() = (i as i32) * 2;
        assert_eq!(*dm.seek_child(i).unwrap(), (i as i32) * 2);
    }

    for i in 0..=255u8 {
        assert_eq!(dm.delete_child(i), Some((i as i32) * 2));
        assert_eq!(dm.seek_child(i), None);
    }

    assert_eq!(dm.num_children(), 0);
}

/// Overwriting an occupied slot must drop the old owned value exactly once
#[test]
fn miri_overwrite_drops_owned_value() {
    let mut dm = DirectMapping::<Box<String>>::new();
    dm.add_child(7, Box::new("first".to_string()));
    dm.add_child(7, Box::new("second".to_string()));
    assert_eq!(**dm.seek_child(7).unwrap(), "second");
    assert_eq!(dm.num_children(), 1);
}

/// Sparse fills leave most slots uninitialized; none of them may be read
#[test]
fn miri_uninitialized_access_patterns() {
    let mut dm = DirectMapping::<Box<i32>>::new();
    dm.add_child(0, Box::new(0));
    dm.add_child(127, Box::new(127));
    dm.add_child(255, Box::new(255));

    for i in (1..127u8).chain(128..255u8) {
        assert_eq!(dm.seek_child(i), None);
        assert_eq!(dm.seek_child_mut(i), None);
    }

    let keys: Vec<u8> = dm.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![0, 127, 255]);
    let back: Vec<u8> = dm.iter().rev().map(|(k, _)| k).collect();
    assert_eq!(back, vec![255, 127, 0]);
    assert_eq!(dm.next_child(1).map(|(k, _)| k), Some(127));
    assert_eq!(dm.prev_child(127).map(|(k, _)| k), Some(0));
}

/// Create and drop without any operations
#[test]
fn miri_create_destroy_untouched() {
    {
        let dm = DirectMapping::<Vec<u8>>::new();
        assert_eq!(dm.num_children(), 0);
        assert_eq!(dm.seek_child(0), None);
        assert_eq!(dm.seek_child(255), None);
    }
    {
        let ba = BitArray::<Box<String>, 256, Bitset64<4>>::new();
        assert!(ba.is_empty());
        assert_eq!(ba.get(255), None);
    }
}

/// Partially filled storage dropped with owned values still inside
#[test]
fn miri_partial_fill_manipulation() {
    let mut dm = DirectMapping::<Box<i64>>::new();

    for i in (0..=255u8).step_by(4) {
        dm.add_child(i, Box::new(i as i64));
    }

    for i in 0..=255u8 {
        if i % 4 == 0 {
            assert_eq!(**dm.seek_child(i).unwrap(), i as i64);
        } else {
            assert_eq!(dm.seek_child(i), None);
        }
    }

    for (_, val) in dm.iter_mut() {
        **val *= 2;
    }

    for i in (0..=255u8).step_by(12) {
        dm.delete_child(i);
    }

    for i in (0..=255u8).step_by(4) {
        if i % 12 == 0 {
            assert_eq!(dm.seek_child(i), None);
        } else {
            assert_eq!(**dm.seek_child(i).unwrap(), (i as i64) * 2);
        }
    }
}

/// Draining moves every occupied slot out and leaves the storage reusable
#[test]
fn miri_drain_and_reuse() {
    let mut dm = DirectMapping::<Vec<u8>>::new();
    for round in 0..3u8 {
        for i in 0..20u8 {
            dm.add_child(i.wrapping_mul(13).wrapping_add(round), vec![i; i as usize + 1]);
        }
        let drained: Vec<(u8, Vec<u8>)> = dm.drain().collect();
        assert_eq!(drained.len(), 20);
        assert_eq!(dm.num_children(), 0);
        assert!(dm.iter().next().is_none());
    }
}

/// Bursts move owned items between containers; detaching drops emptied ones
#[test]
fn miri_burst_and_detach_with_owned_items() {
    let mut trie: BurstTrie<String, ListContainer<String>> =
        BurstTrie::with_container_max(1).unwrap();
    let words = ["a", "ab", "abc", "abd", "b", "ba", ""];
    for w in words {
        trie.insert(w.to_string());
    }
    assert_eq!(trie.len(), words.len());
    for w in words {
        assert_eq!(trie.remove(w).as_deref(), Some(w));
    }
    assert!(trie.root().unwrap().is_empty());
}

/// Access containers free nested levels through a work list
#[test]
fn miri_nested_access_drop() {
    let mut trie: BurstTrie<Vec<u8>, ListContainer<Vec<u8>>> =
        BurstTrie::with_container_max(1).unwrap();
    let shorter = vec![b'k'; 64];
    let mut longer = shorter.clone();
    longer.push(0);
    trie.insert(shorter);
    trie.insert(longer);
    assert_eq!(trie.len(), 2);
    drop(trie);
}
