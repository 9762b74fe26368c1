//! Key/value storage on top of the burst trie.

use std::borrow::Cow;

use crate::container::Container;
use crate::container::compact::CompactArray;
use crate::error::Result;
use crate::keys::ToBytes;
use crate::order::TravOrder;
use crate::tree::BurstTrie;

/// A key and its value, stored as one trie item keyed by the key's projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K: ToBytes, V> ToBytes for Entry<K, V> {
    #[inline]
    fn to_bytes(&self) -> Option<Cow<'_, [u8]>> {
        self.key.to_bytes()
    }
}

/// An ordered map from byte-projectable keys to values.
///
/// ```rust
/// use burst_trie::BurstMap;
///
/// let mut map: BurstMap<String, u32> = BurstMap::new();
/// map.insert("two".to_string(), 2);
/// map.insert("one".to_string(), 1);
/// assert_eq!(map.get("two"), Some(&2));
///
/// let keys: Vec<&String> = map.keys().collect();
/// assert_eq!(keys, vec!["one", "two"]);
/// ```
pub struct BurstMap<K, V, C = CompactArray<Entry<K, V>>> {
    trie: BurstTrie<Entry<K, V>, C>,
}

impl<K, V, C: Container<Entry<K, V>>> Default for BurstMap<K, V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Container<Entry<K, V>>> BurstMap<K, V, C> {
    pub fn new() -> Self {
        Self {
            trie: BurstTrie::new(),
        }
    }

    pub fn with_container_max(container_max: usize) -> Result<Self> {
        Ok(Self {
            trie: BurstTrie::with_container_max(container_max)?,
        })
    }

    /// The underlying trie of entries.
    pub fn trie(&self) -> &BurstTrie<Entry<K, V>, C> {
        &self.trie
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    pub fn clear(&mut self) {
        self.trie.clear();
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ToBytes + ?Sized,
    {
        self.trie.search(key).map(|e| &e.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: ToBytes + ?Sized,
    {
        self.trie.get_mut(key).map(|e| &mut e.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ToBytes + ?Sized,
    {
        self.trie.contains(key)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: ToBytes + ?Sized,
    {
        self.trie.remove(key).map(|e| e.value)
    }

    pub fn try_remove<Q>(&mut self, key: &Q) -> Result<Option<V>>
    where
        Q: ToBytes + ?Sized,
    {
        Ok(self.trie.try_remove(key)?.map(|e| e.value))
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.trie.iter().map(|e| (&e.key, &e.value))
    }

    pub fn iter_order(
        &self,
        order: TravOrder,
    ) -> Result<impl ExactSizeIterator<Item = (&K, &V)> + '_> {
        Ok(self.trie.iter_order(order)?.map(|e| (&e.key, &e.value)))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.trie.iter().map(|e| &e.key)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.trie.iter().map(|e| &e.value)
    }
}

impl<K: ToBytes, V, C: Container<Entry<K, V>>> BurstMap<K, V, C> {
    /// Map `key` to `value`, returning the value it replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.trie.insert(Entry { key, value }).map(|e| e.value)
    }

    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        Ok(self.trie.try_insert(Entry { key, value })?.map(|e| e.value))
    }
}

impl<K: ToBytes, V, C: Container<Entry<K, V>>> FromIterator<(K, V)> for BurstMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: ToBytes, V, C: Container<Entry<K, V>>> Extend<(K, V)> for BurstMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
