//! The burst trie.
//!
//! This module contains [`BurstTrie`], which owns the root access container and drives insert,
//! lookup and removal through the levels of access containers down to the leaf containers.

use tracing::{debug, trace};

use crate::config::BurstConfig;
use crate::container::compact::CompactArray;
use crate::container::{Container, Insertion};
use crate::error::{BurstTrieError, Result};
use crate::iter::{Entries, Iter};
use crate::keys::ToBytes;
use crate::mapping::NodeMapping;
use crate::node::{AccessContainer, Child};
use crate::order::TravOrder;
use crate::stats::{TrieStats, TrieStatsTrait, update_trie_stats};

/// A burst trie: an ordered set of items keyed by their byte projection.
///
/// The top levels of the trie are 256-way access containers that dispatch on one key byte each.
/// Below them sit small leaf containers holding the remaining key suffixes. A leaf that grows
/// past the configured `container_max` bursts into a new access container, and containers that
/// become empty through removal are detached from their parent.
///
/// ## Type Parameters
///
/// - `T`: the stored item, which is also the source of its own key through [`ToBytes`]
/// - `C`: the leaf container, [`CompactArray`] unless chosen otherwise
///
/// ## Examples
///
/// ```rust
/// use burst_trie::BurstTrie;
///
/// let mut trie: BurstTrie<String> = BurstTrie::new();
/// trie.insert("apple".to_string());
/// trie.insert("application".to_string());
///
/// assert_eq!(trie.search("apple"), Some(&"apple".to_string()));
/// assert_eq!(trie.search("orange"), None);
///
/// let words: Vec<&String> = trie.iter().collect();
/// assert_eq!(words, vec!["apple", "application"]);
/// ```
///
/// A key/value map is available as [`BurstMap`](crate::map::BurstMap).
pub struct BurstTrie<T, C = CompactArray<T>> {
    root: Option<Box<AccessContainer<T, C>>>,
    size: usize,
    config: BurstConfig,
}

impl<T, C: Container<T>> Default for BurstTrie<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Container<T>> BurstTrie<T, C> {
    /// Create an empty trie with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BurstConfig::default())
    }

    pub fn with_config(config: BurstConfig) -> Self {
        Self {
            root: None,
            size: 0,
            config,
        }
    }

    /// Create an empty trie whose leaves burst once they hold more than `container_max` items.
    pub fn with_container_max(container_max: usize) -> Result<Self> {
        Ok(Self::with_config(BurstConfig::new(container_max)?))
    }

    #[inline]
    pub fn config(&self) -> &BurstConfig {
        &self.config
    }

    /// Number of distinct keys stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Drop every item and the root.
    pub fn clear(&mut self) {
        debug!(items = self.size, "clearing burst trie");
        self.root = None;
        self.size = 0;
    }

    /// The root access container, created by the first insert.
    pub fn root(&self) -> Option<&AccessContainer<T, C>> {
        self.root.as_deref()
    }

    /// Iterate over all items in ascending key order.
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter::new(self.root.as_deref(), self.size, TravOrder::InOrder)
    }

    /// Iterate over all items in `order`.
    ///
    /// `InOrder` and `PreOrder` yield ascending key order, `RevOrder` descending, and `AnyOrder`
    /// leaves each leaf container in whatever order it currently stores its entries. Other
    /// orders are rejected with [`BurstTrieError::UnsupportedOrder`].
    pub fn iter_order(&self, order: TravOrder) -> Result<Iter<'_, T, C>> {
        check_order(order)?;
        Ok(Iter::new(self.root.as_deref(), self.size, order))
    }

    /// Iterate over `(key, item)` pairs in ascending key order, rebuilding each key.
    pub fn entries(&self) -> Entries<'_, T, C> {
        Entries::new(self.root.as_deref(), self.size, TravOrder::InOrder)
    }

    pub fn entries_order(&self, order: TravOrder) -> Result<Entries<'_, T, C>> {
        check_order(order)?;
        Ok(Entries::new(self.root.as_deref(), self.size, order))
    }

    /// Sort every leaf container in place, so that iteration in `order` needs no per-leaf sort.
    pub fn sort_containers(&mut self, order: TravOrder) {
        if let Some(root) = self.root.as_deref_mut() {
            Self::sort_iterate(root, order);
        }
    }

    /// Find the item stored under `key`.
    ///
    /// Returns `None` both when the key is absent and when `key` has no byte projection; use
    /// [`try_search`](Self::try_search) to tell these apart.
    #[inline]
    pub fn search<Q>(&self, key: &Q) -> Option<&T>
    where
        Q: ToBytes + ?Sized,
    {
        self.try_search(key).unwrap_or_else(|err| {
            debug!(%err, "rejected search");
            None
        })
    }

    pub fn try_search<Q>(&self, key: &Q) -> Result<Option<&T>>
    where
        Q: ToBytes + ?Sized,
    {
        let bytes = key.to_bytes().ok_or(BurstTrieError::Unprojectable)?;
        let Some(root) = self.root.as_deref() else {
            return Ok(None);
        };
        Ok(Self::search_iterate(root, &bytes))
    }

    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: ToBytes + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Mutable access to the item stored under `key`.
    ///
    /// The item's byte projection must not change through this reference; the trie would no
    /// longer find it.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut T>
    where
        Q: ToBytes + ?Sized,
    {
        let Some(bytes) = key.to_bytes() else {
            debug!(err = %BurstTrieError::Unprojectable, "rejected get_mut");
            return None;
        };
        Self::search_iterate_mut(self.root.as_deref_mut()?, &bytes)
    }

    /// Like [`search`](Self::search), but lets a self-organizing leaf such as
    /// [`ListContainer`](crate::container::list::ListContainer) move the hit to its front.
    /// `search` only borrows the trie and never reorders.
    pub fn find<Q>(&mut self, key: &Q) -> Option<&T>
    where
        Q: ToBytes + ?Sized,
    {
        self.get_mut(key).map(|item| &*item)
    }

    /// Remove the item stored under `key`, returning it.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        Q: ToBytes + ?Sized,
    {
        self.try_remove(key).unwrap_or_else(|err| {
            debug!(%err, "rejected remove");
            None
        })
    }

    pub fn try_remove<Q>(&mut self, key: &Q) -> Result<Option<T>>
    where
        Q: ToBytes + ?Sized,
    {
        let bytes = key.to_bytes().ok_or(BurstTrieError::Unprojectable)?;
        let Some(root) = self.root.as_deref_mut() else {
            return Ok(None);
        };
        let mut trail = Vec::new();
        let Some((removed, emptied)) = Self::take_item(root, &bytes, &mut trail) else {
            return Ok(None);
        };
        self.size -= 1;
        if emptied {
            Self::detach_emptied(root, &trail);
        }
        Ok(Some(removed))
    }
}

impl<T: ToBytes, C: Container<T>> BurstTrie<T, C> {
    /// Store `item` under its own key.
    ///
    /// Returns the item previously stored under the same key, which the new item replaces.
    /// An item that cannot be stored (no byte projection, or a key longer than the leaf
    /// container supports) is dropped and `None` is returned; use
    /// [`try_insert`](Self::try_insert) to observe the rejection.
    ///
    /// ```rust
    /// use burst_trie::BurstTrie;
    ///
    /// let mut trie: BurstTrie<Vec<u8>> = BurstTrie::new();
    /// assert_eq!(trie.insert(b"key".to_vec()), None);
    /// assert_eq!(trie.insert(b"key".to_vec()), Some(b"key".to_vec()));
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn insert(&mut self, item: T) -> Option<T> {
        self.try_insert(item).unwrap_or_else(|err| {
            debug!(%err, "rejected insert");
            None
        })
    }

    pub fn try_insert(&mut self, item: T) -> Result<Option<T>> {
        let key = item
            .to_bytes()
            .ok_or(BurstTrieError::Unprojectable)?
            .into_owned();
        if key.len() > C::MAX_SUFFIX_LEN {
            return Err(BurstTrieError::KeyTooLong {
                len: key.len(),
                max: C::MAX_SUFFIX_LEN,
            });
        }

        let container_max = self.config.container_max();
        let root = self.root.get_or_insert_with(Box::default);
        let previous = Self::insert_iterate(root, &key, item, container_max);
        if previous.is_none() {
            self.size += 1;
        }
        Ok(previous)
    }
}

impl<T, C: Container<T>> TrieStatsTrait for BurstTrie<T, C> {
    fn get_trie_stats(&self) -> TrieStats {
        let mut stats = TrieStats::default();
        let Some(root) = self.root.as_deref() else {
            return stats;
        };
        update_trie_stats(root, &mut stats);
        if stats.num_leaf_containers > 0 {
            stats.avg_leaf_occupancy =
                stats.total_leaf_occupancy as f64 / stats.num_leaf_containers as f64;
        }
        stats
    }
}

impl<T: ToBytes, C: Container<T>> FromIterator<T> for BurstTrie<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl<T: ToBytes, C: Container<T>> Extend<T> for BurstTrie<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, T, C: Container<T>> IntoIterator for &'a BurstTrie<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn check_order(order: TravOrder) -> Result<()> {
    match order {
        TravOrder::InOrder | TravOrder::PreOrder | TravOrder::RevOrder | TravOrder::AnyOrder => {
            Ok(())
        }
        TravOrder::PostOrder | TravOrder::LevelOrder | TravOrder::RandOrder => {
            Err(BurstTrieError::UnsupportedOrder(order))
        }
    }
}

// Internals implementation
impl<T, C: Container<T>> BurstTrie<T, C> {
    fn search_iterate<'a>(root: &'a AccessContainer<T, C>, key: &[u8]) -> Option<&'a T> {
        let mut node = root;
        let mut depth = 0;
        loop {
            let Some(&byte) = key.get(depth) else {
                return node.single();
            };
            match node.child(byte)? {
                Child::Access(inner) => {
                    node = &**inner;
                    depth += 1;
                }
                Child::Leaf(leaf) => return leaf.search(&key[depth + 1..]),
            }
        }
    }

    fn search_iterate_mut<'a>(
        root: &'a mut AccessContainer<T, C>,
        key: &[u8],
    ) -> Option<&'a mut T> {
        let mut node = root;
        let mut depth = 0;
        loop {
            let Some(&byte) = key.get(depth) else {
                return node.single.as_mut();
            };
            match node.records.seek_child_mut(byte)? {
                Child::Access(inner) => {
                    node = &mut **inner;
                    depth += 1;
                }
                Child::Leaf(leaf) => return leaf.search_mut(&key[depth + 1..]),
            }
        }
    }

    fn insert_iterate(
        root: &mut AccessContainer<T, C>,
        key: &[u8],
        item: T,
        container_max: usize,
    ) -> Option<T> {
        let mut node = root;
        let mut depth = 0;
        loop {
            // The key ends at this access container.
            let Some(&byte) = key.get(depth) else {
                return node.single.replace(item);
            };
            let suffix = &key[depth + 1..];

            if node.records.seek_child(byte).is_none() {
                let mut leaf = C::default();
                let child = match leaf.insert(suffix, item, container_max).burst {
                    Some(access) => Child::Access(Box::new(access)),
                    None => Child::Leaf(Box::new(leaf)),
                };
                node.records.add_child(byte, child);
                return None;
            }
            let Some(child) = node.records.seek_child_mut(byte) else {
                return None;
            };

            match child {
                Child::Access(inner) => {
                    node = &mut **inner;
                    depth += 1;
                }
                Child::Leaf(leaf) => {
                    let Insertion { previous, burst } = leaf.insert(suffix, item, container_max);
                    if let Some(access) = burst {
                        trace!(depth = depth + 1, byte, "leaf replaced by access container");
                        *child = Child::Access(Box::new(access));
                    }
                    return previous;
                }
            }
        }
    }

    /// Removes the item under `key`, recording in `trail` the byte taken out of every access
    /// container passed through and whether that container holds nothing but that one child.
    /// Also reports whether the container the item came out of is now empty.
    fn take_item(
        root: &mut AccessContainer<T, C>,
        key: &[u8],
        trail: &mut Vec<(u8, bool)>,
    ) -> Option<(T, bool)> {
        let mut node = root;
        loop {
            let depth = trail.len();
            let Some(&byte) = key.get(depth) else {
                let item = node.single.take()?;
                return Some((item, node.is_empty()));
            };
            trail.push((byte, node.single.is_none() && node.num_children() == 1));
            match node.records.seek_child_mut(byte)? {
                Child::Access(inner) => node = &mut **inner,
                Child::Leaf(leaf) => {
                    let item = leaf.remove(&key[depth + 1..])?;
                    return Some((item, leaf.is_empty()));
                }
            }
        }
    }

    /// Cuts the highest container on `trail` that the removal left empty. The root stays.
    fn detach_emptied(root: &mut AccessContainer<T, C>, trail: &[(u8, bool)]) {
        let Some(mut cut) = trail.len().checked_sub(1) else {
            return;
        };
        while cut > 0 && trail[cut].1 {
            cut -= 1;
        }

        let mut node = root;
        for &(byte, _) in &trail[..cut] {
            match node.records.seek_child_mut(byte) {
                Some(Child::Access(inner)) => node = &mut **inner,
                _ => return,
            }
        }
        let byte = trail[cut].0;
        if node.records.delete_child(byte).is_some() {
            trace!(depth = cut + 1, byte, "detached empty container");
        }
    }

    fn sort_iterate(root: &mut AccessContainer<T, C>, order: TravOrder) {
        let mut pending = vec![root];
        while let Some(node) = pending.pop() {
            for (_, child) in node.records.iter_mut() {
                match child {
                    Child::Access(inner) => pending.push(&mut **inner),
                    Child::Leaf(leaf) => leaf.sort(order),
                }
            }
        }
    }
}
