//! Leaf containers: the bounded buckets at the fringe of the trie.
//!
//! A leaf container holds the items whose keys share the prefix consumed on the way down to it,
//! keyed by the remaining suffix. An item whose key ends exactly at the container's depth lives
//! in its `single` slot. Once a container holds more than `container_max` items it bursts into
//! an [`AccessContainer`] one level deeper.

use std::cmp::Ordering;

use crate::node::AccessContainer;
use crate::order::TravOrder;

pub mod compact;
pub mod list;

/// (suffix, item) pairs of one leaf container, in some requested order.
pub type ContainerIter<'a, T> = Box<dyn Iterator<Item = (&'a [u8], &'a T)> + 'a>;

/// Outcome of [`Container::insert`].
pub struct Insertion<T, C> {
    /// The item previously stored under the same suffix.
    pub previous: Option<T>,
    /// Set when the insert pushed the container over its threshold. The caller must replace the
    /// container with this access container in the parent slot.
    pub burst: Option<AccessContainer<T, C>>,
}

impl<T, C> Insertion<T, C> {
    pub(crate) fn replaced(previous: Option<T>) -> Self {
        Self {
            previous,
            burst: None,
        }
    }
}

pub trait Container<T>: Default + Sized {
    /// Longest suffix this container can represent.
    const MAX_SUFFIX_LEN: usize;

    /// Shared lookup. Never reorders storage.
    fn search(&self, suffix: &[u8]) -> Option<&T>;

    /// Exclusive lookup. Self-organizing containers move the hit to the front.
    fn search_mut(&mut self, suffix: &[u8]) -> Option<&mut T>;

    /// Stores `item` under `suffix`, replacing and returning any previous item. May burst.
    fn insert(&mut self, suffix: &[u8], item: T, container_max: usize) -> Insertion<T, Self>;

    fn remove(&mut self, suffix: &[u8]) -> Option<T>;

    /// Number of items held, the `single` slot included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn single(&self) -> Option<&T>;

    /// Writes the `single` slot, returning its previous occupant.
    fn set_single(&mut self, item: T) -> Option<T>;

    /// Appends a suffix known not to be present. Never bursts.
    fn push_entry(&mut self, suffix: &[u8], item: T);

    /// Consumes the container, feeding every suffix entry to `sink` in storage order, and
    /// returns the `single` item.
    fn drain_into<F>(self, sink: F) -> Option<T>
    where
        F: FnMut(&[u8], T);

    /// Suffix entries in storage order, `single` excluded.
    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a [u8], &'a T)> + Clone + 'a
    where
        T: 'a;

    /// All items in `order`. Sorted orders yield the `single` item first when ascending and
    /// last when descending.
    fn iter(&self, order: TravOrder) -> ContainerIter<'_, T> {
        ordered_iter(self.single(), self.entries(), order)
    }

    /// Sorts the suffix entries in place so later iteration in `order` needs no extra work.
    fn sort(&mut self, order: TravOrder);

    /// Bursts this container if it holds more than `container_max` items.
    fn burst_if_over(&mut self, container_max: usize) -> Option<AccessContainer<T, Self>> {
        if self.len() <= container_max {
            return None;
        }
        Some(AccessContainer::from_burst(
            std::mem::take(self),
            container_max,
        ))
    }
}

#[inline]
pub(crate) fn suffix_cmp(a: &[u8], b: &[u8], order: TravOrder) -> Ordering {
    if order.is_descending() {
        b.cmp(a)
    } else {
        a.cmp(b)
    }
}

pub(crate) fn ordered_iter<'a, T, I>(
    single: Option<&'a T>,
    entries: I,
    order: TravOrder,
) -> ContainerIter<'a, T>
where
    T: 'a,
    I: Iterator<Item = (&'a [u8], &'a T)> + Clone + 'a,
{
    let in_order = order == TravOrder::AnyOrder
        || entries
            .clone()
            .zip(entries.clone().skip(1))
            .all(|(a, b)| suffix_cmp(a.0, b.0, order) != Ordering::Greater);

    let body: ContainerIter<'a, T> = if in_order {
        Box::new(entries)
    } else {
        let mut sorted: Vec<_> = entries.collect();
        sorted.sort_by(|a, b| suffix_cmp(a.0, b.0, order));
        Box::new(sorted.into_iter())
    };

    let single = single.map(|item| (&[] as &[u8], item));
    if order.is_descending() {
        Box::new(body.chain(single))
    } else {
        Box::new(single.into_iter().chain(body))
    }
}
