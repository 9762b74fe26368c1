use std::collections::VecDeque;

use crate::container::{Container, Insertion, suffix_cmp};
use crate::order::TravOrder;

struct ListEntry<T> {
    suffix: Box<[u8]>,
    item: T,
}

/// A self-organizing list of (suffix, item) pairs.
///
/// New suffixes are pushed to the front, and a suffix found through an exclusive access
/// (`search_mut`, or an insert that replaces) is moved to the front, so recently used keys are
/// found after a short scan. `search` borrows the list shared and leaves its order alone; the
/// trie's `find` and `get_mut` are the reordering lookups.
pub struct ListContainer<T> {
    single: Option<T>,
    entries: VecDeque<ListEntry<T>>,
}

impl<T> Default for ListContainer<T> {
    fn default() -> Self {
        Self {
            single: None,
            entries: VecDeque::new(),
        }
    }
}

impl<T> ListContainer<T> {
    #[inline]
    fn position(&self, suffix: &[u8]) -> Option<usize> {
        self.entries.iter().position(|e| *e.suffix == *suffix)
    }

    /// Moves the entry at `pos` to the front of the list.
    fn touch(&mut self, pos: usize) -> &mut ListEntry<T> {
        if pos != 0
            && let Some(entry) = self.entries.remove(pos)
        {
            self.entries.push_front(entry);
        }
        &mut self.entries[0]
    }
}

impl<T> Container<T> for ListContainer<T> {
    const MAX_SUFFIX_LEN: usize = usize::MAX;

    fn search(&self, suffix: &[u8]) -> Option<&T> {
        if suffix.is_empty() {
            return self.single.as_ref();
        }
        self.entries
            .iter()
            .find(|e| *e.suffix == *suffix)
            .map(|e| &e.item)
    }

    fn search_mut(&mut self, suffix: &[u8]) -> Option<&mut T> {
        if suffix.is_empty() {
            return self.single.as_mut();
        }
        let pos = self.position(suffix)?;
        Some(&mut self.touch(pos).item)
    }

    fn insert(&mut self, suffix: &[u8], item: T, container_max: usize) -> Insertion<T, Self> {
        if suffix.is_empty() {
            let previous = self.single.replace(item);
            if previous.is_some() {
                return Insertion::replaced(previous);
            }
        } else if let Some(pos) = self.position(suffix) {
            let entry = self.touch(pos);
            let previous = std::mem::replace(&mut entry.item, item);
            return Insertion::replaced(Some(previous));
        } else {
            self.entries.push_front(ListEntry {
                suffix: suffix.into(),
                item,
            });
        }

        Insertion {
            previous: None,
            burst: self.burst_if_over(container_max),
        }
    }

    fn remove(&mut self, suffix: &[u8]) -> Option<T> {
        if suffix.is_empty() {
            return self.single.take();
        }
        let pos = self.position(suffix)?;
        self.entries.remove(pos).map(|e| e.item)
    }

    fn len(&self) -> usize {
        self.entries.len() + usize::from(self.single.is_some())
    }

    fn single(&self) -> Option<&T> {
        self.single.as_ref()
    }

    fn set_single(&mut self, item: T) -> Option<T> {
        self.single.replace(item)
    }

    fn push_entry(&mut self, suffix: &[u8], item: T) {
        self.entries.push_back(ListEntry {
            suffix: suffix.into(),
            item,
        });
    }

    fn drain_into<F>(self, mut sink: F) -> Option<T>
    where
        F: FnMut(&[u8], T),
    {
        for entry in self.entries {
            sink(&entry.suffix, entry.item);
        }
        self.single
    }

    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a [u8], &'a T)> + Clone + 'a
    where
        T: 'a
    {
        self.entries.iter().map(|e| (&*e.suffix, &e.item))
    }

    fn sort(&mut self, order: TravOrder) {
        if order == TravOrder::AnyOrder {
            return;
        }
        self.entries
            .make_contiguous()
            .sort_by(|a, b| suffix_cmp(&a.suffix, &b.suffix, order));
    }
}
