use crate::container::{Container, Insertion, suffix_cmp};
use crate::order::TravOrder;

/// Bytes of the little-endian length that precedes every stored suffix.
const LEN_PREFIX: usize = 2;

/// A leaf container that packs its suffixes back to back into one byte buffer.
///
/// Each suffix is stored as a 2-byte little-endian length followed by the suffix bytes. The item
/// for the n-th record lives at `items[n]`. Lookups walk the records front to back, which keeps
/// the scan inside one contiguous allocation.
pub struct CompactArray<T> {
    single: Option<T>,
    items: Vec<T>,
    records: Vec<u8>,
}

impl<T> Default for CompactArray<T> {
    fn default() -> Self {
        Self {
            single: None,
            items: Vec::new(),
            records: Vec::new(),
        }
    }
}

/// Walks the length-prefixed records, yielding each record's start offset and suffix.
#[derive(Clone)]
struct Records<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Records<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = (usize, &'a [u8]);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let header = self.buf.get(start..start + LEN_PREFIX)?;
        let len = u16::from_le_bytes([header[0], header[1]]) as usize;
        let body = start + LEN_PREFIX;
        self.pos = body + len;
        Some((start, &self.buf[body..self.pos]))
    }
}

impl<T> CompactArray<T> {
    /// Ordinal and record span of `suffix`, if stored.
    fn find(&self, suffix: &[u8]) -> Option<(usize, std::ops::Range<usize>)> {
        if suffix.len() + LEN_PREFIX > self.records.len() {
            return None;
        }
        Records::new(&self.records)
            .enumerate()
            .find(|(_, (_, s))| *s == suffix)
            .map(|(i, (start, s))| (i, start..start + LEN_PREFIX + s.len()))
    }

    /// Appends a record without checking for duplicates.
    fn extend(&mut self, suffix: &[u8], item: T) {
        let len = u16::try_from(suffix.len())
            .unwrap_or_else(|_| panic!("suffix of {} bytes exceeds record limit", suffix.len()));
        self.records.extend_from_slice(&len.to_le_bytes());
        self.records.extend_from_slice(suffix);
        self.items.push(item);
    }

    /// Number of suffix records, `single` excluded.
    pub fn num_records(&self) -> usize {
        self.items.len()
    }

    /// Size in bytes of the packed suffix buffer.
    pub fn records_len(&self) -> usize {
        self.records.len()
    }
}

impl<T> Container<T> for CompactArray<T> {
    const MAX_SUFFIX_LEN: usize = u16::MAX as usize;

    fn search(&self, suffix: &[u8]) -> Option<&T> {
        if suffix.is_empty() {
            return self.single.as_ref();
        }
        let (i, _) = self.find(suffix)?;
        self.items.get(i)
    }

    fn search_mut(&mut self, suffix: &[u8]) -> Option<&mut T> {
        if suffix.is_empty() {
            return self.single.as_mut();
        }
        let (i, _) = self.find(suffix)?;
        self.items.get_mut(i)
    }

    fn insert(&mut self, suffix: &[u8], item: T, container_max: usize) -> Insertion<T, Self> {
        if suffix.is_empty() {
            let previous = self.single.replace(item);
            if previous.is_some() {
                return Insertion::replaced(previous);
            }
        } else if let Some((i, _)) = self.find(suffix) {
            let previous = std::mem::replace(&mut self.items[i], item);
            return Insertion::replaced(Some(previous));
        } else {
            self.extend(suffix, item);
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
        let (i, span) = self.find(suffix)?;
        self.records.drain(span);
        Some(self.items.remove(i))
    }

    fn len(&self) -> usize {
        self.items.len() + usize::from(self.single.is_some())
    }

    fn single(&self) -> Option<&T> {
        self.single.as_ref()
    }

    fn set_single(&mut self, item: T) -> Option<T> {
        self.single.replace(item)
    }

    fn push_entry(&mut self, suffix: &[u8], item: T) {
        self.extend(suffix, item);
    }

    fn drain_into<F>(self, mut sink: F) -> Option<T>
    where
        F: FnMut(&[u8], T),
    {
        let Self {
            single,
            items,
            records,
        } = self;
        for ((_, suffix), item) in Records::new(&records).zip(items) {
            sink(suffix, item);
        }
        single
    }

    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a [u8], &'a T)> + Clone + 'a
    where
        T: 'a
    {
        Records::new(&self.records)
            .map(|(_, suffix)| suffix)
            .zip(self.items.iter())
    }

    fn sort(&mut self, order: TravOrder) {
        if order == TravOrder::AnyOrder || self.items.len() < 2 {
            return;
        }

        let records = std::mem::take(&mut self.records);
        let items = std::mem::take(&mut self.items);
        let mut pairs: Vec<(&[u8], T)> = Records::new(&records)
            .map(|(_, suffix)| suffix)
            .zip(items)
            .collect();

        // Insertion sort: leaves are small and often nearly sorted already.
        for i in 1..pairs.len() {
            let mut j = i;
            while j > 0 && suffix_cmp(pairs[j].0, pairs[j - 1].0, order).is_lt() {
                pairs.swap(j, j - 1);
                j -= 1;
            }
        }

        self.records.reserve(records.len());
        self.items.reserve(pairs.len());
        for (suffix, item) in pairs {
            self.extend(suffix, item);
        }
    }
}
