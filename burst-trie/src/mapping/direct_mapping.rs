use crate::mapping::NodeMapping;
use crate::utils::bitarray::BitArray;
use crate::utils::bitset::Bitset64;

/// One slot per possible byte value; the key byte is the slot index.
pub struct DirectMapping<N> {
    pub(crate) children: BitArray<N, 256, Bitset64<4>>,
    num_children: usize,
}

impl<N> Default for DirectMapping<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> DirectMapping<N> {
    pub fn new() -> Self {
        Self {
            children: BitArray::new(),
            num_children: 0,
        }
    }

    /// First occupied slot at or after `from`, in ascending byte order.
    #[inline]
    pub fn next_child(&self, from: usize) -> Option<(u8, &N)> {
        let pos = self.children.next_occupied(from)?;
        self.children.get(pos).map(|n| (pos as u8, n))
    }

    /// Last occupied slot strictly before `before`, in descending byte order.
    #[inline]
    pub fn prev_child(&self, before: usize) -> Option<(u8, &N)> {
        let pos = self.children.prev_occupied(before)?;
        self.children.get(pos).map(|n| (pos as u8, n))
    }

    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u8, &N)> {
        self.children.iter().map(|(key, node)| (key as u8, node))
    }

    #[inline]
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (u8, &mut N)> {
        self.children.iter_mut().map(|(key, node)| (key as u8, node))
    }

    /// Moves every child out in ascending byte order.
    pub fn drain(&mut self) -> impl Iterator<Item = (u8, N)> + '_ {
        std::iter::from_fn(move || {
            let (key, _) = self.next_child(0)?;
            self.delete_child(key).map(|node| (key, node))
        })
    }
}

impl<N> NodeMapping<N, 256> for DirectMapping<N> {
    #[inline]
    fn add_child(&mut self, key: u8, node: N) {
        if self.children.set(key as usize, node).is_none() {
            self.num_children += 1;
        }
    }

    #[inline]
    fn seek_child(&self, key: u8) -> Option<&N> {
        self.children.get(key as usize)
    }

    #[inline]
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        self.children.get_mut(key as usize)
    }

    #[inline]
    fn delete_child(&mut self, key: u8) -> Option<N> {
        let n = self.children.erase(key as usize);
        if n.is_some() {
            self.num_children -= 1;
        }
        n
    }

    #[inline]
    fn num_children(&self) -> usize {
        self.num_children
    }
}

#[cfg(test)]
mod tests {
    use crate::mapping::NodeMapping;

    #[test]
    fn direct_mapping_test() {
        let mut dm = super::DirectMapping::new();
        for i in 0..=255 {
            dm.add_child(i, i);
            assert_eq!(*dm.seek_child(i).unwrap(), i);
            assert_eq!(dm.delete_child(i), Some(i));
            assert_eq!(dm.seek_child(i), None);
        }
        assert_eq!(dm.num_children(), 0);
    }

    #[test]
    fn overwrite_counts_only_new_slots() {
        let mut dm = super::DirectMapping::new();
        dm.add_child(b'a', 1);
        dm.add_child(b'a', 2);
        dm.add_child(b'b', 3);
        assert_eq!(dm.num_children(), 2);
        assert_eq!(dm.seek_child(b'a'), Some(&2));
        *dm.seek_child_mut(b'b').unwrap() += 10;
        assert_eq!(dm.seek_child(b'b'), Some(&13));
    }

    #[test]
    fn drain_empties_in_byte_order() {
        let mut dm = super::DirectMapping::new();
        for k in [9u8, 255, 0, 130] {
            dm.add_child(k, k as u32);
        }
        let drained: Vec<(u8, u32)> = dm.drain().collect();
        assert_eq!(drained, vec![(0, 0), (9, 9), (130, 130), (255, 255)]);
        assert_eq!(dm.num_children(), 0);
        assert_eq!(dm.seek_child(9), None);
        assert!(dm.drain().next().is_none());
    }

    #[test]
    fn ordered_walk_both_directions() {
        let mut dm = super::DirectMapping::new();
        for k in [200u8, 3, 97, 255, 0] {
            dm.add_child(k, k as u32 * 2);
        }

        let mut forward = vec![];
        let mut pos = 0;
        while let Some((k, v)) = dm.next_child(pos) {
            forward.push((k, *v));
            pos = k as usize + 1;
        }
        assert_eq!(forward, vec![(0, 0), (3, 6), (97, 194), (200, 400), (255, 510)]);

        let mut backward = vec![];
        let mut pos = 256;
        while let Some((k, _)) = dm.prev_child(pos) {
            backward.push(k);
            pos = k as usize;
        }
        assert_eq!(backward, vec![255, 200, 97, 3, 0]);

        let keys: Vec<u8> = dm.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![0, 3, 97, 200, 255]);
    }
}
