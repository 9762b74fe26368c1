use std::mem::MaybeUninit;

use crate::utils::bitset::BitsetTrait;

/// Fixed-width array of optional slots whose occupancy is tracked in a bitset.
/// `BitsetType` must have at least `RANGE_WIDTH` bits of capacity.
pub struct BitArray<X, const RANGE_WIDTH: usize, BitsetType>
where
    BitsetType: BitsetTrait,
{
    pub(crate) bitset: BitsetType,
    storage: Box<[MaybeUninit<X>; RANGE_WIDTH]>,
}

impl<X, const RANGE_WIDTH: usize, BitsetType> BitArray<X, RANGE_WIDTH, BitsetType>
where
    BitsetType: BitsetTrait,
{
    pub fn new() -> Self {
        let bitset = BitsetType::default();
        assert!(bitset.capacity() >= RANGE_WIDTH);

        Self {
            bitset,
            storage: Box::new([const { MaybeUninit::uninit() }; RANGE_WIDTH]),
        }
    }

    #[inline]
    pub fn get(&self, pos: usize) -> Option<&X> {
        assert!(pos < RANGE_WIDTH);
        if self.bitset.check(pos) {
            Some(unsafe { self.storage[pos].assume_init_ref() })
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut X> {
        assert!(pos < RANGE_WIDTH);
        if self.bitset.check(pos) {
            Some(unsafe { self.storage[pos].assume_init_mut() })
        } else {
            None
        }
    }

    /// Writes `x` into `pos`, returning whatever was there before.
    #[inline]
    pub fn set(&mut self, pos: usize, x: X) -> Option<X> {
        let old = self.erase(pos);
        self.storage[pos].write(x);
        self.bitset.set(pos);
        old
    }

    #[inline]
    pub fn erase(&mut self, pos: usize) -> Option<X> {
        assert!(pos < RANGE_WIDTH);
        if !self.bitset.check(pos) {
            return None;
        }
        self.bitset.unset(pos);
        let old = std::mem::replace(&mut self.storage[pos], MaybeUninit::uninit());
        Some(unsafe { old.assume_init() })
    }

    /// Lowest occupied position `>= from`.
    #[inline]
    pub fn next_occupied(&self, from: usize) -> Option<usize> {
        self.bitset.next_set(from)
    }

    /// Highest occupied position `< before`.
    #[inline]
    pub fn prev_occupied(&self, before: usize) -> Option<usize> {
        self.bitset.prev_set(before)
    }

    pub fn clear(&mut self) {
        for i in 0..RANGE_WIDTH {
            if self.bitset.check(i) {
                unsafe { self.storage[i].assume_init_drop() }
            }
        }
        self.bitset.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bitset.is_empty()
    }

    pub fn size(&self) -> usize {
        self.bitset.size()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &X)> {
        self.storage.iter().enumerate().filter_map(|x| {
            if !self.bitset.check(x.0) {
                None
            } else {
                Some((x.0, unsafe { x.1.assume_init_ref() }))
            }
        })
    }

    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (usize, &mut X)> {
        let bitset = &self.bitset;
        self.storage.iter_mut().enumerate().filter_map(move |x| {
            if !bitset.check(x.0) {
                None
            } else {
                Some((x.0, unsafe { x.1.assume_init_mut() }))
            }
        })
    }
}

impl<X, const RANGE_WIDTH: usize, BitsetType> Default for BitArray<X, RANGE_WIDTH, BitsetType>
where
    BitsetType: BitsetTrait,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<X, const RANGE_WIDTH: usize, BitsetType> Drop for BitArray<X, RANGE_WIDTH, BitsetType>
where
    BitsetType: BitsetTrait,
{
    fn drop(&mut self) {
        self.clear();
    }
}
