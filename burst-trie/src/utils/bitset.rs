use num_traits::PrimInt;

pub trait BitsetTrait: Default {
    fn set(&mut self, pos: usize);
    fn unset(&mut self, pos: usize);
    fn check(&self, pos: usize) -> bool;
    fn clear(&mut self);
    /// Lowest set position `>= from`.
    fn next_set(&self, from: usize) -> Option<usize>;
    /// Highest set position `< before`.
    fn prev_set(&self, before: usize) -> Option<usize>;
    fn is_empty(&self) -> bool;
    fn size(&self) -> usize;
    fn capacity(&self) -> usize;
}

// TODO: The bulk of these parameters can be deleted and automatically derived when
// generic_const_exprs lands in stable.
pub struct Bitset<
    StorageType,
    const BIT_WIDTH: usize,
    const SHIFT: usize,
    const STORAGE_WIDTH: usize,
> where
    StorageType: PrimInt,
{
    bitset: [StorageType; STORAGE_WIDTH],
}

impl<StorageType, const BIT_WIDTH: usize, const SHIFT: usize, const STORAGE_WIDTH: usize>
    Bitset<StorageType, BIT_WIDTH, SHIFT, STORAGE_WIDTH>
where
    StorageType: PrimInt,
{
    pub fn new() -> Self {
        Self {
            bitset: [StorageType::zero(); STORAGE_WIDTH],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let mut next = self.next_set(0);
        std::iter::from_fn(move || {
            let pos = next?;
            next = self.next_set(pos + 1);
            Some(pos)
        })
    }
}

impl<StorageType, const BIT_WIDTH: usize, const SHIFT: usize, const STORAGE_WIDTH: usize>
    BitsetTrait for Bitset<StorageType, BIT_WIDTH, SHIFT, STORAGE_WIDTH>
where
    StorageType: PrimInt,
{
    #[inline]
    fn set(&mut self, pos: usize) {
        assert!(pos < STORAGE_WIDTH * BIT_WIDTH);
        let v = self.bitset[pos >> SHIFT];
        let shift: StorageType = StorageType::one() << (pos % BIT_WIDTH);
        self.bitset[pos >> SHIFT] = v | shift;
    }

    #[inline]
    fn unset(&mut self, pos: usize) {
        assert!(pos < STORAGE_WIDTH * BIT_WIDTH);
        let v = self.bitset[pos >> SHIFT];
        let shift = StorageType::one() << (pos % BIT_WIDTH);
        self.bitset[pos >> SHIFT] = v & !shift;
    }

    #[inline]
    fn check(&self, pos: usize) -> bool {
        assert!(pos < STORAGE_WIDTH * BIT_WIDTH);
        let shift: StorageType = StorageType::one() << (pos % BIT_WIDTH);
        !(self.bitset[pos >> SHIFT] & shift).is_zero()
    }

    #[inline]
    fn clear(&mut self) {
        self.bitset.fill(StorageType::zero());
    }

    fn next_set(&self, from: usize) -> Option<usize> {
        if from >= STORAGE_WIDTH * BIT_WIDTH {
            return None;
        }
        let mut word_idx = from >> SHIFT;
        // Mask off everything below `from` in its word.
        let mut word = self.bitset[word_idx] & (StorageType::max_value() << (from % BIT_WIDTH));
        loop {
            if !word.is_zero() {
                return Some((word_idx << SHIFT) + word.trailing_zeros() as usize);
            }
            word_idx += 1;
            if word_idx >= STORAGE_WIDTH {
                return None;
            }
            word = self.bitset[word_idx];
        }
    }

    fn prev_set(&self, before: usize) -> Option<usize> {
        let before = before.min(STORAGE_WIDTH * BIT_WIDTH);
        if before == 0 {
            return None;
        }
        let last = before - 1;
        let mut word_idx = last >> SHIFT;
        // Keep bits 0..=last within its word.
        let mask = StorageType::max_value() >> (BIT_WIDTH - 1 - last % BIT_WIDTH);
        let mut word = self.bitset[word_idx] & mask;
        loop {
            if !word.is_zero() {
                return Some((word_idx << SHIFT) + (BIT_WIDTH - 1) - word.leading_zeros() as usize);
            }
            if word_idx == 0 {
                return None;
            }
            word_idx -= 1;
            word = self.bitset[word_idx];
        }
    }

    fn is_empty(&self) -> bool {
        self.bitset.iter().all(|x| x.is_zero())
    }

    fn size(&self) -> usize {
        self.bitset.iter().map(|x| x.count_ones() as usize).sum()
    }

    fn capacity(&self) -> usize {
        self.bitset.len() * BIT_WIDTH
    }
}

impl<StorageType, const BIT_WIDTH: usize, const SHIFT: usize, const STORAGE_WIDTH: usize> Default
    for Bitset<StorageType, BIT_WIDTH, SHIFT, STORAGE_WIDTH>
where
    StorageType: PrimInt,
{
    fn default() -> Self {
        Self::new()
    }
}

pub type Bitset64<const STORAGE_WIDTH_U64: usize> = Bitset<u64, 64, 6, STORAGE_WIDTH_U64>;
