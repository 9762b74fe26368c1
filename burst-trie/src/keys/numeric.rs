//! Order-preserving byte projections for integers.
//!
//! Unsigned values are written big-endian, so byte-lexicographic order equals numeric order.
//! Signed values additionally have their sign bit flipped, which moves negatives below zero.

use std::borrow::Cow;

use crate::keys::ToBytes;

macro_rules! impl_unsigned {
    ( $($t:ty),* ) => {
    $(
    impl ToBytes for $t {
        #[inline]
        fn to_bytes(&self) -> Option<Cow<'_, [u8]>> {
            Some(Cow::Owned(self.to_be_bytes().to_vec()))
        }
    }
    ) *
    }
}
impl_unsigned!(u8, u16, u32, u64, usize, u128);

macro_rules! impl_signed {
    ( $t:ty, $tu:ty ) => {
        impl ToBytes for $t {
            #[inline]
            fn to_bytes(&self) -> Option<Cow<'_, [u8]>> {
                let v: $tu = self.cast_unsigned();
                let flipped = v ^ (1 << (<$tu>::BITS - 1));
                Some(Cow::Owned(flipped.to_be_bytes().to_vec()))
            }
        }
    };
}

impl_signed!(i8, u8);
impl_signed!(i16, u16);
impl_signed!(i32, u32);
impl_signed!(i64, u64);
impl_signed!(i128, u128);
impl_signed!(isize, usize);
