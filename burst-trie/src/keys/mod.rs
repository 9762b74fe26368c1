//! The byte-key contract.
//!
//! Everything stored in a [`BurstTrie`](crate::tree::BurstTrie) must be able to project itself
//! onto a byte sequence. The trie dispatches on those bytes one at a time, so the projection
//! has to be deterministic and must not change while the item is stored.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

pub mod numeric;

pub trait ToBytes {
    /// The key bytes of this item, or `None` if no projection can be produced. Items without a
    /// projection are rejected by every trie operation.
    ///
    /// Empty projections are valid keys.
    fn to_bytes(&self) -> Option<Cow<'_, [u8]>>;
}

impl ToBytes for [u8] {
    #[inline]
    fn to_bytes(&self) -> Option<Cow<'_, [u8]>> {
        Some(Cow::Borrowed(self))
    }
}

impl<const N: usize> ToBytes for [u8; N] {
    #[inline]
    fn to_bytes(&self) -> Option<Cow<'_, [u8]>> {
        Some(Cow::Borrowed(self.as_slice()))
    }
}

impl ToBytes for Vec<u8> {
    #[inline]
    fn to_bytes(&self) -> Option<Cow<'_, [u8]>> {
        Some(Cow::Borrowed(self.as_slice()))
    }
}

impl ToBytes for str {
    #[inline]
    fn to_bytes(&self) -> Option<Cow<'_, [u8]>> {
        Some(Cow::Borrowed(self.as_bytes()))
    }
}

impl ToBytes for String {
    #[inline]
    fn to_bytes(&self) -> Option<Cow<'_, [u8]>> {
        Some(Cow::Borrowed(self.as_bytes()))
    }
}

impl ToBytes for Cow<'_, str> {
    #[inline]
    fn to_bytes(&self) -> Option<Cow<'_, [u8]>> {
        Some(Cow::Borrowed(self.as_bytes()))
    }
}

impl ToBytes for Cow<'_, [u8]> {
    #[inline]
    fn to_bytes(&self) -> Option<Cow<'_, [u8]>> {
        Some(Cow::Borrowed(&**self))
    }
}

/// `None` is an absent item.
impl<T: ToBytes> ToBytes for Option<T> {
    #[inline]
    fn to_bytes(&self) -> Option<Cow<'_, [u8]>> {
        self.as_ref()?.to_bytes()
    }
}

macro_rules! impl_forwarding {
    ( $($wrapper:ident),* ) => {
    $(
    impl<T: ToBytes + ?Sized> ToBytes for $wrapper<T> {
        #[inline]
        fn to_bytes(&self) -> Option<Cow<'_, [u8]>> {
            (**self).to_bytes()
        }
    }
    ) *
    }
}
impl_forwarding!(Box, Rc, Arc);

impl<T: ToBytes + ?Sized> ToBytes for &T {
    #[inline]
    fn to_bytes(&self) -> Option<Cow<'_, [u8]>> {
        (**self).to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::sync::Arc;

    use crate::keys::ToBytes;

    #[test]
    fn strings_and_slices_borrow() {
        let s = String::from("hello");
        let bytes = s.to_bytes().unwrap();
        assert!(matches!(bytes, Cow::Borrowed(_)));
        assert_eq!(bytes.as_ref(), b"hello");

        assert_eq!("abc".to_bytes().unwrap().as_ref(), b"abc");
        assert_eq!(vec![1u8, 2, 3].to_bytes().unwrap().as_ref(), &[1, 2, 3]);
        assert_eq!([9u8; 2].to_bytes().unwrap().as_ref(), &[9, 9]);
        assert_eq!("".to_bytes().unwrap().as_ref(), b"");
    }

    #[test]
    fn wrappers_forward() {
        let boxed: Box<str> = "boxed".into();
        assert_eq!(boxed.to_bytes().unwrap().as_ref(), b"boxed");
        let shared: Arc<[u8]> = Arc::from(&b"arc"[..]);
        assert_eq!(shared.to_bytes().unwrap().as_ref(), b"arc");
        let r = &&"ref";
        assert_eq!(r.to_bytes().unwrap().as_ref(), b"ref");
    }

    #[test]
    fn absent_option_has_no_projection() {
        let none: Option<String> = None;
        assert!(none.to_bytes().is_none());
        let some = Some("x".to_string());
        assert_eq!(some.to_bytes().unwrap().as_ref(), b"x");
    }
}
