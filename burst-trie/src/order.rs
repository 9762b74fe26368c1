use std::fmt;

/// Traversal orders shared with the tree collaborators of this crate.
///
/// `InOrder` visits items from smallest to largest key and `RevOrder` from largest to smallest.
/// `PreOrder`, `PostOrder` and `LevelOrder` depend on the shape of the underlying structure.
/// `AnyOrder` lets the implementation pick whatever is cheapest, and `RandOrder` visits items in
/// a uniformly random order.
///
/// The burst trie walks `InOrder`, `PreOrder` (identical to `InOrder` in a trie, where an exact
/// prefix item precedes its extensions), `RevOrder` and `AnyOrder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TravOrder {
    #[default]
    InOrder,
    RevOrder,
    PreOrder,
    PostOrder,
    LevelOrder,
    AnyOrder,
    RandOrder,
}

impl TravOrder {
    /// Whether items come out sorted, and in which direction.
    pub(crate) fn is_descending(self) -> bool {
        matches!(self, TravOrder::RevOrder)
    }
}

impl fmt::Display for TravOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TravOrder::InOrder => "in-order traversal",
            TravOrder::RevOrder => "reverse-order traversal",
            TravOrder::PreOrder => "pre-order traversal",
            TravOrder::PostOrder => "post-order traversal",
            TravOrder::LevelOrder => "level-order traversal",
            TravOrder::AnyOrder => "any-order traversal",
            TravOrder::RandOrder => "random-order traversal",
        };
        f.write_str(s)
    }
}
