use thiserror::Error;

use crate::order::TravOrder;

pub type Result<T> = std::result::Result<T, BurstTrieError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BurstTrieError {
    /// The item produced no byte projection.
    #[error("item has no byte projection")]
    Unprojectable,

    /// The key cannot be represented by the configured leaf container.
    #[error("key of {len} bytes exceeds the leaf container limit of {max} bytes")]
    KeyTooLong { len: usize, max: usize },

    /// The trie cannot be walked in this order.
    #[error("unsupported traversal: {0}")]
    UnsupportedOrder(TravOrder),

    /// A burst threshold of zero would burst every leaf on creation.
    #[error("container_max must be at least 1, got {0}")]
    InvalidContainerMax(usize),
}
