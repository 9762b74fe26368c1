//! A burst trie: an ordered in-memory index over byte-projectable keys.
//!
//! Keys are dispatched one byte at a time through 256-way access containers down to small leaf
//! containers, which burst into a new level once they outgrow a configurable threshold.

pub mod config;
pub mod container;
pub mod error;
pub mod iter;
pub mod keys;
pub mod map;
pub mod mapping;
pub mod node;
pub mod order;
pub mod stats;
pub mod tree;
pub mod utils;

pub use crate::config::{BurstConfig, DEFAULT_CONTAINER_MAX};
pub use crate::container::Container;
pub use crate::container::compact::CompactArray;
pub use crate::container::list::ListContainer;
pub use crate::error::{BurstTrieError, Result};
pub use crate::keys::ToBytes;
pub use crate::map::{BurstMap, Entry};
pub use crate::order::TravOrder;
pub use crate::stats::{TrieStats, TrieStatsTrait};
pub use crate::tree::BurstTrie;
