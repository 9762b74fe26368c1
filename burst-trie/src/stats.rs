//! Statistics and introspection for burst tries.
//!
//! Statistics are useful for:
//! - Choosing a `container_max` for a workload
//! - Checking that removal keeps the trie compact
//! - Benchmark reporting

use crate::container::Container;
use crate::node::{AccessContainer, Child};

pub trait TrieStatsTrait {
    fn get_trie_stats(&self) -> TrieStats;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TrieStats {
    /// Items stored, counted structurally.
    pub num_values: usize,
    pub num_access_containers: usize,
    pub num_leaf_containers: usize,
    /// Occupied `single` slots across access and leaf containers.
    pub num_singles: usize,
    /// Containers on the longest root-to-leaf path, the root included.
    pub max_depth: usize,
    pub max_leaf_occupancy: usize,
    pub total_leaf_occupancy: usize,
    pub avg_leaf_occupancy: f64,
    /// Empty containers still attached below the root. Zero in a compact trie.
    pub num_empty_containers: usize,
}

pub(crate) fn update_trie_stats<T, C>(root: &AccessContainer<T, C>, stats: &mut TrieStats)
where
    C: Container<T>,
{
    let mut pending = vec![(root, 1usize)];
    while let Some((node, depth)) = pending.pop() {
        stats.num_access_containers += 1;
        stats.max_depth = stats.max_depth.max(depth);
        if node.single().is_some() {
            stats.num_values += 1;
            stats.num_singles += 1;
        }

        for (_, child) in node.children() {
            if child.is_empty() {
                stats.num_empty_containers += 1;
            }
            match child {
                Child::Access(inner) => pending.push((&**inner, depth + 1)),
                Child::Leaf(leaf) => {
                    let occupancy = leaf.len();
                    stats.num_leaf_containers += 1;
                    stats.num_values += occupancy;
                    stats.total_leaf_occupancy += occupancy;
                    stats.max_leaf_occupancy = stats.max_leaf_occupancy.max(occupancy);
                    stats.max_depth = stats.max_depth.max(depth + 1);
                    if leaf.single().is_some() {
                        stats.num_singles += 1;
                    }
                }
            }
        }
    }
}
