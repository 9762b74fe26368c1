use crate::error::{BurstTrieError, Result};

/// Leaf occupancy above which a leaf container bursts, unless configured otherwise.
pub const DEFAULT_CONTAINER_MAX: usize = 150;

/// Tuning knobs of a [`BurstTrie`](crate::tree::BurstTrie).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstConfig {
    container_max: usize,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            container_max: DEFAULT_CONTAINER_MAX,
        }
    }
}

impl BurstConfig {
    /// A config whose leaves burst once they hold more than `container_max` items.
    ///
    /// Small thresholds give a deep trie of short scans; large ones give a shallow trie with
    /// longer linear scans in each leaf.
    pub fn new(container_max: usize) -> Result<Self> {
        Self::default().with_container_max(container_max)
    }

    pub fn with_container_max(mut self, container_max: usize) -> Result<Self> {
        if container_max == 0 {
            return Err(BurstTrieError::InvalidContainerMax(container_max));
        }
        self.container_max = container_max;
        Ok(self)
    }

    #[inline]
    pub fn container_max(&self) -> usize {
        self.container_max
    }
}
