use serde::{Deserialize, Serialize};

use super::defaults;

/// HNSW graph index configuration. Immutable for the lifetime of an index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Max neighbors per node per layer.
    pub m: usize,
    /// Beam width used while linking a new node.
    pub ef_construction: usize,
    /// Level-decay factor: level = floor(-ln(U) * level_factor).
    pub level_factor: f64,
    /// Cap on a drawn level.
    pub max_level: usize,
    /// Seed for level assignment. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            m: defaults::DEFAULT_M,
            ef_construction: defaults::DEFAULT_EF_CONSTRUCTION,
            level_factor: defaults::DEFAULT_LEVEL_FACTOR,
            max_level: defaults::DEFAULT_MAX_LEVEL,
            seed: None,
        }
    }
}
