use serde::{Deserialize, Serialize};

/// Snapshot of engine size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub chunk_count: usize,
    pub graph_nodes: usize,
    pub max_layer: usize,
    /// Entries held by the embedding L1 cache.
    pub cached_embeddings: u64,
}
