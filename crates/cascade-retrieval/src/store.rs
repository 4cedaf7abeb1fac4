//! In-memory chunk store keyed by id.

use std::collections::HashMap;
use std::sync::Arc;

use cascade_core::models::Chunk;

/// Owns every ingested chunk. Chunks are shared out as `Arc` so results can
/// outlive a later overwrite or clear.
#[derive(Debug, Default)]
pub struct ChunkStore {
    chunks: HashMap<String, Arc<Chunk>>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `chunk`, returning the chunk it replaced, if any.
    pub fn insert(&mut self, chunk: Chunk) -> Option<Arc<Chunk>> {
        self.chunks.insert(chunk.id.clone(), Arc::new(chunk))
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Chunk>> {
        self.chunks.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.chunks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Chunk>> {
        self.chunks.values()
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }
}
