use crate::errors::CascadeResult;
use crate::models::{ChunkInput, IndexStats, SearchResult};

/// Ingest-and-search surface of a retrieval engine.
pub trait IRetriever: Send + Sync {
    /// Embed, store, and index one chunk.
    fn ingest(&self, input: ChunkInput) -> CascadeResult<()>;

    /// Rank stored chunks against `query`, returning at most `limit` results.
    fn search(&self, query: &str, limit: usize) -> CascadeResult<Vec<SearchResult>>;

    /// Drop every chunk and reset the graph.
    fn clear(&self) -> CascadeResult<()>;

    fn stats(&self) -> CascadeResult<IndexStats>;
}
