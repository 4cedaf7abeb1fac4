mod chunk;
mod embedding_bundle;
mod search_result;
mod stats;

pub use chunk::{Chunk, ChunkInput, ChunkMetadata};
pub use embedding_bundle::{EmbeddedText, EmbeddingBundle, TierDims, TokenData};
pub use search_result::{ScoreBreakdown, ScoreWeights, SearchResult};
pub use stats::IndexStats;
