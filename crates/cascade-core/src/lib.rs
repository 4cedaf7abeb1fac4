//! # cascade-core
//!
//! Foundation crate for the Cascade retrieval engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CascadeConfig;
pub use errors::{CascadeError, CascadeResult};
pub use models::{
    Chunk, ChunkInput, ChunkMetadata, EmbeddedText, EmbeddingBundle, IndexStats, ScoreBreakdown,
    SearchResult, TierDims, TokenData,
};
