//! # cascade-retrieval
//!
//! The retrieval cascade over a chunk store and an HNSW graph.
//!
//! ```text
//! query text ─► provider ─► { nano, medium, full, tokens }
//!   Stage 1  nano Hamming prefilter over the whole store
//!   Stage 2  HNSW search over medium vectors
//!            union of both candidate lists
//!   Stage 3  late interaction (token max-sim)
//!   Stage 4  full-precision cosine
//!            weighted sum ─► stable sort ─► truncate
//! ```

pub mod engine;
pub mod late_interaction;
pub mod ranking;
pub mod search;
pub mod store;

pub use engine::RetrievalEngine;
pub use late_interaction::LateInteractionScorer;
pub use store::ChunkStore;
