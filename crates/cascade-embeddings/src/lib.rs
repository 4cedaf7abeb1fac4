//! # cascade-embeddings
//!
//! Multi-precision embedding generation for the retrieval cascade.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingEngine (IEmbeddingProvider)
//! ├── Provider (IEmbeddingProvider)
//! │   └── HashedProvider (deterministic, lexical placeholder)
//! │       └── TokenEmbedder (character-trigram token vectors)
//! ├── L1MemoryCache (moka, keyed by blake3 of the text)
//! └── Validation (bundle + token contract checks)
//!
//! Primitives
//! ├── matryoshka (prefix tiers, cosine similarity)
//! └── quantization (threshold sketches, Hamming distance)
//! ```

pub mod cache;
pub mod engine;
pub mod matryoshka;
pub mod providers;
pub mod quantization;
pub mod validation;

pub use cache::L1MemoryCache;
pub use engine::EmbeddingEngine;
pub use matryoshka::{cosine_distance, cosine_similarity};
pub use providers::{HashedProvider, TokenEmbedder};
pub use quantization::{hamming_distance, BitSketch};
