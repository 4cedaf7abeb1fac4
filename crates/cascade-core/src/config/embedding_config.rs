use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::TierDims;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "hashed".
    pub provider: String,
    /// Full-precision vector width.
    pub full_dims: usize,
    /// Graph-index tier width (prefix of full).
    pub medium_dims: usize,
    /// Intermediate tier width (prefix of medium).
    pub small_dims: usize,
    /// Bits in the tiny sketch.
    pub tiny_bits: usize,
    /// Bits in the nano prefilter sketch.
    pub nano_bits: usize,
    /// Per-token embedding width.
    pub token_dims: usize,
    /// A dimension sets its sketch bit when strictly above this value.
    pub bit_threshold: f32,
    /// L1 in-memory cache max entries.
    pub l1_cache_size: u64,
}

impl EmbeddingConfig {
    /// The tier widths this configuration describes.
    pub fn tier_dims(&self) -> TierDims {
        TierDims {
            full: self.full_dims,
            medium: self.medium_dims,
            small: self.small_dims,
            tiny_bits: self.tiny_bits,
            nano_bits: self.nano_bits,
            token: self.token_dims,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            full_dims: defaults::DEFAULT_FULL_DIMS,
            medium_dims: defaults::DEFAULT_MEDIUM_DIMS,
            small_dims: defaults::DEFAULT_SMALL_DIMS,
            tiny_bits: defaults::DEFAULT_TINY_BITS,
            nano_bits: defaults::DEFAULT_NANO_BITS,
            token_dims: defaults::DEFAULT_TOKEN_DIMS,
            bit_threshold: defaults::DEFAULT_BIT_THRESHOLD,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
        }
    }
}
