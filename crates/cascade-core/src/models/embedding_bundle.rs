use serde::{Deserialize, Serialize};

/// Tier widths of an embedding bundle.
///
/// `nano_bits <= tiny_bits <= small <= medium <= full`; every continuous tier
/// is a prefix of `full` and both sketches threshold a prefix of `full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDims {
    pub full: usize,
    pub medium: usize,
    pub small: usize,
    pub tiny_bits: usize,
    pub nano_bits: usize,
    /// Per-token embedding width.
    pub token: usize,
}

/// Multi-precision ("Matryoshka") representation of one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingBundle {
    /// Highest precision; used for final reranking.
    pub full: Vec<f32>,
    /// Prefix of `full`; the graph-index tier.
    pub medium: Vec<f32>,
    /// Prefix of `full`; reserved for intermediate tiers.
    pub small: Vec<f32>,
    /// Bit `i` set iff `full[i] > threshold`, for `i < tiny_bits`.
    pub tiny: u64,
    /// Bit `i` set iff `full[i] > threshold`, for `i < nano_bits`.
    pub nano: u32,
}

/// Token-level representation used by late interaction.
///
/// `tokens`, `embeddings`, and `weights` are parallel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenData {
    pub tokens: Vec<String>,
    pub embeddings: Vec<Vec<f32>>,
    /// Non-negative importance per token.
    pub weights: Vec<f32>,
}

impl TokenData {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Everything a provider produces for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedText {
    pub bundle: EmbeddingBundle,
    pub tokens: TokenData,
}
