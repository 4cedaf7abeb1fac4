//! Deterministic lexical provider.
//!
//! Not semantic: two texts are close only when they share terms. Stands in
//! for a trained embedding model wherever reproducibility matters more than
//! quality (tests, air-gapped setups, fixtures).

use std::ops::Range;

use cascade_core::errors::CascadeResult;
use cascade_core::models::{EmbeddedText, EmbeddingBundle, TierDims, TokenData};
use cascade_core::traits::IEmbeddingProvider;

use super::{fnv1a_salted, normalize_term, TokenEmbedder};
use crate::matryoshka;
use crate::quantization::{threshold_bits, threshold_nano};

/// Hashes every term into one bucket of every tier band.
///
/// The bands are the gaps between tier boundaries (`[0, nano)`,
/// `[nano, tiny)`, ... `[medium, full)`), so each prefix tier carries the
/// whole term signal at a coarser resolution. A bucket hit `n` times holds
/// `1 - e^-n`, which keeps every value in `[0, 1]`.
pub struct HashedProvider {
    dims: TierDims,
    bands: Vec<Range<usize>>,
    threshold: f32,
    token_embedder: TokenEmbedder,
}

impl HashedProvider {
    /// # Errors
    /// `InvalidTierLayout` if the tier widths are not nested.
    pub fn new(dims: TierDims, threshold: f32) -> CascadeResult<Self> {
        let bands = matryoshka::tier_bands(&dims)?;
        Ok(Self {
            dims,
            bands,
            threshold,
            token_embedder: TokenEmbedder::new(dims.token),
        })
    }

    fn full_vector(&self, text: &str) -> Vec<f32> {
        let mut counts = vec![0u32; self.dims.full];
        for term in text.split_whitespace().map(normalize_term) {
            if term.is_empty() {
                continue;
            }
            for (band_idx, band) in self.bands.iter().enumerate() {
                let width = (band.end - band.start) as u64;
                let h = fnv1a_salted(term.as_bytes(), band_idx as u64);
                counts[band.start + (h % width) as usize] += 1;
            }
        }
        counts
            .into_iter()
            .map(|n| 1.0 - (-(n as f32)).exp())
            .collect()
    }

    fn bundle(&self, text: &str) -> CascadeResult<EmbeddingBundle> {
        let full = self.full_vector(text);
        Ok(EmbeddingBundle {
            medium: matryoshka::prefix(&full, self.dims.medium)?,
            small: matryoshka::prefix(&full, self.dims.small)?,
            tiny: threshold_bits(&full, self.dims.tiny_bits, self.threshold),
            nano: threshold_nano(&full, self.dims.nano_bits, self.threshold),
            full,
        })
    }

    fn token_data(&self, text: &str) -> TokenData {
        let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let embeddings = tokens
            .iter()
            .map(|t| self.token_embedder.embed_token(t))
            .collect();
        let weights = vec![1.0; tokens.len()];
        TokenData {
            tokens,
            embeddings,
            weights,
        }
    }
}

impl IEmbeddingProvider for HashedProvider {
    fn embed(&self, text: &str) -> CascadeResult<EmbeddedText> {
        Ok(EmbeddedText {
            bundle: self.bundle(text)?,
            tokens: self.token_data(text),
        })
    }

    fn dims(&self) -> TierDims {
        self.dims
    }

    fn name(&self) -> &str {
        "hashed"
    }

    fn is_available(&self) -> bool {
        true
    }
}
