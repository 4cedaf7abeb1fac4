//! Matryoshka tier management and the dense similarity kernel.
//!
//! Every continuous tier is a strict prefix of `full`. Prefixes are taken
//! as-is (no re-normalization) so `medium == full[..medium_dims]` holds
//! bit for bit.

use std::ops::Range;

use cascade_core::errors::{CascadeResult, EmbeddingError};
use cascade_core::models::TierDims;

/// Take the first `target_dims` entries of an embedding.
///
/// # Errors
/// Returns `DimensionMismatch` if `target_dims > embedding.len()`.
pub fn prefix(embedding: &[f32], target_dims: usize) -> CascadeResult<Vec<f32>> {
    if target_dims > embedding.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: target_dims,
            actual: embedding.len(),
        }
        .into());
    }
    Ok(embedding[..target_dims].to_vec())
}

/// Split `[0, full)` into the bands between consecutive tier boundaries.
///
/// Boundaries are `nano_bits, tiny_bits, small, medium, full`. Empty bands
/// (equal consecutive boundaries) are dropped.
///
/// # Errors
/// Returns `InvalidTierLayout` if the boundaries are not non-decreasing or
/// `full` is zero.
pub fn tier_bands(dims: &TierDims) -> CascadeResult<Vec<Range<usize>>> {
    if dims.full == 0 {
        return Err(EmbeddingError::InvalidTierLayout {
            reason: "full tier must have at least one dimension".to_string(),
        }
        .into());
    }
    let boundaries = [
        0,
        dims.nano_bits,
        dims.tiny_bits,
        dims.small,
        dims.medium,
        dims.full,
    ];
    if boundaries.windows(2).any(|w| w[0] > w[1]) {
        return Err(EmbeddingError::InvalidTierLayout {
            reason: format!("tier boundaries must be non-decreasing: {boundaries:?}"),
        }
        .into());
    }
    Ok(boundaries
        .windows(2)
        .filter(|w| w[0] < w[1])
        .map(|w| w[0]..w[1])
        .collect())
}

/// Cosine similarity over the shared prefix of `a` and `b`.
///
/// Both norms are restricted to that same prefix. Returns `0.0` when either
/// restricted norm is zero. The result is clamped to `[-1, 1]`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a[..n].iter().zip(&b[..n]) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

/// `1 - cosine_similarity`. The distance the graph index orders by.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    1.0 - cosine_similarity(a, b)
}
