//! Combined scorer: late interaction plus full-precision cosine.

use std::sync::Arc;

use cascade_core::errors::{CascadeResult, RetrievalError};
use cascade_core::models::{Chunk, EmbeddedText, ScoreBreakdown, ScoreWeights, SearchResult};
use cascade_embeddings::{cosine_similarity, hamming_distance};

use crate::late_interaction::max_sim;

/// Weights must be finite, non-negative, and not both zero.
pub fn validate_weights(weights: &ScoreWeights) -> CascadeResult<()> {
    let ScoreWeights {
        late_interaction,
        full_cosine,
    } = *weights;
    let ok = |w: f32| w.is_finite() && w >= 0.0;
    if !ok(late_interaction) || !ok(full_cosine) {
        return Err(RetrievalError::InvalidWeights {
            reason: format!(
                "weights must be finite and non-negative, got {late_interaction}/{full_cosine}"
            ),
        }
        .into());
    }
    if late_interaction == 0.0 && full_cosine == 0.0 {
        return Err(RetrievalError::InvalidWeights {
            reason: "at least one weight must be positive".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Score one candidate chunk against the embedded query.
pub fn score_candidate(
    query: &EmbeddedText,
    chunk: &Arc<Chunk>,
    weights: &ScoreWeights,
) -> SearchResult {
    let breakdown = ScoreBreakdown {
        binary: hamming_distance(query.bundle.nano, chunk.embeddings.nano),
        late_interaction: max_sim(&query.tokens, &chunk.tokens),
        final_cosine: cosine_similarity(&query.bundle.full, &chunk.embeddings.full),
    };
    SearchResult {
        chunk: Arc::clone(chunk),
        score: breakdown.combined(weights),
        breakdown,
    }
}

/// Sort by combined score descending and keep the first `limit`.
///
/// The sort is stable: equal scores keep their candidate order.
pub fn rank(mut results: Vec<SearchResult>, limit: usize) -> Vec<SearchResult> {
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(limit);
    results
}
