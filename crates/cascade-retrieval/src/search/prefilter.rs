//! Stage 1: linear Hamming scan over nano sketches.

use std::sync::Arc;

use cascade_core::models::Chunk;
use cascade_embeddings::hamming_distance;

/// A chunk kept by the prefilter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefilterHit {
    pub id: String,
    pub distance: u32,
}

/// The `limit` chunks whose nano sketch is nearest to `query_nano`.
///
/// Equal distances are ordered by id, so the result does not depend on the
/// store's iteration order.
pub fn binary_prefilter<'a>(
    query_nano: u32,
    chunks: impl IntoIterator<Item = &'a Arc<Chunk>>,
    limit: usize,
) -> Vec<PrefilterHit> {
    let mut hits: Vec<PrefilterHit> = chunks
        .into_iter()
        .map(|c| PrefilterHit {
            id: c.id.clone(),
            distance: hamming_distance(query_nano, c.embeddings.nano),
        })
        .collect();
    hits.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.id.cmp(&b.id)));
    hits.truncate(limit);
    hits
}
