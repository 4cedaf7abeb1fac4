use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Chunk;
use crate::config::{defaults, RetrievalConfig};

/// Relative weights of the two precise signals in the combined score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub late_interaction: f32,
    pub full_cosine: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            late_interaction: defaults::DEFAULT_LATE_INTERACTION_WEIGHT,
            full_cosine: defaults::DEFAULT_FULL_COSINE_WEIGHT,
        }
    }
}

impl From<&RetrievalConfig> for ScoreWeights {
    fn from(config: &RetrievalConfig) -> Self {
        Self {
            late_interaction: config.late_interaction_weight,
            full_cosine: config.full_cosine_weight,
        }
    }
}

/// Per-signal scores behind a result. The combined score is derived from these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Hamming distance between nano sketches.
    pub binary: u32,
    pub late_interaction: f32,
    pub final_cosine: f32,
}

impl ScoreBreakdown {
    pub fn combined(&self, weights: &ScoreWeights) -> f32 {
        weights.late_interaction * self.late_interaction + weights.full_cosine * self.final_cosine
    }
}

/// One ranked hit.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub chunk: Arc<Chunk>,
    pub score: f32,
    pub breakdown: ScoreBreakdown,
}

impl SearchResult {
    pub fn id(&self) -> &str {
        &self.chunk.id
    }
}
