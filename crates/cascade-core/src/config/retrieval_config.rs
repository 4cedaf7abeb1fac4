use serde::{Deserialize, Serialize};

use super::defaults;

/// What a search does when its deadline passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlinePolicy {
    /// Rank whatever candidates were scored before the deadline.
    #[default]
    Partial,
    /// Fail with `RetrievalError::DeadlineExceeded`.
    Fail,
}

/// What ingest does when the chunk id is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with `CascadeError::DuplicateId`, leaving state untouched.
    Reject,
    /// Remove the old graph node, then store and index the new chunk.
    #[default]
    Replace,
}

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Stage 1: how many nearest nano sketches survive the prefilter.
    pub prefilter_limit: usize,
    /// Stage 2: beam width of the graph search.
    pub graph_ef: usize,
    /// Stage 2: layer the graph search stops descending at.
    pub graph_target_level: usize,
    /// Weight of the late-interaction score in the combined score.
    pub late_interaction_weight: f32,
    /// Weight of the full-precision cosine in the combined score.
    pub full_cosine_weight: f32,
    /// Result cap when the caller does not pass one.
    pub default_limit: usize,
    /// Optional per-query deadline in milliseconds.
    pub deadline_ms: Option<u64>,
    pub deadline_policy: DeadlinePolicy,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            prefilter_limit: defaults::DEFAULT_PREFILTER_LIMIT,
            graph_ef: defaults::DEFAULT_GRAPH_EF,
            graph_target_level: defaults::DEFAULT_GRAPH_TARGET_LEVEL,
            late_interaction_weight: defaults::DEFAULT_LATE_INTERACTION_WEIGHT,
            full_cosine_weight: defaults::DEFAULT_FULL_COSINE_WEIGHT,
            default_limit: defaults::DEFAULT_SEARCH_LIMIT,
            deadline_ms: None,
            deadline_policy: DeadlinePolicy::default(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}
