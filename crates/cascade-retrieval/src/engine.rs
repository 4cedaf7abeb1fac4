//! RetrievalEngine: implements IRetriever, owns the chunk store and the graph,
//! and drives the four-stage pipeline.
//!
//! Lock order is index then store, for readers and writers alike.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use cascade_core::config::{CascadeConfig, DeadlinePolicy, DuplicatePolicy, RetrievalConfig};
use cascade_core::errors::{CascadeError, CascadeResult, RetrievalError};
use cascade_core::models::{Chunk, ChunkInput, IndexStats, ScoreWeights, SearchResult};
use cascade_core::traits::{IEmbeddingProvider, IRetriever};
use cascade_embeddings::EmbeddingEngine;
use cascade_index::HnswIndex;
use cascade_observability::{ingest_span, search_span};
use tracing::{debug, info, warn};

use crate::late_interaction::LateInteractionScorer;
use crate::ranking;
use crate::search;
use crate::store::ChunkStore;

/// The main retrieval engine.
pub struct RetrievalEngine {
    embeddings: EmbeddingEngine,
    index: RwLock<HnswIndex>,
    store: RwLock<ChunkStore>,
    config: RetrievalConfig,
    weights: ScoreWeights,
}

impl RetrievalEngine {
    /// Build an engine with the provider named in `config.embedding`.
    ///
    /// # Errors
    /// `ConfigError` if `config` fails validation; provider errors pass through.
    pub fn new(config: &CascadeConfig) -> CascadeResult<Self> {
        config.validate()?;
        let embeddings = EmbeddingEngine::new(config.embedding.clone())?;
        Self::assemble(embeddings, config)
    }

    /// Build an engine around an externally supplied provider. Its output is
    /// validated against `config.embedding` on every call.
    pub fn with_provider(
        provider: Box<dyn IEmbeddingProvider>,
        config: &CascadeConfig,
    ) -> CascadeResult<Self> {
        config.validate()?;
        let embeddings = EmbeddingEngine::with_provider(provider, config.embedding.clone());
        Self::assemble(embeddings, config)
    }

    fn assemble(embeddings: EmbeddingEngine, config: &CascadeConfig) -> CascadeResult<Self> {
        let weights = ScoreWeights::from(&config.retrieval);
        ranking::validate_weights(&weights)?;
        let index = HnswIndex::new(config.index.clone())?;

        info!(
            provider = embeddings.active_provider(),
            m = config.index.m,
            ef_construction = config.index.ef_construction,
            prefilter_limit = config.retrieval.prefilter_limit,
            graph_ef = config.retrieval.graph_ef,
            "RetrievalEngine initialized"
        );

        Ok(Self {
            embeddings,
            index: RwLock::new(index),
            store: RwLock::new(ChunkStore::new()),
            config: config.retrieval.clone(),
            weights,
        })
    }

    /// Replace the score weights.
    ///
    /// # Errors
    /// `InvalidWeights` if either weight is negative or non-finite, or both are zero.
    pub fn with_weights(mut self, weights: ScoreWeights) -> CascadeResult<Self> {
        ranking::validate_weights(&weights)?;
        self.weights = weights;
        Ok(self)
    }

    /// Embed, store, and index one chunk.
    ///
    /// An id already present is replaced or rejected per the configured
    /// duplicate policy. Under `Replace` the old graph node is unlinked
    /// before the new vector goes in.
    ///
    /// # Errors
    /// `DuplicateId` under `Reject`; `InvalidBundle` if the provider breaks
    /// its contract; `DimensionMismatch` if the medium width changed.
    pub fn ingest(&self, input: ChunkInput) -> CascadeResult<()> {
        let _span = ingest_span!(input.id).entered();

        let embedded = self.embeddings.embed_text(&input.content)?;
        let chunk = Chunk::from_parts(input, embedded);

        let mut index = self.write_index()?;
        let mut store = self.write_store()?;

        if store.contains(&chunk.id) {
            match self.config.duplicate_policy {
                DuplicatePolicy::Reject => {
                    warn!(id = %chunk.id, "duplicate ingest rejected");
                    return Err(CascadeError::DuplicateId { id: chunk.id });
                }
                DuplicatePolicy::Replace => {
                    debug!(id = %chunk.id, "replacing existing chunk and graph node");
                }
            }
        }

        let level = index.insert(chunk.id.clone(), chunk.embeddings.medium.clone())?;
        debug!(id = %chunk.id, level, tokens = chunk.tokens.len(), "chunk ingested");
        store.insert(chunk);
        Ok(())
    }

    /// Ingest in order, stopping at the first error. Returns how many
    /// chunks were ingested.
    pub fn ingest_batch(
        &self,
        inputs: impl IntoIterator<Item = ChunkInput>,
    ) -> CascadeResult<usize> {
        let mut count = 0;
        for input in inputs {
            self.ingest(input)?;
            count += 1;
        }
        info!(count, "batch ingested");
        Ok(count)
    }

    /// Rank stored chunks against `query` through all four stages.
    ///
    /// Returns an empty list for a blank query, an empty corpus, or a zero
    /// limit.
    ///
    /// # Errors
    /// `DeadlineExceeded` when a deadline is configured with the `Fail`
    /// policy and runs out. Under `Partial` the chunks scored so far are
    /// ranked and returned instead.
    pub fn ultra_search(&self, query: &str, limit: usize) -> CascadeResult<Vec<SearchResult>> {
        let _span = search_span!(query, limit).entered();

        if query.trim().is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        if self.read_store()?.is_empty() {
            debug!("empty corpus");
            return Ok(Vec::new());
        }

        let deadline = Deadline::start(self.config.deadline_ms);
        let embedded = self.embeddings.embed_text(query)?;

        let index = self.read_index()?;
        let store = self.read_store()?;

        // Stage 1
        let prefiltered = search::binary_prefilter(
            embedded.bundle.nano,
            store.iter(),
            self.config.prefilter_limit,
        );
        debug!(candidates = prefiltered.len(), "binary prefilter complete");
        if self.deadline_expired(&deadline, "prefilter")? {
            return Ok(Vec::new());
        }

        // Stage 2
        let graph_hits = index.search(
            &embedded.bundle.medium,
            self.config.graph_ef,
            self.config.graph_target_level,
        );
        debug!(candidates = graph_hits.len(), "graph search complete");
        if self.deadline_expired(&deadline, "graph")? {
            return Ok(Vec::new());
        }

        let candidates = search::merge_candidates(&prefiltered, &graph_hits);

        // Stages 3 and 4
        let mut scored = Vec::with_capacity(candidates.len());
        for id in &candidates {
            let Some(chunk) = store.get(id) else {
                continue;
            };
            scored.push(ranking::score_candidate(&embedded, chunk, &self.weights));
            if self.deadline_expired(&deadline, "scoring")? {
                return Ok(ranking::rank(scored, limit));
            }
        }

        let results = ranking::rank(scored, limit);
        info!(
            prefiltered = prefiltered.len(),
            graph = graph_hits.len(),
            candidates = candidates.len(),
            returned = results.len(),
            "search complete"
        );
        Ok(results)
    }

    /// [`ultra_search`](Self::ultra_search) with the configured default limit.
    pub fn search_default(&self, query: &str) -> CascadeResult<Vec<SearchResult>> {
        self.ultra_search(query, self.config.default_limit)
    }

    /// Drop every chunk and replace the graph with an empty one built from
    /// the same index configuration.
    pub fn clear(&self) -> CascadeResult<()> {
        let mut index = self.write_index()?;
        let mut store = self.write_store()?;
        *index = index.empty_like();
        store.clear();
        info!("retrieval engine cleared");
        Ok(())
    }

    /// Fetch a stored chunk.
    pub fn get(&self, id: &str) -> CascadeResult<Arc<Chunk>> {
        self.read_store()?
            .get(id)
            .cloned()
            .ok_or_else(|| CascadeError::ChunkNotFound { id: id.to_string() })
    }

    pub fn stats(&self) -> CascadeResult<IndexStats> {
        let index = self.read_index()?;
        let store = self.read_store()?;
        Ok(IndexStats {
            chunk_count: store.len(),
            graph_nodes: index.len(),
            max_layer: index.max_layer(),
            cached_embeddings: self.embeddings.cache_len(),
        })
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    pub fn embeddings(&self) -> &EmbeddingEngine {
        &self.embeddings
    }

    /// Scorer for raw query text, sized to the token width used at ingest.
    pub fn late_interaction_scorer(&self) -> LateInteractionScorer {
        LateInteractionScorer::new(self.embeddings.config().token_dims)
    }

    /// Run `f` with shared access to the graph.
    pub fn with_index<T>(&self, f: impl FnOnce(&HnswIndex) -> T) -> CascadeResult<T> {
        let index = self.read_index()?;
        Ok(f(&index))
    }

    /// `Ok(true)` if the deadline ran out under the `Partial` policy.
    fn deadline_expired(&self, deadline: &Deadline, stage: &str) -> CascadeResult<bool> {
        let Some(elapsed) = deadline.expired() else {
            return Ok(false);
        };
        let elapsed_ms = elapsed.as_millis() as u64;
        let budget_ms = deadline.budget_ms();
        match self.config.deadline_policy {
            DeadlinePolicy::Fail => {
                warn!(stage, elapsed_ms, budget_ms, "search deadline exceeded");
                Err(RetrievalError::DeadlineExceeded {
                    elapsed_ms,
                    budget_ms,
                }
                .into())
            }
            DeadlinePolicy::Partial => {
                warn!(
                    stage,
                    elapsed_ms,
                    budget_ms,
                    "search deadline exceeded, returning partial ranking"
                );
                Ok(true)
            }
        }
    }

    fn read_index(&self) -> CascadeResult<RwLockReadGuard<'_, HnswIndex>> {
        self.index.read().map_err(|_| poisoned("index"))
    }

    fn write_index(&self) -> CascadeResult<RwLockWriteGuard<'_, HnswIndex>> {
        self.index.write().map_err(|_| poisoned("index"))
    }

    fn read_store(&self) -> CascadeResult<RwLockReadGuard<'_, ChunkStore>> {
        self.store.read().map_err(|_| poisoned("chunk store"))
    }

    fn write_store(&self) -> CascadeResult<RwLockWriteGuard<'_, ChunkStore>> {
        self.store.write().map_err(|_| poisoned("chunk store"))
    }
}

fn poisoned(resource: &str) -> CascadeError {
    CascadeError::LockPoisoned {
        resource: resource.to_string(),
    }
}

/// Optional wall-clock budget for one search.
struct Deadline {
    started: Instant,
    budget: Option<Duration>,
}

impl Deadline {
    fn start(budget_ms: Option<u64>) -> Self {
        Self {
            started: Instant::now(),
            budget: budget_ms.map(Duration::from_millis),
        }
    }

    /// Elapsed time, if a budget is set and used up.
    fn expired(&self) -> Option<Duration> {
        let budget = self.budget?;
        let elapsed = self.started.elapsed();
        (elapsed >= budget).then_some(elapsed)
    }

    fn budget_ms(&self) -> u64 {
        self.budget.map(|b| b.as_millis() as u64).unwrap_or(0)
    }
}

impl IRetriever for RetrievalEngine {
    fn ingest(&self, input: ChunkInput) -> CascadeResult<()> {
        RetrievalEngine::ingest(self, input)
    }

    fn search(&self, query: &str, limit: usize) -> CascadeResult<Vec<SearchResult>> {
        self.ultra_search(query, limit)
    }

    fn clear(&self) -> CascadeResult<()> {
        RetrievalEngine::clear(self)
    }

    fn stats(&self) -> CascadeResult<IndexStats> {
        RetrievalEngine::stats(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_core::config::EmbeddingConfig;

    fn config() -> CascadeConfig {
        let mut config = CascadeConfig::default();
        config.index.seed = Some(3);
        config
    }

    fn engine() -> RetrievalEngine {
        RetrievalEngine::new(&config()).unwrap()
    }

    #[test]
    fn blank_query_and_empty_corpus_return_nothing() {
        let engine = engine();
        assert!(engine.ultra_search("anything", 5).unwrap().is_empty());
        engine.ingest(ChunkInput::new("a", "graph search")).unwrap();
        assert!(engine.ultra_search("   ", 5).unwrap().is_empty());
        assert!(engine.ultra_search("graph", 0).unwrap().is_empty());
    }

    #[test]
    fn ingest_updates_stats() {
        let engine = engine();
        engine.ingest(ChunkInput::new("a", "graph search")).unwrap();
        engine.ingest(ChunkInput::new("b", "binary sketch")).unwrap();
        let stats = engine.stats().unwrap();
        assert_eq!(stats.chunk_count, 2);
        assert_eq!(stats.graph_nodes, 2);
    }

    #[test]
    fn graph_holds_medium_vectors() {
        let engine = engine();
        engine.ingest(ChunkInput::new("a", "graph search")).unwrap();
        let width = engine
            .with_index(|index| index.node("a").map(|n| n.vector().len()))
            .unwrap();
        assert_eq!(width, Some(engine.embeddings().config().medium_dims));
    }

    #[test]
    fn replace_policy_keeps_one_node_per_id() {
        let engine = engine();
        engine.ingest(ChunkInput::new("a", "old text")).unwrap();
        engine.ingest(ChunkInput::new("a", "new text")).unwrap();
        assert_eq!(engine.get("a").unwrap().content, "new text");
        let stats = engine.stats().unwrap();
        assert_eq!(stats.chunk_count, 1);
        assert_eq!(stats.graph_nodes, 1);
    }

    #[test]
    fn reject_policy_leaves_state_untouched() {
        let mut config = config();
        config.retrieval.duplicate_policy = DuplicatePolicy::Reject;
        let engine = RetrievalEngine::new(&config).unwrap();
        engine.ingest(ChunkInput::new("a", "original")).unwrap();
        let err = engine.ingest(ChunkInput::new("a", "changed")).unwrap_err();
        assert!(matches!(err, CascadeError::DuplicateId { ref id } if id == "a"));
        assert_eq!(engine.get("a").unwrap().content, "original");
    }

    #[test]
    fn zero_deadline_fails_under_fail_policy() {
        let mut config = config();
        config.retrieval.deadline_ms = Some(0);
        config.retrieval.deadline_policy = DeadlinePolicy::Fail;
        let engine = RetrievalEngine::new(&config).unwrap();
        engine.ingest(ChunkInput::new("a", "graph search")).unwrap();
        let err = engine.ultra_search("graph", 5).unwrap_err();
        assert!(matches!(
            err,
            CascadeError::RetrievalError(RetrievalError::DeadlineExceeded { budget_ms: 0, .. })
        ));
    }

    #[test]
    fn zero_deadline_is_empty_under_partial_policy() {
        let mut config = config();
        config.retrieval.deadline_ms = Some(0);
        let engine = RetrievalEngine::new(&config).unwrap();
        engine.ingest(ChunkInput::new("a", "graph search")).unwrap();
        assert!(engine.ultra_search("graph", 5).unwrap().is_empty());
    }

    #[test]
    fn late_interaction_scorer_agrees_with_search_breakdown() {
        let engine = engine();
        engine
            .ingest(ChunkInput::new("a", "layered graph search with beams"))
            .unwrap();
        let query = "graph beams";
        let results = engine.ultra_search(query, 1).unwrap();
        let scorer = engine.late_interaction_scorer();
        let direct = scorer.score(query, &engine.get("a").unwrap().tokens);
        assert!((direct - results[0].breakdown.late_interaction).abs() < 1e-6);
        assert!(direct > 0.0);
    }

    #[test]
    fn late_interaction_scorer_uses_configured_token_width() {
        let mut config = config();
        config.embedding.token_dims = 16;
        let engine = RetrievalEngine::new(&config).unwrap();
        engine.ingest(ChunkInput::new("a", "graph search")).unwrap();
        let chunk = engine.get("a").unwrap();
        assert!(chunk.tokens.embeddings.iter().all(|e| e.len() == 16));
        let score = engine.late_interaction_scorer().score("graph search", &chunk.tokens);
        assert!((score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn unknown_chunk_is_not_found() {
        let err = engine().get("ghost").unwrap_err();
        assert!(matches!(err, CascadeError::ChunkNotFound { .. }));
    }

    #[test]
    fn invalid_weights_are_rejected() {
        let zero = ScoreWeights {
            late_interaction: 0.0,
            full_cosine: 0.0,
        };
        assert!(engine().with_weights(zero).is_err());
    }

    #[test]
    fn unknown_provider_fails_construction() {
        let mut config = config();
        config.embedding = EmbeddingConfig {
            provider: "remote".to_string(),
            ..Default::default()
        };
        assert!(RetrievalEngine::new(&config).is_err());
    }

    #[test]
    fn usable_through_the_trait_object() {
        let engine: Box<dyn IRetriever> = Box::new(engine());
        engine.ingest(ChunkInput::new("a", "graph search")).unwrap();
        assert_eq!(engine.search("graph", 5).unwrap().len(), 1);
        engine.clear().unwrap();
        assert_eq!(engine.stats().unwrap().chunk_count, 0);
    }
}
