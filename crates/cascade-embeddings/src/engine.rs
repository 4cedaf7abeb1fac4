//! EmbeddingEngine: the entry point for cascade-embeddings.
//!
//! Wraps a provider with contract validation and the L1 cache.
//! Implements `IEmbeddingProvider`.

use cascade_core::config::EmbeddingConfig;
use cascade_core::errors::CascadeResult;
use cascade_core::models::{EmbeddedText, TierDims};
use cascade_core::traits::IEmbeddingProvider;
use cascade_observability::embedding_span;
use tracing::{debug, info};

use crate::cache::L1MemoryCache;
use crate::providers;
use crate::validation;

/// The main embedding engine.
///
/// Every result, cached or fresh, has passed `validate_embedded` against the
/// configured tiers, so callers never see a malformed bundle.
pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: L1MemoryCache,
    config: EmbeddingConfig,
}

impl EmbeddingEngine {
    /// Create an engine with the provider named in `config`.
    pub fn new(config: EmbeddingConfig) -> CascadeResult<Self> {
        let provider = providers::create_provider(&config)?;
        Ok(Self::with_provider(provider, config))
    }

    /// Create an engine around an externally supplied provider.
    ///
    /// The provider's output is still validated against `config`.
    pub fn with_provider(provider: Box<dyn IEmbeddingProvider>, config: EmbeddingConfig) -> Self {
        let cache = L1MemoryCache::new(config.l1_cache_size);

        info!(
            provider = provider.name(),
            full_dims = config.full_dims,
            medium_dims = config.medium_dims,
            nano_bits = config.nano_bits,
            "EmbeddingEngine initialized"
        );

        Self {
            provider,
            cache,
            config,
        }
    }

    /// Embed `text`, serving from cache when possible.
    ///
    /// # Errors
    /// `InvalidBundle` if the provider violates the bundle contract; any
    /// provider error is passed through.
    pub fn embed_text(&self, text: &str) -> CascadeResult<EmbeddedText> {
        let key = L1MemoryCache::key_for(text);
        if let Some(hit) = self.cache.get(&key) {
            debug!(hash = %key, "embedding cache hit");
            return Ok(hit);
        }

        let _span = embedding_span!(self.provider.name(), self.config.full_dims).entered();
        let embedded = self.provider.embed(text)?;
        validation::validate_embedded(
            &embedded,
            &self.config.tier_dims(),
            self.config.bit_threshold,
        )?;

        self.cache.insert(key, embedded.clone());
        Ok(embedded)
    }

    /// Get the active provider name.
    pub fn active_provider(&self) -> &str {
        self.provider.name()
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    /// Number of cached embeddings.
    pub fn cache_len(&self) -> u64 {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> CascadeResult<EmbeddedText> {
        self.embed_text(text)
    }

    fn dims(&self) -> TierDims {
        self.config.tier_dims()
    }

    fn name(&self) -> &str {
        self.provider.name()
    }

    fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}
