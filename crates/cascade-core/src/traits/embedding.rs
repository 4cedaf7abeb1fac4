use crate::errors::CascadeResult;
use crate::models::{EmbeddedText, TierDims};

/// Vector representation provider.
///
/// Implementations must be deterministic: embedding the same text twice
/// yields bit-identical output. Ingest and query both go through the same
/// provider, so sketches and token vectors line up across the two.
pub trait IEmbeddingProvider: Send + Sync {
    /// Produce the bundle and token data for one text.
    fn embed(&self, text: &str) -> CascadeResult<EmbeddedText>;

    /// Embed a batch of texts.
    fn embed_batch(&self, texts: &[String]) -> CascadeResult<Vec<EmbeddedText>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Tier widths of the bundles this provider produces.
    fn dims(&self) -> TierDims;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
