//! Provider registry.
//!
//! Only the deterministic `hashed` provider ships in-tree; model-backed
//! providers plug in through `IEmbeddingProvider` and
//! `EmbeddingEngine::with_provider`.

pub mod hashed_provider;
pub mod token_embedder;

pub use hashed_provider::HashedProvider;
pub use token_embedder::TokenEmbedder;

use cascade_core::config::EmbeddingConfig;
use cascade_core::errors::{CascadeResult, EmbeddingError};
use cascade_core::traits::IEmbeddingProvider;
use tracing::info;

/// Create the configured provider, returning it boxed.
///
/// # Errors
/// `ProviderUnavailable` for an unknown provider name, `InvalidTierLayout`
/// if the configured tiers are inconsistent.
pub fn create_provider(config: &EmbeddingConfig) -> CascadeResult<Box<dyn IEmbeddingProvider>> {
    match config.provider.as_str() {
        "hashed" => {
            let provider = HashedProvider::new(config.tier_dims(), config.bit_threshold)?;
            info!(provider = "hashed", full_dims = config.full_dims, "embedding provider loaded");
            Ok(Box::new(provider))
        }
        other => Err(EmbeddingError::ProviderUnavailable {
            provider: other.to_string(),
        }
        .into()),
    }
}

/// Lowercase a whitespace token and trim non-alphanumeric characters from
/// both ends. Inner punctuation ("self-aware") is kept.
pub(crate) fn normalize_term(token: &str) -> String {
    token
        .to_lowercase()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over `bytes`.
pub(crate) fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |h, b| {
        (h ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}

/// FNV-1a over `bytes`, then one more round mixing in `salt`.
pub(crate) fn fnv1a_salted(bytes: &[u8], salt: u64) -> u64 {
    (fnv1a(bytes) ^ salt).wrapping_mul(FNV_PRIME)
}
