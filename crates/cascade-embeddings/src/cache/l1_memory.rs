//! L1 in-memory cache using moka.
//!
//! Keys are blake3 hashes of the embedded text. Sound only because providers
//! are deterministic: a hit is exactly what a fresh call would return.

use std::time::Duration;

use cascade_core::models::EmbeddedText;
use moka::sync::Cache;

/// L1 in-memory embedding cache.
pub struct L1MemoryCache {
    cache: Cache<String, EmbeddedText>,
}

impl L1MemoryCache {
    /// Create a new L1 cache with the given max entry count.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600)) // 1 hour idle TTL
            .build();

        Self { cache }
    }

    /// Cache key for a text.
    pub fn key_for(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<EmbeddedText> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedded: EmbeddedText) {
        self.cache.insert(key, embedded);
    }

    /// Number of entries currently in the cache (eventually consistent).
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
