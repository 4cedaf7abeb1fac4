//! Deterministic per-token vectors for late interaction.

use super::{fnv1a, normalize_term};

/// Hashes the character trigrams of `^term$` into a fixed number of buckets.
///
/// A token's vector depends on nothing but the token, so query-time and
/// ingest-time vectors agree and no corpus statistics are involved.
#[derive(Debug, Clone, Copy)]
pub struct TokenEmbedder {
    dims: usize,
}

impl TokenEmbedder {
    pub fn new(dims: usize) -> Self {
        Self { dims: dims.max(1) }
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Embed one whitespace token. Never returns the zero vector for a
    /// non-empty token.
    pub fn embed_token(&self, token: &str) -> Vec<f32> {
        let mut term = normalize_term(token);
        if term.is_empty() {
            term = token.to_lowercase();
        }

        let chars: Vec<char> = std::iter::once('^')
            .chain(term.chars())
            .chain(std::iter::once('$'))
            .collect();

        let mut vec = vec![0.0f32; self.dims];
        let mut buf = String::with_capacity(12);
        for gram in chars.windows(3) {
            buf.clear();
            buf.extend(gram);
            let bucket = (fnv1a(buf.as_bytes()) % self.dims as u64) as usize;
            vec[bucket] += 1.0;
        }
        vec
    }
}
