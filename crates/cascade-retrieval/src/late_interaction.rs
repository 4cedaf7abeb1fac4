//! Late-interaction ("max-sim") scoring over token embeddings.
//!
//! Each query token is matched against its single best document token,
//! independent of position; the score is the mean of those best matches.

use cascade_core::models::TokenData;
use cascade_embeddings::{cosine_similarity, TokenEmbedder};

/// Scores raw query text against a document's token data, embedding query
/// tokens with the same rule used at ingest.
#[derive(Debug, Clone, Copy)]
pub struct LateInteractionScorer {
    embedder: TokenEmbedder,
}

impl LateInteractionScorer {
    pub fn new(token_dims: usize) -> Self {
        Self {
            embedder: TokenEmbedder::new(token_dims),
        }
    }

    /// Max-sim score of `query` against `document`. Zero if either side has
    /// no tokens.
    pub fn score(&self, query: &str, document: &TokenData) -> f32 {
        let query_vectors: Vec<Vec<f32>> = query
            .split_whitespace()
            .map(|t| self.embedder.embed_token(t))
            .collect();
        mean_max_sim(&query_vectors, document)
    }
}

/// Max-sim score between two tokenized texts. Query weights are ignored;
/// each document token's weight scales its similarity.
pub fn max_sim(query: &TokenData, document: &TokenData) -> f32 {
    mean_max_sim(&query.embeddings, document)
}

fn mean_max_sim(query_vectors: &[Vec<f32>], document: &TokenData) -> f32 {
    if query_vectors.is_empty() || document.embeddings.is_empty() {
        return 0.0;
    }

    let total: f32 = query_vectors
        .iter()
        .map(|q| {
            document
                .embeddings
                .iter()
                .zip(&document.weights)
                .map(|(d, &w)| cosine_similarity(q, d) * w)
                .fold(0.0f32, f32::max)
        })
        .sum();
    total / query_vectors.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(scorer: &LateInteractionScorer, text: &str) -> TokenData {
        let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        TokenData {
            embeddings: tokens.iter().map(|t| scorer.embedder.embed_token(t)).collect(),
            weights: vec![1.0; tokens.len()],
            tokens,
        }
    }

    #[test]
    fn empty_sides_score_zero() {
        let scorer = LateInteractionScorer::new(32);
        let doc = tokens(&scorer, "graph layers");
        assert_eq!(scorer.score("", &doc), 0.0);
        assert_eq!(scorer.score("   ", &doc), 0.0);
        assert_eq!(scorer.score("graph", &TokenData::default()), 0.0);
    }

    #[test]
    fn identical_text_scores_one() {
        let scorer = LateInteractionScorer::new(32);
        let doc = tokens(&scorer, "nearest neighbor graph");
        let s = scorer.score("nearest neighbor graph", &doc);
        assert!((s - 1.0).abs() < 1e-5, "{s}");
    }

    #[test]
    fn each_query_token_takes_its_best_match() {
        let scorer = LateInteractionScorer::new(32);
        let doc = tokens(&scorer, "graph");
        let one = scorer.score("graph", &doc);
        let diluted = scorer.score("graph pasta", &doc);
        assert!(diluted < one);
        assert!(diluted >= one / 2.0 - 1e-6);
    }

    #[test]
    fn word_order_is_irrelevant() {
        let scorer = LateInteractionScorer::new(32);
        let doc = tokens(&scorer, "the mind knows itself");
        let a = scorer.score("mind itself", &doc);
        let b = scorer.score("itself mind", &doc);
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn document_weights_scale_matches() {
        let scorer = LateInteractionScorer::new(32);
        let mut doc = tokens(&scorer, "graph");
        let full = scorer.score("graph", &doc);
        doc.weights[0] = 0.5;
        let half = scorer.score("graph", &doc);
        assert!((half - full * 0.5).abs() < 1e-6);
    }

    #[test]
    fn token_data_entry_point_agrees_with_text() {
        let scorer = LateInteractionScorer::new(32);
        let doc = tokens(&scorer, "binary sketches prefilter candidates");
        let query = tokens(&scorer, "sketch candidates");
        assert_eq!(max_sim(&query, &doc), scorer.score("sketch candidates", &doc));
    }

    #[test]
    fn scores_are_non_negative() {
        let scorer = LateInteractionScorer::new(32);
        let doc = tokens(&scorer, "zzz qqq");
        assert!(scorer.score("abc xyz", &doc) >= 0.0);
    }
}
