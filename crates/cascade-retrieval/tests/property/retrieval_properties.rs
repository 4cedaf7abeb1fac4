use std::collections::HashSet;

use cascade_core::config::CascadeConfig;
use cascade_core::models::ChunkInput;
use cascade_retrieval::RetrievalEngine;
use proptest::prelude::*;

const WORDS: &[&str] = &[
    "graph", "layer", "vector", "neighbor", "mind", "brain", "bread", "flour", "moon", "tide",
    "star", "bit", "sketch", "rust", "owner", "borrow", "search", "index",
];

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..10).prop_map(|w| w.join(" "))
}

fn engine(docs: &[String]) -> RetrievalEngine {
    let mut config = CascadeConfig::default();
    config.index.seed = Some(99);
    let engine = RetrievalEngine::new(&config).unwrap();
    for (i, d) in docs.iter().enumerate() {
        engine.ingest(ChunkInput::new(format!("d{i}"), d.clone())).unwrap();
    }
    engine
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn results_are_bounded_sorted_and_distinct(
        docs in prop::collection::vec(sentence(), 1..25),
        query in sentence(),
        limit in 1usize..10,
    ) {
        let engine = engine(&docs);
        let results = engine.ultra_search(&query, limit).unwrap();
        prop_assert!(results.len() <= limit);
        prop_assert_eq!(results.len(), limit.min(docs.len()));
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        let ids: HashSet<&str> = results.iter().map(|r| r.id()).collect();
        prop_assert_eq!(ids.len(), results.len());
    }

    #[test]
    fn breakdown_components_stay_in_range(
        docs in prop::collection::vec(sentence(), 1..15),
        query in sentence(),
    ) {
        let engine = engine(&docs);
        for r in engine.ultra_search(&query, 15).unwrap() {
            prop_assert!((0.0..=1.0).contains(&r.breakdown.final_cosine));
            prop_assert!(r.breakdown.late_interaction >= 0.0);
            prop_assert!(r.breakdown.late_interaction <= 1.0 + 1e-5);
            prop_assert!(r.breakdown.binary <= 32);
        }
    }

    #[test]
    fn exact_document_text_scores_near_one(
        docs in prop::collection::vec(sentence(), 1..15),
        pick in any::<prop::sample::Index>(),
    ) {
        let engine = engine(&docs);
        let i = pick.index(docs.len());
        let results = engine.ultra_search(&docs[i], docs.len()).unwrap();
        let own_id = format!("d{i}");
        let own = results.iter().find(|r| r.id() == own_id).unwrap();
        prop_assert!(own.score > 1.0 - 1e-4, "own score {}", own.score);
        // Nothing can beat an exact match by more than rounding.
        prop_assert!(results[0].score <= 1.0 + 1e-5);
    }
}
