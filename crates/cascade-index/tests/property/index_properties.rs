use std::collections::HashSet;

use cascade_core::config::IndexConfig;
use cascade_index::HnswIndex;
use proptest::prelude::*;

fn vectors(dims: usize, max: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-1.0f32..1.0, dims), 1..max)
}

fn build(m: usize, seed: u64, vs: &[Vec<f32>]) -> HnswIndex {
    let config = IndexConfig {
        m,
        ef_construction: 32,
        seed: Some(seed),
        ..Default::default()
    };
    let mut index = HnswIndex::new(config).unwrap();
    for (i, v) in vs.iter().enumerate() {
        index.insert(format!("v{i}"), v.clone()).unwrap();
    }
    index
}

proptest! {
    #[test]
    fn degree_never_exceeds_m(vs in vectors(4, 60), m in 1usize..8, seed in any::<u64>()) {
        let index = build(m, seed, &vs);
        for node in index.nodes() {
            for layer in 0..node.layer_count() {
                prop_assert!(node.degree(layer) <= m);
            }
        }
    }

    #[test]
    fn neighbor_sets_cover_levels(vs in vectors(4, 60), seed in any::<u64>()) {
        let index = build(4, seed, &vs);
        for node in index.nodes() {
            prop_assert_eq!(node.layer_count(), node.level() + 1);
            for layer in 0..node.layer_count() {
                let ids = index.neighbor_ids(node.id(), layer);
                let distinct: HashSet<&str> = ids.iter().copied().collect();
                prop_assert_eq!(distinct.len(), ids.len());
                prop_assert!(!ids.contains(&node.id()));
            }
        }
    }

    #[test]
    fn max_layer_matches_highest_node(vs in vectors(4, 60), seed in any::<u64>()) {
        let index = build(4, seed, &vs);
        let top = index.nodes().map(|n| n.level()).max().unwrap();
        prop_assert_eq!(index.max_layer(), top);
        let entry = index.entry_point().unwrap();
        prop_assert_eq!(index.node(entry).unwrap().level(), top);
    }

    #[test]
    fn search_results_are_bounded_distinct_and_sorted(
        vs in vectors(4, 60),
        q in prop::collection::vec(-1.0f32..1.0, 4),
        ef in 1usize..30,
        seed in any::<u64>(),
    ) {
        let index = build(4, seed, &vs);
        let hits = index.search(&q, ef, 0);
        prop_assert!(hits.len() <= ef);
        prop_assert!(!hits.is_empty());
        let distinct: HashSet<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        prop_assert_eq!(distinct.len(), hits.len());
        for pair in hits.windows(2) {
            prop_assert!(pair[0].distance <= pair[1].distance);
        }
        for hit in &hits {
            prop_assert!(index.contains(&hit.id));
        }
    }

    #[test]
    fn removed_ids_never_come_back(vs in vectors(4, 40), seed in any::<u64>()) {
        let mut index = build(4, seed, &vs);
        let removed: Vec<String> = (0..vs.len()).step_by(3).map(|i| format!("v{i}")).collect();
        for id in &removed {
            prop_assert!(index.remove(id));
        }
        prop_assert_eq!(index.len(), vs.len() - removed.len());
        for q in &vs {
            for hit in index.search(q, 50, 0) {
                prop_assert!(!removed.contains(&hit.id));
            }
        }
        for node in index.nodes() {
            for layer in 0..node.layer_count() {
                for id in index.neighbor_ids(node.id(), layer) {
                    prop_assert!(!removed.iter().any(|r| r == id));
                }
            }
        }
    }

    #[test]
    fn reinserting_every_id_keeps_the_arena_size(vs in vectors(4, 40), seed in any::<u64>()) {
        let mut index = build(4, seed, &vs);
        for (i, v) in vs.iter().enumerate().rev() {
            index.insert(format!("v{i}"), v.clone()).unwrap();
        }
        prop_assert_eq!(index.len(), vs.len());
        prop_assert_eq!(index.slot_count(), vs.len());
    }
}
