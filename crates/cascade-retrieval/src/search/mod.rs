//! Candidate generation: the binary prefilter and the candidate merge.
//!
//! The graph stage is a direct call into `HnswIndex::search`.

pub mod prefilter;

use std::collections::HashSet;

use cascade_index::SearchHit;

pub use prefilter::{binary_prefilter, PrefilterHit};

/// Union of both candidate lists without duplicates: prefilter order first,
/// then graph hits the prefilter missed.
pub fn merge_candidates(prefiltered: &[PrefilterHit], graph: &[SearchHit]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(prefiltered.len() + graph.len());
    prefiltered
        .iter()
        .map(|h| h.id.as_str())
        .chain(graph.iter().map(|h| h.id.as_str()))
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pre(id: &str, distance: u32) -> PrefilterHit {
        PrefilterHit {
            id: id.to_string(),
            distance,
        }
    }

    fn hit(id: &str) -> SearchHit {
        SearchHit {
            id: id.to_string(),
            distance: 0.1,
        }
    }

    #[test]
    fn union_keeps_first_occurrence() {
        let merged = merge_candidates(&[pre("a", 0), pre("b", 3)], &[hit("c"), hit("a")]);
        assert_eq!(merged, ["a", "b", "c"]);
    }

    #[test]
    fn either_side_may_be_empty() {
        assert_eq!(merge_candidates(&[], &[hit("x")]), ["x"]);
        assert_eq!(merge_candidates(&[pre("y", 1)], &[]), ["y"]);
        assert!(merge_candidates(&[], &[]).is_empty());
    }
}
