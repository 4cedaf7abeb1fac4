//! Beam search within a single layer, and nearest-M selection.

use std::cmp::Ordering;
use std::collections::HashSet;

use cascade_embeddings::cosine_distance;

use crate::node::{GraphNode, NodeKey};

/// A node reached during search with its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub key: NodeKey,
    pub distance: f32,
}

/// Nearest first; equal distances fall back to arena order.
fn by_distance(a: &Candidate, b: &Candidate) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.key.cmp(&b.key))
}

/// Live node at `key`, or `None` for a tombstone or out-of-range key.
pub(crate) fn node_at(nodes: &[Option<GraphNode>], key: NodeKey) -> Option<&GraphNode> {
    nodes.get(key.0).and_then(Option::as_ref)
}

/// Beam search at `layer` starting from `entry`.
///
/// Keeps a candidate list of at most `ef` entries ordered by distance to
/// `query`. The nearest unexpanded candidate is expanded each round; every
/// unvisited neighbor is scored and inserted, then the list is truncated
/// back to `ef`. Stops once every candidate in the list has been expanded.
///
/// Dangling neighbor keys are skipped. A layer above a node's level reads as
/// an empty neighbor set.
pub fn search_layer(
    nodes: &[Option<GraphNode>],
    query: &[f32],
    entry: NodeKey,
    ef: usize,
    layer: usize,
) -> Vec<Candidate> {
    if ef == 0 {
        return Vec::new();
    }
    let Some(entry_node) = node_at(nodes, entry) else {
        return Vec::new();
    };

    let mut visited = HashSet::new();
    visited.insert(entry);
    let mut list: Vec<(Candidate, bool)> = vec![(
        Candidate {
            key: entry,
            distance: cosine_distance(query, entry_node.vector()),
        },
        false,
    )];

    while let Some(pos) = list.iter().position(|(_, expanded)| !expanded) {
        list[pos].1 = true;
        let Some(current) = node_at(nodes, list[pos].0.key) else {
            continue;
        };

        for &neighbor_key in current.neighbors_at(layer) {
            if !visited.insert(neighbor_key) {
                continue;
            }
            let Some(neighbor) = node_at(nodes, neighbor_key) else {
                continue;
            };
            list.push((
                Candidate {
                    key: neighbor_key,
                    distance: cosine_distance(query, neighbor.vector()),
                },
                false,
            ));
        }

        list.sort_by(|a, b| by_distance(&a.0, &b.0));
        list.truncate(ef);
    }

    list.into_iter().map(|(candidate, _)| candidate).collect()
}

/// The `m` keys nearest to `base`. Dangling keys are dropped.
pub fn select_nearest(
    nodes: &[Option<GraphNode>],
    base: &[f32],
    keys: &[NodeKey],
    m: usize,
) -> Vec<NodeKey> {
    let mut scored: Vec<Candidate> = keys
        .iter()
        .filter_map(|&key| {
            node_at(nodes, key).map(|node| Candidate {
                key,
                distance: cosine_distance(base, node.vector()),
            })
        })
        .collect();
    scored.sort_by(by_distance);
    scored.truncate(m);
    scored.into_iter().map(|c| c.key).collect()
}
