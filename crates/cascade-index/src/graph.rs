//! The HNSW graph: insertion, top-down search, removal.

use std::collections::HashMap;

use cascade_core::config::IndexConfig;
use cascade_core::constants::MAX_GRAPH_LEVEL;
use cascade_core::errors::{CascadeResult, IndexError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::layer_search::{node_at, search_layer, select_nearest};
use crate::level::draw_level;
use crate::node::{GraphNode, NodeKey};

/// One graph search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    /// `1 - cosine_similarity` to the query.
    pub distance: f32,
}

/// Multi-layer proximity graph keyed by chunk id.
pub struct HnswIndex {
    nodes: Vec<Option<GraphNode>>,
    /// Slots emptied by removal, reused before the arena grows.
    vacant: Vec<NodeKey>,
    keys: HashMap<String, NodeKey>,
    entry_point: Option<NodeKey>,
    max_layer: usize,
    dimension: Option<usize>,
    config: IndexConfig,
    rng: StdRng,
}

impl std::fmt::Debug for HnswIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HnswIndex")
            .field("nodes", &self.keys.len())
            .field("slots", &self.nodes.len())
            .field("max_layer", &self.max_layer)
            .field("dimension", &self.dimension)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HnswIndex {
    /// Create an empty index.
    ///
    /// # Errors
    /// `InvalidConfig` if `m` or `ef_construction` is zero, or the level
    /// factor is not finite and positive.
    pub fn new(config: IndexConfig) -> CascadeResult<Self> {
        if config.m == 0 {
            return Err(invalid_config("m must be at least 1"));
        }
        if config.ef_construction == 0 {
            return Err(invalid_config("ef_construction must be at least 1"));
        }
        if !(config.level_factor.is_finite() && config.level_factor > 0.0) {
            return Err(invalid_config("level_factor must be finite and positive"));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            nodes: Vec::new(),
            vacant: Vec::new(),
            keys: HashMap::new(),
            entry_point: None,
            max_layer: 0,
            dimension: None,
            config,
            rng,
        })
    }

    /// A fresh, empty index with the same configuration.
    pub fn empty_like(&self) -> Self {
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            nodes: Vec::new(),
            vacant: Vec::new(),
            keys: HashMap::new(),
            entry_point: None,
            max_layer: 0,
            dimension: None,
            config: self.config.clone(),
            rng,
        }
    }

    /// Insert `vector` under `id`, drawing its level from the index's own
    /// generator. Returns the assigned level.
    ///
    /// An id already in the graph is removed first.
    ///
    /// # Errors
    /// `DimensionMismatch` if the vector is empty or its width differs from
    /// the vectors already indexed.
    pub fn insert(&mut self, id: impl Into<String>, vector: Vec<f32>) -> CascadeResult<usize> {
        self.check_dimension(&vector)?;
        let cap = self.level_cap();
        let level = draw_level(&mut self.rng, self.config.level_factor, cap);
        self.insert_at_level(id.into(), vector, level);
        Ok(level)
    }

    /// Like [`insert`](Self::insert), drawing the level from `rng`.
    pub fn insert_with_rng<R: Rng>(
        &mut self,
        id: impl Into<String>,
        vector: Vec<f32>,
        rng: &mut R,
    ) -> CascadeResult<usize> {
        self.check_dimension(&vector)?;
        let level = draw_level(rng, self.config.level_factor, self.level_cap());
        self.insert_at_level(id.into(), vector, level);
        Ok(level)
    }

    fn level_cap(&self) -> usize {
        self.config.max_level.min(MAX_GRAPH_LEVEL)
    }

    fn check_dimension(&self, vector: &[f32]) -> CascadeResult<()> {
        let expected = self.dimension.unwrap_or(vector.len());
        if vector.is_empty() || vector.len() != expected {
            return Err(IndexError::DimensionMismatch {
                expected: expected.max(1),
                actual: vector.len(),
            }
            .into());
        }
        Ok(())
    }

    fn insert_at_level(&mut self, id: String, vector: Vec<f32>, level: usize) {
        if self.keys.contains_key(&id) {
            self.remove(&id);
        }

        let query = vector.clone();
        self.dimension.get_or_insert(vector.len());
        let node = GraphNode::new(id.clone(), vector, level);
        let key = match self.vacant.pop() {
            Some(key) => {
                self.nodes[key.0] = Some(node);
                key
            }
            None => {
                self.nodes.push(Some(node));
                NodeKey(self.nodes.len() - 1)
            }
        };
        self.keys.insert(id.clone(), key);

        let Some(entry) = self.entry_point else {
            self.entry_point = Some(key);
            self.max_layer = level;
            debug!(id = %id, level, "first node becomes entry point");
            return;
        };
        let top = self.max_layer;

        // Coarse positioning above the node's own level.
        let mut current = entry;
        for layer in (level + 1..=top).rev() {
            if let Some(best) = search_layer(&self.nodes, &query, current, 1, layer).first() {
                current = best.key;
            }
        }

        // Layers above the old top have no other nodes to link to.
        for layer in (0..=level.min(top)).rev() {
            let found = search_layer(
                &self.nodes,
                &query,
                current,
                self.config.ef_construction,
                layer,
            );
            let selected: Vec<NodeKey> = found
                .iter()
                .map(|c| c.key)
                .filter(|&k| k != key)
                .take(self.config.m)
                .collect();
            self.link(key, &selected, layer);
            if let Some(best) = found.iter().find(|c| c.key != key) {
                current = best.key;
            }
        }

        if level > top {
            self.entry_point = Some(key);
            self.max_layer = level;
            info!(id = %id, level, previous_top = top, "new graph entry point");
        }
        debug!(id = %id, level, nodes = self.keys.len(), "node inserted");
    }

    /// Link `key` to each of `selected` at `layer` in both directions, then
    /// trim any neighbor pushed over the max degree.
    fn link(&mut self, key: NodeKey, selected: &[NodeKey], layer: usize) {
        if let Some(node) = self.nodes[key.0].as_mut() {
            node.neighbors[layer] = selected.to_vec();
        }
        for &neighbor in selected {
            let over = match self.nodes.get_mut(neighbor.0).and_then(Option::as_mut) {
                Some(n) if n.level() >= layer => {
                    let set = &mut n.neighbors[layer];
                    if !set.contains(&key) {
                        set.push(key);
                    }
                    set.len() > self.config.m
                }
                _ => false,
            };
            if over {
                self.trim(neighbor, layer);
            }
        }
    }

    /// Keep the `m` nearest neighbors of `key` at `layer`.
    fn trim(&mut self, key: NodeKey, layer: usize) {
        let keep = match node_at(&self.nodes, key) {
            Some(node) => select_nearest(
                &self.nodes,
                node.vector(),
                node.neighbors_at(layer),
                self.config.m,
            ),
            None => return,
        };
        if let Some(node) = self.nodes[key.0].as_mut() {
            if let Some(set) = node.neighbors.get_mut(layer) {
                *set = keep;
            }
        }
    }

    /// Approximate nearest neighbors of `query`.
    ///
    /// Descends with beam width 1 from the top layer to `target_level + 1`,
    /// then runs a beam search of width `ef` at `target_level`. Returns at
    /// most `ef` distinct ids, nearest first.
    pub fn search(&self, query: &[f32], ef: usize, target_level: usize) -> Vec<SearchHit> {
        let Some(entry) = self.entry_point else {
            return Vec::new();
        };

        let mut current = entry;
        for layer in (target_level + 1..=self.max_layer).rev() {
            if let Some(best) = search_layer(&self.nodes, query, current, 1, layer).first() {
                current = best.key;
            }
        }

        search_layer(&self.nodes, query, current, ef, target_level)
            .into_iter()
            .filter_map(|c| {
                node_at(&self.nodes, c.key).map(|node| SearchHit {
                    id: node.id().to_string(),
                    distance: c.distance,
                })
            })
            .collect()
    }

    /// Remove `id` from the graph. Returns whether it was present.
    ///
    /// Every edge into the node is dropped. Each former neighbor is offered
    /// the node's other former neighbors as replacement links and trimmed
    /// back to the max degree. If the node was the entry point, the highest
    /// remaining node takes over.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(key) = self.keys.remove(id) else {
            return false;
        };
        let Some(removed) = self.nodes.get_mut(key.0).and_then(Option::take) else {
            return false;
        };
        self.vacant.push(key);

        for node in self.nodes.iter_mut().flatten() {
            for set in node.neighbors.iter_mut() {
                set.retain(|&k| k != key);
            }
        }

        for (layer, former) in removed.neighbors.iter().enumerate() {
            for &n in former {
                let additions: Vec<NodeKey> = former.iter().copied().filter(|&o| o != n).collect();
                let over = match self.nodes.get_mut(n.0).and_then(Option::as_mut) {
                    Some(node) if node.level() >= layer => {
                        let set = &mut node.neighbors[layer];
                        for o in additions {
                            if !set.contains(&o) {
                                set.push(o);
                            }
                        }
                        set.len() > self.config.m
                    }
                    _ => false,
                };
                if over {
                    self.trim(n, layer);
                }
            }
        }

        if self.entry_point == Some(key) {
            let next = self
                .nodes
                .iter()
                .enumerate()
                .filter_map(|(i, slot)| slot.as_ref().map(|n| (NodeKey(i), n.level())))
                .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)));
            self.entry_point = next.map(|(k, _)| k);
            self.max_layer = next.map(|(_, level)| level).unwrap_or(0);
            debug!(id = %id, new_top = self.max_layer, "entry point re-elected after removal");
        }
        if self.keys.is_empty() {
            self.nodes.clear();
            self.vacant.clear();
            self.dimension = None;
        }
        true
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.keys.contains_key(id)
    }

    /// Highest layer of any node; 0 for an empty graph.
    pub fn max_layer(&self) -> usize {
        self.max_layer
    }

    /// Id of the node top-down search starts from.
    pub fn entry_point(&self) -> Option<&str> {
        self.entry_point
            .and_then(|k| node_at(&self.nodes, k))
            .map(GraphNode::id)
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.keys.get(id).and_then(|&k| node_at(&self.nodes, k))
    }

    /// Ids of `id`'s neighbors at `layer`.
    pub fn neighbor_ids(&self, id: &str, layer: usize) -> Vec<&str> {
        self.node(id)
            .map(|node| {
                node.neighbors_at(layer)
                    .iter()
                    .filter_map(|&k| node_at(&self.nodes, k).map(GraphNode::id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Arena slots in use or awaiting reuse.
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    /// All live nodes, in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().flatten()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }
}

fn invalid_config(reason: &str) -> cascade_core::CascadeError {
    IndexError::InvalidConfig {
        reason: reason.to_string(),
    }
    .into()
}
