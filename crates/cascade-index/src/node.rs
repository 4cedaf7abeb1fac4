/// Stable arena slot of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub(crate) usize);

impl NodeKey {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One vector in the graph with its per-layer neighbor sets.
///
/// `neighbors[l]` exists for exactly `l in 0..=level`. Each set holds
/// distinct keys and is kept at or below the index's max degree by trimming.
#[derive(Debug, Clone)]
pub struct GraphNode {
    id: String,
    vector: Vec<f32>,
    level: usize,
    pub(crate) neighbors: Vec<Vec<NodeKey>>,
}

impl GraphNode {
    pub(crate) fn new(id: String, vector: Vec<f32>, level: usize) -> Self {
        Self {
            id,
            vector,
            level,
            neighbors: vec![Vec::new(); level + 1],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    /// Highest layer this node participates in.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Number of layers holding a neighbor set (`level + 1`).
    pub fn layer_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Neighbor keys at `layer`; empty above the node's level.
    pub fn neighbors_at(&self, layer: usize) -> &[NodeKey] {
        self.neighbors.get(layer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, layer: usize) -> usize {
        self.neighbors_at(layer).len()
    }
}
