//! # cascade-index
//!
//! Hierarchical navigable small world (HNSW) graph.
//!
//! Nodes live in an arena and refer to each other by [`NodeKey`], so trimming
//! one node's neighbor set never aliases another node. Insertion is the only
//! writer of the entry point and max layer; search borrows the graph
//! immutably. Callers needing concurrency wrap the index in a reader/writer
//! lock.
//!
//! ```text
//! HnswIndex
//! ├── arena: Vec<Option<GraphNode>>   (tombstoned on remove)
//! ├── keys:  chunk id -> NodeKey
//! ├── entry point + max layer
//! └── StdRng level generator
//! ```

pub mod graph;
pub mod layer_search;
pub mod level;
pub mod node;

pub use graph::{HnswIndex, SearchHit};
pub use node::{GraphNode, NodeKey};
