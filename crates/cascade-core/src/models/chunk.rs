use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EmbeddedText, EmbeddingBundle, TokenData};

/// Caller-supplied metadata. Opaque to ranking.
///
/// A few well-known optional fields plus an `extra` map for anything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkMetadata {
    /// Free-form classification, e.g. "paragraph" or "code".
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A chunk as handed to ingest, before any embedding work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkInput {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: ChunkMetadata,
}

impl ChunkInput {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: ChunkMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ChunkMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A stored chunk. Immutable once built; replaced wholesale on re-ingest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub content: String,
    pub metadata: ChunkMetadata,
    pub embeddings: EmbeddingBundle,
    pub tokens: TokenData,
}

impl Chunk {
    /// Assemble a chunk from its input and the provider output for its content.
    pub fn from_parts(input: ChunkInput, embedded: EmbeddedText) -> Self {
        Self {
            id: input.id,
            content: input.content,
            metadata: input.metadata,
            embeddings: embedded.bundle,
            tokens: embedded.tokens,
        }
    }
}
