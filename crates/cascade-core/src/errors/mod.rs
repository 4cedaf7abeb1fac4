//! Error types. One enum per subsystem, unified under [`CascadeError`].

mod embedding_error;
mod index_error;
mod retrieval_error;

pub use embedding_error::EmbeddingError;
pub use index_error::IndexError;
pub use retrieval_error::RetrievalError;

/// Top-level error for every fallible Cascade operation.
#[derive(Debug, thiserror::Error)]
pub enum CascadeError {
    #[error("chunk not found: {id}")]
    ChunkNotFound { id: String },

    #[error("duplicate chunk id: {id}")]
    DuplicateId { id: String },

    #[error("invalid configuration: {reason}")]
    ConfigError { reason: String },

    #[error("lock poisoned: {resource}")]
    LockPoisoned { resource: String },

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("index error: {0}")]
    IndexError(#[from] IndexError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Convenience alias used throughout the workspace.
pub type CascadeResult<T> = Result<T, CascadeError>;
