/// Embedding subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    /// The provider returned output that violates the bundle contract.
    #[error("invalid embedding bundle: {reason}")]
    InvalidBundle { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid tier layout: {reason}")]
    InvalidTierLayout { reason: String },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },
}
