/// Graph index errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid index configuration: {reason}")]
    InvalidConfig { reason: String },
}
