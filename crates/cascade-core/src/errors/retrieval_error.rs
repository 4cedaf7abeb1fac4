/// Retrieval pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("query deadline exceeded: {elapsed_ms}ms elapsed, budget {budget_ms}ms")]
    DeadlineExceeded { elapsed_ms: u64, budget_ms: u64 },

    #[error("invalid score weights: {reason}")]
    InvalidWeights { reason: String },
}
