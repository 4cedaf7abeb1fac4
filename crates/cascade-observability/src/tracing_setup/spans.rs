//! Span definitions per operation: ingest, search, embedding.

/// Span around ingesting one chunk.
#[macro_export]
macro_rules! ingest_span {
    ($chunk_id:expr) => {
        tracing::info_span!("cascade.ingest", chunk_id = %$chunk_id)
    };
}

/// Span around one multi-stage search.
#[macro_export]
macro_rules! search_span {
    ($query:expr, $limit:expr) => {
        tracing::info_span!("cascade.search", query = %$query, limit = $limit)
    };
}

/// Span around one provider call.
#[macro_export]
macro_rules! embedding_span {
    ($provider:expr, $dimension:expr) => {
        tracing::debug_span!("cascade.embedding", provider = %$provider, dimension = $dimension)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const INGEST: &str = "cascade.ingest";
    pub const SEARCH: &str = "cascade.search";
    pub const EMBEDDING: &str = "cascade.embedding";
}
