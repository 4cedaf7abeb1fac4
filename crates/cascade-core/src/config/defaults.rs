// Single source of truth for all default values.

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashed";
pub const DEFAULT_FULL_DIMS: usize = 768;
pub const DEFAULT_MEDIUM_DIMS: usize = 256;
pub const DEFAULT_SMALL_DIMS: usize = 128;
pub const DEFAULT_TINY_BITS: usize = 64;
pub const DEFAULT_NANO_BITS: usize = 32;
pub const DEFAULT_TOKEN_DIMS: usize = 32;
pub const DEFAULT_BIT_THRESHOLD: f32 = 0.5;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;

// --- Graph index ---
pub const DEFAULT_M: usize = 16;
pub const DEFAULT_EF_CONSTRUCTION: usize = 200;
pub const DEFAULT_LEVEL_FACTOR: f64 = 1.0 / std::f64::consts::LN_2;
pub const DEFAULT_MAX_LEVEL: usize = 16;

// --- Retrieval ---
pub const DEFAULT_PREFILTER_LIMIT: usize = 500;
pub const DEFAULT_GRAPH_EF: usize = 50;
pub const DEFAULT_GRAPH_TARGET_LEVEL: usize = 0;
pub const DEFAULT_LATE_INTERACTION_WEIGHT: f32 = 0.6;
pub const DEFAULT_FULL_COSINE_WEIGHT: f32 = 0.4;
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = true;
pub const DEFAULT_LOG_ENV_VAR: &str = "CASCADE_LOG";
