//! # cascade-observability
//!
//! Subscriber installation and the span macros the pipeline crates open
//! around ingest, search, and embedding work.

pub mod tracing_setup;

pub use tracing_setup::{build_filter, init_tracing, spans::names};
