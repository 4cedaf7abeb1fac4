//! Stages 3 and 4: per-candidate scoring and the final ordering.

pub mod scorer;

pub use scorer::{rank, score_candidate, validate_weights};
