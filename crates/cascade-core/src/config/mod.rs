//! Configuration. Every section deserializes with defaults for missing keys,
//! so an empty TOML document yields the reference configuration.

pub mod defaults;
mod embedding_config;
mod index_config;
mod observability_config;
mod retrieval_config;

pub use embedding_config::EmbeddingConfig;
pub use index_config::IndexConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::{DeadlinePolicy, DuplicatePolicy, RetrievalConfig};

use serde::{Deserialize, Serialize};

use crate::constants::{NANO_SKETCH_CAPACITY, TINY_SKETCH_CAPACITY};
use crate::errors::{CascadeError, CascadeResult};

/// Top-level configuration for a Cascade engine instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    pub embedding: EmbeddingConfig,
    pub index: IndexConfig,
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl CascadeConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> CascadeResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| CascadeError::ConfigError {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> CascadeResult<String> {
        toml::to_string_pretty(self).map_err(|e| CascadeError::ConfigError {
            reason: e.to_string(),
        })
    }

    /// Check cross-field invariants that serde cannot express.
    pub fn validate(&self) -> CascadeResult<()> {
        let e = &self.embedding;
        let nested = [
            ("nano_bits", e.nano_bits),
            ("tiny_bits", e.tiny_bits),
            ("small_dims", e.small_dims),
            ("medium_dims", e.medium_dims),
            ("full_dims", e.full_dims),
        ];
        for pair in nested.windows(2) {
            let ((lo_name, lo), (hi_name, hi)) = (pair[0], pair[1]);
            if lo > hi {
                return Err(config_error(format!(
                    "{lo_name} ({lo}) must not exceed {hi_name} ({hi})"
                )));
            }
        }
        if e.nano_bits == 0 {
            return Err(config_error("nano_bits must be at least 1"));
        }
        if e.nano_bits > NANO_SKETCH_CAPACITY {
            return Err(config_error(format!(
                "nano_bits ({}) exceeds sketch capacity {NANO_SKETCH_CAPACITY}",
                e.nano_bits
            )));
        }
        if e.tiny_bits > TINY_SKETCH_CAPACITY {
            return Err(config_error(format!(
                "tiny_bits ({}) exceeds sketch capacity {TINY_SKETCH_CAPACITY}",
                e.tiny_bits
            )));
        }
        if e.token_dims == 0 {
            return Err(config_error("token_dims must be at least 1"));
        }
        if !e.bit_threshold.is_finite() {
            return Err(config_error("bit_threshold must be finite"));
        }

        let i = &self.index;
        if i.m == 0 {
            return Err(config_error("index.m must be at least 1"));
        }
        if i.ef_construction == 0 {
            return Err(config_error("index.ef_construction must be at least 1"));
        }
        if !(i.level_factor.is_finite() && i.level_factor > 0.0) {
            return Err(config_error("index.level_factor must be finite and positive"));
        }

        let r = &self.retrieval;
        for (name, w) in [
            ("late_interaction_weight", r.late_interaction_weight),
            ("full_cosine_weight", r.full_cosine_weight),
        ] {
            if !(w.is_finite() && w >= 0.0) {
                return Err(config_error(format!(
                    "retrieval.{name} must be finite and non-negative, got {w}"
                )));
            }
        }
        if r.late_interaction_weight == 0.0 && r.full_cosine_weight == 0.0 {
            return Err(config_error("retrieval weights must not both be zero"));
        }
        if r.default_limit == 0 {
            return Err(config_error("retrieval.default_limit must be at least 1"));
        }

        Ok(())
    }
}

fn config_error(reason: impl Into<String>) -> CascadeError {
    CascadeError::ConfigError {
        reason: reason.into(),
    }
}
