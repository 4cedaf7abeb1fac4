//! Contract checks on provider output.
//!
//! A provider that returns malformed tiers would corrupt ranking silently,
//! so every bundle is checked before it reaches the store or the index.

use cascade_core::errors::{CascadeResult, EmbeddingError};
use cascade_core::models::{EmbeddedText, EmbeddingBundle, TierDims, TokenData};

use crate::matryoshka;
use crate::quantization::{threshold_bits, threshold_nano};

fn invalid(reason: String) -> cascade_core::CascadeError {
    EmbeddingError::InvalidBundle { reason }.into()
}

/// Validate a full provider result.
pub fn validate_embedded(
    embedded: &EmbeddedText,
    dims: &TierDims,
    threshold: f32,
) -> CascadeResult<()> {
    validate_bundle(&embedded.bundle, dims, threshold)?;
    validate_tokens(&embedded.tokens, dims.token)
}

/// Check tier widths, prefix nesting, and sketch consistency.
pub fn validate_bundle(
    bundle: &EmbeddingBundle,
    dims: &TierDims,
    threshold: f32,
) -> CascadeResult<()> {
    matryoshka::tier_bands(dims)?;

    for (name, actual, expected) in [
        ("full", bundle.full.len(), dims.full),
        ("medium", bundle.medium.len(), dims.medium),
        ("small", bundle.small.len(), dims.small),
    ] {
        if actual != expected {
            return Err(invalid(format!(
                "{name} tier has {actual} dims, expected {expected}"
            )));
        }
    }

    if let Some(pos) = bundle.full.iter().position(|v| !v.is_finite()) {
        return Err(invalid(format!("full tier has a non-finite value at {pos}")));
    }
    if bundle.medium[..] != bundle.full[..dims.medium] {
        return Err(invalid("medium tier is not a prefix of full".to_string()));
    }
    if bundle.small[..] != bundle.full[..dims.small] {
        return Err(invalid("small tier is not a prefix of full".to_string()));
    }

    let tiny = threshold_bits(&bundle.full, dims.tiny_bits, threshold);
    if bundle.tiny != tiny {
        return Err(invalid(format!(
            "tiny sketch {:#x} disagrees with thresholded full {tiny:#x}",
            bundle.tiny
        )));
    }
    let nano = threshold_nano(&bundle.full, dims.nano_bits, threshold);
    if bundle.nano != nano {
        return Err(invalid(format!(
            "nano sketch {:#x} disagrees with thresholded full {nano:#x}",
            bundle.nano
        )));
    }
    Ok(())
}

/// Check that token arrays are parallel, correctly sized, and weighted sanely.
pub fn validate_tokens(tokens: &TokenData, token_dims: usize) -> CascadeResult<()> {
    let n = tokens.tokens.len();
    if tokens.embeddings.len() != n {
        return Err(invalid(format!(
            "{} token embeddings for {n} tokens",
            tokens.embeddings.len()
        )));
    }
    if tokens.weights.len() != n {
        return Err(invalid(format!(
            "{} token weights for {n} tokens",
            tokens.weights.len()
        )));
    }
    if let Some((i, e)) = tokens
        .embeddings
        .iter()
        .enumerate()
        .find(|(_, e)| e.len() != token_dims)
    {
        return Err(invalid(format!(
            "token {i} embedding has {} dims, expected {token_dims}",
            e.len()
        )));
    }
    if let Some((i, w)) = tokens
        .weights
        .iter()
        .enumerate()
        .find(|(_, w)| !(w.is_finite() && **w >= 0.0))
    {
        return Err(invalid(format!("token {i} has invalid weight {w}")));
    }
    Ok(())
}
