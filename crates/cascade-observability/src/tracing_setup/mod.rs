//! Tracing setup: an `EnvFilter`-gated `fmt` subscriber, JSON or plain.

pub mod spans;

use cascade_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Filter read from `config.env_var`, falling back to `config.log_level`,
/// then to `info`.
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_env(&config.env_var)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Returns `false` if a global subscriber was already set; the existing
/// one is left in place.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = build_filter(config);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json {
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
            .is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        tracing::debug!(
            level = %config.log_level,
            json = config.json,
            env_var = %config.env_var,
            "tracing initialised"
        );
    }
    installed
}
