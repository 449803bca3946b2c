//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize tracing with `default_directive` used when `RUST_LOG` is unset
/// or unparsable (e.g. `"info"` or `"rolegate_auth=trace,info"`).
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_with_default(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // JSON logs + timestamps, configurable via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .try_init()
        .is_ok()
}
