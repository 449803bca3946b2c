//! Process-wide tracing/logging setup shared by rolegate binaries.
//!
//! Library crates only emit `tracing` events; binaries call [`init`] once.

/// Initialize process-wide observability (JSON logs, `RUST_LOG` filter).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_with_default("info");
}

/// Tracing configuration (filters, layers).
pub mod tracing;
