//! Tracing/logging initialization.
//!
//! JSON lines on stdout, filtered via `RUST_LOG`. The reservation engine
//! emits commit/restore/status-change events and low-stock warnings through
//! `tracing`; this wires up the subscriber that renders them.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
