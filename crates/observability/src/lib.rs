//! Tracing/logging setup shared by binaries and test harnesses.
//!
//! The engine crates only emit `tracing` events; wiring a subscriber is the
//! embedding process's job. This crate gives it one call to do so.

use tracing_subscriber::EnvFilter;

/// Initialize process-wide tracing/logging.
///
/// Reads the filter from `RUST_LOG`, defaulting to `info`. Safe to call
/// multiple times; subsequent calls are no-ops.
pub fn init() {
    init_with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );
}

/// Initialize with an explicit filter (tests typically pass `debug` for the
/// engine crates only).
pub fn init_with_filter(filter: EnvFilter) {
    // JSON logs + timestamps; errors from double-init are discarded.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
