//! Shared subscriber setup for binaries and ad-hoc debugging of tests.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn setup_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
