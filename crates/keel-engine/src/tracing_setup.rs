//! Tracing subscriber setup for embedders that want keel's logs.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by the `KEEL_LOG` environment
/// variable, defaulting to `info` when unset.
///
/// Uses `try_init` so a host that already installed a global subscriber
/// keeps its own; calling this more than once is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("KEEL_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
