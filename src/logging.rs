//! Diagnostic tracing for the edict binary.
//!
//! Library code only emits `tracing` events; the subscriber is installed by
//! the CLI. Rendered documents and the audit log are unaffected by the
//! filter level.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "EDICT_LOG";

/// Initialize the tracing subscriber.
///
/// Reads `EDICT_LOG`. Defaults to `warn` if unset or invalid.
/// Output: stderr, compact format.
///
/// ```bash
/// EDICT_LOG=edict=debug edict lint commands.yaml
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // Ignore a second init.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
