//! Logger setup shared by the Roomlink binaries.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, the binary's own target is logged at
/// `default_level` and everything else at `warn`.
///
/// Logs go to stderr so that stdout stays reserved for the rendered transcript.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_target = bin_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,{crate_target}={default_level},roomlink_client={default_level}"
        ))
    });

    // A second initialization (e.g. from tests) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init();
}
