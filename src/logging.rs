//! Logging initialization.
//!
//! Uses the `tracing` ecosystem. Log output goes to stderr; stdout is
//! reserved for encoded image bytes and command output.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logging subsystem.
///
/// `verbose` selects DEBUG instead of WARN. The `RUST_LOG` environment
/// variable overrides either.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
