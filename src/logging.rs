//! Diagnostic logging setup.
//!
//! The crate logs through `tracing`; the binary installs a compact console
//! subscriber. `RUST_LOG` overrides the filter passed on the command line.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when neither `--log` nor `RUST_LOG` is given
pub const DEFAULT_FILTER: &str = "info,research_chat=debug";

/// Install the global subscriber.
///
/// Returns an error if a subscriber is already installed, which callers
/// that may run more than once (tests) can ignore.
pub fn init(filter: Option<&str>) -> Result<(), String> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_FILTER)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false).compact())
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {e}"))
}
