//! logging
//!
//! Diagnostic logging bootstrap.
//!
//! Diagnostics go to stderr through `tracing`, leaving stdout for reports.
//! `--debug` forces `syllabus=debug`; otherwise `RUST_LOG` is honoured and
//! the default is `warn`.
//!
//! # Invariants
//!
//! - Initialization never panics
//! - A second initialization is a no-op (tests and embedders may call it)

use tracing_subscriber::EnvFilter;

const DEBUG_FILTER: &str = "syllabus=debug";
const DEFAULT_FILTER: &str = "warn";

/// Build the filter for the given flag.
pub fn filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber.
pub fn init(debug: bool) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .is_ok();

    if installed {
        let debug_logging = debug;
        tracing::debug!(debug_logging, "logging initialized");
    }
}
