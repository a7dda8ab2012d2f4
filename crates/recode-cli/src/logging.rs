//! Logging setup
//!
//! Diagnostics go to stderr so stdout carries only the per-file report.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter for the given verbosity
#[must_use]
pub fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}

/// Install the global subscriber; later calls keep the first one
pub fn setup_logging(verbose: bool) {
    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(verbose))
        .try_init();

    if let Err(e) = installed {
        tracing::debug!("Logging already set up: {}", e);
    }
}
