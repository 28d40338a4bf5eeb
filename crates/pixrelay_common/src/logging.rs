//! Logging utilities for the PixRelay application.
//!
//! This module provides a standardized approach to logging across all crates
//! in the PixRelay application. It includes functions for initializing the
//! tracing subscriber.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// Env-filter prefixes match at `::` boundaries, so a single `pixrelay=` prefix
// would never match the actual crate targets. One directive per crate instead.
const CRATE_TARGETS: [&str; 4] = [
    "pixrelay_backend",
    "pixrelay_common",
    "pixrelay_config",
    "pixrelay_sacapay",
];

/// Initialize the tracing subscriber.
///
/// This function should be called at the start of the application to set up
/// logging. It configures the tracing subscriber with the specified log level
/// and formats log messages with timestamps, log levels, targets, and file/line
/// information.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// # Arguments
///
/// * `level` - The minimum log level to display.
pub fn init_with_level(level: Level) {
    let filter = build_filter(level);

    // Use try_init to handle the case where a global default subscriber has already been set
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Builds the env filter: RUST_LOG directives layered over a per-crate
/// directive for each workspace crate at `level`.
fn build_filter(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    for target in CRATE_TARGETS {
        filter = filter.add_directive(format!("{}={}", target, level).parse().unwrap());
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_carries_a_directive_for_every_workspace_crate() {
        let rendered = build_filter(Level::INFO).to_string();
        for target in CRATE_TARGETS {
            assert!(
                rendered.contains(&format!("{}=info", target)),
                "missing directive for {}",
                target
            );
        }
    }
}
