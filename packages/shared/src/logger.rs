//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, the binary itself, the server library
/// and `tower_http` log at `default_level`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_name = bin_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{crate_name}={default_level},chatty_server={default_level},tower_http={default_level}"
        ))
    });

    // Fails only when a global subscriber is already installed.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
