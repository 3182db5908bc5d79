//! Tracing subscriber setup.
//!
//! Diagnostics go to stderr so stdout carries only command output.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_LEVEL: &str = "info";

/// Install the global subscriber. `RUST_LOG` wins over `level`, which wins
/// over [`DEFAULT_LEVEL`]. Calling this again is a no-op.
pub fn init(level: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_LEVEL)));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
