//! Tracing subscriber setup for the binaries

use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a stderr fmt subscriber. `RUST_LOG` wins over `verbose`.
/// Calling twice is harmless; the second install is ignored.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "shotchart=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
    {
        debug!("Logging already initialized: {}", e);
    }
}
