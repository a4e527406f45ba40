//! Logging initialization.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logging system with tracing.
///
/// Sets up tracing-subscriber with environment-based filtering
/// (`RUST_LOG`), defaulting to `info` globally and `debug` for this crate.
/// Structural scene-graph events (spawn/attach/detach/despawn, context
/// loss) are emitted at debug level with node names attached.
///
/// Call once at startup; the scene graph itself never installs a
/// subscriber.
///
/// # Example
/// ```no_run
/// arbor::init_logging();
/// tracing::info!("scene graph ready");
/// ```
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,arbor=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
