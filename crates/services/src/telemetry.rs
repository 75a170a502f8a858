//! Logging setup for hosts embedding the quiz engine.

use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global `fmt` subscriber filtered at `level`.
///
/// Returns `false` if a global subscriber was already set, so calling this
/// more than once (e.g. from several tests) is harmless.
pub fn init_tracing(level: Level) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::new(level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
