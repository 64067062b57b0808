//! Sets up the tracing subscriber for applications embedding the ledger
//! engine.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a pretty-printing tracing subscriber.
///
/// The log level is taken from the `RUST_LOG` environment variable, falling
/// back to `info`. Calling this more than once is a no-op, so tests may call
/// it freely.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty().with_filter(filter))
        .try_init();
}

#[cfg(test)]
mod logging_tests {
    use super::init;

    #[test]
    fn init_twice_does_not_panic() {
        init();
        init();
    }
}
