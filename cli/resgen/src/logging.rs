//! Tracing subscriber setup.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `RESGEN_LOG=resgen_graph=debug`.
pub const LOG_ENV: &str = "RESGEN_LOG";

/// Install the global subscriber, writing to stderr.
///
/// Falls back to `warn` when `RESGEN_LOG` is unset or invalid. Safe to call
/// more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
