//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the scandoc tracing/logging system.
///
/// Reads `SCANDOC_LOG` for per-subsystem log levels, e.g.
/// `SCANDOC_LOG=extract=debug,resolve=info`. Falls back to `scandoc=info`
/// if `SCANDOC_LOG` is not set or is invalid.
///
/// Idempotent; calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("SCANDOC_LOG")
            .unwrap_or_else(|_| EnvFilter::new("scandoc=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();

        tracing::debug!("tracing initialized");
    });
}
