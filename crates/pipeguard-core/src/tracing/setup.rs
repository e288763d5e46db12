//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Pipeguard tracing/logging system.
///
/// Reads the `PIPEGUARD_LOG` environment variable for per-subsystem levels,
/// e.g. `PIPEGUARD_LOG=pipeguard_analysis::task_groups=debug,pipeguard=info`.
/// Falls back to `pipeguard=info` when unset or invalid.
///
/// Idempotent: only the first call installs the subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("PIPEGUARD_LOG")
            .unwrap_or_else(|_| EnvFilter::new("pipeguard=info"));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
        if let Err(e) = installed {
            tracing::debug!(error = %e, "global subscriber already set, keeping it");
        }
    });
}
