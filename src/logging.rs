//! Logging utilities for llm-server-smoke
//!
//! Re-exports tracing macros with log_* naming. Diagnostics go through these
//! macros so stdout stays reserved for the smoke-test transcript.

pub use tracing::{debug as log_debug, error as log_error, info as log_info, warn as log_warn};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr subscriber used by the binary
///
/// `RUST_LOG` overrides the default `warn` filter. A second install is ignored.
pub fn init_stderr_subscriber() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
