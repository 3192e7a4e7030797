//! Diagnostic logging setup

use tracing_subscriber::{fmt, EnvFilter};

/// Route `tracing` output to stderr, filtered by `RUST_LOG` (default `warn`).
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
