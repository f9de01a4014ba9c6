//! Logging setup for vap-rs.

use tracing_subscriber::EnvFilter;

/// Initialize tracing output to stderr.
///
/// The log level can be controlled via the `RUST_LOG` environment variable.
///
/// Default log levels:
/// - `vap_rs` modules: DEBUG
/// - Other crates: WARN
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vap_rs=debug,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
