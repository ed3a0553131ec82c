use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "NIFTYDASH_LOG";

/// Installs a stderr subscriber so stdout stays machine-readable.
///
/// Filter directives come from `NIFTYDASH_LOG`, then `RUST_LOG`, then `warn`.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Ignore an already-installed global subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
