//! Tracing subscriber setup for hosts embedding the notebook.

/// Install a `fmt` subscriber filtered by `RUST_LOG`, else `default_filter`
///
/// Returns false when a global subscriber was already installed.
pub fn init(default_filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .try_init()
        .is_ok()
}
