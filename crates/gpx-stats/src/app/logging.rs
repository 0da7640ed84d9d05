use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr so stdout only carries the report.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` applies.
pub fn setup_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {e}");
    }
}

/// Log version info
pub fn log_version_info() {
    tracing::info!(
        "{} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        }
    );
}
