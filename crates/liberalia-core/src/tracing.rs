use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize structured stdout tracing for a service. Call once at startup.
/// JSON lines, filtered by `RUST_LOG` (default `info`).
///
/// Later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().json())
        .try_init();
}

/// Human-readable stderr tracing for command-line tools.
pub fn init_cli_tracing() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}
